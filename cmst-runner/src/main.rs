use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{arg, ArgAction, ArgMatches, Command};

use cmst_algorithms::{run_greedy, run_randomized, run_reactive};
use cmst_core::{generate_instance, GenerateConfig, Graph, Solution};
use cmst_utils::{
    format_instance, load_instance, render_edges, render_report, CsvSink, RandomSource, RunSummary,
};

fn cli() -> Command {
    Command::new("cmst-runner")
        .about("Constructs capacitated minimum spanning trees with GRASP heuristics")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("greedy")
                .about("Deterministic greedy construction")
                .arg(
                    arg!(<INSTANCE> "Path to an OR-Library instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--csv [CSV] "CSV file the run summary is appended to")
                        .default_value("results.csv")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(arg!(--json "Also print the run summary as JSON").action(ArgAction::SetTrue))
                .arg(arg!(--verbose "Print a detailed solution report").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("randomized")
                .about("Randomized greedy construction with a fixed alpha")
                .arg(
                    arg!(<INSTANCE> "Path to an OR-Library instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--alpha [ALPHA] "Randomization parameter in [0, 1]")
                        .default_value("0.3")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    arg!(--iters [ITERS] "Number of constructions")
                        .default_value("30")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed for the random source")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--csv [CSV] "CSV file the run summary is appended to")
                        .default_value("results.csv")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(arg!(--json "Also print the run summary as JSON").action(ArgAction::SetTrue))
                .arg(arg!(--verbose "Print a detailed solution report").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("reactive")
                .about("Reactive GRASP over a pool of alpha values")
                .arg(
                    arg!(<INSTANCE> "Path to an OR-Library instance file")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--alphas [ALPHAS] "Comma-separated alpha pool")
                        .default_value("0.1,0.3,0.5")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--iters [ITERS] "Number of constructions")
                        .default_value("300")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--block [BLOCK] "Iterations between probability updates")
                        .default_value("30")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed for the random source")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    arg!(--csv [CSV] "CSV file the run summary is appended to")
                        .default_value("results.csv")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(arg!(--json "Also print the run summary as JSON").action(ArgAction::SetTrue))
                .arg(arg!(--verbose "Print a detailed solution report").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("generate")
                .about("Generates a random clustered instance")
                .arg(
                    arg!(<OUTPUT> "Path the instance file is written to")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--vertices [VERTICES] "Number of vertices")
                        .default_value("30")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--capacity [CAPACITY] "Capacity bound per root subtree")
                        .default_value("10")
                        .value_parser(clap::value_parser!(i32)),
                )
                .arg(
                    arg!(--"max-demand" [MAX_DEMAND] "Demands are uniform in [1, max]")
                        .default_value("3")
                        .value_parser(clap::value_parser!(i32)),
                )
                .arg(
                    arg!(--seed [SEED] "Seed for the generator")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
}

fn main() {
    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("greedy", sub_m)) => cmd_greedy(sub_m),
        Some(("randomized", sub_m)) => cmd_randomized(sub_m),
        Some(("reactive", sub_m)) => cmd_reactive(sub_m),
        Some(("generate", sub_m)) => cmd_generate(sub_m),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_greedy(sub_m: &ArgMatches) -> Result<()> {
    let graph = load_instance(sub_m.get_one::<PathBuf>("INSTANCE").unwrap())?;
    let (solution, summary) = run_greedy(&graph);
    report(&graph, &solution, &summary, sub_m)
}

fn cmd_randomized(sub_m: &ArgMatches) -> Result<()> {
    let graph = load_instance(sub_m.get_one::<PathBuf>("INSTANCE").unwrap())?;
    let alpha = *sub_m.get_one::<f64>("alpha").unwrap();
    if !(0.0..=1.0).contains(&alpha) {
        return Err(anyhow!("Alpha must be in [0, 1], got {}", alpha));
    }
    let iters = *sub_m.get_one::<usize>("iters").unwrap();
    let mut rng = random_source(sub_m);

    let (solution, summary) = run_randomized(&graph, alpha, iters, &mut rng);
    report(&graph, &solution, &summary, sub_m)
}

fn cmd_reactive(sub_m: &ArgMatches) -> Result<()> {
    let graph = load_instance(sub_m.get_one::<PathBuf>("INSTANCE").unwrap())?;
    let alphas = parse_alphas(sub_m.get_one::<String>("alphas").unwrap());
    if alphas.is_empty() {
        return Err(anyhow!("Alpha pool is empty after dropping invalid values"));
    }
    let iters = *sub_m.get_one::<usize>("iters").unwrap();
    let block = *sub_m.get_one::<usize>("block").unwrap();
    let mut rng = random_source(sub_m);

    let (solution, summary) = run_reactive(&graph, &alphas, iters, block, &mut rng);
    report(&graph, &solution, &summary, sub_m)
}

fn cmd_generate(sub_m: &ArgMatches) -> Result<()> {
    let output = sub_m.get_one::<PathBuf>("OUTPUT").unwrap();
    let config = GenerateConfig {
        num_vertices: *sub_m.get_one::<usize>("vertices").unwrap(),
        capacity: *sub_m.get_one::<i32>("capacity").unwrap(),
        max_demand: *sub_m.get_one::<i32>("max-demand").unwrap(),
    };
    let seed = sub_m
        .get_one::<u64>("seed")
        .copied()
        .unwrap_or_else(|| RandomSource::from_clock().seed());

    let graph = generate_instance(seed, &config);
    fs::write(output, format_instance(&graph))
        .map_err(|e| anyhow!("Cannot write '{}': {}", output.display(), e))?;

    println!(
        "Generated {} ({} vertices, capacity {}, total demand {}, seed {})",
        output.display(),
        graph.vertex_count(),
        graph.capacity(),
        graph.total_demand(),
        seed
    );
    Ok(())
}

fn report(graph: &Graph, solution: &Solution, summary: &RunSummary, sub_m: &ArgMatches) -> Result<()> {
    let sink = CsvSink::new(sub_m.get_one::<PathBuf>("csv").unwrap());
    sink.append(summary)?;

    println!("=== Result ===");
    println!("Algorithm: {}", summary.algorithm);
    if let Some(seed) = summary.seed {
        println!("Seed: {}", seed);
    }
    println!("Time: {:.6} seconds", summary.elapsed_seconds);
    println!("Best cost: {:.2}", summary.best_cost);
    if let Some(mean) = summary.mean_cost {
        println!("Mean cost: {:.2}", mean);
    }
    if let Some(alpha) = summary.best_alpha {
        println!("Best alpha: {:.2}", alpha);
    }
    if let Some(optimal) = summary.best_known {
        println!("Known optimum: {:.2}", optimal);
        if let Some(deviation) = summary.deviation_percent() {
            println!("Deviation: {:.2}%", deviation);
        }
    }
    println!(
        "Feasible: {}, complete: {}",
        if solution.is_valid() { "yes" } else { "no" },
        if solution.is_complete(graph) { "yes" } else { "no" }
    );
    println!("Summary appended to: {}", sink.path().display());

    println!("\n=== Edges ===");
    print!("{}", render_edges(graph, solution));

    if sub_m.get_flag("verbose") {
        println!("\n{}", render_report(graph, solution));
    }
    if sub_m.get_flag("json") {
        println!("\n{}", serde_json::to_string_pretty(summary)?);
    }
    Ok(())
}

fn random_source(sub_m: &ArgMatches) -> RandomSource {
    match sub_m.get_one::<u64>("seed") {
        Some(&seed) => RandomSource::from_seed(seed),
        None => RandomSource::from_clock(),
    }
}

/// Parses a comma-separated alpha list, silently dropping values
/// outside [0, 1] or unparseable entries.
fn parse_alphas(text: &str) -> Vec<f64> {
    text.split(',')
        .filter_map(|item| item.trim().parse::<f64>().ok())
        .filter(|a| (0.0..=1.0).contains(a))
        .collect()
}
