use cmst_algorithms::run_reactive;
use cmst_core::{generate_instance, GenerateConfig, Graph};
use cmst_utils::RandomSource;

fn clustered_graph(seed: u64) -> Graph {
    let config = GenerateConfig {
        num_vertices: 20,
        capacity: 8,
        max_demand: 3,
    };
    generate_instance(seed, &config)
}

#[test]
fn test_empty_alpha_pool_returns_root_only_solution() {
    let g = clustered_graph(3);
    let mut rng = RandomSource::from_seed(1);
    let (solution, summary) = run_reactive(&g, &[], 100, 10, &mut rng);

    assert!(summary.best_cost.is_infinite());
    assert_eq!(summary.best_alpha, None);
    assert!(solution.edges(&g).is_empty());
    assert!(!solution.is_complete(&g));
}

#[test]
fn test_single_alpha_pool() {
    let g = clustered_graph(19);
    let mut rng = RandomSource::from_seed(4);
    let (solution, summary) = run_reactive(&g, &[0.3], 20, 5, &mut rng);

    assert!(solution.is_valid());
    assert!(solution.is_complete(&g));
    assert!(summary.best_cost.is_finite());
    assert_eq!(summary.best_alpha, Some(0.3));
    assert_eq!(summary.iterations, Some(20));
    assert_eq!(summary.block_size, Some(5));
    assert_eq!(summary.seed, Some(4));
    let mean = summary.mean_cost.expect("mean over 20 iterations");
    assert!(summary.best_cost <= mean);
}

#[test]
fn test_reactive_is_reproducible() {
    let g = clustered_graph(29);
    let alphas = [0.1, 0.3, 0.5];

    let mut rng_a = RandomSource::from_seed(123);
    let (sol_a, sum_a) = run_reactive(&g, &alphas, 60, 15, &mut rng_a);
    let mut rng_b = RandomSource::from_seed(123);
    let (sol_b, sum_b) = run_reactive(&g, &alphas, 60, 15, &mut rng_b);

    assert_eq!(sum_a.best_cost, sum_b.best_cost);
    assert_eq!(sum_a.best_alpha, sum_b.best_alpha);
    for v in 0..g.vertex_count() {
        assert_eq!(sol_a.parent(v), sol_b.parent(v));
    }
}

#[test]
fn test_reactive_best_is_no_worse_than_any_block() {
    let g = clustered_graph(41);
    let mut rng = RandomSource::from_seed(9);
    let (solution, summary) = run_reactive(&g, &[0.1, 0.3, 0.5], 90, 30, &mut rng);

    assert!(solution.is_valid());
    assert_eq!(summary.best_cost, solution.total_cost());
    assert!(summary.best_alpha.is_some());
}

#[test]
fn test_oversized_vertex_terminates_with_incomplete_best() {
    // Vertex 3 can never be connected: its demand exceeds the capacity
    // outright. The controller must still run to its budget and stop.
    let mut g = Graph::new(4, 2);
    g.set_edge(0, 1, 1.0);
    g.set_edge(0, 2, 5.0);
    g.set_edge(0, 3, 9.0);
    g.set_edge(1, 2, 2.0);
    g.set_edge(1, 3, 6.0);
    g.set_edge(2, 3, 3.0);
    g.set_demand(3, 5);

    let mut rng = RandomSource::from_seed(2);
    let (solution, summary) = run_reactive(&g, &[0.2, 0.6], 40, 10, &mut rng);

    assert!(!solution.is_complete(&g));
    assert_eq!(solution.parent(3), None);
    assert!(summary.best_cost.is_finite());
}

#[test]
fn test_block_size_zero_is_tolerated() {
    let g = clustered_graph(55);
    let mut rng = RandomSource::from_seed(6);
    let (solution, summary) = run_reactive(&g, &[0.2, 0.4], 10, 0, &mut rng);

    assert!(solution.is_valid());
    assert!(summary.best_cost.is_finite());
}
