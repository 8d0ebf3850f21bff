use std::time::Instant;

use cmst_core::{generate_candidates, Graph, Solution, SubtreeCache};
use cmst_utils::{RandomSource, RunSummary};

/// Builds a solution with the deterministic greedy rule: at every step
/// take the single cheapest feasible attachment. Same graph, same tree.
pub fn build_greedy(graph: &Graph) -> Solution {
    let n = graph.vertex_count();
    let root = graph.root();
    let mut solution = Solution::new(graph);
    let mut cache = SubtreeCache::new(graph);
    cache.rebuild(graph, &solution);

    let mut connected = vec![false; n];
    if n > 0 {
        connected[root] = true;
    }
    let mut num_connected = 1;

    while num_connected < n {
        let candidates = generate_candidates(graph, &solution, &mut cache, &connected);

        let (vertex, parent) = if let Some(best) = candidates.first() {
            (best.vertex, best.parent)
        } else {
            // Dead end: force a fresh subtree for the first vertex that
            // still fits directly under the root.
            match fallback_vertices(graph, &connected).first() {
                Some(&v) => (v, root),
                None => break,
            }
        };

        solution.set_parent(vertex, parent);
        connected[vertex] = true;
        num_connected += 1;
        cache.record_insertion(graph, &solution, vertex, parent);
    }

    solution.recompute_cost(graph);
    solution.check_feasibility(graph);
    solution
}

/// Builds a solution with the randomized greedy rule: at every step
/// sample uniformly from a restricted candidate list holding the
/// `max(1, floor(alpha * len))` cheapest feasible attachments. With
/// `alpha = 0` this degenerates to [`build_greedy`] step for step.
pub fn build_randomized(graph: &Graph, alpha: f64, rng: &mut RandomSource) -> Solution {
    let n = graph.vertex_count();
    let root = graph.root();
    let mut solution = Solution::new(graph);
    let mut cache = SubtreeCache::new(graph);
    cache.rebuild(graph, &solution);

    let mut connected = vec![false; n];
    if n > 0 {
        connected[root] = true;
    }
    let mut num_connected = 1;

    while num_connected < n {
        let candidates = generate_candidates(graph, &solution, &mut cache, &connected);

        let (vertex, parent) = if candidates.is_empty() {
            // Dead end: same root-attachment fallback as the greedy
            // variant, but the vertex is drawn uniformly.
            let eligible = fallback_vertices(graph, &connected);
            if eligible.is_empty() {
                break;
            }
            (eligible[rng.next_index(0, eligible.len() - 1)], root)
        } else {
            let rcl_len = ((alpha * candidates.len() as f64).floor() as usize)
                .max(1)
                .min(candidates.len());
            let chosen = candidates[rng.next_index(0, rcl_len - 1)];
            (chosen.vertex, chosen.parent)
        };

        solution.set_parent(vertex, parent);
        connected[vertex] = true;
        num_connected += 1;
        cache.record_insertion(graph, &solution, vertex, parent);
    }

    solution.recompute_cost(graph);
    solution.check_feasibility(graph);
    solution
}

/// Runs the deterministic greedy construction once and reports it.
pub fn run_greedy(graph: &Graph) -> (Solution, RunSummary) {
    let t0 = Instant::now();
    let solution = build_greedy(graph);

    let mut summary = RunSummary::new(graph, "greedy");
    summary.elapsed_seconds = t0.elapsed().as_secs_f64();
    summary.best_cost = solution.total_cost();
    summary.best_known = graph.best_known();
    (solution, summary)
}

/// Runs `iterations` randomized constructions with a fixed alpha,
/// keeping the cheapest feasible one. Infeasible iterations count
/// toward the mean but are never promoted to best.
pub fn run_randomized(
    graph: &Graph,
    alpha: f64,
    iterations: usize,
    rng: &mut RandomSource,
) -> (Solution, RunSummary) {
    let t0 = Instant::now();

    let mut best = Solution::new(graph);
    let mut best_cost = f64::INFINITY;
    let mut cost_sum = 0.0;

    for _ in 0..iterations {
        let current = build_randomized(graph, alpha, rng);
        let cost = current.total_cost();
        cost_sum += cost;

        if cost < best_cost && current.is_valid() {
            best_cost = cost;
            best = current;
        }
    }

    let mut summary = RunSummary::new(graph, "randomized");
    summary.alpha = Some(alpha);
    summary.iterations = Some(iterations);
    summary.seed = Some(rng.seed());
    summary.elapsed_seconds = t0.elapsed().as_secs_f64();
    summary.best_cost = best_cost;
    summary.mean_cost = (iterations > 0).then(|| cost_sum / iterations as f64);
    summary.best_known = graph.best_known();
    (best, summary)
}

fn fallback_vertices(graph: &Graph, connected: &[bool]) -> Vec<usize> {
    let root = graph.root();
    let capacity = graph.capacity();
    (0..graph.vertex_count())
        .filter(|&v| !connected[v] && graph.has_edge(v, root) && graph.demand(v) <= capacity)
        .collect()
}
