use std::time::Instant;

use cmst_core::{Graph, Solution};
use cmst_utils::{RandomSource, RunSummary};

use crate::constructive::build_randomized;

// Exponent applied to the per-alpha quality ratio before renormalizing
// the selection probabilities.
const AMPLIFICATION: i32 = 3;

// Quality assigned to alphas that have not produced a finite cost yet.
const QUALITY_FLOOR: f64 = 0.1;

/// Reactive GRASP: repeatedly constructs randomized solutions, drawing
/// the alpha for each iteration from a probability vector that is
/// re-weighted every `block_size` iterations toward the alphas that
/// produced the best solutions so far.
///
/// An empty alpha pool returns a root-only solution with reported cost
/// `+inf` without entering the loop.
pub fn run_reactive(
    graph: &Graph,
    alphas: &[f64],
    iterations: usize,
    block_size: usize,
    rng: &mut RandomSource,
) -> (Solution, RunSummary) {
    let t0 = Instant::now();

    let mut summary = RunSummary::new(graph, "reactive");
    summary.iterations = Some(iterations);
    summary.block_size = Some(block_size);
    summary.seed = Some(rng.seed());
    summary.best_known = graph.best_known();

    let num_alphas = alphas.len();
    if num_alphas == 0 {
        summary.elapsed_seconds = t0.elapsed().as_secs_f64();
        return (Solution::new(graph), summary);
    }
    let block_size = block_size.max(1);

    let mut probability = vec![1.0 / num_alphas as f64; num_alphas];
    let mut usage_count = vec![0usize; num_alphas];
    let mut best_for_alpha = vec![f64::INFINITY; num_alphas];

    let mut best = Solution::new(graph);
    let mut best_cost = f64::INFINITY;
    let mut best_alpha_idx = 0;
    let mut cost_sum = 0.0;

    for iter in 0..iterations {
        // Categorical draw over the current distribution.
        let r = rng.next_unit();
        let mut cumulative = 0.0;
        let mut alpha_idx = 0;
        for (i, &p) in probability.iter().enumerate() {
            cumulative += p;
            if r <= cumulative {
                alpha_idx = i;
                break;
            }
        }

        let current = build_randomized(graph, alphas[alpha_idx], rng);
        let cost = current.total_cost();
        cost_sum += cost;

        usage_count[alpha_idx] += 1;
        if cost < best_for_alpha[alpha_idx] {
            best_for_alpha[alpha_idx] = cost;
        }
        if cost < best_cost && current.is_valid() {
            best_cost = cost;
            best = current;
            best_alpha_idx = alpha_idx;
        }

        // Block boundary: re-weight the alpha distribution from the
        // quality observed so far. Needs a finite global best before
        // the ratios are usable.
        if (iter + 1) % block_size == 0 && iter > 0 && best_cost.is_finite() {
            let mut quality = vec![0.0; num_alphas];
            let mut quality_sum = 0.0;
            for i in 0..num_alphas {
                quality[i] = if usage_count[i] > 0 && best_for_alpha[i].is_finite() {
                    (best_cost / best_for_alpha[i]).powi(AMPLIFICATION)
                } else {
                    QUALITY_FLOOR
                };
                quality_sum += quality[i];
            }
            if quality_sum > 0.0 {
                for i in 0..num_alphas {
                    probability[i] = quality[i] / quality_sum;
                }
            }
        }
    }

    summary.elapsed_seconds = t0.elapsed().as_secs_f64();
    summary.best_cost = best_cost;
    summary.mean_cost = (iterations > 0).then(|| cost_sum / iterations as f64);
    summary.best_alpha = Some(alphas[best_alpha_idx]);
    (best, summary)
}
