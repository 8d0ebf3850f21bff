use std::cmp::Ordering;

use crate::cache::SubtreeCache;
use crate::graph::Graph;
use crate::solution::Solution;

/// One feasible attach move: connect `vertex` under `parent` at `cost`,
/// landing in the parent's subtree. Candidate lists are ephemeral and
/// recomputed fresh at every construction step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub vertex: usize,
    pub parent: usize,
    pub cost: f64,
    pub subtree: i32,
}

/// Enumerates every capacity-feasible (vertex, parent) pair between the
/// unconnected and connected partitions, sorted ascending by edge cost.
/// Ties keep generation order.
pub fn generate_candidates(
    graph: &Graph,
    solution: &Solution,
    cache: &mut SubtreeCache,
    connected: &[bool],
) -> Vec<Candidate> {
    let n = graph.vertex_count();

    let mut unconnected = Vec::with_capacity(n);
    let mut connected_list = Vec::with_capacity(n);
    for v in 0..n {
        if connected.get(v).copied().unwrap_or(false) {
            connected_list.push(v);
        } else {
            unconnected.push(v);
        }
    }

    let mut candidates = Vec::with_capacity(unconnected.len() * connected_list.len() / 4);
    for &v in &unconnected {
        for &p in &connected_list {
            if !graph.has_edge(v, p) {
                continue;
            }
            if !cache.can_attach(graph, solution, v, p) {
                continue;
            }
            candidates.push(Candidate {
                vertex: v,
                parent: p,
                cost: graph.cost(v, p),
                subtree: cache.subtree_of(graph, solution, p),
            });
        }
    }

    candidates.sort_by(|a, b| a.cost.partial_cmp(&b.cost).unwrap_or(Ordering::Equal));
    candidates
}
