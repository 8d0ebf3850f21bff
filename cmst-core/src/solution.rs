use std::collections::{HashSet, VecDeque};

use crate::graph::Graph;

/// Subtree id of a vertex that is not reachable from the root.
pub const UNASSIGNED: i32 = -1;

/// A (possibly partial) rooted spanning tree, stored as a parent per
/// vertex. Subtree ids are derived data: 0 for the root, 1..k for the
/// maximal subtrees hanging off the root's direct children, and
/// [`UNASSIGNED`] for vertices without a path to the root.
///
/// Solutions are plain values. Keeping a best-so-far snapshot while a
/// working copy keeps mutating is a `clone()`, never a shared reference.
#[derive(Debug, Clone)]
pub struct Solution {
    parent: Vec<Option<usize>>,
    subtree: Vec<i32>,
    total_cost: f64,
    valid: bool,
}

impl Solution {
    /// A root-only solution: every other vertex unparented.
    pub fn new(graph: &Graph) -> Self {
        let n = graph.vertex_count();
        let mut subtree = vec![UNASSIGNED; n];
        if n > 0 {
            subtree[graph.root()] = 0;
        }
        Self {
            parent: vec![None; n],
            subtree,
            total_cost: 0.0,
            valid: false,
        }
    }

    /// Attaches `vertex` under `parent`. Out-of-range vertices are a
    /// no-op. Any mutation leaves the solution not-yet-validated until
    /// the next `check_feasibility`.
    pub fn set_parent(&mut self, vertex: usize, parent: usize) {
        if vertex < self.parent.len() {
            self.parent[vertex] = Some(parent);
            self.valid = false;
        }
    }

    pub fn parent(&self, vertex: usize) -> Option<usize> {
        self.parent.get(vertex).copied().flatten()
    }

    /// Derived subtree id of a vertex; [`UNASSIGNED`] when out of range
    /// or not reachable in the last `identify_subtrees` pass.
    pub fn subtree(&self, vertex: usize) -> i32 {
        self.subtree.get(vertex).copied().unwrap_or(UNASSIGNED)
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// True when every non-root vertex has a parent. Completeness is a
    /// separate query from feasibility; an incomplete solution can
    /// still pass the capacity check.
    pub fn is_complete(&self, graph: &Graph) -> bool {
        let root = graph.root();
        self.parent
            .iter()
            .enumerate()
            .all(|(v, p)| v == root || p.is_some())
    }

    /// Sums the cost of every assigned parent edge and stores the total.
    pub fn recompute_cost(&mut self, graph: &Graph) -> f64 {
        let root = graph.root();
        self.total_cost = self
            .parent
            .iter()
            .enumerate()
            .filter(|&(v, _)| v != root)
            .filter_map(|(v, p)| p.map(|p| graph.cost(v, p)))
            .sum();
        self.total_cost
    }

    /// Rebuilds the subtree ids with a breadth-first traversal seeded
    /// from each direct child of the root, in child discovery order.
    pub fn identify_subtrees(&mut self, graph: &Graph) {
        let n = graph.vertex_count();
        let root = graph.root();

        self.subtree.iter_mut().for_each(|s| *s = UNASSIGNED);
        if n == 0 {
            return;
        }
        self.subtree[root] = 0;

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        for v in 0..n {
            if v != root {
                if let Some(p) = self.parent[v] {
                    if p < n {
                        children[p].push(v);
                    }
                }
            }
        }

        let mut next_id = 1;
        for &child in &children[root] {
            let mut queue = VecDeque::new();
            queue.push_back(child);
            self.subtree[child] = next_id;

            while let Some(current) = queue.pop_front() {
                for &c in &children[current] {
                    self.subtree[c] = next_id;
                    queue.push_back(c);
                }
            }
            next_id += 1;
        }
    }

    /// Re-derives the subtrees and checks every one against the
    /// capacity bound, updating and returning the validity flag.
    pub fn check_feasibility(&mut self, graph: &Graph) -> bool {
        self.identify_subtrees(graph);

        let capacity = graph.capacity();
        let count = self.subtree_count();
        for id in 1..=count as i32 {
            if self.subtree_demand(graph, id) > capacity {
                self.valid = false;
                return false;
            }
        }
        self.valid = true;
        true
    }

    /// Total demand of the vertices currently labelled with `id`.
    pub fn subtree_demand(&self, graph: &Graph, id: i32) -> i32 {
        self.subtree
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == id)
            .map(|(v, _)| graph.demand(v))
            .sum()
    }

    pub fn subtree_vertices(&self, id: i32) -> Vec<usize> {
        self.subtree
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s == id)
            .map(|(v, _)| v)
            .collect()
    }

    /// Number of distinct root subtrees in the last derivation.
    pub fn subtree_count(&self) -> usize {
        self.subtree
            .iter()
            .filter(|&&s| s > 0)
            .collect::<HashSet<_>>()
            .len()
    }

    /// The assigned parent edges as `(parent, child)` pairs, ordered by
    /// child index. Root and unparented vertices are skipped.
    pub fn edges(&self, graph: &Graph) -> Vec<(usize, usize)> {
        let root = graph.root();
        self.parent
            .iter()
            .enumerate()
            .filter(|&(v, _)| v != root)
            .filter_map(|(v, p)| p.map(|p| (p, v)))
            .collect()
    }

    /// Resets to a root-only solution.
    pub fn clear(&mut self, graph: &Graph) {
        self.parent.iter_mut().for_each(|p| *p = None);
        self.subtree.iter_mut().for_each(|s| *s = UNASSIGNED);
        if !self.subtree.is_empty() {
            self.subtree[graph.root()] = 0;
        }
        self.total_cost = 0.0;
        self.valid = false;
    }
}
