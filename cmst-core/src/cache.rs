use ahash::AHashMap;

use crate::graph::Graph;
use crate::solution::Solution;

/// Incremental index from vertex to enclosing root-subtree id and from
/// subtree id to accumulated demand.
///
/// This is a pure performance layer over walking parent chains. The
/// construction loop must call [`SubtreeCache::record_insertion`] for
/// every edge it accepts; skipping one silently diverges the cache from
/// the solution. Mutating the solution through any other path requires
/// [`SubtreeCache::invalidate`], after which the next query rebuilds.
#[derive(Debug, Clone)]
pub struct SubtreeCache {
    vertex_subtree: Vec<i32>,
    subtree_demand: Vec<i32>,
    root_child_subtree: AHashMap<usize, i32>,
    next_subtree_id: i32,
    valid: bool,
}

impl SubtreeCache {
    pub fn new(graph: &Graph) -> Self {
        let n = graph.vertex_count();
        Self {
            vertex_subtree: vec![-1; n],
            subtree_demand: vec![0; n + 1],
            root_child_subtree: AHashMap::new(),
            next_subtree_id: 1,
            valid: false,
        }
    }

    /// Full O(V) rebuild from the solution's current parent edges.
    pub fn rebuild(&mut self, graph: &Graph, solution: &Solution) {
        let n = graph.vertex_count();
        let root = graph.root();

        self.reset();
        if n == 0 {
            self.valid = true;
            return;
        }
        self.vertex_subtree[root] = 0;

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        for v in 0..n {
            if v != root {
                if let Some(p) = solution.parent(v) {
                    if p < n {
                        children[p].push(v);
                    }
                }
            }
        }

        for &child in &children[root] {
            let id = self.next_subtree_id;
            self.next_subtree_id += 1;
            self.root_child_subtree.insert(child, id);
            self.vertex_subtree[child] = id;
            self.grow_demand_slot(id);
            self.subtree_demand[id as usize] = graph.demand(child);

            let mut queue = vec![child];
            let mut head = 0;
            while head < queue.len() {
                let current = queue[head];
                head += 1;
                for &c in &children[current] {
                    self.vertex_subtree[c] = id;
                    self.subtree_demand[id as usize] += graph.demand(c);
                    queue.push(c);
                }
            }
        }

        self.valid = true;
    }

    /// Accounts for one accepted edge `vertex -> parent`. Amortized
    /// O(1); falls back to a chain walk when the parent is not cached.
    pub fn record_insertion(&mut self, graph: &Graph, solution: &Solution, vertex: usize, parent: usize) {
        if vertex >= graph.vertex_count() {
            return;
        }
        let root = graph.root();
        let demand = graph.demand(vertex);

        if parent == root {
            let id = self.next_subtree_id;
            self.next_subtree_id += 1;
            self.root_child_subtree.insert(vertex, id);
            self.vertex_subtree[vertex] = id;
            self.grow_demand_slot(id);
            self.subtree_demand[id as usize] = demand;
        } else {
            let mut id = -1;
            if self.valid && parent < self.vertex_subtree.len() {
                id = self.vertex_subtree[parent];
            }
            if id <= 0 {
                id = self.subtree_of(graph, solution, parent);
                // The stale-cache path rebuilds, which already accounts
                // for every vertex the solution holds.
                if self.vertex_subtree.get(vertex).copied().unwrap_or(-1) >= 0 {
                    return;
                }
            }
            if id > 0 {
                self.vertex_subtree[vertex] = id;
                self.grow_demand_slot(id);
                self.subtree_demand[id as usize] += demand;
            }
        }
    }

    /// Subtree id enclosing `vertex`: 0 for the root, -1 when not
    /// connected. O(1) when cached; otherwise walks parent pointers up
    /// to the direct root child and resolves its id through the
    /// child map, counting positionally among the root's children as a
    /// last resort.
    pub fn subtree_of(&mut self, graph: &Graph, solution: &Solution, vertex: usize) -> i32 {
        let root = graph.root();
        if vertex == root {
            return 0;
        }
        if !self.valid {
            self.rebuild(graph, solution);
        }
        if let Some(&id) = self.vertex_subtree.get(vertex) {
            if id >= 0 {
                return id;
            }
        }

        let n = graph.vertex_count();
        let mut current = vertex;
        let mut steps = 0;
        while current != root && steps <= n {
            steps += 1;
            let Some(p) = solution.parent(current) else {
                return -1;
            };
            if p == root {
                if let Some(&id) = self.root_child_subtree.get(&current) {
                    return id;
                }
                let mut idx = 1;
                for v in 0..n {
                    if v != root && solution.parent(v) == Some(root) {
                        if v == current {
                            return idx;
                        }
                        idx += 1;
                    }
                }
                return -1;
            }
            current = p;
        }
        -1
    }

    /// Accumulated demand of a subtree; 0 for id <= 0 or unknown ids.
    pub fn demand_of(&self, id: i32) -> i32 {
        if id <= 0 {
            return 0;
        }
        self.subtree_demand.get(id as usize).copied().unwrap_or(0)
    }

    /// Whether attaching `vertex` under `parent` keeps the enclosing
    /// subtree within capacity. A root attachment opens a fresh subtree
    /// and only needs the vertex's own demand to fit.
    pub fn can_attach(&mut self, graph: &Graph, solution: &Solution, vertex: usize, parent: usize) -> bool {
        let capacity = graph.capacity();
        let demand = graph.demand(vertex);

        if parent == graph.root() {
            return demand <= capacity;
        }

        let id = self.subtree_of(graph, solution, parent);
        if id <= 0 {
            return true;
        }
        self.demand_of(id) + demand <= capacity
    }

    /// Marks the cache stale; the next query rebuilds from the solution.
    pub fn invalidate(&mut self) {
        self.reset();
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    fn reset(&mut self) {
        self.vertex_subtree.iter_mut().for_each(|s| *s = -1);
        self.subtree_demand.iter_mut().for_each(|d| *d = 0);
        self.root_child_subtree.clear();
        self.next_subtree_id = 1;
        self.valid = false;
    }

    fn grow_demand_slot(&mut self, id: i32) {
        if id as usize >= self.subtree_demand.len() {
            self.subtree_demand.resize(id as usize + 1, 0);
        }
    }
}
