use ndarray::Array2;

/// Marker for a missing edge in the cost matrix.
pub const NO_EDGE: f64 = f64::INFINITY;

/// A CMST instance: a weighted graph with a designated root vertex,
/// per-vertex demands and a capacity bound that every subtree hanging
/// off the root must respect.
///
/// The graph is built once (by a loader or generator) and read-only for
/// the lifetime of a run, so shared references can be handed to any
/// number of concurrent constructions without synchronization.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    num_vertices: usize,
    capacity: i32,
    root: usize,
    demands: Vec<i32>,
    costs: Array2<f64>,
    best_known: Option<f64>,
}

impl Graph {
    /// Creates a graph with `n` vertices, no edges, unit demands and
    /// vertex 0 as root. Self-loops cost 0.
    pub fn new(n: usize, capacity: i32) -> Self {
        let mut costs = Array2::from_elem((n, n), NO_EDGE);
        for i in 0..n {
            costs[[i, i]] = 0.0;
        }
        Self {
            name: String::new(),
            num_vertices: n,
            capacity,
            root: 0,
            demands: vec![1; n],
            costs,
            best_known: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.num_vertices
    }

    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    pub fn root(&self) -> usize {
        self.root
    }

    /// Demand of a vertex; 0 for out-of-range indices.
    pub fn demand(&self, vertex: usize) -> i32 {
        self.demands.get(vertex).copied().unwrap_or(0)
    }

    /// Edge cost between two vertices; [`NO_EDGE`] when the edge is
    /// absent or either index is out of range.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        if from >= self.num_vertices || to >= self.num_vertices {
            return NO_EDGE;
        }
        self.costs[[from, to]]
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        from != to && self.cost(from, to) < NO_EDGE
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Known optimal cost for this instance, when the input carried one.
    pub fn best_known(&self) -> Option<f64> {
        self.best_known
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_best_known(&mut self, cost: Option<f64>) {
        self.best_known = cost;
    }

    /// Sets the root; out-of-range values are ignored.
    pub fn set_root(&mut self, root: usize) {
        if root < self.num_vertices {
            self.root = root;
        }
    }

    /// Sets a vertex demand; out-of-range indices and negative demands
    /// are ignored.
    pub fn set_demand(&mut self, vertex: usize, demand: i32) {
        if vertex < self.num_vertices && demand >= 0 {
            self.demands[vertex] = demand;
        }
    }

    /// Sets a directed edge cost; out-of-range indices are ignored.
    pub fn set_cost(&mut self, from: usize, to: usize, cost: f64) {
        if from < self.num_vertices && to < self.num_vertices {
            self.costs[[from, to]] = cost;
        }
    }

    /// Sets the cost in both directions.
    pub fn set_edge(&mut self, a: usize, b: usize, cost: f64) {
        self.set_cost(a, b, cost);
        self.set_cost(b, a, cost);
    }

    pub fn total_demand(&self) -> i32 {
        let root = self.root;
        self.demands
            .iter()
            .enumerate()
            .filter(|&(v, _)| v != root)
            .map(|(_, &d)| d)
            .sum()
    }
}
