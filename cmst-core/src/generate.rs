use std::collections::HashSet;

use rand::{rngs::SmallRng, Rng, SeedableRng};
use statrs::function::erf::{erf, erf_inv};

use crate::graph::Graph;

/// Parameters for random instance generation.
#[derive(Debug, Clone, Copy)]
pub struct GenerateConfig {
    pub num_vertices: usize,
    pub capacity: i32,
    pub max_demand: i32,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            num_vertices: 30,
            capacity: 10,
            max_demand: 3,
        }
    }
}

/// Generates a clustered Euclidean CMST instance. The root sits at the
/// centre of a 1000x1000 area; remaining vertices either scatter
/// uniformly or clump around one of a few cluster seeds. Costs are
/// rounded pairwise distances, demands are uniform in
/// `[1, max_demand]`, the root's demand is 0. Same seed, same instance.
pub fn generate_instance(seed: u64, config: &GenerateConfig) -> Graph {
    let mut rng = SmallRng::seed_from_u64(seed);
    let n = config.num_vertices;

    let num_clusters = if n > 1 { rng.gen_range(3..=8).min(n - 1) } else { 0 };
    let mut positions: Vec<(i32, i32)> = Vec::with_capacity(n);
    let mut taken: HashSet<(i32, i32)> = HashSet::with_capacity(n);
    if n > 0 {
        positions.push((500, 500));
        taken.insert((500, 500));
    }

    while positions.len() < n {
        let vertex = positions.len();
        let pos = if vertex <= num_clusters || rng.gen::<f64>() < 0.5 {
            (rng.gen_range(0..=1000), rng.gen_range(0..=1000))
        } else {
            let cluster = rng.gen_range(1..=num_clusters);
            let (cx, cy) = positions[cluster];
            (
                truncated_normal_sample(&mut rng, cx as f64, 60.0, 0.0, 1000.0).round() as i32,
                truncated_normal_sample(&mut rng, cy as f64, 60.0, 0.0, 1000.0).round() as i32,
            )
        };
        if taken.contains(&pos) {
            continue;
        }
        positions.push(pos);
        taken.insert(pos);
    }

    let mut graph = Graph::new(n, config.capacity);
    graph.set_name(format!("generated-{}", seed));
    for i in 0..n {
        for j in (i + 1)..n {
            let dx = (positions[i].0 - positions[j].0) as f64;
            let dy = (positions[i].1 - positions[j].1) as f64;
            graph.set_edge(i, j, dx.hypot(dy).round());
        }
    }

    let max_demand = config.max_demand.max(1);
    for v in 0..n {
        graph.set_demand(v, rng.gen_range(1..=max_demand));
    }
    graph.set_demand(graph.root(), 0);

    graph
}

fn truncated_normal_sample<T: Rng>(
    rng: &mut T,
    mean: f64,
    std_dev: f64,
    min_val: f64,
    max_val: f64,
) -> f64 {
    let cdf_min = 0.5 * (1.0 + erf((min_val - mean) / (std_dev * (2.0_f64).sqrt())));
    let cdf_max = 0.5 * (1.0 + erf((max_val - mean) / (std_dev * (2.0_f64).sqrt())));
    let sample = rng.gen::<f64>() * (cdf_max - cdf_min) + cdf_min;
    mean + std_dev * (2.0_f64).sqrt() * erf_inv(2.0 * sample - 1.0)
}
