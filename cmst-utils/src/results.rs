use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use cmst_core::Graph;

/// Structured summary of one solver run, filled by the executors and
/// handed to a sink. Fields that do not apply to an algorithm stay
/// `None` and render as empty CSV cells.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunSummary {
    pub timestamp: u64,
    pub instance: String,
    pub num_vertices: usize,
    pub capacity: i32,
    pub algorithm: String,
    pub alpha: Option<f64>,
    pub iterations: Option<usize>,
    pub block_size: Option<usize>,
    pub seed: Option<u64>,
    pub elapsed_seconds: f64,
    pub best_cost: f64,
    pub mean_cost: Option<f64>,
    pub best_alpha: Option<f64>,
    pub best_known: Option<f64>,
}

impl RunSummary {
    pub fn new(graph: &Graph, algorithm: &str) -> Self {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            timestamp,
            instance: graph.name().to_string(),
            num_vertices: graph.vertex_count(),
            capacity: graph.capacity(),
            algorithm: algorithm.to_string(),
            alpha: None,
            iterations: None,
            block_size: None,
            seed: None,
            elapsed_seconds: 0.0,
            best_cost: f64::INFINITY,
            mean_cost: None,
            best_alpha: None,
            best_known: None,
        }
    }

    /// Percentage deviation of the best cost from the known optimum,
    /// when the instance carries one.
    pub fn deviation_percent(&self) -> Option<f64> {
        match self.best_known {
            Some(optimal) if optimal > 0.0 && self.best_cost.is_finite() => {
                Some((self.best_cost - optimal) / optimal * 100.0)
            }
            _ => None,
        }
    }
}

const CSV_HEADER: &str = "timestamp,instance,num_vertices,capacity,algorithm,alpha,iterations,\
block_size,seed,elapsed_seconds,best_cost,mean_cost,best_alpha,best_known";

/// Append-only CSV sink for run summaries. The header row is written
/// once, when the file does not exist yet.
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, summary: &RunSummary) -> Result<()> {
        let new_file = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| anyhow!("Cannot open CSV file '{}': {}", self.path.display(), e))?;

        if new_file {
            writeln!(file, "{}", CSV_HEADER)?;
        }
        writeln!(file, "{}", render_row(summary))?;
        Ok(())
    }
}

fn render_row(s: &RunSummary) -> String {
    let opt_f = |v: Option<f64>| v.map(|v| format!("{:.2}", v)).unwrap_or_default();
    let opt_u = |v: Option<usize>| v.map(|v| v.to_string()).unwrap_or_default();
    format!(
        "{},{},{},{},{},{},{},{},{},{:.6},{:.2},{},{},{}",
        s.timestamp,
        s.instance,
        s.num_vertices,
        s.capacity,
        s.algorithm,
        opt_f(s.alpha),
        opt_u(s.iterations),
        opt_u(s.block_size),
        s.seed.map(|v| v.to_string()).unwrap_or_default(),
        s.elapsed_seconds,
        s.best_cost,
        opt_f(s.mean_cost),
        opt_f(s.best_alpha),
        opt_f(s.best_known),
    )
}
