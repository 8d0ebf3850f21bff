use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};

use cmst_core::Graph;

/// Loads an OR-Library CMST instance from disk.
///
/// Format: a first line `n Q`, then an n x n cost matrix in fixed-width
/// columns, then optionally a final line carrying a single number, the
/// known optimal cost. The fixed-width layout sometimes glues a small
/// value onto a following `1000` diagonal entry (e.g. `311000` is 31
/// followed by 1000); the tokenizer splits those back apart. Demands
/// default to 1 per vertex and the root is vertex 0.
pub fn load_instance(path: impl AsRef<Path>) -> Result<Graph> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("Cannot read instance file '{}': {}", path.display(), e))?;
    let name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_instance(&text, &name)
}

/// Parses instance text; see [`load_instance`] for the format.
pub fn parse_instance(text: &str, name: &str) -> Result<Graph> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .ok_or_else(|| anyhow!("Instance '{}' is empty", name))?;
    let mut fields = header.split_whitespace();
    let n: usize = fields
        .next()
        .ok_or_else(|| anyhow!("Missing vertex count in '{}'", name))?
        .parse()
        .map_err(|_| anyhow!("Invalid vertex count in '{}'", name))?;
    let capacity: i32 = fields
        .next()
        .ok_or_else(|| anyhow!("Missing capacity in '{}'", name))?
        .parse()
        .map_err(|_| anyhow!("Invalid capacity in '{}'", name))?;

    if n == 0 || capacity <= 0 {
        return Err(anyhow!(
            "Invalid instance '{}': n = {}, capacity = {}",
            name,
            n,
            capacity
        ));
    }

    let mut values = Vec::with_capacity(n * n + 1);
    for line in lines {
        for token in line.split_whitespace() {
            push_tokens(token, &mut values);
        }
    }

    let expected = n * n;
    if values.len() < expected {
        return Err(anyhow!(
            "Distance matrix of '{}' is short: expected {} values, found {}",
            name,
            expected,
            values.len()
        ));
    }

    let mut graph = Graph::new(n, capacity);
    graph.set_name(name);
    let mut idx = 0;
    for i in 0..n {
        for j in 0..n {
            let cost = values[idx];
            idx += 1;
            if i != j {
                graph.set_cost(i, j, cost);
            }
        }
    }

    // Anything beyond the matrix is the known-optimum trailer.
    graph.set_best_known(values.get(expected).copied());

    Ok(graph)
}

/// Renders a graph back into the instance format (no optimum trailer).
pub fn format_instance(graph: &Graph) -> String {
    let n = graph.vertex_count();
    let mut out = format!("{} {}\n", n, graph.capacity());
    for i in 0..n {
        let row: Vec<String> = (0..n)
            .map(|j| {
                let cost = if i == j { 0.0 } else { graph.cost(i, j) };
                if cost.is_finite() {
                    format!("{}", cost)
                } else {
                    "1000".to_string()
                }
            })
            .collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

// A token wider than 4 characters ending in "1000" is a glued pair.
fn push_tokens(token: &str, values: &mut Vec<f64>) {
    if token.len() > 4 && token.len() <= 7 && token.ends_with("1000") {
        let head = &token[..token.len() - 4];
        if let Ok(value) = head.parse::<f64>() {
            values.push(value);
            values.push(1000.0);
            return;
        }
    }
    if let Ok(value) = token.parse::<f64>() {
        values.push(value);
    }
}
