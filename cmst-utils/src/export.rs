use std::fmt::Write;

use cmst_core::{Graph, Solution};

/// Renders the parent edges as one `parent child` pair per line, in
/// child order. This is the interchange format used by the tree
/// visualizers.
pub fn render_edges(graph: &Graph, solution: &Solution) -> String {
    let mut out = String::new();
    for (parent, child) in solution.edges(graph) {
        let _ = writeln!(out, "{} {}", parent, child);
    }
    out
}

/// Detailed human-readable report: cost, flags and the membership and
/// demand of every subtree. Subtree ids reflect the solution's last
/// feasibility check.
pub fn render_report(graph: &Graph, solution: &Solution) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== CMST solution ===");
    let _ = writeln!(out, "Total cost: {:.2}", solution.total_cost());
    let _ = writeln!(out, "Feasible: {}", if solution.is_valid() { "yes" } else { "no" });
    let _ = writeln!(
        out,
        "Complete: {}",
        if solution.is_complete(graph) { "yes" } else { "no" }
    );

    let count = solution.subtree_count();
    let _ = writeln!(out, "Subtrees: {}", count);
    for id in 1..=count as i32 {
        let vertices = solution.subtree_vertices(id);
        if vertices.is_empty() {
            continue;
        }
        let members: Vec<String> = vertices.iter().map(|v| v.to_string()).collect();
        let _ = writeln!(
            out,
            "  subtree {}: {{{}}} demand {}",
            id,
            members.join(", "),
            solution.subtree_demand(graph, id)
        );
    }
    out
}
