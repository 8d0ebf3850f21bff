use cmst_core::{Graph, Solution};
use cmst_utils::{render_edges, render_report};

fn sample() -> (Graph, Solution) {
    let mut g = Graph::new(4, 2);
    g.set_edge(0, 1, 1.0);
    g.set_edge(0, 3, 9.0);
    g.set_edge(1, 2, 2.0);
    let mut s = Solution::new(&g);
    s.set_parent(1, 0);
    s.set_parent(2, 1);
    s.set_parent(3, 0);
    s.recompute_cost(&g);
    s.check_feasibility(&g);
    (g, s)
}

#[test]
fn test_render_edges() {
    let (g, s) = sample();
    assert_eq!(render_edges(&g, &s), "0 1\n1 2\n0 3\n");
}

#[test]
fn test_render_edges_skips_unparented() {
    let g = Graph::new(3, 2);
    let mut s = Solution::new(&g);
    s.set_parent(2, 0);
    assert_eq!(render_edges(&g, &s), "0 2\n");
}

#[test]
fn test_render_report() {
    let (g, s) = sample();
    let report = render_report(&g, &s);

    assert!(report.contains("Total cost: 12.00"));
    assert!(report.contains("Feasible: yes"));
    assert!(report.contains("Complete: yes"));
    assert!(report.contains("Subtrees: 2"));
    assert!(report.contains("subtree 1: {1, 2} demand 2"));
    assert!(report.contains("subtree 2: {3} demand 1"));
}
