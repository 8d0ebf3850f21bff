use cmst_core::{generate_candidates, Graph, Solution, SubtreeCache};

fn sample_graph() -> Graph {
    let mut g = Graph::new(4, 2);
    g.set_edge(0, 1, 1.0);
    g.set_edge(0, 2, 5.0);
    g.set_edge(0, 3, 9.0);
    g.set_edge(1, 2, 2.0);
    g.set_edge(1, 3, 6.0);
    g.set_edge(2, 3, 3.0);
    g
}

#[test]
fn test_first_step_candidates_sorted_by_cost() {
    let g = sample_graph();
    let s = Solution::new(&g);
    let mut cache = SubtreeCache::new(&g);
    cache.rebuild(&g, &s);

    let connected = vec![true, false, false, false];
    let candidates = generate_candidates(&g, &s, &mut cache, &connected);

    let picks: Vec<(usize, usize, f64)> =
        candidates.iter().map(|c| (c.vertex, c.parent, c.cost)).collect();
    assert_eq!(picks, vec![(1, 0, 1.0), (2, 0, 5.0), (3, 0, 9.0)]);
}

#[test]
fn test_full_subtree_is_filtered_out() {
    let g = sample_graph();
    let mut s = Solution::new(&g);
    let mut cache = SubtreeCache::new(&g);
    cache.rebuild(&g, &s);

    s.set_parent(1, 0);
    cache.record_insertion(&g, &s, 1, 0);
    s.set_parent(2, 1);
    cache.record_insertion(&g, &s, 2, 1);

    // Subtree {1, 2} is full: only the direct root attachment remains.
    let connected = vec![true, true, true, false];
    let candidates = generate_candidates(&g, &s, &mut cache, &connected);

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].vertex, 3);
    assert_eq!(candidates[0].parent, 0);
    assert_eq!(candidates[0].cost, 9.0);
    assert_eq!(candidates[0].subtree, 0);
}

#[test]
fn test_missing_edges_produce_no_candidates() {
    let mut g = Graph::new(3, 5);
    g.set_edge(0, 1, 4.0);
    // No edge between 0-2 or 1-2.
    let s = Solution::new(&g);
    let mut cache = SubtreeCache::new(&g);
    cache.rebuild(&g, &s);

    let connected = vec![true, false, false];
    let candidates = generate_candidates(&g, &s, &mut cache, &connected);

    assert_eq!(candidates.len(), 1);
    assert_eq!((candidates[0].vertex, candidates[0].parent), (1, 0));
}

#[test]
fn test_oversized_vertex_never_a_candidate() {
    let mut g = sample_graph();
    g.set_demand(2, 7);
    let s = Solution::new(&g);
    let mut cache = SubtreeCache::new(&g);
    cache.rebuild(&g, &s);

    let connected = vec![true, false, false, false];
    let candidates = generate_candidates(&g, &s, &mut cache, &connected);

    assert!(candidates.iter().all(|c| c.vertex != 2));
}

#[test]
fn test_candidate_subtree_matches_parent() {
    let g = sample_graph();
    let mut s = Solution::new(&g);
    let mut cache = SubtreeCache::new(&g);
    cache.rebuild(&g, &s);

    s.set_parent(1, 0);
    cache.record_insertion(&g, &s, 1, 0);
    let expected = cache.subtree_of(&g, &s, 1);

    let connected = vec![true, true, false, false];
    let candidates = generate_candidates(&g, &s, &mut cache, &connected);
    for c in candidates.iter().filter(|c| c.parent == 1) {
        assert_eq!(c.subtree, expected);
    }
}
