use cmst_core::{Graph, Solution, SubtreeCache};

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
fn test_rebuild_matches_solution() {
    let g = sample_graph();
    let mut s = Solution::new(&g);
    s.set_parent(1, 0);
    s.set_parent(2, 1);
    s.set_parent(3, 0);

    let mut cache = SubtreeCache::new(&g);
    cache.rebuild(&g, &s);

    assert!(cache.is_valid());
    assert_eq!(cache.subtree_of(&g, &s, 0), 0);
    let first = cache.subtree_of(&g, &s, 1);
    assert_eq!(cache.subtree_of(&g, &s, 2), first);
    assert_eq!(cache.demand_of(first), 2);

    let second = cache.subtree_of(&g, &s, 3);
    assert_ne!(second, first);
    assert_eq!(cache.demand_of(second), 1);

    assert_eq!(cache.demand_of(0), 0);
    assert_eq!(cache.demand_of(-1), 0);
}

#[test]
fn test_incremental_insertions_match_rebuild() {
    let g = sample_graph();
    let mut s = Solution::new(&g);
    let mut incremental = SubtreeCache::new(&g);
    incremental.rebuild(&g, &s);

    for (vertex, parent) in [(1, 0), (2, 1), (3, 0)] {
        s.set_parent(vertex, parent);
        incremental.record_insertion(&g, &s, vertex, parent);
    }

    let mut fresh = SubtreeCache::new(&g);
    fresh.rebuild(&g, &s);

    for v in 0..4 {
        let id_inc = incremental.subtree_of(&g, &s, v);
        let id_fresh = fresh.subtree_of(&g, &s, v);
        assert_eq!(incremental.demand_of(id_inc), fresh.demand_of(id_fresh), "vertex {}", v);
    }
}

#[test]
fn test_invalidate_triggers_lazy_rebuild() {
    let g = sample_graph();
    let mut s = Solution::new(&g);
    s.set_parent(1, 0);

    let mut cache = SubtreeCache::new(&g);
    cache.rebuild(&g, &s);

    // Mutation behind the cache's back, then explicit invalidation.
    s.set_parent(2, 1);
    cache.invalidate();
    assert!(!cache.is_valid());

    let id = cache.subtree_of(&g, &s, 2);
    assert!(cache.is_valid());
    assert_eq!(id, cache.subtree_of(&g, &s, 1));
    assert_eq!(cache.demand_of(id), 2);
}

#[test]
fn test_chain_walk_fallback_for_unrecorded_vertex() {
    let g = sample_graph();
    let mut s = Solution::new(&g);
    s.set_parent(1, 0);

    let mut cache = SubtreeCache::new(&g);
    cache.rebuild(&g, &s);
    let id = cache.subtree_of(&g, &s, 1);

    // Vertex 2 was attached without a record_insertion call; the cache
    // has no entry and must walk the parent chain.
    s.set_parent(2, 1);
    assert_eq!(cache.subtree_of(&g, &s, 2), id);
}

#[test]
fn test_subtree_of_unconnected_vertex() {
    let g = sample_graph();
    let s = Solution::new(&g);
    let mut cache = SubtreeCache::new(&g);
    cache.rebuild(&g, &s);

    assert_eq!(cache.subtree_of(&g, &s, 2), -1);
}

#[test]
fn test_can_attach() {
    let g = sample_graph();
    let mut s = Solution::new(&g);
    let mut cache = SubtreeCache::new(&g);
    cache.rebuild(&g, &s);

    // Root attachments only need the vertex's own demand to fit.
    assert!(cache.can_attach(&g, &s, 1, 0));

    s.set_parent(1, 0);
    cache.record_insertion(&g, &s, 1, 0);
    s.set_parent(2, 1);
    cache.record_insertion(&g, &s, 2, 1);

    // Subtree {1, 2} is at capacity 2; a third vertex does not fit.
    assert!(!cache.can_attach(&g, &s, 3, 1));
    assert!(!cache.can_attach(&g, &s, 3, 2));
    assert!(cache.can_attach(&g, &s, 3, 0));
}

#[test]
fn test_can_attach_rejects_oversized_root_attachment() {
    let mut g = sample_graph();
    g.set_demand(3, 5);
    let s = Solution::new(&g);
    let mut cache = SubtreeCache::new(&g);
    cache.rebuild(&g, &s);

    assert!(!cache.can_attach(&g, &s, 3, 0));
}
