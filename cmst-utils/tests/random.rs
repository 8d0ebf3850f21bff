use cmst_utils::RandomSource;

#[test]
fn test_same_seed_same_stream() {
    let mut a = RandomSource::from_seed(77);
    let mut b = RandomSource::from_seed(77);

    for _ in 0..100 {
        assert_eq!(a.next_index(0, 1000), b.next_index(0, 1000));
        assert_eq!(a.next_unit(), b.next_unit());
    }
}

#[test]
fn test_seed_is_retrievable() {
    let rng = RandomSource::from_seed(42);
    assert_eq!(rng.seed(), 42);
}

#[test]
fn test_next_index_bounds() {
    let mut rng = RandomSource::from_seed(5);
    for _ in 0..1000 {
        let v = rng.next_index(3, 7);
        assert!((3..=7).contains(&v));
    }
    assert_eq!(rng.next_index(4, 4), 4);
}

#[test]
fn test_next_unit_range() {
    let mut rng = RandomSource::from_seed(9);
    for _ in 0..1000 {
        let v = rng.next_unit();
        assert!((0.0..1.0).contains(&v));
    }
}
