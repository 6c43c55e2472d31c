use sfc_decomp::{DecompError, Decomposition, LinearConstraint};

/// One straight segment in free space: the corridor is the box
/// x in [-5, 15], y in [-5, 5], around the midpoint (5, 0).
fn straight() -> Decomposition<2> {
    let mut decomp: Decomposition<2> = Decomposition::new();
    decomp.set_local_bbox([5.0, 5.0]);
    decomp.dilate(&[[0.0, 0.0], [10.0, 0.0]], 0.0, false);
    decomp
}

fn area(decomp: &Decomposition<2>) -> f64 {
    decomp.get_polyhedron(0).unwrap().area()
}

#[test]
fn test_get_constraints_is_idempotent() {
    let decomp = straight();
    let first = decomp.get_constraints();
    let second = decomp.get_constraints();
    assert_eq!(first, second);
    assert_eq!(first[0].len(), 4);
    assert!(first[0].inside(&[0.0, 0.0]));
    assert!(first[0].inside(&[-5.0, 5.0]));
    assert!(!first[0].inside(&[-5.1, 0.0]));
}

#[test]
fn test_set_constraints_without_distance_matches_get() {
    let mut decomp = straight();
    let mut out = Vec::new();
    decomp.set_constraints(&mut out, 0.0).unwrap();
    assert_eq!(out, decomp.get_constraints());
    // Nothing was tightened.
    assert!((area(&decomp) - 200.0).abs() < 1e-6);
}

#[test]
fn test_set_constraints_shrinks_cumulatively() {
    let mut decomp = straight();
    let before = decomp.get_constraints();

    let mut out = Vec::new();
    decomp.set_constraints(&mut out, 1.0).unwrap();
    // The returned constraints describe the corridor before this call.
    assert_eq!(out, before);
    assert!((area(&decomp) - 18.0 * 8.0).abs() < 1e-6, "Area was {}", area(&decomp));

    let tightened_once = decomp.get_constraints();
    decomp.set_constraints(&mut out, 1.0).unwrap();
    assert_eq!(out, tightened_once);
    assert_ne!(out, before);
    assert!((area(&decomp) - 16.0 * 6.0).abs() < 1e-6, "Area was {}", area(&decomp));

    let lc: &LinearConstraint<2> = &decomp.get_constraints()[0];
    assert!(lc.inside(&[5.0, 2.9]));
    assert!(!lc.inside(&[5.0, 3.1]));
    assert!(lc.inside(&[-2.9, 0.0]));
    assert!(!lc.inside(&[-3.1, 0.0]));
}

#[test]
fn test_tighten_beyond_margin_is_rejected() {
    let mut decomp = straight();
    decomp.tighten_corridor(2.0).unwrap();
    let snapshot = decomp.get_polyhedrons();

    let err = decomp.tighten_corridor(3.0).unwrap_err();
    assert!(
        matches!(err, DecompError::ExceedsMargin { index: 0, distance, margin } if distance == 3.0 && (margin - 3.0).abs() < 1e-12),
        "Unexpected error {:?}",
        err
    );
    assert_eq!(decomp.get_polyhedrons(), snapshot, "A failed tighten must not modify anything");

    let mut out = Vec::new();
    assert!(decomp.set_constraints(&mut out, 3.5).is_err());
    assert!(out.is_empty());
    assert_eq!(decomp.get_polyhedrons(), snapshot);
}

#[test]
fn test_negative_distance_is_rejected() {
    let mut decomp = straight();
    let mut out = vec![LinearConstraint::default()];
    assert_eq!(decomp.set_constraints(&mut out, -1.0), Err(DecompError::NegativeDistance(-1.0)));
    assert!(out.is_empty());
    assert!(matches!(decomp.tighten_corridor(f64::NAN), Err(DecompError::NegativeDistance(_))));
    assert!(matches!(
        decomp.tighten_polyhedron(0, [5.0, 0.0], f64::INFINITY),
        Err(DecompError::NegativeDistance(_))
    ));
    assert!((area(&decomp) - 200.0).abs() < 1e-6);
}

#[test]
fn test_tighten_polyhedron_around_point() {
    let mut decomp = straight();
    decomp.tighten_polyhedron(0, [0.0, 0.0], 0.5).unwrap();
    // x in [-4.5, 14.5], y in [-4.5, 4.5]
    assert!((area(&decomp) - 19.0 * 9.0).abs() < 1e-6, "Area was {}", area(&decomp));

    assert_eq!(
        decomp.tighten_polyhedron(1, [0.0, 0.0], 0.5),
        Err(DecompError::IndexOutOfRange { index: 1, count: 1 })
    );
}

#[test]
fn test_constraints_keep_segments_feasible() {
    let mut decomp: Decomposition<2> = Decomposition::new();
    decomp.set_local_bbox([1.0, 1.5]);
    decomp.set_obstacles(vec![[3.0, 1.0], [6.0, -0.8], [10.5, 4.0], [9.0, 8.0]]);
    decomp.dilate(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]], 0.0, false);

    let mut out = Vec::new();
    decomp.set_constraints(&mut out, 0.0).unwrap();
    assert_eq!(out.len(), 2);
    for (i, lc) in out.iter().enumerate() {
        let (a, b) = decomp.segment_endpoints(i).unwrap();
        assert!(lc.inside(&a) && lc.inside(&b), "Constraint {} excludes its own segment", i);
        assert!(lc.inside(&lc.p0()));
        assert_eq!(lc.a().len(), lc.b().len());
    }
}
