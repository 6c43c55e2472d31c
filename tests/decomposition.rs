use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sfc_decomp::{
    BoundingBox, Decomposition, Ellipsoid, Hyperplane, Polyhedron, SegmentSolver, segment_count,
};

fn segment_distance(pt: &[f64; 2], a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let ab = [b[0] - a[0], b[1] - a[1]];
    let ap = [pt[0] - a[0], pt[1] - a[1]];
    let len2 = ab[0] * ab[0] + ab[1] * ab[1];
    let t = if len2 > 0.0 { ((ap[0] * ab[0] + ap[1] * ab[1]) / len2).clamp(0.0, 1.0) } else { 0.0 };
    let d = [ap[0] - t * ab[0], ap[1] - t * ab[1]];
    (d[0] * d[0] + d[1] * d[1]).sqrt()
}

/// Uniform obstacles, keeping a small gap around the path.
fn random_obstacles(seed: u64, n: usize, path: &[[f64; 2]], gap: f64) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut obs = Vec::with_capacity(n);
    while obs.len() < n {
        let pt = [rng.gen_range(-5.0..45.0), rng.gen_range(-5.0..30.0)];
        if path.windows(2).all(|w| segment_distance(&pt, &w[0], &w[1]) > gap) {
            obs.push(pt);
        }
    }
    obs
}

fn strictly_inside(poly: &Polyhedron<2>, pt: &[f64; 2]) -> bool {
    poly.hyperplanes().iter().all(|v| {
        let len = (v.n[0] * v.n[0] + v.n[1] * v.n[1]).sqrt();
        v.signed_dist(pt) < -1e-9 * len.max(1.0)
    })
}

#[test]
fn test_polyline_segment_count() {
    let path = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 20.0]];
    let mut decomp: Decomposition<2> = Decomposition::new();
    decomp.set_local_bbox([2.0, 2.0]);
    decomp.dilate(&path, 0.0, false);

    assert_eq!(decomp.segment_count(), 4);
    assert_eq!(decomp.get_polyhedrons().len(), 4);
    assert_eq!(decomp.get_ellipsoids().len(), 4);
    assert_eq!(decomp.get_constraints().len(), 4);
    assert_eq!(decomp.get_path(), path.to_vec());
    assert!(!decomp.is_circle_only());
}

#[test]
fn test_free_space_scenario() {
    let mut decomp: Decomposition<2> = Decomposition::new();
    decomp.set_local_bbox([5.0, 5.0]);
    decomp.dilate(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]], 0.0, false);

    assert_eq!(decomp.segment_count(), 2);
    for (i, poly) in decomp.get_polyhedrons().iter().enumerate() {
        assert_eq!(poly.len(), 4, "Segment {} should only carry its local box", i);
        assert!((poly.area() - 200.0).abs() < 1e-6, "Segment {} area was {}", i, poly.area());
    }

    let second = decomp.get_polyhedron(1).unwrap();
    assert!(second.inside(&[10.0, -4.9]));
    assert!(second.inside(&[14.9, 5.0]));
    assert!(!second.inside(&[10.0, -5.1]));

    let constraints = decomp.get_constraints();
    assert_eq!(constraints[0].p0(), [5.0, 0.0]);
    assert_eq!(constraints[1].p0(), [10.0, 5.0]);
}

#[test]
fn test_circle_only_pairs() {
    let path = [[0.0, 0.0], [4.0, 0.0], [10.0, 10.0], [10.0, 14.0]];
    let mut decomp: Decomposition<2> = Decomposition::new();
    decomp.set_local_bbox([1.0, 1.0]);
    decomp.dilate(&path, 0.0, true);

    assert!(decomp.is_circle_only());
    assert_eq!(decomp.segment_count(), 2);
    assert_eq!(decomp.segment_endpoints(1), Ok(([10.0, 10.0], [10.0, 14.0])));

    // Constraints are anchored at the midpoints of the pairs, not of the gap between them.
    let constraints = decomp.get_constraints();
    assert_eq!(constraints[0].p0(), [2.0, 0.0]);
    assert_eq!(constraints[1].p0(), [10.0, 12.0]);
    assert!(!decomp.get_polyhedron(0).unwrap().inside(&[7.0, 5.0]));

    // A trailing unpaired point is ignored.
    let mut longer = path.to_vec();
    longer.push([20.0, 20.0]);
    decomp.dilate(&longer, 0.0, true);
    assert_eq!(decomp.segment_count(), segment_count(5, true));
    assert_eq!(decomp.segment_count(), 2);
}

#[test]
fn test_short_path_gives_empty_decomposition() {
    let mut decomp: Decomposition<2> = Decomposition::new();
    decomp.dilate(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]], 0.0, false);
    assert_eq!(decomp.segment_count(), 2);

    decomp.dilate(&[[1.0, 1.0]], 0.0, false);
    assert_eq!(decomp.segment_count(), 0);
    assert!(decomp.get_polyhedrons().is_empty());
    assert!(decomp.get_constraints().is_empty());
    assert!(decomp.tighten_polyhedron(0, [1.0, 1.0], 0.1).is_err());

    decomp.dilate(&[], 0.0, false);
    assert_eq!(decomp.segment_count(), 0);
}

#[test]
fn test_results_follow_path_order() {
    let path = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
    let mut decomp: Decomposition<2> = Decomposition::new();
    decomp.set_local_bbox([1.0, 1.0]);
    decomp.set_workers(4);
    decomp.dilate(&path, 0.0, false);

    assert_eq!(decomp.segment_count(), 3);
    for i in 0..3 {
        let poly = decomp.get_polyhedron(i).unwrap();
        let (a, b) = decomp.segment_endpoints(i).unwrap();
        assert!(poly.inside(&a) && poly.inside(&b), "Segment {} does not contain its endpoints", i);
        for j in (0..3).filter(|&j| j != i) {
            let other = decomp.segment_midpoint(j).unwrap();
            assert!(!poly.inside(&other), "Polyhedron {} contains the midpoint of segment {}", i, j);
        }
    }
}

#[test]
fn test_random_obstacles_are_separated() {
    let path = [[0.0, 0.0], [20.0, 0.0], [20.0, 20.0], [40.0, 25.0]];
    let obs = random_obstacles(7, 300, &path, 0.3);

    let mut decomp: Decomposition<2> = Decomposition::new();
    decomp.set_local_bbox([3.0, 3.0]);
    decomp.set_obstacles(obs.clone());
    decomp.dilate(&path, 0.0, false);

    for (i, poly) in decomp.get_polyhedrons().iter().enumerate() {
        assert!(poly.inside(&path[i]), "Segment {} lost its start point", i);
        assert!(poly.inside(&path[i + 1]), "Segment {} lost its end point", i);
        for pt in &obs {
            assert!(!strictly_inside(poly, pt), "Obstacle {:?} inside polyhedron {}", pt, i);
        }
    }

    for (i, (line, e)) in decomp.solvers().iter().zip(decomp.get_ellipsoids()).enumerate() {
        for pt in line.obstacles() {
            assert!(e.dist(pt) >= 1.0 - 1e-9, "Obstacle {:?} inside ellipsoid {}", pt, i);
        }
    }
}

#[test]
fn test_worker_count_does_not_change_result() {
    let path: Vec<[f64; 2]> = (0..12).map(|i| [i as f64 * 3.5, (i % 3) as f64 * 4.0]).collect();
    let obs = random_obstacles(11, 400, &path, 0.3);

    let run = |workers: usize| {
        let mut decomp: Decomposition<2> = Decomposition::new();
        decomp.set_local_bbox([2.0, 2.0]);
        decomp.set_obstacles(obs.clone());
        decomp.set_workers(workers);
        decomp.dilate(&path, 0.5, false);
        (decomp.get_polyhedrons(), decomp.get_ellipsoids())
    };

    let reference = run(1);
    for workers in [2, 4, 7, 32] {
        assert_eq!(run(workers), reference, "Result changed with {} workers", workers);
    }
}

#[test]
fn test_global_bbox_clips_every_polyhedron() {
    let bounds = BoundingBox::new([-2.0, -2.0], [12.0, 12.0]);
    let mut decomp: Decomposition<2> = Decomposition::with_global_bbox(bounds).unwrap();
    decomp.set_local_bbox([5.0, 5.0]);
    decomp.dilate(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]], 0.0, false);

    for (i, poly) in decomp.get_polyhedrons().iter().enumerate() {
        assert_eq!(poly.len(), 8);
        assert!((poly.area() - 98.0).abs() < 1e-6, "Segment {} area was {}", i, poly.area());
        for v in poly.vertices() {
            for k in 0..2 {
                assert!(v[k] >= bounds.min[k] - 1e-6 && v[k] <= bounds.max[k] + 1e-6, "Vertex {:?} escapes", v);
            }
        }
    }
}

#[test]
fn test_disabled_global_bbox_changes_nothing() {
    let path = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]];
    let obs = random_obstacles(3, 50, &path, 0.5);

    let mut plain: Decomposition<2> = Decomposition::new();
    plain.set_local_bbox([3.0, 3.0]);
    plain.set_obstacles(obs.clone());
    plain.dilate(&path, 0.0, false);

    let mut disabled: Decomposition<2> = Decomposition::with_global_bbox(BoundingBox::disabled()).unwrap();
    disabled.set_local_bbox([3.0, 3.0]);
    disabled.set_obstacles(obs);
    disabled.dilate(&path, 0.0, false);

    assert_eq!(plain.get_polyhedrons(), disabled.get_polyhedrons());
}

#[test]
fn test_offset_stretches_ellipsoid() {
    let mut decomp: Decomposition<2> = Decomposition::new();
    decomp.dilate(&[[0.0, 0.0], [10.0, 0.0]], 2.0, false);
    let e = decomp.get_ellipsoid(0).unwrap();
    // Semi-axes 5 + 2 along the segment and 5 across it.
    let expected = std::f64::consts::PI * 7.0 * 5.0;
    assert!((e.volume() - expected).abs() < 1e-9, "Area was {}", e.volume());
    assert!(e.inside(&[-1.9, 0.0]));
    assert!(!e.inside(&[-2.1, 0.0]));
}

/// Solver that only records its segment, to check ordering without geometry.
struct Marker {
    start: [f64; 2],
    end: [f64; 2],
    dilated: bool,
}

impl SegmentSolver<2> for Marker {
    fn new(start: [f64; 2], end: [f64; 2]) -> Self {
        Marker { start, end, dilated: false }
    }
    fn bind_local_bbox(&mut self, _extent: [f64; 2]) {}
    fn bind_obstacles(&mut self, _obstacles: &[[f64; 2]]) {}
    fn dilate(&mut self, _offset_x: f64) {
        self.dilated = true;
    }
    fn ellipsoid(&self) -> Ellipsoid<2> {
        Ellipsoid::default()
    }
    fn polyhedron(&self) -> Polyhedron<2> {
        Polyhedron::new(vec![Hyperplane::new(self.start, [1.0, 0.0]), Hyperplane::new(self.end, [-1.0, 0.0])])
    }
}

#[test]
fn test_custom_solver_plugs_in() {
    let path: Vec<[f64; 2]> = (0..18).map(|i| [i as f64, 0.0]).collect();
    let mut decomp: Decomposition<2, Marker> = Decomposition::new();
    decomp.set_workers(4);
    decomp.dilate(&path, 0.0, false);

    assert_eq!(decomp.segment_count(), 17);
    assert!(decomp.solvers().iter().all(|s| s.dilated));
    for i in 0..17 {
        let planes = decomp.get_polyhedron(i).unwrap().hyperplanes();
        assert_eq!(planes[0].p, path[i], "Segment {} stored out of order", i);
        assert_eq!(planes[1].p, path[i + 1]);
    }
}
