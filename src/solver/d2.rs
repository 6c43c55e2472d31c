use nalgebra::{Matrix2, Rotation2, Vector2};

use super::line_segment::{LineSegment, MIN_AXIS, SHRINK_EPSILON};
use super::SegmentSolver;
use crate::geometry::{add, midpoint, normalized, scale, sub, Ellipsoid, Hyperplane, Polyhedron};

impl LineSegment<2> {
    /// Unit direction of the segment; +X for a zero-length segment.
    fn direction(&self) -> [f64; 2] {
        normalized(&sub(&self.p2, &self.p1)).unwrap_or([1.0, 0.0])
    }

    /// Rotation taking the X axis onto the segment direction.
    fn frame(&self) -> Matrix2<f64> {
        let dir = self.direction();
        Rotation2::new(dir[1].atan2(dir[0])).into_inner()
    }

    /// The four planes of the local box: `±extent[0]` beyond the endpoints,
    /// `±extent[1]` to either side.
    fn local_bbox_planes(&self) -> Vec<Hyperplane<2>> {
        if !self.has_local_bbox() {
            return Vec::new();
        }
        let dir = self.direction();
        let dir_h = [-dir[1], dir[0]];
        let start = sub(&self.p1, &scale(&dir, self.local_bbox[0]));
        let end = add(&self.p2, &scale(&dir, self.local_bbox[0]));
        vec![
            Hyperplane::new(add(&start, &scale(&dir_h, self.local_bbox[1])), dir_h),
            Hyperplane::new(sub(&start, &scale(&dir_h, self.local_bbox[1])), scale(&dir_h, -1.0)),
            Hyperplane::new(end, dir),
            Hyperplane::new(start, scale(&dir, -1.0)),
        ]
    }

    fn find_ellipsoid(&mut self, offset_x: f64) {
        let f = crate::geometry::norm(&sub(&self.p2, &self.p1)) / 2.0;
        let mut axes = Vector2::new(f + offset_x.max(0.0), f);
        let ri = self.frame();
        let centre = midpoint(&self.p1, &self.p2);
        let shape = |axes: &Vector2<f64>| {
            ri * Matrix2::from_diagonal(&axes.map(|a| a.max(MIN_AXIS))) * ri.transpose()
        };

        let mut e = Ellipsoid::new(shape(&axes), centre);
        let mut inside = e.points_inside(&self.obs);
        while let Some(pw) = e.closest_point(&inside) {
            let p = ri.transpose() * Vector2::from(sub(&pw, &centre));
            if p[0].abs() < axes[0] {
                axes[1] = p[1].abs() / (1.0 - (p[0] / axes[0]).powi(2)).sqrt();
            }
            e.set_shape(shape(&axes));
            inside.retain(|pt| *pt != pw && 1.0 - e.dist(pt) > SHRINK_EPSILON);
        }
        self.ellipsoid = e;
    }
}

impl SegmentSolver<2> for LineSegment<2> {
    fn new(start: [f64; 2], end: [f64; 2]) -> Self {
        LineSegment::with_endpoints(start, end)
    }

    fn bind_local_bbox(&mut self, extent: [f64; 2]) {
        self.local_bbox = extent;
    }

    fn bind_obstacles(&mut self, obstacles: &[[f64; 2]]) {
        let planes = self.local_bbox_planes();
        self.filter_obstacles(obstacles, planes);
    }

    fn dilate(&mut self, offset_x: f64) {
        self.find_ellipsoid(offset_x);
        let planes = self.local_bbox_planes();
        self.find_polyhedron(planes);
    }

    fn ellipsoid(&self) -> Ellipsoid<2> {
        self.ellipsoid.clone()
    }

    fn polyhedron(&self) -> Polyhedron<2> {
        self.polyhedron.clone()
    }
}
