use nalgebra::{Matrix3, Rotation3, Vector3};

use super::line_segment::{LineSegment, MIN_AXIS, SHRINK_EPSILON};
use super::SegmentSolver;
use crate::geometry::{add, midpoint, normalized, scale, sub, Ellipsoid, Hyperplane, Polyhedron};

fn shape(frame: &Matrix3<f64>, axes: &Vector3<f64>) -> Matrix3<f64> {
    frame * Matrix3::from_diagonal(&axes.map(|a| a.max(MIN_AXIS))) * frame.transpose()
}

impl LineSegment<3> {
    /// Unit direction of the segment; +X for a zero-length segment.
    fn direction(&self) -> [f64; 3] {
        normalized(&sub(&self.p2, &self.p1)).unwrap_or([1.0, 0.0, 0.0])
    }

    /// Yaw/pitch rotation taking the X axis onto the segment direction.
    fn frame(&self) -> Matrix3<f64> {
        let v = self.direction();
        let yaw = v[1].atan2(v[0]);
        let pitch = (-v[2]).atan2((v[0] * v[0] + v[1] * v[1]).sqrt());
        Rotation3::from_euler_angles(0.0, pitch, yaw).into_inner()
    }

    /// The six planes of the local box around the segment.
    fn local_bbox_planes(&self) -> Vec<Hyperplane<3>> {
        if !self.has_local_bbox() {
            return Vec::new();
        }
        let dir = self.direction();
        let dir_h = normalized(&[dir[1], -dir[0], 0.0]).unwrap_or([-1.0, 0.0, 0.0]);
        let dir_v = [
            dir[1] * dir_h[2] - dir[2] * dir_h[1],
            dir[2] * dir_h[0] - dir[0] * dir_h[2],
            dir[0] * dir_h[1] - dir[1] * dir_h[0],
        ];
        let start = sub(&self.p1, &scale(&dir, self.local_bbox[0]));
        let end = add(&self.p2, &scale(&dir, self.local_bbox[0]));
        vec![
            Hyperplane::new(add(&start, &scale(&dir_h, self.local_bbox[1])), dir_h),
            Hyperplane::new(sub(&start, &scale(&dir_h, self.local_bbox[1])), scale(&dir_h, -1.0)),
            Hyperplane::new(add(&start, &scale(&dir_v, self.local_bbox[2])), dir_v),
            Hyperplane::new(sub(&start, &scale(&dir_v, self.local_bbox[2])), scale(&dir_v, -1.0)),
            Hyperplane::new(end, dir),
            Hyperplane::new(start, scale(&dir, -1.0)),
        ]
    }

    /// Two passes: first shrink the cross-section as a circle while rolling the
    /// frame toward the closest obstacle, then shrink the remaining axis.
    fn find_ellipsoid(&mut self, offset_x: f64) {
        let f = crate::geometry::norm(&sub(&self.p2, &self.p1)) / 2.0;
        let mut axes = Vector3::new(f + offset_x.max(0.0), f, f);
        let ri = self.frame();
        let mut rf = ri;
        let centre = midpoint(&self.p1, &self.p2);

        let mut e = Ellipsoid::new(shape(&rf, &axes), centre);
        let mut inside = e.points_inside(&self.obs);
        while let Some(pw) = e.closest_point(&inside) {
            let local = Vector3::from(sub(&pw, &centre));
            let p = ri.transpose() * local;
            let roll = p[2].atan2(p[1]);
            rf = ri * Rotation3::from_euler_angles(roll, 0.0, 0.0).into_inner();
            let p = rf.transpose() * local;
            if p[0].abs() < axes[0] {
                axes[1] = p[1].abs() / (1.0 - (p[0] / axes[0]).powi(2)).sqrt();
            }
            e.set_shape(shape(&rf, &Vector3::new(axes[0], axes[1], axes[1])));
            inside.retain(|pt| *pt != pw && 1.0 - e.dist(pt) > SHRINK_EPSILON);
        }

        // axes[2] still holds the untouched cross-section radius here.
        e.set_shape(shape(&rf, &axes));
        let mut inside = e.points_inside(&self.obs);
        while let Some(pw) = e.closest_point(&inside) {
            let p = rf.transpose() * Vector3::from(sub(&pw, &centre));
            let dd = 1.0 - (p[0] / axes[0]).powi(2) - (p[1] / axes[1].max(MIN_AXIS)).powi(2);
            if dd > SHRINK_EPSILON {
                axes[2] = p[2].abs() / dd.sqrt();
            }
            e.set_shape(shape(&rf, &axes));
            inside.retain(|pt| *pt != pw && 1.0 - e.dist(pt) > SHRINK_EPSILON);
        }
        self.ellipsoid = e;
    }
}

impl SegmentSolver<3> for LineSegment<3> {
    fn new(start: [f64; 3], end: [f64; 3]) -> Self {
        LineSegment::with_endpoints(start, end)
    }

    fn bind_local_bbox(&mut self, extent: [f64; 3]) {
        self.local_bbox = extent;
    }

    fn bind_obstacles(&mut self, obstacles: &[[f64; 3]]) {
        let planes = self.local_bbox_planes();
        self.filter_obstacles(obstacles, planes);
    }

    fn dilate(&mut self, offset_x: f64) {
        self.find_ellipsoid(offset_x);
        let planes = self.local_bbox_planes();
        self.find_polyhedron(planes);
    }

    fn ellipsoid(&self) -> Ellipsoid<3> {
        self.ellipsoid.clone()
    }

    fn polyhedron(&self) -> Polyhedron<3> {
        self.polyhedron.clone()
    }
}
