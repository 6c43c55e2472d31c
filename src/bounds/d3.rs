use super::{axis_plane, BoundingBox, BoundingPlanes};
use crate::geometry::{Hyperplane, Polyhedron};

impl BoundingPlanes<3> for BoundingBox<3> {
    fn planes(&self) -> Vec<Hyperplane<3>> {
        vec![
            axis_plane(2, self.max[2], true),
            axis_plane(2, self.min[2], false),
            axis_plane(0, self.max[0], true),
            axis_plane(0, self.min[0], false),
            axis_plane(1, self.max[1], true),
            axis_plane(1, self.min[1], false),
        ]
    }

    fn clip(&self, poly: &mut Polyhedron<3>) {
        if !self.is_enabled() {
            return;
        }
        for v in self.planes() {
            poly.add(v);
        }
    }
}
