use crate::geometry::{Ellipsoid, Hyperplane, Polyhedron};

/// Smallest semi-axis an ellipsoid is allowed to shrink to, so its shape
/// matrix stays invertible when an obstacle sits on the segment itself.
pub(crate) const MIN_AXIS: f64 = 1e-6;

/// An obstacle is still "inside" an ellipsoid when `1 - dist` exceeds this.
pub(crate) const SHRINK_EPSILON: f64 = 1e-10;

/// Reference segment solver: grows an ellipsoid around one line segment until
/// it touches the nearby obstacles, then separates it from them with planes.
///
/// The dimension-specific parts (segment frame, ellipsoid shrinking, local box
/// planes) live in the `d2` and `d3` modules.
#[derive(Clone, Debug)]
pub struct LineSegment<const D: usize> {
    pub(crate) p1: [f64; D],
    pub(crate) p2: [f64; D],
    pub(crate) local_bbox: [f64; D],
    pub(crate) obs: Vec<[f64; D]>,
    pub(crate) ellipsoid: Ellipsoid<D>,
    pub(crate) polyhedron: Polyhedron<D>,
}

impl<const D: usize> LineSegment<D> {
    pub(crate) fn with_endpoints(p1: [f64; D], p2: [f64; D]) -> Self {
        Self {
            p1,
            p2,
            local_bbox: [0.0; D],
            obs: Vec::new(),
            ellipsoid: Ellipsoid::default(),
            polyhedron: Polyhedron::default(),
        }
    }

    pub fn endpoints(&self) -> ([f64; D], [f64; D]) {
        (self.p1, self.p2)
    }

    /// Obstacles that survived the local bounding box filter.
    pub fn obstacles(&self) -> &[[f64; D]] {
        &self.obs
    }

    pub(crate) fn has_local_bbox(&self) -> bool {
        self.local_bbox.iter().any(|&x| x != 0.0)
    }

    /// Keeps only the obstacles inside the local box planes.
    pub(crate) fn filter_obstacles(&mut self, obstacles: &[[f64; D]], bbox_planes: Vec<Hyperplane<D>>) {
        let vs = Polyhedron::new(bbox_planes);
        self.obs = vs.points_inside(obstacles);
    }

    /// Separates the current ellipsoid from every retained obstacle, closest
    /// first, then closes the region with the local box planes.
    pub(crate) fn find_polyhedron(&mut self, bbox_planes: Vec<Hyperplane<D>>) {
        let mut poly = Polyhedron::default();
        let mut remain = self.obs.clone();

        while !remain.is_empty() {
            match self.ellipsoid.closest_hyperplane(&remain) {
                Some(v) => {
                    poly.add(v);
                    // The touching obstacle has signed distance 0 and leaves too.
                    remain.retain(|pt| v.signed_dist(pt) < 0.0);
                }
                None => {
                    // Closest obstacle sits on the ellipsoid centre: no direction to cut along.
                    let Some(pw) = self.ellipsoid.closest_point(&remain) else {
                        break;
                    };
                    log::warn!("skipping obstacle {:?} at the segment centre", pw);
                    remain.retain(|pt| *pt != pw);
                }
            }
        }
        log::trace!("segment separated by {} obstacle planes", poly.len());

        for v in bbox_planes {
            poly.add(v);
        }
        self.polyhedron = poly;
    }
}
