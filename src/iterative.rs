//! Iterative decomposition: dilate, drop waypoints the corridor already
//! covers, dilate again, until the path stops shrinking.

use crate::bounds::{BoundingBox, BoundingPlanes};
use crate::decomposition::Decomposition;
use crate::geometry::{add, norm, scale, sub};
use crate::solver::SegmentSolver;

/// Minimum clearance a kept anchor must have inside the next corridor before
/// the waypoint between them may be dropped.
pub const SIMPLIFY_CLEARANCE: f64 = 0.1;

/// Default number of refinement rounds for [`Decomposition::dilate_iter`].
pub const DEFAULT_ITERATIONS: usize = 5;

/// Inserts evenly spaced points so that no two consecutive points are more
/// than `resolution` apart. Non-positive resolutions return the path as is.
pub fn downsample<const D: usize>(path: &[[f64; D]], resolution: f64) -> Vec<[f64; D]> {
    if path.len() < 2 || !(resolution > 0.0) {
        return path.to_vec();
    }
    let mut out = Vec::with_capacity(path.len());
    for pair in path.windows(2) {
        let step = sub(&pair[1], &pair[0]);
        let n = (norm(&step) / resolution).ceil().max(1.0) as usize;
        for k in 0..n {
            out.push(add(&pair[0], &scale(&step, k as f64 / n as f64)));
        }
    }
    if let Some(last) = path.last() {
        out.push(*last);
    }
    out
}

impl<const D: usize, S> Decomposition<D, S>
where
    S: SegmentSolver<D>,
    BoundingBox<D>: BoundingPlanes<D>,
{
    /// Dilates `path`, then repeatedly simplifies and re-dilates it.
    ///
    /// The raw path is first downsampled to `resolution` (skipped when
    /// `resolution <= 0`). Each round drops waypoints whose preceding anchor
    /// already sits well inside the following corridor, and stops early once a
    /// round removes nothing. Always works on a connected polyline.
    pub fn dilate_iter(&mut self, path: &[[f64; D]], iterations: usize, resolution: f64, offset_x: f64) {
        let mut path = downsample(path, resolution);
        self.dilate(&path, offset_x, false);
        let mut new_path = self.simplify(&path);

        for round in 0..iterations {
            if new_path.len() == path.len() {
                break;
            }
            log::debug!("iteration {}: path shrank from {} to {} points", round, path.len(), new_path.len());
            path = new_path;
            self.dilate(&path, offset_x, false);
            new_path = self.simplify(&path);
        }
    }

    /// Drops waypoints that the current corridor makes unnecessary.
    ///
    /// `path` must be the polyline the current decomposition was built from.
    pub(crate) fn simplify(&self, path: &[[f64; D]]) -> Vec<[f64; D]> {
        if path.len() <= 2 {
            return path.to_vec();
        }
        let mut ref_pt = path[0];
        let mut new_path = vec![ref_pt];
        for i in 2..path.len() {
            let covered = self.get_polyhedron(i - 1).is_some_and(|poly| {
                poly.inside(&ref_pt) && poly.closest_dist(&ref_pt) > SIMPLIFY_CLEARANCE
            });
            if !covered {
                ref_pt = path[i - 1];
                new_path.push(ref_pt);
            }
        }
        if let Some(last) = path.last() {
            new_path.push(*last);
        }
        new_path
    }
}
