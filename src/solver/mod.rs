//! The per-segment solver contract and its reference implementation.

use crate::geometry::{Ellipsoid, Polyhedron};

pub mod d2;
pub mod d3;
pub mod line_segment;

pub use line_segment::LineSegment;

/// Trait defining the behavior of a segment solver.
///
/// A solver owns one path segment and turns it, together with the shared
/// obstacle set and a local bounding box, into an ellipsoid and a polyhedron.
/// The decomposition creates one solver per segment and hands each of them to
/// exactly one worker, so implementations need `Send` but not `Sync`.
///
/// Solvers are total: `dilate` must always leave *some* ellipsoid and
/// polyhedron behind, possibly degenerate. There is no failure channel.
pub trait SegmentSolver<const D: usize>: Send + Sized {
    /// Creates a solver for the segment `start -> end`.
    fn new(start: [f64; D], end: [f64; D]) -> Self;

    /// Per-axis half-extent bounding how far the corridor may grow.
    /// Axis 0 runs along the segment, the others across it.
    fn bind_local_bbox(&mut self, extent: [f64; D]);

    /// Hands the shared, read-only obstacle set to the solver.
    fn bind_obstacles(&mut self, obstacles: &[[f64; D]]);

    /// Runs the fitting algorithm. Called exactly once per instance.
    ///
    /// `offset_x` is added to the semi-axis along the segment.
    fn dilate(&mut self, offset_x: f64);

    /// The ellipsoid found by [`SegmentSolver::dilate`].
    fn ellipsoid(&self) -> Ellipsoid<D>;

    /// The polyhedron found by [`SegmentSolver::dilate`].
    fn polyhedron(&self) -> Polyhedron<D>;
}
