//! World-frame bounding box and the planes it adds to every corridor.

use crate::error::DecompError;
use crate::geometry::{Hyperplane, Polyhedron};

pub mod d2;
pub mod d3;

/// Generic axis-aligned bounding box for N-dimensional space.
///
/// A box with both corners at the origin is the "disabled" sentinel: clipping
/// against it adds nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize> {
    pub min: [f64; D],
    pub max: [f64; D],
}

impl<const D: usize> Default for BoundingBox<D> {
    fn default() -> Self {
        Self::disabled()
    }
}

impl<const D: usize> BoundingBox<D> {
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// Box spanning `origin` to `origin + size`.
    pub fn from_origin(origin: [f64; D], size: [f64; D]) -> Self {
        Self {
            min: origin,
            max: std::array::from_fn(|k| origin[k] + size[k]),
        }
    }

    /// The zero/zero sentinel.
    pub fn disabled() -> Self {
        Self { min: [0.0; D], max: [0.0; D] }
    }

    pub fn is_enabled(&self) -> bool {
        self.min.iter().chain(self.max.iter()).any(|&x| x != 0.0)
    }

    /// Checks `min <= max` on every axis. The disabled sentinel is valid.
    pub fn validate(&self) -> Result<(), DecompError> {
        for axis in 0..D {
            // Written so that NaN corners are rejected too.
            if !(self.min[axis] <= self.max[axis]) {
                return Err(DecompError::InvalidBounds {
                    axis,
                    min: self.min[axis],
                    max: self.max[axis],
                });
            }
        }
        Ok(())
    }

    pub fn contains(&self, pt: &[f64; D]) -> bool {
        (0..D).all(|k| pt[k] >= self.min[k] && pt[k] <= self.max[k])
    }
}

/// Dimension-specific generator of the bounding planes of a box.
///
/// Implemented for `BoundingBox<2>` and `BoundingBox<3>`; any other
/// dimension simply has no implementation.
pub trait BoundingPlanes<const D: usize> {
    /// The `2 * D` outward-facing planes of the box.
    fn planes(&self) -> Vec<Hyperplane<D>>;

    /// Appends the box planes to `poly` when the box is enabled.
    ///
    /// Existing planes are left alone, even when a box plane makes them redundant.
    fn clip(&self, poly: &mut Polyhedron<D>);
}

/// Plane `x[axis] <= value` (or `>= value` when `is_max` is false).
pub(crate) fn axis_plane<const D: usize>(axis: usize, value: f64, is_max: bool) -> Hyperplane<D> {
    let mut p = [0.0; D];
    let mut n = [0.0; D];
    p[axis] = value;
    n[axis] = if is_max { 1.0 } else { -1.0 };
    Hyperplane::new(p, n)
}
