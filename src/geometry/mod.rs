//! Geometric primitives shared by the solver and the decomposition.
//!
//! Points and vectors are plain `[f64; D]` arrays. The small helpers below cover
//! the handful of vector operations the corridor code needs; anything involving
//! matrices goes through `nalgebra` inside [`ellipsoid`].

pub mod ellipsoid;
pub mod hyperplane;
pub mod linear_constraint;
pub mod vertices;

pub use ellipsoid::Ellipsoid;
pub use hyperplane::{Hyperplane, Polyhedron};
pub use linear_constraint::LinearConstraint;

/// Tolerance used for "on the boundary counts as inside" checks.
pub const EPSILON: f64 = 1e-10;

#[inline]
pub fn dot<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
pub fn sub<const D: usize>(a: &[f64; D], b: &[f64; D]) -> [f64; D] {
    std::array::from_fn(|k| a[k] - b[k])
}

#[inline]
pub fn add<const D: usize>(a: &[f64; D], b: &[f64; D]) -> [f64; D] {
    std::array::from_fn(|k| a[k] + b[k])
}

#[inline]
pub fn scale<const D: usize>(a: &[f64; D], s: f64) -> [f64; D] {
    std::array::from_fn(|k| a[k] * s)
}

#[inline]
pub fn norm<const D: usize>(a: &[f64; D]) -> f64 {
    dot(a, a).sqrt()
}

/// Midpoint of two points.
#[inline]
pub fn midpoint<const D: usize>(a: &[f64; D], b: &[f64; D]) -> [f64; D] {
    std::array::from_fn(|k| 0.5 * (a[k] + b[k]))
}

/// Unit vector along `a`, or `None` for a zero-length vector.
#[inline]
pub fn normalized<const D: usize>(a: &[f64; D]) -> Option<[f64; D]> {
    let len = norm(a);
    if len > 0.0 && len.is_finite() {
        Some(scale(a, 1.0 / len))
    } else {
        None
    }
}
