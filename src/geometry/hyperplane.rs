use super::{dot, norm, normalized, sub, EPSILON};

/// An oriented plane `{x : n·(x − p) = 0}`.
///
/// For planes stored in a [`Polyhedron`] the interior lies on the side where
/// `n·(x − p) ≤ 0`, i.e. the normal points out of the safe region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hyperplane<const D: usize> {
    /// Anchor point on the plane.
    pub p: [f64; D],
    /// Normal vector. Not necessarily unit length.
    pub n: [f64; D],
}

impl<const D: usize> Hyperplane<D> {
    pub fn new(p: [f64; D], n: [f64; D]) -> Self {
        Self { p, n }
    }

    /// `n·(pt − p)`: negative inside, positive outside, scaled by `|n|`.
    #[inline]
    pub fn signed_dist(&self, pt: &[f64; D]) -> f64 {
        dot(&self.n, &sub(pt, &self.p))
    }

    /// Euclidean signed distance, or `None` for a zero normal.
    pub fn euclidean_dist(&self, pt: &[f64; D]) -> Option<f64> {
        let len = norm(&self.n);
        if len > 0.0 { Some(self.signed_dist(pt) / len) } else { None }
    }
}

/// A convex region given as the intersection of half-spaces.
///
/// Planes are kept in insertion order; redundant planes are never removed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyhedron<const D: usize> {
    pub(crate) vs: Vec<Hyperplane<D>>,
}

impl<const D: usize> Polyhedron<D> {
    pub fn new(vs: Vec<Hyperplane<D>>) -> Self {
        Self { vs }
    }

    /// Append a half-space.
    pub fn add(&mut self, v: Hyperplane<D>) {
        self.vs.push(v);
    }

    pub fn hyperplanes(&self) -> &[Hyperplane<D>] {
        &self.vs
    }

    pub(crate) fn hyperplanes_mut(&mut self) -> &mut [Hyperplane<D>] {
        &mut self.vs
    }

    pub fn len(&self) -> usize {
        self.vs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vs.is_empty()
    }

    /// Whether `pt` is inside or on the boundary of every half-space.
    pub fn inside(&self, pt: &[f64; D]) -> bool {
        self.vs.iter().all(|v| v.signed_dist(pt) <= EPSILON)
    }

    /// The subset of `pts` that lies inside the polyhedron.
    pub fn points_inside(&self, pts: &[[f64; D]]) -> Vec<[f64; D]> {
        pts.iter().filter(|pt| self.inside(pt)).copied().collect()
    }

    /// Anchor points paired with unit normals, for drawing.
    ///
    /// Planes with a zero normal are skipped.
    pub fn normals(&self) -> Vec<([f64; D], [f64; D])> {
        self.vs
            .iter()
            .filter_map(|v| normalized(&v.n).map(|n| (v.p, n)))
            .collect()
    }

    /// Smallest Euclidean distance from `pt` to any plane, whatever the plane's
    /// orientation.
    ///
    /// This is the largest distance the polyhedron can be tightened around `pt`
    /// before a plane reaches it. Zero normals are ignored; an empty polyhedron
    /// gives `f64::INFINITY`.
    pub fn closest_euclidean_dist(&self, pt: &[f64; D]) -> f64 {
        self.vs
            .iter()
            .filter_map(|v| v.euclidean_dist(pt))
            .map(f64::abs)
            .fold(f64::INFINITY, f64::min)
    }

    /// Smallest `|n·(pt − p)|` over all planes.
    pub fn closest_dist(&self, pt: &[f64; D]) -> f64 {
        self.vs
            .iter()
            .map(|v| v.signed_dist(pt).abs())
            .fold(f64::INFINITY, f64::min)
    }
}
