use nalgebra::{SMatrix, SVector};

use super::{sub, Hyperplane, EPSILON};

/// An ellipsoid `{C·u + d : |u| ≤ 1}`.
///
/// The inverse of the shape matrix is cached because every distance query
/// needs it. A singular shape matrix collapses the ellipsoid onto its centre.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid<const D: usize> {
    c: SMatrix<f64, D, D>,
    c_inv: Option<SMatrix<f64, D, D>>,
    d: [f64; D],
}

impl<const D: usize> Default for Ellipsoid<D> {
    fn default() -> Self {
        Self::new(SMatrix::zeros(), [0.0; D])
    }
}

impl<const D: usize> Ellipsoid<D> {
    pub fn new(c: SMatrix<f64, D, D>, d: [f64; D]) -> Self {
        Self { c, c_inv: c.try_inverse(), d }
    }

    /// Shape matrix `C`.
    pub fn c(&self) -> &SMatrix<f64, D, D> {
        &self.c
    }

    /// Centre `d`.
    pub fn d(&self) -> [f64; D] {
        self.d
    }

    pub(crate) fn set_shape(&mut self, c: SMatrix<f64, D, D>) {
        self.c = c;
        self.c_inv = c.try_inverse();
    }

    fn local(&self, pt: &[f64; D]) -> Option<SVector<f64, D>> {
        let ci = self.c_inv.as_ref()?;
        Some(ci * SVector::from(sub(pt, &self.d)))
    }

    /// Ellipsoidal distance `|C⁻¹(pt − d)|`: below 1 inside, 1 on the surface.
    pub fn dist(&self, pt: &[f64; D]) -> f64 {
        match self.local(pt) {
            Some(u) => u.norm(),
            None if *pt == self.d => 0.0,
            None => f64::INFINITY,
        }
    }

    /// Inside or on the surface.
    pub fn inside(&self, pt: &[f64; D]) -> bool {
        self.dist(pt) <= 1.0
    }

    pub fn points_inside(&self, pts: &[[f64; D]]) -> Vec<[f64; D]> {
        pts.iter().filter(|pt| self.inside(pt)).copied().collect()
    }

    /// The point of `pts` with the smallest ellipsoidal distance.
    pub fn closest_point(&self, pts: &[[f64; D]]) -> Option<[f64; D]> {
        pts.iter()
            .map(|pt| (self.dist(pt), pt))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, pt)| *pt)
    }

    /// Plane tangent to the scaled ellipsoid through the closest point of `pts`.
    ///
    /// The normal is the gradient of the ellipsoidal distance, so the ellipsoid
    /// lies on the negative side. Returns `None` when `pts` is empty or the
    /// closest point coincides with the centre (no usable direction).
    pub fn closest_hyperplane(&self, pts: &[[f64; D]]) -> Option<Hyperplane<D>> {
        let pw = self.closest_point(pts)?;
        let n: [f64; D] = match self.c_inv.as_ref() {
            Some(ci) => {
                let g = ci.transpose() * (ci * SVector::from(sub(&pw, &self.d)));
                std::array::from_fn(|k| g[k])
            }
            None => sub(&pw, &self.d),
        };
        if super::norm(&n) <= EPSILON {
            return None;
        }
        Some(Hyperplane::new(pw, n))
    }
}

impl Ellipsoid<2> {
    /// Area of the ellipse.
    pub fn volume(&self) -> f64 {
        std::f64::consts::PI * self.c.determinant().abs()
    }
}

impl Ellipsoid<3> {
    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * std::f64::consts::PI * self.c.determinant().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix2, Matrix3};

    #[test]
    fn test_dist_axis_aligned() {
        let e = Ellipsoid::new(Matrix2::new(2.0, 0.0, 0.0, 1.0), [1.0, 1.0]);
        assert!((e.dist(&[3.0, 1.0]) - 1.0).abs() < 1e-12);
        assert!((e.dist(&[1.0, 1.5]) - 0.5).abs() < 1e-12);
        assert!(e.inside(&[2.0, 1.0]));
        assert!(!e.inside(&[1.0, 2.5]));
        assert!((e.volume() - 2.0 * std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_closest_hyperplane_separates() {
        let e = Ellipsoid::new(Matrix3::from_diagonal(&SVector::from([3.0, 1.0, 1.0])), [0.0; 3]);
        let pts = [[0.0, 2.0, 0.0], [7.0, 0.0, 0.0], [0.0, 0.0, -4.0]];
        let h = e.closest_hyperplane(&pts).expect("Should find a plane");
        assert_eq!(h.p, [0.0, 2.0, 0.0]);
        // The centre of the ellipsoid is on the negative side.
        assert!(h.signed_dist(&[0.0, 0.0, 0.0]) < 0.0);
        assert!(h.signed_dist(&[7.0, 0.0, 0.0]) < 0.0);
        assert!(h.signed_dist(&[0.0, 0.0, -4.0]) < 0.0);
    }

    #[test]
    fn test_singular_shape_collapses_to_centre() {
        let e = Ellipsoid::<2>::new(Matrix2::zeros(), [1.0, 2.0]);
        assert_eq!(e.dist(&[1.0, 2.0]), 0.0);
        assert_eq!(e.dist(&[1.0, 3.0]), f64::INFINITY);
        assert!(e.closest_hyperplane(&[[1.0, 2.0]]).is_none());
        assert!(e.closest_hyperplane(&[[1.0, 3.0]]).is_some());
    }
}
