use super::{dot, Hyperplane, EPSILON};

/// Half-space system `A·x ≤ b` derived from a polyhedron and an interior point.
///
/// Each row comes from one hyperplane. Its sign is fixed so that `p0` satisfies
/// the row, whatever orientation the hyperplane had. If `p0` sits exactly on a
/// plane the row is kept as is and `p0` only satisfies it with equality.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearConstraint<const D: usize> {
    a: Vec<[f64; D]>,
    b: Vec<f64>,
    p0: [f64; D],
}

impl<const D: usize> Default for LinearConstraint<D> {
    fn default() -> Self {
        Self { a: Vec::new(), b: Vec::new(), p0: [0.0; D] }
    }
}

impl<const D: usize> LinearConstraint<D> {
    /// Builds the system from hyperplanes, orienting every row around `p0`.
    pub fn new(p0: [f64; D], vs: &[Hyperplane<D>]) -> Self {
        let mut a = Vec::with_capacity(vs.len());
        let mut b = Vec::with_capacity(vs.len());
        for v in vs {
            let mut n = v.n;
            let mut c = dot(&v.p, &n);
            if dot(&n, &p0) - c > 0.0 {
                n = n.map(|x| -x);
                c = -c;
            }
            a.push(n);
            b.push(c);
        }
        Self { a, b, p0 }
    }

    pub fn a(&self) -> &[[f64; D]] {
        &self.a
    }

    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// The interior point used to orient the rows.
    pub fn p0(&self) -> [f64; D] {
        self.p0
    }

    pub fn len(&self) -> usize {
        self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.b.is_empty()
    }

    /// `(row, rhs)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&[f64; D], f64)> + '_ {
        self.a.iter().zip(self.b.iter().copied())
    }

    /// Whether `pt` satisfies every row (boundary included).
    pub fn inside(&self, pt: &[f64; D]) -> bool {
        self.rows().all(|(row, rhs)| dot(row, pt) - rhs <= EPSILON)
    }
}
