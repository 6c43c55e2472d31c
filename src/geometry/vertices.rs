//! Corner enumeration for bounded polyhedra.
//!
//! Brute force over plane pairs (2D) or triples (3D): fine for the few dozen
//! planes a corridor segment carries, not meant for large systems.

use nalgebra::{Matrix3, Vector3};

use super::{dot, norm, sub, Polyhedron};

const VERTEX_TOLERANCE: f64 = 1e-7;

fn feasible<const D: usize>(poly: &Polyhedron<D>, pt: &[f64; D]) -> bool {
    poly.hyperplanes().iter().all(|v| {
        let len = norm(&v.n);
        len == 0.0 || v.signed_dist(pt) / len <= VERTEX_TOLERANCE
    })
}

fn push_unique<const D: usize>(out: &mut Vec<[f64; D]>, pt: [f64; D]) {
    if !out.iter().any(|q| norm(&sub(q, &pt)) < VERTEX_TOLERANCE) {
        out.push(pt);
    }
}

impl Polyhedron<2> {
    /// Corners of the polygon in counter-clockwise order.
    ///
    /// Empty when the region is empty or unbounded in a way that leaves fewer
    /// than three corners.
    pub fn vertices(&self) -> Vec<[f64; 2]> {
        let vs = self.hyperplanes();
        let mut out = Vec::new();
        for i in 0..vs.len() {
            for j in (i + 1)..vs.len() {
                let (n1, n2) = (vs[i].n, vs[j].n);
                let det = n1[0] * n2[1] - n1[1] * n2[0];
                if det.abs() < 1e-12 {
                    continue;
                }
                let c1 = dot(&n1, &vs[i].p);
                let c2 = dot(&n2, &vs[j].p);
                let pt = [(c1 * n2[1] - c2 * n1[1]) / det, (n1[0] * c2 - n2[0] * c1) / det];
                if feasible(self, &pt) {
                    push_unique(&mut out, pt);
                }
            }
        }
        if out.len() < 3 {
            return Vec::new();
        }

        let cx = out.iter().map(|p| p[0]).sum::<f64>() / out.len() as f64;
        let cy = out.iter().map(|p| p[1]).sum::<f64>() / out.len() as f64;
        out.sort_by(|a, b| {
            let ta = (a[1] - cy).atan2(a[0] - cx);
            let tb = (b[1] - cy).atan2(b[0] - cx);
            ta.total_cmp(&tb)
        });
        out
    }

    /// Polygon area via the shoelace formula over [`Polyhedron::vertices`].
    pub fn area(&self) -> f64 {
        let v = self.vertices();
        let n = v.len();
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += v[i][0] * v[j][1] - v[j][0] * v[i][1];
        }
        (area * 0.5).abs()
    }
}

impl Polyhedron<3> {
    /// Corners of the polyhedron, unordered.
    pub fn vertices(&self) -> Vec<[f64; 3]> {
        let vs = self.hyperplanes();
        let mut out = Vec::new();
        for i in 0..vs.len() {
            for j in (i + 1)..vs.len() {
                for k in (j + 1)..vs.len() {
                    let a = Matrix3::from_rows(&[
                        Vector3::from(vs[i].n).transpose(),
                        Vector3::from(vs[j].n).transpose(),
                        Vector3::from(vs[k].n).transpose(),
                    ]);
                    if a.determinant().abs() < 1e-12 {
                        continue;
                    }
                    let Some(inv) = a.try_inverse() else {
                        continue;
                    };
                    let c = Vector3::new(
                        dot(&vs[i].n, &vs[i].p),
                        dot(&vs[j].n, &vs[j].p),
                        dot(&vs[k].n, &vs[k].p),
                    );
                    let x = inv * c;
                    let pt = [x[0], x[1], x[2]];
                    if feasible(self, &pt) {
                        push_unique(&mut out, pt);
                    }
                }
            }
        }
        out
    }
}
