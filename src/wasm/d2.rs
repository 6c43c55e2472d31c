use crate::bounds::BoundingBox;
use crate::decomposition::Decomposition;
use crate::geometry::{Ellipsoid, LinearConstraint};
use crate::wasm::utils::{flatten, parse_js_point, parse_js_points, to_js_error, to_points};
use js_sys::{Array, Float64Array};
use wasm_bindgen::prelude::*;

// --- Bounding Box ---

#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

#[wasm_bindgen]
impl BoundingBox2D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> BoundingBox2D {
        BoundingBox2D { min_x, min_y, max_x, max_y }
    }

    /// Box spanning `(x, y)` to `(x + width, y + height)`.
    #[wasm_bindgen(js_name = fromOrigin)]
    pub fn from_origin(x: f64, y: f64, width: f64, height: f64) -> BoundingBox2D {
        BoundingBox::from_origin([x, y], [width, height]).into()
    }
}

impl From<BoundingBox2D> for BoundingBox<2> {
    fn from(b: BoundingBox2D) -> Self {
        Self { min: [b.min_x, b.min_y], max: [b.max_x, b.max_y] }
    }
}

impl From<BoundingBox<2>> for BoundingBox2D {
    fn from(b: BoundingBox<2>) -> Self {
        BoundingBox2D { min_x: b.min[0], min_y: b.min[1], max_x: b.max[0], max_y: b.max[1] }
    }
}

// --- Linear Constraint ---

#[wasm_bindgen(js_name = LinearConstraint2D)]
pub struct LinearConstraint2DWASM {
    inner: LinearConstraint<2>,
}

#[wasm_bindgen(js_class = LinearConstraint2D)]
impl LinearConstraint2DWASM {
    /// Row-major `A`, two entries per row.
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> Vec<f64> { flatten(self.inner.a()) }
    #[wasm_bindgen(getter)]
    pub fn b(&self) -> Vec<f64> { self.inner.b().to_vec() }
    #[wasm_bindgen(getter)]
    pub fn p0(&self) -> Vec<f64> { self.inner.p0().to_vec() }
    pub fn inside(&self, x: f64, y: f64) -> bool { self.inner.inside(&[x, y]) }
}

// --- Ellipse ---

#[wasm_bindgen(js_name = Ellipsoid2D)]
pub struct Ellipsoid2DWASM {
    inner: Ellipsoid<2>,
}

#[wasm_bindgen(js_class = Ellipsoid2D)]
impl Ellipsoid2DWASM {
    /// Row-major shape matrix.
    #[wasm_bindgen(getter)]
    pub fn c(&self) -> Vec<f64> {
        let c = self.inner.c();
        vec![c[(0, 0)], c[(0, 1)], c[(1, 0)], c[(1, 1)]]
    }
    #[wasm_bindgen(getter)]
    pub fn d(&self) -> Vec<f64> { self.inner.d().to_vec() }
    pub fn volume(&self) -> f64 { self.inner.volume() }
}

// --- Decomposition ---

#[wasm_bindgen(js_name = Decomposition2D)]
pub struct Decomposition2DWASM {
    inner: Decomposition<2>,
}

#[wasm_bindgen(js_class = Decomposition2D)]
impl Decomposition2DWASM {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Decomposition2DWASM {
        Decomposition2DWASM { inner: Decomposition::new() }
    }

    pub fn set_global_bbox(&mut self, bounds: BoundingBox2D) -> Result<(), JsValue> {
        self.inner.set_global_bbox(bounds.into()).map_err(to_js_error)
    }

    /// Obstacles as a flat `[x, y, x, y, ...]` buffer.
    pub fn set_obstacles(&mut self, obstacles: &[f64]) { self.inner.set_obstacles(to_points(obstacles)); }

    /// Obstacles as an array of `[x, y]` arrays.
    pub fn set_obstacle_points(&mut self, points: JsValue) { self.inner.set_obstacles(parse_js_points(&points)); }

    pub fn set_local_bbox(&mut self, x: f64, y: f64) { self.inner.set_local_bbox([x, y]); }
    pub fn set_workers(&mut self, workers: usize) { self.inner.set_workers(workers); }

    pub fn dilate(&mut self, path: &[f64], offset_x: f64, circle_only: bool) {
        self.inner.dilate(&to_points(path), offset_x, circle_only);
    }

    pub fn dilate_iter(&mut self, path: &[f64], iterations: usize, resolution: f64, offset_x: f64) {
        self.inner.dilate_iter(&to_points(path), iterations, resolution, offset_x);
    }

    #[wasm_bindgen(getter)]
    pub fn count_segments(&self) -> usize { self.inner.segment_count() }

    #[wasm_bindgen(getter)]
    pub fn path(&self) -> Vec<f64> { flatten(&self.inner.get_path()) }

    pub fn tighten_polyhedron(&mut self, index: usize, pt_inside: JsValue, distance: f64) -> Result<(), JsValue> {
        let pt = parse_js_point::<2>(&pt_inside).ok_or_else(|| JsValue::from_str("expected an [x, y] point"))?;
        self.inner.tighten_polyhedron(index, pt, distance).map_err(to_js_error)
    }

    pub fn tighten_corridor(&mut self, distance: f64) -> Result<(), JsValue> {
        self.inner.tighten_corridor(distance).map_err(to_js_error)
    }

    pub fn set_constraints(&mut self, distance: f64) -> Result<Vec<LinearConstraint2DWASM>, JsValue> {
        let mut out = Vec::new();
        self.inner.set_constraints(&mut out, distance).map_err(to_js_error)?;
        Ok(out.into_iter().map(|inner| LinearConstraint2DWASM { inner }).collect())
    }

    pub fn get_constraints(&self) -> Vec<LinearConstraint2DWASM> {
        self.inner.get_constraints().into_iter().map(|inner| LinearConstraint2DWASM { inner }).collect()
    }

    pub fn get_ellipsoid(&self, index: usize) -> Option<Ellipsoid2DWASM> {
        self.inner.get_ellipsoid(index).map(|e| Ellipsoid2DWASM { inner: e.clone() })
    }

    /// Counter-clockwise corners of polygon `index`, flat.
    pub fn polyhedron_vertices(&self, index: usize) -> Vec<f64> {
        self.inner.get_polyhedron(index).map(|p| flatten(&p.vertices())).unwrap_or_default()
    }

    /// `[px, py, nx, ny, ...]` for every plane of polyhedron `index`, unit normals.
    pub fn polyhedron_normals(&self, index: usize) -> Vec<f64> {
        self.inner
            .get_polyhedron(index)
            .map(|p| p.normals().iter().flat_map(|(pt, n)| [pt[0], pt[1], n[0], n[1]]).collect())
            .unwrap_or_default()
    }

    /// One `Float64Array` of polygon corners per segment.
    pub fn corridor(&self) -> Array {
        self.inner
            .get_polyhedrons()
            .iter()
            .map(|p| JsValue::from(Float64Array::from(flatten(&p.vertices()).as_slice())))
            .collect()
    }
}

impl Default for Decomposition2DWASM {
    fn default() -> Self {
        Self::new()
    }
}
