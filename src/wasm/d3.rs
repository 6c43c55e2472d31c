use crate::bounds::BoundingBox;
use crate::decomposition::Decomposition;
use crate::geometry::{Ellipsoid, LinearConstraint};
use crate::wasm::utils::{flatten, parse_js_point, parse_js_points, to_js_error, to_points};
use js_sys::{Array, Float64Array};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox3D {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

#[wasm_bindgen]
impl BoundingBox3D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) -> BoundingBox3D {
        BoundingBox3D { min_x, min_y, min_z, max_x, max_y, max_z }
    }

    #[wasm_bindgen(js_name = fromOrigin)]
    pub fn from_origin(x: f64, y: f64, z: f64, width: f64, height: f64, depth: f64) -> BoundingBox3D {
        BoundingBox::from_origin([x, y, z], [width, height, depth]).into()
    }
}

impl From<BoundingBox<3>> for BoundingBox3D {
    fn from(b: BoundingBox<3>) -> Self {
        let ([min_x, min_y, min_z], [max_x, max_y, max_z]) = (b.min, b.max);
        BoundingBox3D { min_x, min_y, min_z, max_x, max_y, max_z }
    }
}

impl From<BoundingBox3D> for BoundingBox<3> {
    fn from(b: BoundingBox3D) -> Self {
        Self { min: [b.min_x, b.min_y, b.min_z], max: [b.max_x, b.max_y, b.max_z] }
    }
}

#[wasm_bindgen(js_name = LinearConstraint3D)]
pub struct LinearConstraint3DWASM {
    inner: LinearConstraint<3>,
}

#[wasm_bindgen(js_class = LinearConstraint3D)]
impl LinearConstraint3DWASM {
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> Vec<f64> { flatten(self.inner.a()) }
    #[wasm_bindgen(getter)]
    pub fn b(&self) -> Vec<f64> { self.inner.b().to_vec() }
    #[wasm_bindgen(getter)]
    pub fn p0(&self) -> Vec<f64> { self.inner.p0().to_vec() }
    pub fn inside(&self, x: f64, y: f64, z: f64) -> bool { self.inner.inside(&[x, y, z]) }
}

#[wasm_bindgen(js_name = Ellipsoid3D)]
pub struct Ellipsoid3DWASM {
    inner: Ellipsoid<3>,
}

#[wasm_bindgen(js_class = Ellipsoid3D)]
impl Ellipsoid3DWASM {
    #[wasm_bindgen(getter)]
    pub fn c(&self) -> Vec<f64> {
        let c = self.inner.c();
        (0..3).flat_map(|r| (0..3).map(move |k| c[(r, k)])).collect()
    }
    #[wasm_bindgen(getter)]
    pub fn d(&self) -> Vec<f64> { self.inner.d().to_vec() }
    pub fn volume(&self) -> f64 { self.inner.volume() }
}

#[wasm_bindgen(js_name = Decomposition3D)]
pub struct Decomposition3DWASM {
    inner: Decomposition<3>,
}

#[wasm_bindgen(js_class = Decomposition3D)]
impl Decomposition3DWASM {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Decomposition3DWASM {
        Decomposition3DWASM { inner: Decomposition::new() }
    }

    pub fn set_global_bbox(&mut self, bounds: BoundingBox3D) -> Result<(), JsValue> {
        self.inner.set_global_bbox(bounds.into()).map_err(to_js_error)
    }

    pub fn set_obstacles(&mut self, obstacles: &[f64]) { self.inner.set_obstacles(to_points(obstacles)); }
    pub fn set_obstacle_points(&mut self, points: JsValue) { self.inner.set_obstacles(parse_js_points(&points)); }
    pub fn set_local_bbox(&mut self, x: f64, y: f64, z: f64) { self.inner.set_local_bbox([x, y, z]); }
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
        let pt = parse_js_point::<3>(&pt_inside).ok_or_else(|| JsValue::from_str("expected an [x, y, z] point"))?;
        self.inner.tighten_polyhedron(index, pt, distance).map_err(to_js_error)
    }

    pub fn tighten_corridor(&mut self, distance: f64) -> Result<(), JsValue> {
        self.inner.tighten_corridor(distance).map_err(to_js_error)
    }

    pub fn set_constraints(&mut self, distance: f64) -> Result<Vec<LinearConstraint3DWASM>, JsValue> {
        let mut out = Vec::new();
        self.inner.set_constraints(&mut out, distance).map_err(to_js_error)?;
        Ok(out.into_iter().map(|inner| LinearConstraint3DWASM { inner }).collect())
    }

    pub fn get_constraints(&self) -> Vec<LinearConstraint3DWASM> {
        self.inner.get_constraints().into_iter().map(|inner| LinearConstraint3DWASM { inner }).collect()
    }

    pub fn get_ellipsoid(&self, index: usize) -> Option<Ellipsoid3DWASM> {
        self.inner.get_ellipsoid(index).map(|e| Ellipsoid3DWASM { inner: e.clone() })
    }

    /// Corners of polyhedron `index`, flat and unordered.
    pub fn polyhedron_vertices(&self, index: usize) -> Vec<f64> {
        self.inner.get_polyhedron(index).map(|p| flatten(&p.vertices())).unwrap_or_default()
    }

    pub fn polyhedron_normals(&self, index: usize) -> Vec<f64> {
        self.inner
            .get_polyhedron(index)
            .map(|p| {
                p.normals()
                    .iter()
                    .flat_map(|(pt, n)| [pt[0], pt[1], pt[2], n[0], n[1], n[2]])
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn corridor(&self) -> Array {
        self.inner
            .get_polyhedrons()
            .iter()
            .map(|p| JsValue::from(Float64Array::from(flatten(&p.vertices()).as_slice())))
            .collect()
    }
}

impl Default for Decomposition3DWASM {
    fn default() -> Self {
        Self::new()
    }
}
