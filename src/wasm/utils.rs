use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::error::DecompError;

pub fn parse_js_point<const D: usize>(val: &JsValue) -> Option<[f64; D]> {
    let arr = val.dyn_ref::<Array>()?;
    if arr.length() < D as u32 {
        return None;
    }
    let mut point = [0.0; D];
    for (i, x) in point.iter_mut().enumerate() {
        *x = arr.get(i as u32).as_f64()?;
    }
    Some(point)
}

/// Parses `[[x, y], [x, y], ...]`; entries that are not points are skipped.
pub fn parse_js_points<const D: usize>(val: &JsValue) -> Vec<[f64; D]> {
    match val.dyn_ref::<Array>() {
        Some(arr) => arr.iter().filter_map(|item| parse_js_point(&item)).collect(),
        None => Vec::new(),
    }
}

/// Groups a flat coordinate buffer into points; a trailing partial point is dropped.
pub fn to_points<const D: usize>(flat: &[f64]) -> Vec<[f64; D]> {
    flat.chunks_exact(D)
        .map(|c| std::array::from_fn(|k| c[k]))
        .collect()
}

pub fn flatten<const D: usize>(points: &[[f64; D]]) -> Vec<f64> {
    points.iter().flat_map(|p| p.iter().copied()).collect()
}

pub fn to_js_error(err: DecompError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
