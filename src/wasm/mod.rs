//! JavaScript bindings: `Decomposition2D` and `Decomposition3D` classes working
//! on flat `Float64Array` coordinate buffers.

pub mod d2;
pub mod d3;
pub mod utils;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

/// Starts the web-worker thread pool the segment dispatcher runs on.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}
