//! # sfc-decomp
//!
//! `sfc-decomp` computes safe flight corridors: given a piecewise-linear path and a
//! cloud of obstacle points, it grows one obstacle-free ellipsoid and one convex
//! polyhedron around every path segment. The union of the polyhedra is the corridor
//! a trajectory optimiser may move through. Works in 2D and 3D, in Rust as well as
//! compiled to WebAssembly (WASM).
//!
//! ## Features
//!
//! - **Parallel**: segments are solved on a fixed number of `rayon` workers, each owning
//!   a disjoint range of segments.
//! - **Bounded**: an optional local box around each segment and a global world box
//!   limit how far the corridor reaches.
//! - **Optimiser-ready**: polyhedra convert to `A·x ≤ b` constraints and can be
//!   uniformly tightened by a safety distance.
//! - **WASM-first**: `Decomposition2D` and `Decomposition3D` classes for JavaScript.
//!
//! ## Example
//!
//! ```
//! use sfc_decomp::{BoundingBox, Decomposition};
//!
//! let mut decomp: Decomposition<2> =
//!     Decomposition::with_global_bbox(BoundingBox::new([-5.0, -5.0], [15.0, 15.0])).unwrap();
//! decomp.set_local_bbox([2.0, 2.0]);
//! decomp.set_obstacles(vec![[5.0, 1.0], [5.0, -1.5], [9.0, 5.0]]);
//! decomp.dilate(&[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0]], 0.0, false);
//!
//! let constraints = decomp.get_constraints();
//! assert_eq!(constraints.len(), 2);
//! assert!(constraints[0].inside(&[0.0, 0.0]));
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is the [`Decomposition`] struct. Per-segment work is done by
//! a [`SegmentSolver`], [`LineSegment`] being the reference implementation.

mod bounds;
mod decomposition;
pub mod dispatch;
mod error;
pub mod geometry;
mod iterative;
pub mod solver;
mod util;
pub mod wasm;

pub use bounds::BoundingBox;
pub use bounds::BoundingPlanes;
pub use decomposition::Decomposition;
pub use decomposition::path_index;
pub use decomposition::segment_count;
pub use dispatch::DEFAULT_WORKERS;
pub use dispatch::dispatch;
pub use dispatch::partition;
pub use error::DecompError;
pub use geometry::Ellipsoid;
pub use geometry::Hyperplane;
pub use geometry::LinearConstraint;
pub use geometry::Polyhedron;
pub use iterative::DEFAULT_ITERATIONS;
pub use iterative::SIMPLIFY_CLEARANCE;
pub use iterative::downsample;
pub use solver::LineSegment;
pub use solver::SegmentSolver;
