/// Errors reported by the decomposition for misuse and invalid configuration.
///
/// Geometric degeneracy coming out of a segment solver (for example a corridor
/// squeezed flat by an obstacle lying on the path) is not an error: it shows up
/// as a degenerate polyhedron that downstream consumers can test for.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum DecompError {
    /// A segment index was used that does not exist in the current decomposition.
    ///
    /// This includes any index used before the first call to `dilate`, where the
    /// segment count is zero.
    #[error("segment index {index} is out of range for {count} segments")]
    IndexOutOfRange { index: usize, count: usize },

    /// The global bounding box has a minimum corner above its maximum corner.
    #[error("invalid global bounding box on axis {axis}: min {min} > max {max}")]
    InvalidBounds { axis: usize, min: f64, max: f64 },

    /// Tightening distances must be non-negative (and finite).
    #[error("tightening distance must be a non-negative number, got {0}")]
    NegativeDistance(f64),

    /// Tightening by `distance` would push a hyperplane past the interior point,
    /// leaving an empty or inside-out polyhedron.
    #[error("tightening segment {index} by {distance} exceeds its margin of {margin}")]
    ExceedsMargin { index: usize, distance: f64, margin: f64 },
}
