use crate::bounds::{BoundingBox, BoundingPlanes};
use crate::dispatch::{dispatch, DEFAULT_WORKERS};
use crate::error::DecompError;
use crate::geometry::{midpoint, normalized, scale, sub, Ellipsoid, LinearConstraint, Polyhedron};
use crate::solver::{LineSegment, SegmentSolver};
use crate::util::Timed;

/// Number of segments a path of `n_points` yields.
///
/// A polyline gives `n_points - 1` segments. In circle-only mode the points
/// come in disjoint pairs, giving `n_points / 2` segments; a trailing unpaired
/// point is ignored.
pub fn segment_count(n_points: usize, circle_only: bool) -> usize {
    if circle_only {
        n_points / 2
    } else {
        n_points.saturating_sub(1)
    }
}

/// Index of the first path point of segment `i`; the segment ends at the next one.
#[inline]
pub fn path_index(i: usize, circle_only: bool) -> usize {
    if circle_only { 2 * i } else { i }
}

/// Safe flight corridor decomposition of a path through an obstacle cloud.
///
/// For every segment of the path, a segment solver of type `S` grows an
/// ellipsoid and a separating polyhedron. The solvers run in parallel on a
/// fixed number of workers (see [`crate::dispatch`]); results are stored in
/// path order.
///
/// The struct holds:
/// - the **obstacles** and the **local bounding box** shared by all segments,
/// - the optional **global bounding box** clipping every corridor,
/// - the **path** and segmentation mode of the last `dilate`,
/// - the resulting **ellipsoids**, **polyhedra** and their **solvers**.
pub struct Decomposition<const D: usize, S = LineSegment<D>> {
    path: Vec<[f64; D]>,
    circle_only: bool,
    obs: Vec<[f64; D]>,
    ellipsoids: Vec<Ellipsoid<D>>,
    polyhedrons: Vec<Polyhedron<D>>,
    lines: Vec<S>,
    local_bbox: [f64; D],
    global_bbox: BoundingBox<D>,
    workers: usize,
}

impl<const D: usize, S> Default for Decomposition<D, S> {
    fn default() -> Self {
        Self {
            path: Vec::new(),
            circle_only: false,
            obs: Vec::new(),
            ellipsoids: Vec::new(),
            polyhedrons: Vec::new(),
            lines: Vec::new(),
            local_bbox: [0.0; D],
            global_bbox: BoundingBox::disabled(),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl<const D: usize, S> Decomposition<D, S>
where
    S: SegmentSolver<D>,
    BoundingBox<D>: BoundingPlanes<D>,
{
    /// Creates a decomposition without global bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decomposition whose corridors are clipped to `bounds`.
    pub fn with_global_bbox(bounds: BoundingBox<D>) -> Result<Self, DecompError> {
        let mut decomp = Self::default();
        decomp.set_global_bbox(bounds)?;
        Ok(decomp)
    }

    /// Sets the global bounding box. Pass [`BoundingBox::disabled`] to turn clipping off.
    pub fn set_global_bbox(&mut self, bounds: BoundingBox<D>) -> Result<(), DecompError> {
        bounds.validate()?;
        self.global_bbox = bounds;
        Ok(())
    }

    pub fn global_bbox(&self) -> BoundingBox<D> {
        self.global_bbox
    }

    /// Sets the obstacle points used by the next `dilate`.
    pub fn set_obstacles(&mut self, obs: Vec<[f64; D]>) {
        self.obs = obs;
    }

    pub fn obstacles(&self) -> &[[f64; D]] {
        &self.obs
    }

    /// Sets the per-axis half-extent of the box around each segment.
    pub fn set_local_bbox(&mut self, extent: [f64; D]) {
        self.local_bbox = extent;
    }

    pub fn local_bbox(&self) -> [f64; D] {
        self.local_bbox
    }

    /// Sets the number of parallel workers; zero is treated as one.
    pub fn set_workers(&mut self, workers: usize) {
        self.workers = workers.max(1);
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Computes one ellipsoid and polyhedron per path segment.
    ///
    /// Replaces any previous result. `offset_x` is added to the semi-axis along
    /// each segment. With `circle_only` the path is read as disjoint pairs
    /// `(path[0], path[1]), (path[2], path[3]), ...` instead of a polyline.
    /// Paths too short to form a segment give an empty decomposition.
    pub fn dilate(&mut self, path: &[[f64; D]], offset_x: f64, circle_only: bool) {
        let _t = Timed::debug("dilate");
        let n_segments = segment_count(path.len(), circle_only);
        log::debug!(
            "dilating {} segments from {} path points ({} obstacles, {} workers)",
            n_segments,
            path.len(),
            self.obs.len(),
            self.workers
        );

        self.circle_only = circle_only;
        self.lines = (0..n_segments)
            .map(|i| {
                let j = path_index(i, circle_only);
                let mut line = S::new(path[j], path[j + 1]);
                line.bind_local_bbox(self.local_bbox);
                line
            })
            .collect();

        dispatch(&mut self.lines[..], self.workers, &self.obs[..], offset_x);

        self.ellipsoids = self.lines.iter().map(|line| line.ellipsoid()).collect();
        self.polyhedrons = self.lines.iter().map(|line| line.polyhedron()).collect();
        self.path = path.to_vec();

        if self.global_bbox.is_enabled() {
            for poly in &mut self.polyhedrons {
                self.global_bbox.clip(poly);
            }
        }
    }

    /// Number of segments in the current decomposition.
    pub fn segment_count(&self) -> usize {
        self.polyhedrons.len()
    }

    /// Whether the last `dilate` read the path as disjoint pairs.
    pub fn is_circle_only(&self) -> bool {
        self.circle_only
    }

    /// Endpoints of segment `i` in the stored path.
    pub fn segment_endpoints(&self, i: usize) -> Result<([f64; D], [f64; D]), DecompError> {
        self.check_index(i)?;
        let j = path_index(i, self.circle_only);
        Ok((self.path[j], self.path[j + 1]))
    }

    /// Midpoint of segment `i`, the interior point used for its constraints.
    pub fn segment_midpoint(&self, i: usize) -> Result<[f64; D], DecompError> {
        let (a, b) = self.segment_endpoints(i)?;
        Ok(midpoint(&a, &b))
    }

    fn check_index(&self, i: usize) -> Result<(), DecompError> {
        let count = self.segment_count();
        if i < count {
            Ok(())
        } else {
            Err(DecompError::IndexOutOfRange { index: i, count })
        }
    }

    fn check_tighten(&self, i: usize, pt_inside: &[f64; D], distance: f64) -> Result<(), DecompError> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(DecompError::NegativeDistance(distance));
        }
        let margin = self.polyhedrons[i].closest_euclidean_dist(pt_inside);
        if distance > 0.0 && distance >= margin {
            log::warn!("refusing to tighten segment {} by {} (margin {})", i, distance, margin);
            return Err(DecompError::ExceedsMargin { index: i, distance, margin });
        }
        Ok(())
    }

    /// Shrinks polyhedron `i` by `distance` as seen from `pt_inside`.
    ///
    /// Every plane is first re-oriented so that `pt_inside` lies on its
    /// negative side and its normal normalised, then moved `distance` toward
    /// `pt_inside`. Fails without touching anything if `i` is out of range or
    /// `distance` would push a plane onto or past `pt_inside`.
    pub fn tighten_polyhedron(&mut self, i: usize, pt_inside: [f64; D], distance: f64) -> Result<(), DecompError> {
        self.check_index(i)?;
        self.check_tighten(i, &pt_inside, distance)?;
        tighten(&mut self.polyhedrons[i], &pt_inside, distance);
        Ok(())
    }

    /// Tightens every polyhedron by `distance` around its segment midpoint.
    ///
    /// All segments are checked before any is modified.
    pub fn tighten_corridor(&mut self, distance: f64) -> Result<(), DecompError> {
        let midpoints = self.midpoints();
        for (i, pt) in midpoints.iter().enumerate() {
            self.check_tighten(i, pt, distance)?;
        }
        for (poly, pt) in self.polyhedrons.iter_mut().zip(&midpoints) {
            tighten(poly, pt, distance);
        }
        Ok(())
    }

    /// Writes one linear constraint per segment into `out`, in path order.
    ///
    /// Each constraint is anchored at its segment midpoint and built from the
    /// polyhedron as it is *before* this call. When `distance > 0` the stored
    /// polyhedra are then tightened by `distance`, so repeated calls keep
    /// shrinking the corridor while each call returns the constraints of the
    /// corridor it found. On error `out` is left cleared and nothing is tightened.
    pub fn set_constraints(&mut self, out: &mut Vec<LinearConstraint<D>>, distance: f64) -> Result<(), DecompError> {
        out.clear();
        let midpoints = self.midpoints();
        for (i, pt) in midpoints.iter().enumerate() {
            self.check_tighten(i, pt, distance)?;
        }

        for (poly, pt) in self.polyhedrons.iter_mut().zip(&midpoints) {
            out.push(LinearConstraint::new(*pt, poly.hyperplanes()));
            if distance > 0.0 {
                tighten(poly, pt, distance);
            }
        }
        Ok(())
    }

    /// Linear constraints of the current polyhedra, anchored at segment midpoints.
    pub fn get_constraints(&self) -> Vec<LinearConstraint<D>> {
        self.polyhedrons
            .iter()
            .zip(self.midpoints())
            .map(|(poly, pt)| LinearConstraint::new(pt, poly.hyperplanes()))
            .collect()
    }

    fn midpoints(&self) -> Vec<[f64; D]> {
        (0..self.segment_count())
            .map(|i| {
                let j = path_index(i, self.circle_only);
                midpoint(&self.path[j], &self.path[j + 1])
            })
            .collect()
    }

    /// The path used by the last `dilate`.
    pub fn get_path(&self) -> Vec<[f64; D]> {
        self.path.clone()
    }

    /// The safe flight corridor: one polyhedron per segment.
    pub fn get_polyhedrons(&self) -> Vec<Polyhedron<D>> {
        self.polyhedrons.clone()
    }

    pub fn get_ellipsoids(&self) -> Vec<Ellipsoid<D>> {
        self.ellipsoids.clone()
    }

    pub fn get_polyhedron(&self, i: usize) -> Option<&Polyhedron<D>> {
        self.polyhedrons.get(i)
    }

    pub fn get_ellipsoid(&self, i: usize) -> Option<&Ellipsoid<D>> {
        self.ellipsoids.get(i)
    }

    /// The solvers of the last `dilate`, one per segment.
    pub fn solvers(&self) -> &[S] {
        &self.lines
    }
}

/// Re-orients, normalises and shifts every plane of `poly` toward `pt_inside`.
fn tighten<const D: usize>(poly: &mut Polyhedron<D>, pt_inside: &[f64; D], distance: f64) {
    for v in poly.hyperplanes_mut() {
        let mut n = v.n;
        if v.signed_dist(pt_inside) > 0.0 {
            n = scale(&n, -1.0);
        }
        let Some(n) = normalized(&n) else {
            continue;
        };
        v.n = n;
        v.p = sub(&v.p, &scale(&n, distance));
    }
}
