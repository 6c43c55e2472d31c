//! Parallel fan-out of segment solvers.
//!
//! The index space `0..segment_count` is split into `workers` contiguous
//! ranges up front. Each worker then gets exclusive `&mut` access to its own
//! sub-slice of solvers, so no two workers can ever touch the same slot. The
//! `rayon::scope` join is the only synchronisation point.

use std::ops::Range;

use crate::solver::SegmentSolver;
use crate::util::Timed;

/// Number of workers a decomposition uses unless told otherwise.
pub const DEFAULT_WORKERS: usize = 4;

/// Splits `0..segment_count` into exactly `max(workers, 1)` ranges.
///
/// Ranges have length `ceil(segment_count / workers)` and are clamped to
/// `segment_count`, so trailing ranges may be empty. The last range always
/// ends at `segment_count`. Ranges never overlap and together cover every
/// index exactly once.
pub fn partition(segment_count: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let section = segment_count.div_ceil(workers);
    (0..workers)
        .map(|k| {
            let start = (k * section).min(segment_count);
            let end = if k + 1 == workers {
                segment_count
            } else {
                ((k + 1) * section).min(segment_count)
            };
            start..end
        })
        .collect()
}

/// Binds the obstacles and runs `dilate` on every solver, in parallel.
///
/// Returns once every worker has finished.
pub fn dispatch<const D: usize, S: SegmentSolver<D>>(
    solvers: &mut [S],
    workers: usize,
    obstacles: &[[f64; D]],
    offset_x: f64,
) {
    if solvers.is_empty() {
        return;
    }
    let _t = Timed::debug("dispatch");
    let ranges = partition(solvers.len(), workers);

    rayon::scope(|s| {
        let mut rest = solvers;
        for range in ranges {
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            if chunk.is_empty() {
                continue;
            }
            log::trace!("worker dilating segments {:?}", range);
            s.spawn(move |_| {
                let _t = Timed::trace("worker");
                for solver in chunk {
                    solver.bind_obstacles(obstacles);
                    solver.dilate(offset_x);
                }
            });
        }
    });
}
