//! Rank-order filtering.
//!
//! The output at each position is the `rank`-th smallest value among the
//! neighbors selected by the footprint (its non-zero entries). Rank 0 is the
//! minimum, `window_size - 1` the maximum.
//!
//! Near the edges, [`BoundaryMode::Ignore`] leaves fewer than `window_size`
//! neighbors. The requested rank is then rescaled to the neighbors actually
//! present, `floor(n * rank / window_size)`, so a percentile keeps meaning the
//! same percentile at the border.

use std::cmp::Ordering;

use log::{debug, warn};
use ndview::{Array, ArrayView, ArrayViewMut, Element};

use crate::boundary::BoundaryMode;
use crate::convolve::check_output_shape;
use crate::error::{FilterError, Result};
use crate::neighbors::NeighborEnumerator;

/// Rank filter into a newly allocated array.
pub fn rank_filter<T: Element>(
    array: &ArrayView<'_, T>,
    footprint: &ArrayView<'_, T>,
    rank: usize,
    mode: BoundaryMode,
) -> Result<Array<T>> {
    let mut out = Array::try_zeros(array.shape())?;
    rank_filter_into(array, footprint, rank, mode, &mut out.view_mut())?;
    Ok(out)
}

/// Median filter: the rank filter at `window_size / 2`.
pub fn median_filter<T: Element>(
    array: &ArrayView<'_, T>,
    footprint: &ArrayView<'_, T>,
    mode: BoundaryMode,
) -> Result<Array<T>> {
    let window_size = NeighborEnumerator::new(array, footprint, mode, true)?.window_size();
    rank_filter(array, footprint, window_size / 2, mode)
}

/// Rank filter writing into `out`.
///
/// A `rank` outside `0..window_size` is rejected before anything is written.
/// Positions where no neighbor is present keep their previous output value.
pub fn rank_filter_into<T: Element>(
    array: &ArrayView<'_, T>,
    footprint: &ArrayView<'_, T>,
    rank: usize,
    mode: BoundaryMode,
    out: &mut ArrayViewMut<'_, T>,
) -> Result<()> {
    check_output_shape(array, out)?;
    let mut neighbors = NeighborEnumerator::new(array, footprint, mode, true)?;
    let window_size = neighbors.window_size();
    if rank >= window_size {
        return Err(FilterError::InvalidRank { rank, window_size });
    }
    debug!(
        "rank filter {:?}, rank {} of {}, mode {}",
        array.shape(),
        rank,
        window_size,
        mode
    );

    let mut scratch: Vec<T> = Vec::new();
    scratch.try_reserve_exact(window_size)?;

    let mut empty = 0usize;
    let mut cursor = array.cursor();
    let mut out_cursor = out.cursor();
    for _ in 0..array.size() {
        scratch.clear();
        scratch.extend(neighbors.present(&cursor).map(|(_, v)| v));
        if let Some(k) = effective_rank(rank, scratch.len(), window_size) {
            let (_, value, _) = scratch.select_nth_unstable_by(k, total_order);
            out.set_at(&out_cursor, *value);
        } else {
            empty += 1;
        }
        neighbors.advance(&mut cursor);
        out_cursor.advance();
    }
    if empty > 0 {
        warn!("rank filter: {empty} positions had no neighbors in the footprint");
    }
    Ok(())
}

/// Rank to select among `present` neighbors of a `window_size` window.
///
/// `None` when nothing is present.
pub fn effective_rank(rank: usize, present: usize, window_size: usize) -> Option<usize> {
    if present == 0 {
        return None;
    }
    if present == window_size {
        return Some(rank);
    }
    Some((present * rank / window_size).min(present - 1))
}

/// NaN compares equal to everything, which keeps selection total.
fn total_order<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}
