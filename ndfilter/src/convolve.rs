//! Linear filtering.
//!
//! The kernel is applied as given, without flipping: the output at `p` is
//! `Σ_j kernel[j] · array[p + offset_j]`. Accumulation happens in `f64` whatever
//! the element type, and the sum is narrowed back on store.

use log::debug;
use ndview::{Array, ArrayView, ArrayViewMut, Element};
use num_traits::Float;

use crate::boundary::BoundaryMode;
use crate::error::{FilterError, Result};
use crate::neighbors::NeighborEnumerator;

/// Convolve `array` with `kernel` into a newly allocated array.
pub fn convolve<T: Element>(
    array: &ArrayView<'_, T>,
    kernel: &ArrayView<'_, T>,
    mode: BoundaryMode,
) -> Result<Array<T>> {
    let mut out = Array::try_zeros(array.shape())?;
    convolve_into(array, kernel, mode, &mut out.view_mut())?;
    Ok(out)
}

/// Convolve `array` with `kernel`, writing into `out`.
///
/// `out` must have the shape of `array`. Zero kernel entries are skipped.
pub fn convolve_into<T: Element>(
    array: &ArrayView<'_, T>,
    kernel: &ArrayView<'_, T>,
    mode: BoundaryMode,
    out: &mut ArrayViewMut<'_, T>,
) -> Result<()> {
    check_output_shape(array, out)?;
    let mut neighbors = NeighborEnumerator::new(array, kernel, mode, true)?;
    debug!(
        "convolve {:?} with {} weights, mode {}",
        array.shape(),
        neighbors.window_size(),
        mode
    );

    let mut cursor = array.cursor();
    let mut out_cursor = out.cursor();
    for _ in 0..array.size() {
        let mut acc = 0.0f64;
        for j in 0..neighbors.window_size() {
            if let Some(value) = neighbors.retrieve(&cursor, j) {
                acc += value.to_f64() * neighbors.weight(j).to_f64();
            }
        }
        out.set_at(&out_cursor, T::from_f64(acc));
        neighbors.advance(&mut cursor);
        out_cursor.advance();
    }
    Ok(())
}

/// Apply a 1-D weight vector along `axis`.
pub fn convolve1d<T: Element>(
    array: &ArrayView<'_, T>,
    weights: &[T],
    axis: usize,
    mode: BoundaryMode,
) -> Result<Array<T>> {
    let kernel = axis_kernel(array.rank(), weights, axis)?;
    convolve(array, &kernel.view(), mode)
}

/// Order-0 Gaussian smoothing along `axis`.
pub fn gaussian_filter1d<T: Element + Float>(
    array: &ArrayView<'_, T>,
    sigma: f64,
    axis: usize,
    mode: BoundaryMode,
) -> Result<Array<T>> {
    let weights: Vec<T> = gaussian_weights(sigma)?
        .into_iter()
        .map(T::from_f64)
        .collect();
    convolve1d(array, &weights, axis, mode)
}

/// Order-0 Gaussian smoothing along every axis in turn.
pub fn gaussian_filter<T: Element + Float>(
    array: &ArrayView<'_, T>,
    sigma: f64,
    mode: BoundaryMode,
) -> Result<Array<T>> {
    let mut current = array.to_owned()?;
    for axis in 0..array.rank() {
        let smoothed = gaussian_filter1d(&current.view(), sigma, axis, mode)?;
        current = smoothed;
    }
    Ok(current)
}

/// Normalized Gaussian taps truncated at `floor(4σ + 0.5)` samples.
pub fn gaussian_weights(sigma: f64) -> Result<Vec<f64>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FilterError::InvalidSigma(sigma));
    }
    let radius = (4.0 * sigma + 0.5) as usize;
    let variance = sigma * sigma;
    let mut weights = Vec::new();
    weights.try_reserve_exact(2 * radius + 1)?;
    weights.resize(2 * radius + 1, 0.0);
    weights[radius] = 1.0;
    let mut total = 1.0;
    for i in 1..=radius {
        let w = (-0.5 * (i * i) as f64 / variance).exp();
        weights[radius + i] = w;
        weights[radius - i] = w;
        total += 2.0 * w;
    }
    for w in weights.iter_mut() {
        *w /= total;
    }
    Ok(weights)
}

/// An N-D kernel holding `weights` along `axis` and extent 1 elsewhere.
fn axis_kernel<T: Element>(rank: usize, weights: &[T], axis: usize) -> Result<Array<T>> {
    if axis >= rank {
        return Err(FilterError::InvalidAxis { axis, rank });
    }
    let mut shape = vec![1usize; rank];
    shape[axis] = weights.len();
    let mut data = Vec::new();
    data.try_reserve_exact(weights.len())?;
    data.extend_from_slice(weights);
    Ok(Array::from_vec(&shape, data)?)
}

pub(crate) fn check_output_shape<T: Element>(
    array: &ArrayView<'_, T>,
    out: &ArrayViewMut<'_, T>,
) -> Result<()> {
    if array.shape() != out.shape() {
        return Err(FilterError::OutputShapeMismatch {
            expected: array.shape().to_vec(),
            actual: out.shape().to_vec(),
        });
    }
    Ok(())
}
