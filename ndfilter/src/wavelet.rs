//! Row-wise wavelet transforms on 2-D floating point arrays.
//!
//! Every row of length `N` is split into a low band and a high band of `N / 2`
//! samples each, stored as `[low | high]` in place of the row. Rows are
//! independent; columns are handled by running the same row transform over a
//! transposed view.
//!
//! Two filter banks are supported:
//! - Haar, unnormalized: `low = s0 + s1`, `high = s1 - s0`
//! - an even-length coefficient vector `c`, zero extended at both ends. The
//!   ten Daubechies tables D2 to D20 are provided in [`daubechies`].
//!
//! The n-tap forward transform drops the part of the low band that would sit
//! left of the row, so a plain round trip only restores samples `x >= n - 2`.
//! Pad the data with [`wavelet_center`] using a border of at least `n - 2`
//! samples to round-trip all of it.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use ndview::{Array, ArrayView, ArrayViewMut, Element};
use num_traits::Float;

use crate::error::{FilterError, Result};

/// Daubechies scaling coefficients, normalized to sum to 2.
pub mod daubechies {
    pub const D2: [f64; 2] = [1.0, 1.0];
    pub const D4: [f64; 4] = [0.6830127, 1.1830127, 0.3169873, -0.1830127];
    pub const D6: [f64; 6] = [
        0.47046721, 1.14111692, 0.650365, -0.19093442, -0.12083221, 0.0498175,
    ];
    pub const D8: [f64; 8] = [
        0.32580343, 1.01094572, 0.8922014, -0.03957503, -0.26450717, 0.0436163, 0.0465036,
        -0.01498699,
    ];
    pub const D10: [f64; 10] = [
        0.22641898, 0.85394354, 1.02432694, 0.19576696, -0.34265671, -0.04560113, 0.10970265,
        -0.0088268, -0.01779187, 0.00471743,
    ];
    pub const D12: [f64; 12] = [
        1.57742430e-01,
        6.99503810e-01,
        1.06226376e+00,
        4.45831320e-01,
        -3.19986600e-01,
        -1.83518060e-01,
        1.37888090e-01,
        3.89232100e-02,
        -4.46637500e-02,
        7.83251152e-04,
        6.75606236e-03,
        -1.52353381e-03,
    ];
    pub const D14: [f64; 14] = [
        1.10099430e-01,
        5.60791280e-01,
        1.03114849e+00,
        6.64372480e-01,
        -2.03513820e-01,
        -3.16835010e-01,
        1.00846700e-01,
        1.14003450e-01,
        -5.37824500e-02,
        -2.34399400e-02,
        1.77497900e-02,
        6.07514995e-04,
        -2.54790472e-03,
        5.00226853e-04,
    ];
    pub const D16: [f64; 16] = [
        7.69556200e-02,
        4.42467250e-01,
        9.55486150e-01,
        8.27816530e-01,
        -2.23857400e-02,
        -4.01658630e-01,
        6.68194092e-04,
        1.82076360e-01,
        -2.45639000e-02,
        -6.23502100e-02,
        1.97721600e-02,
        1.23688400e-02,
        -6.88771926e-03,
        -5.54004549e-04,
        9.55229711e-04,
        -1.66137261e-04,
    ];
    pub const D18: [f64; 18] = [
        5.38503500e-02,
        3.44834300e-01,
        8.55349060e-01,
        9.29545710e-01,
        1.88369550e-01,
        -4.14751760e-01,
        -1.36953550e-01,
        2.10068340e-01,
        4.34526750e-02,
        -9.56472600e-02,
        3.54892813e-04,
        3.16241700e-02,
        -6.67962023e-03,
        -6.05496058e-03,
        2.61296728e-03,
        3.25814671e-04,
        -3.56329759e-04,
        5.56455140e-05,
    ];
    pub const D20: [f64; 20] = [
        3.77171600e-02,
        2.66122180e-01,
        7.45575070e-01,
        9.73628110e-01,
        3.97637740e-01,
        -3.53336200e-01,
        -2.77109880e-01,
        1.80127450e-01,
        1.31602990e-01,
        -1.00966570e-01,
        -4.16592500e-02,
        4.69698100e-02,
        5.10043697e-03,
        -1.51790000e-02,
        1.97332536e-03,
        2.81768659e-03,
        -9.69947840e-04,
        -1.64709006e-04,
        1.32354367e-04,
        -1.87584100e-05,
    ];
}

/// One of the ten Daubechies tables.
///
/// Integer codes follow declaration order: code `i` selects the table with
/// `2 * (i + 1)` taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Daubechies {
    D2,
    D4,
    D6,
    D8,
    D10,
    D12,
    D14,
    D16,
    D18,
    D20,
}

impl Daubechies {
    pub const ALL: [Daubechies; 10] = [
        Self::D2,
        Self::D4,
        Self::D6,
        Self::D8,
        Self::D10,
        Self::D12,
        Self::D14,
        Self::D16,
        Self::D18,
        Self::D20,
    ];

    pub fn coefficients(self) -> &'static [f64] {
        match self {
            Self::D2 => &daubechies::D2,
            Self::D4 => &daubechies::D4,
            Self::D6 => &daubechies::D6,
            Self::D8 => &daubechies::D8,
            Self::D10 => &daubechies::D10,
            Self::D12 => &daubechies::D12,
            Self::D14 => &daubechies::D14,
            Self::D16 => &daubechies::D16,
            Self::D18 => &daubechies::D18,
            Self::D20 => &daubechies::D20,
        }
    }

    /// Number of coefficients
    pub fn taps(self) -> usize {
        self.coefficients().len()
    }

    pub fn code(self) -> i32 {
        (self.taps() / 2) as i32 - 1
    }
}

impl fmt::Display for Daubechies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.taps())
    }
}

impl FromStr for Daubechies {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.to_string() == s)
            .ok_or_else(|| FilterError::InvalidDaubechiesCode(format!("{s:?}")))
    }
}

impl TryFrom<i32> for Daubechies {
    type Error = FilterError;

    fn try_from(code: i32) -> Result<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| FilterError::InvalidDaubechiesCode(code.to_string()))
    }
}

/// Filter bank selection for wavelet operations
#[derive(Debug, Clone, PartialEq)]
pub enum FilterBank {
    /// Unnormalized 2-tap Haar
    Haar,
    /// One of the fixed Daubechies tables
    Daubechies(Daubechies),
    /// Caller supplied coefficients, non-empty and of even length
    Custom(Vec<f64>),
}

impl FilterBank {
    pub fn taps(&self) -> usize {
        match self {
            Self::Haar => 2,
            Self::Daubechies(d) => d.taps(),
            Self::Custom(c) => c.len(),
        }
    }

    fn validate(&self) -> Result<()> {
        if let Self::Custom(c) = self {
            if c.is_empty() || c.len() % 2 != 0 {
                return Err(FilterError::InvalidCoefficients(c.len()));
            }
        }
        Ok(())
    }

    /// Coefficients converted to the element type once per pass.
    fn kernel<T: Element + Float>(&self) -> Result<RowKernel<T>> {
        let source = match self {
            Self::Haar => return Ok(RowKernel::Haar),
            Self::Daubechies(d) => d.coefficients(),
            Self::Custom(c) => c.as_slice(),
        };
        let mut taps = Vec::new();
        taps.try_reserve_exact(source.len())?;
        taps.extend(source.iter().map(|&c| T::from_f64(c)));
        Ok(RowKernel::Taps(taps))
    }
}

impl fmt::Display for FilterBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Haar => f.write_str("haar"),
            Self::Daubechies(d) => write!(f, "{d}"),
            Self::Custom(c) => write!(f, "custom({} taps)", c.len()),
        }
    }
}

enum RowKernel<T> {
    Haar,
    Taps(Vec<T>),
}

impl<T: Element + Float> RowKernel<T> {
    fn forward(&self, src: &[T], dst: &mut [T]) {
        match self {
            Self::Haar => haar_forward_row(src, dst),
            Self::Taps(c) => taps_forward_row(c, src, dst),
        }
    }

    fn inverse(&self, src: &[T], dst: &mut [T]) {
        match self {
            Self::Haar => haar_inverse_row(src, dst),
            Self::Taps(c) => taps_inverse_row(c, src, dst),
        }
    }
}

fn haar_forward_row<T: Float>(src: &[T], dst: &mut [T]) {
    let half = src.len() / 2;
    for (x, pair) in src.chunks_exact(2).enumerate() {
        dst[x] = pair[0] + pair[1];
        dst[half + x] = pair[1] - pair[0];
    }
}

fn haar_inverse_row<T: Float>(src: &[T], dst: &mut [T]) {
    let half = src.len() / 2;
    let two = T::one() + T::one();
    let (low, high) = src.split_at(half);
    for (k, (&l, &h)) in low.iter().zip(high).enumerate() {
        dst[2 * k] = (l - h) / two;
        dst[2 * k + 1] = (l + h) / two;
    }
}

fn taps_forward_row<T: Float>(c: &[T], src: &[T], dst: &mut [T]) {
    let n = c.len();
    let half = src.len() / 2;
    for x in 0..half {
        let mut low = T::zero();
        let mut high = T::zero();
        // reads past the end of the row are zero
        for (ci, &s) in src.iter().skip(2 * x).take(n).enumerate() {
            low = low + c[n - 1 - ci] * s;
            if ci % 2 == 0 {
                high = high - c[ci] * s;
            } else {
                high = high + c[ci] * s;
            }
        }
        dst[x] = low;
        dst[half + x] = high;
    }
}

fn taps_inverse_row<T: Float>(c: &[T], src: &[T], dst: &mut [T]) {
    let n = c.len() as isize;
    let half = src.len() / 2;
    let two = T::one() + T::one();
    let (low, high) = src.split_at(half);
    for (x, out) in dst.iter_mut().enumerate() {
        let mut l = T::zero();
        let mut h = T::zero();
        for ci in 0..n {
            let m = x as isize + ci - n + 2;
            if m.rem_euclid(2) != 1 {
                continue;
            }
            // truncates toward zero: m = -1 reads entry 0
            let k = m / 2;
            if k < 0 || k as usize >= half {
                continue;
            }
            let (k, i) = (k as usize, ci as usize);
            l = l + c[i] * low[k];
            let hc = c[(n - 1 - ci) as usize] * high[k];
            if i % 2 == 0 {
                h = h + hc;
            } else {
                h = h - hc;
            }
        }
        *out = (l + h) / two;
    }
}

/// Check that `a` is 2-D with even rows; returns the row count and length.
fn check_rows<T: Element>(a: &ArrayViewMut<'_, T>) -> Result<(usize, usize)> {
    if a.rank() != 2 {
        return Err(FilterError::NotTwoDimensional(a.rank()));
    }
    let (rows, len) = (a.dim(0), a.dim(1));
    if len % 2 != 0 {
        return Err(FilterError::OddRowLength(len));
    }
    Ok((rows, len))
}

fn check_row_pair<T>(src: &[T], dst: &[T]) -> Result<()> {
    if src.len() % 2 != 0 {
        return Err(FilterError::OddRowLength(src.len()));
    }
    if dst.len() != src.len() {
        return Err(FilterError::OutputShapeMismatch {
            expected: vec![src.len()],
            actual: vec![dst.len()],
        });
    }
    Ok(())
}

/// Row-wise wavelet transform engine
#[derive(Debug, Clone)]
pub struct WaveletProcessor {
    bank: FilterBank,
}

impl WaveletProcessor {
    /// Create a processor, rejecting malformed custom coefficients.
    pub fn new(bank: FilterBank) -> Result<Self> {
        bank.validate()?;
        Ok(Self { bank })
    }

    pub fn filter_bank(&self) -> &FilterBank {
        &self.bank
    }

    /// Forward transform of one row into `dst` as `[low | high]`.
    pub fn decompose_row<T: Element + Float>(&self, src: &[T], dst: &mut [T]) -> Result<()> {
        check_row_pair(src, dst)?;
        self.bank.kernel()?.forward(src, dst);
        Ok(())
    }

    /// Inverse transform of one `[low | high]` row into `dst`.
    pub fn reconstruct_row<T: Element + Float>(&self, src: &[T], dst: &mut [T]) -> Result<()> {
        check_row_pair(src, dst)?;
        self.bank.kernel()?.inverse(src, dst);
        Ok(())
    }

    /// Forward transform of every row, in place.
    pub fn horizontal_decompose<T: Element + Float>(&self, a: &mut ArrayViewMut<'_, T>) -> Result<()> {
        self.transform_rows(a, true)
    }

    /// Inverse transform of every row, in place.
    pub fn horizontal_reconstruct<T: Element + Float>(
        &self,
        a: &mut ArrayViewMut<'_, T>,
    ) -> Result<()> {
        self.transform_rows(a, false)
    }

    /// Forward transform of every column, in place.
    pub fn vertical_decompose<T: Element + Float>(&self, a: &mut ArrayViewMut<'_, T>) -> Result<()> {
        if a.rank() != 2 {
            return Err(FilterError::NotTwoDimensional(a.rank()));
        }
        let mut columns = a.reborrow().swap_axes(0, 1)?;
        self.transform_rows(&mut columns, true)
    }

    /// Inverse transform of every column, in place.
    pub fn vertical_reconstruct<T: Element + Float>(
        &self,
        a: &mut ArrayViewMut<'_, T>,
    ) -> Result<()> {
        if a.rank() != 2 {
            return Err(FilterError::NotTwoDimensional(a.rank()));
        }
        let mut columns = a.reborrow().swap_axes(0, 1)?;
        self.transform_rows(&mut columns, false)
    }

    fn transform_rows<T: Element + Float>(
        &self,
        a: &mut ArrayViewMut<'_, T>,
        forward: bool,
    ) -> Result<()> {
        let (rows, len) = check_rows(a)?;
        let kernel = self.bank.kernel::<T>()?;
        debug!(
            "{} {} over {} rows of {}",
            if forward { "forward" } else { "inverse" },
            self.bank,
            rows,
            len
        );

        let mut src: Vec<T> = Vec::new();
        let mut dst: Vec<T> = Vec::new();
        src.try_reserve_exact(len)?;
        dst.try_reserve_exact(len)?;
        src.resize(len, T::zero());
        dst.resize(len, T::zero());

        for y in 0..rows {
            let mut lane = a.lane_mut(y);
            for (x, s) in src.iter_mut().enumerate() {
                *s = lane[x];
            }
            if forward {
                kernel.forward(&src, &mut dst);
            } else {
                kernel.inverse(&src, &mut dst);
            }
            for (x, &d) in dst.iter().enumerate() {
                lane[x] = d;
            }
        }
        Ok(())
    }
}

/// Forward Haar transform of every row.
pub fn haar<T: Element + Float>(a: &mut ArrayViewMut<'_, T>) -> Result<()> {
    WaveletProcessor::new(FilterBank::Haar)?.horizontal_decompose(a)
}

/// Inverse Haar transform of every row.
pub fn ihaar<T: Element + Float>(a: &mut ArrayViewMut<'_, T>) -> Result<()> {
    WaveletProcessor::new(FilterBank::Haar)?.horizontal_reconstruct(a)
}

/// Forward transform of every row with explicit coefficients.
pub fn wavelet<T: Element + Float>(a: &mut ArrayViewMut<'_, T>, coefficients: &[f64]) -> Result<()> {
    WaveletProcessor::new(FilterBank::Custom(coefficients.to_vec()))?.horizontal_decompose(a)
}

/// Inverse transform of every row with explicit coefficients.
pub fn iwavelet<T: Element + Float>(a: &mut ArrayViewMut<'_, T>, coefficients: &[f64]) -> Result<()> {
    WaveletProcessor::new(FilterBank::Custom(coefficients.to_vec()))?.horizontal_reconstruct(a)
}

/// Forward Daubechies transform of every row.
pub fn daubechies<T: Element + Float>(a: &mut ArrayViewMut<'_, T>, d: Daubechies) -> Result<()> {
    WaveletProcessor::new(FilterBank::Daubechies(d))?.horizontal_decompose(a)
}

/// Inverse Daubechies transform of every row.
pub fn idaubechies<T: Element + Float>(a: &mut ArrayViewMut<'_, T>, d: Daubechies) -> Result<()> {
    WaveletProcessor::new(FilterBank::Daubechies(d))?.horizontal_reconstruct(a)
}

/// Haar over rows, then columns.
///
/// With `preserve_energy` the result is halved, which makes the 2-D transform
/// orthonormal.
pub fn haar_2d<T: Element + Float>(a: &mut ArrayViewMut<'_, T>, preserve_energy: bool) -> Result<()> {
    check_2d_even(a)?;
    info!("haar 2d {:?}, preserve energy {}", a.shape(), preserve_energy);
    let processor = WaveletProcessor::new(FilterBank::Haar)?;
    processor.horizontal_decompose(a)?;
    processor.vertical_decompose(a)?;
    if preserve_energy {
        let two = T::one() + T::one();
        a.map_inplace(|v| v / two);
    }
    Ok(())
}

/// Inverse of [`haar_2d`].
pub fn ihaar_2d<T: Element + Float>(a: &mut ArrayViewMut<'_, T>, preserve_energy: bool) -> Result<()> {
    check_2d_even(a)?;
    info!("inverse haar 2d {:?}, preserve energy {}", a.shape(), preserve_energy);
    let processor = WaveletProcessor::new(FilterBank::Haar)?;
    if preserve_energy {
        let two = T::one() + T::one();
        a.map_inplace(|v| v * two);
    }
    processor.vertical_reconstruct(a)?;
    processor.horizontal_reconstruct(a)
}

/// Daubechies over rows, then columns.
pub fn daubechies_2d<T: Element + Float>(a: &mut ArrayViewMut<'_, T>, d: Daubechies) -> Result<()> {
    check_2d_even(a)?;
    info!("{} 2d {:?}", d, a.shape());
    let processor = WaveletProcessor::new(FilterBank::Daubechies(d))?;
    processor.horizontal_decompose(a)?;
    processor.vertical_decompose(a)
}

/// Inverse of [`daubechies_2d`]: columns, then rows.
pub fn idaubechies_2d<T: Element + Float>(a: &mut ArrayViewMut<'_, T>, d: Daubechies) -> Result<()> {
    check_2d_even(a)?;
    info!("inverse {} 2d {:?}", d, a.shape());
    let processor = WaveletProcessor::new(FilterBank::Daubechies(d))?;
    processor.vertical_reconstruct(a)?;
    processor.horizontal_reconstruct(a)
}

/// Both passes must validate before the first one mutates anything.
fn check_2d_even<T: Element>(a: &ArrayViewMut<'_, T>) -> Result<()> {
    if a.rank() != 2 {
        return Err(FilterError::NotTwoDimensional(a.rank()));
    }
    for &extent in a.shape() {
        if extent % 2 != 0 {
            return Err(FilterError::OddRowLength(extent));
        }
    }
    Ok(())
}

/// Copy a 2-D array into the middle of a zero array with power-of-two extents.
///
/// Each extent becomes the smallest power of two holding `extent + 2 * border`
/// samples. The leading pad is `(new - old) / 2`.
pub fn wavelet_center<T: Element>(a: &ArrayView<'_, T>, border: usize) -> Result<Array<T>> {
    if a.rank() != 2 {
        return Err(FilterError::NotTwoDimensional(a.rank()));
    }
    let mut shape = [0usize; 2];
    for (d, slot) in shape.iter_mut().enumerate() {
        *slot = border
            .checked_mul(2)
            .and_then(|b| b.checked_add(a.dim(d)))
            .and_then(usize::checked_next_power_of_two)
            .ok_or_else(|| ndview::ArrayError::Overflow(a.shape().to_vec()))?;
    }
    info!("centering {:?} in {:?}", a.shape(), shape);

    let pad = [(shape[0] - a.dim(0)) / 2, (shape[1] - a.dim(1)) / 2];
    let mut out = Array::try_zeros(&shape)?;
    copy_window(a, &mut out.view_mut(), [0, 0], pad);
    Ok(out)
}

/// Extract the `original_shape` region placed by [`wavelet_center`].
pub fn wavelet_decenter<T: Element>(
    a: &ArrayView<'_, T>,
    original_shape: &[usize],
    border: usize,
) -> Result<Array<T>> {
    let fits = a.rank() == 2
        && original_shape.len() == 2
        && (0..2).all(|d| {
            original_shape[d]
                .checked_add(border.saturating_mul(2))
                .is_some_and(|needed| needed <= a.dim(d))
        });
    if !fits {
        return Err(FilterError::DecenterShape {
            centered: a.shape().to_vec(),
            original: original_shape.to_vec(),
            border,
        });
    }
    info!("decentering {:?} to {:?}", a.shape(), original_shape);

    let pad = [
        (a.dim(0) - original_shape[0]) / 2,
        (a.dim(1) - original_shape[1]) / 2,
    ];
    let mut out = Array::try_zeros(original_shape)?;
    copy_window(a, &mut out.view_mut(), pad, [0, 0]);
    Ok(out)
}

/// Copy the overlap of `src` shifted by `from` into `dst` shifted by `to`,
/// sized by the smaller of the two remaining extents.
fn copy_window<T: Element>(
    src: &ArrayView<'_, T>,
    dst: &mut ArrayViewMut<'_, T>,
    from: [usize; 2],
    to: [usize; 2],
) {
    let rows = (src.dim(0) - from[0]).min(dst.dim(0) - to[0]);
    let cols = (src.dim(1) - from[1]).min(dst.dim(1) - to[1]);
    for y in 0..rows {
        let row = src.lane(from[0] + y);
        let mut target = dst.lane_mut(to[0] + y);
        for x in 0..cols {
            target[to[1] + x] = row[from[1] + x];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_abs_diff_eq;

    fn rows(shape: &[usize], values: Vec<f64>) -> Array<f64> {
        Array::from_vec(shape, values).unwrap()
    }

    /// Deterministic values in [-100, 100).
    fn signal(len: usize, seed: u64) -> Vec<f64> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((state >> 33) % 20000) as f64 / 100.0 - 100.0
            })
            .collect()
    }

    #[test]
    fn test_haar_concrete_row() {
        let mut a = rows(&[1, 4], vec![4.0, 2.0, 0.0, 0.0]);
        haar(&mut a.view_mut()).unwrap();
        assert_eq!(a.as_slice(), &[6.0, 0.0, -2.0, 0.0]);
        ihaar(&mut a.view_mut()).unwrap();
        assert_eq!(a.as_slice(), &[4.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_haar_matches_d2_table() {
        let data = signal(16, 7);
        let mut a = rows(&[2, 8], data.clone());
        let mut b = rows(&[2, 8], data);
        haar(&mut a.view_mut()).unwrap();
        daubechies(&mut b.view_mut(), Daubechies::D2).unwrap();
        assert_eq!(a, b);
        ihaar(&mut a.view_mut()).unwrap();
        idaubechies(&mut b.view_mut(), Daubechies::D2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_haar_round_trip_f32() {
        let data: Vec<f32> = signal(24, 3).into_iter().map(|v| v as f32).collect();
        let mut a = Array::from_vec(&[3, 8], data.clone()).unwrap();
        haar(&mut a.view_mut()).unwrap();
        ihaar(&mut a.view_mut()).unwrap();
        for (x, y) in a.as_slice().iter().zip(&data) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_forward_taps() {
        // D4 on a unit impulse at sample 2: low[x] = c[3 - (2 - 2x)], high alternates
        let c = daubechies::D4;
        let mut a = rows(&[1, 4], vec![0.0, 0.0, 1.0, 0.0]);
        daubechies(&mut a.view_mut(), Daubechies::D4).unwrap();
        let expected = [c[1], c[3], -c[2], -c[0]];
        for (x, y) in a.as_slice().iter().zip(&expected) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_inverse_taps_at_left_edge() {
        let mut a = rows(&[1, 8], vec![10.0, -3.0, 4.0, 1.0, 2.0, -5.0, 7.0, 0.5]);
        idaubechies(&mut a.view_mut(), Daubechies::D4).unwrap();
        // x = 0 and x = 1 read low[0] and high[0] through m = -1
        let expected = [4.0, 6.0, 7.580127, -0.2009619];
        for (x, y) in a.as_slice().iter().zip(&expected) {
            assert_abs_diff_eq!(*x, *y, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_daubechies_round_trip_tail() {
        for d in Daubechies::ALL {
            let n = d.taps();
            let data = signal(64, n as u64);
            let mut a = rows(&[1, 64], data.clone());
            daubechies(&mut a.view_mut(), d).unwrap();
            idaubechies(&mut a.view_mut(), d).unwrap();
            for x in n - 2..64 {
                assert_abs_diff_eq!(a.as_slice()[x], data[x], epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_rows_are_independent() {
        let data = signal(32, 11);
        let mut both = rows(&[2, 16], data.clone());
        let mut second = rows(&[1, 16], data[16..].to_vec());
        daubechies(&mut both.view_mut(), Daubechies::D6).unwrap();
        daubechies(&mut second.view_mut(), Daubechies::D6).unwrap();
        assert_eq!(&both.as_slice()[16..], second.as_slice());
    }

    #[test]
    fn test_custom_coefficients_are_validated() {
        let mut a = rows(&[1, 4], vec![1.0, 2.0, 3.0, 4.0]);
        for bad in [&[][..], &[1.0, 2.0, 3.0][..]] {
            let err = wavelet(&mut a.view_mut(), bad).unwrap_err();
            assert!(matches!(err, FilterError::InvalidCoefficients(_)));
            assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        }
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        wavelet(&mut a.view_mut(), &daubechies::D4).unwrap();
        iwavelet(&mut a.view_mut(), &daubechies::D4).unwrap();
        assert_abs_diff_eq!(a.as_slice()[3], 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_shape_validation() {
        let mut odd = rows(&[2, 3], vec![0.0; 6]);
        assert!(matches!(
            haar(&mut odd.view_mut()),
            Err(FilterError::OddRowLength(3))
        ));
        let mut flat = rows(&[4], vec![0.0; 4]);
        let err = haar(&mut flat.view_mut()).unwrap_err();
        assert!(matches!(err, FilterError::NotTwoDimensional(1)));
        assert_eq!(err.kind(), ErrorKind::ContractViolation);

        // rows are even but columns are not: nothing may be touched
        let mut a = rows(&[3, 2], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(haar_2d(&mut a.view_mut(), false).is_err());
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let p = WaveletProcessor::new(FilterBank::Haar).unwrap();
        let mut short = [0.0f64; 2];
        assert!(matches!(
            p.decompose_row(&[1.0, 2.0, 3.0, 4.0], &mut short),
            Err(FilterError::OutputShapeMismatch { .. })
        ));
        assert!(matches!(
            p.reconstruct_row(&[1.0, 2.0, 3.0], &mut [0.0; 3]),
            Err(FilterError::OddRowLength(3))
        ));
    }

    #[test]
    fn test_daubechies_codes() {
        assert_eq!(Daubechies::try_from(0).unwrap(), Daubechies::D2);
        assert_eq!(Daubechies::try_from(9).unwrap(), Daubechies::D20);
        assert!(matches!(
            Daubechies::try_from(10),
            Err(FilterError::InvalidDaubechiesCode(_))
        ));
        assert!(Daubechies::try_from(-1).is_err());
        assert_eq!("D8".parse::<Daubechies>().unwrap(), Daubechies::D8);
        assert!("D9".parse::<Daubechies>().is_err());
        for d in Daubechies::ALL {
            assert_eq!(Daubechies::try_from(d.code()).unwrap(), d);
            assert_eq!(d.taps(), 2 * (d.code() as usize + 1));
            let sum: f64 = d.coefficients().iter().sum();
            assert_abs_diff_eq!(sum, 2.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_haar_2d_round_trip() {
        let data = signal(64, 5);
        for preserve_energy in [false, true] {
            let mut a = rows(&[8, 8], data.clone());
            haar_2d(&mut a.view_mut(), preserve_energy).unwrap();
            ihaar_2d(&mut a.view_mut(), preserve_energy).unwrap();
            for (x, y) in a.as_slice().iter().zip(&data) {
                assert_abs_diff_eq!(*x, *y, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_haar_2d_energy() {
        let data = signal(16, 9);
        let energy: f64 = data.iter().map(|v| v * v).sum();
        let mut a = rows(&[4, 4], data);
        haar_2d(&mut a.view_mut(), true).unwrap();
        let after: f64 = a.as_slice().iter().map(|v| v * v).sum();
        assert_abs_diff_eq!(energy, after, epsilon = 1e-6);
    }

    #[test]
    fn test_center_and_decenter() {
        let a = Array::from_fn(&[3, 5], |i| (10 * i[0] + i[1]) as f64).unwrap();
        let centered = wavelet_center(&a.view(), 2).unwrap();
        // 3 + 4 -> 8, 5 + 4 -> 16
        assert_eq!(centered.shape(), &[8, 16]);
        assert_eq!(centered.get(&[2, 5]), Some(&0.0));
        assert_eq!(centered.get(&[2, 6]), Some(&1.0));
        assert_eq!(centered.get(&[4, 9]), Some(&24.0));
        assert_eq!(centered.get(&[0, 0]), Some(&0.0));
        let back = wavelet_decenter(&centered.view(), &[3, 5], 2).unwrap();
        assert_eq!(back, a);

        let err = wavelet_decenter(&centered.view(), &[3, 5], 3).unwrap_err();
        assert!(matches!(err, FilterError::DecenterShape { border: 3, .. }));
        assert!(wavelet_decenter(&centered.view(), &[3], 0).is_err());
    }
}
