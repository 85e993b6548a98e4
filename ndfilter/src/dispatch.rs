//! Entry points for arrays whose element type is only known at runtime.
//!
//! These check that every operand carries the same [`ElementKind`] and then
//! call the generic implementation for that type. An output array may be
//! handed in for reuse; it must match the input's type and shape. Otherwise
//! a new one is allocated.

use ndview::{AnyArray, Array, ElementKind};

use crate::boundary::BoundaryMode;
use crate::convolve::convolve_into;
use crate::error::{FilterError, Result};
use crate::rank::rank_filter_into;
use crate::template::template_match_into;
use crate::wavelet::{self, Daubechies};

/// Match `$array` and `$kernel` on a shared element type, bind the typed
/// arrays and the typed output, run `$body`, and wrap the output again.
macro_rules! with_same_kind {
    ($array:expr, $kernel:expr, $out:expr, |$a:ident, $k:ident, $o:ident| $body:expr) => {
        with_same_kind!(@arms $array, $kernel, $out, $a, $k, $o, $body;
            U8, U16, U32, U64, I8, I16, I32, I64, F32, F64)
    };
    (@arms $array:expr, $kernel:expr, $out:expr, $a:ident, $k:ident, $o:ident, $body:expr;
        $($variant:ident),*) => {
        match ($array, $kernel) {
            $(
                (AnyArray::$variant($a), AnyArray::$variant($k)) => {
                    let mut $o = match $out {
                        None => Array::try_zeros($a.shape())?,
                        Some(AnyArray::$variant(o)) => o,
                        Some(other) => return Err(mismatch(ElementKind::$variant, other.kind())),
                    };
                    $body?;
                    AnyArray::$variant($o)
                }
            )*
            (a, k) => return Err(mismatch(a.kind(), k.kind())),
        }
    };
}

/// Bind the typed array inside a float `AnyArray`, rejecting integer ones.
macro_rules! with_float {
    ($any:expr, |$a:ident| $body:expr) => {
        match $any {
            AnyArray::F32($a) => $body,
            AnyArray::F64($a) => $body,
            other => Err(FilterError::NotFloatingPoint(other.kind())),
        }
    };
}

fn mismatch(expected: ElementKind, actual: ElementKind) -> FilterError {
    FilterError::ElementTypeMismatch { expected, actual }
}

/// Type-erased [`crate::convolve()`].
pub fn convolve_any(
    array: &AnyArray,
    kernel: &AnyArray,
    mode: BoundaryMode,
    out: Option<AnyArray>,
) -> Result<AnyArray> {
    Ok(with_same_kind!(array, kernel, out, |a, k, o| {
        convolve_into(&a.view(), &k.view(), mode, &mut o.view_mut())
    }))
}

/// Type-erased [`crate::rank_filter()`].
pub fn rank_filter_any(
    array: &AnyArray,
    footprint: &AnyArray,
    rank: usize,
    mode: BoundaryMode,
    out: Option<AnyArray>,
) -> Result<AnyArray> {
    Ok(with_same_kind!(array, footprint, out, |a, k, o| {
        rank_filter_into(&a.view(), &k.view(), rank, mode, &mut o.view_mut())
    }))
}

/// Type-erased [`crate::template_match()`].
pub fn template_match_any(
    array: &AnyArray,
    template: &AnyArray,
    mode: BoundaryMode,
    out: Option<AnyArray>,
) -> Result<AnyArray> {
    Ok(with_same_kind!(array, template, out, |a, k, o| {
        template_match_into(&a.view(), &k.view(), mode, &mut o.view_mut())
    }))
}

/// Forward Haar of every row of a float array, in place.
pub fn haar_any(array: &mut AnyArray) -> Result<()> {
    with_float!(array, |a| wavelet::haar(&mut a.view_mut()))
}

/// Inverse Haar of every row of a float array, in place.
pub fn ihaar_any(array: &mut AnyArray) -> Result<()> {
    with_float!(array, |a| wavelet::ihaar(&mut a.view_mut()))
}

/// Forward Daubechies transform selected by table code `0..=9`.
pub fn daubechies_any(array: &mut AnyArray, code: i32) -> Result<()> {
    let d = Daubechies::try_from(code)?;
    with_float!(array, |a| wavelet::daubechies(&mut a.view_mut(), d))
}

/// Inverse Daubechies transform selected by table code `0..=9`.
pub fn idaubechies_any(array: &mut AnyArray, code: i32) -> Result<()> {
    let d = Daubechies::try_from(code)?;
    with_float!(array, |a| wavelet::idaubechies(&mut a.view_mut(), d))
}
