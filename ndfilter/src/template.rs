//! Sum-of-squared-differences template matching.
//!
//! Unlike [`crate::convolve`], the sum stays in the element type. Integer
//! arrays wrap around on overflow, so large templates over wide value ranges
//! should be matched on a float copy.

use log::debug;
use ndview::{Array, ArrayView, ArrayViewMut, Element};

use crate::boundary::BoundaryMode;
use crate::convolve::check_output_shape;
use crate::error::Result;
use crate::neighbors::NeighborEnumerator;

/// Match `template` against every position of `array`.
pub fn template_match<T: Element>(
    array: &ArrayView<'_, T>,
    template: &ArrayView<'_, T>,
    mode: BoundaryMode,
) -> Result<Array<T>> {
    let mut out = Array::try_zeros(array.shape())?;
    template_match_into(array, template, mode, &mut out.view_mut())?;
    Ok(out)
}

/// Template matching writing into `out`.
///
/// Every template entry takes part, zero entries included. Entries that fall
/// outside the array under [`BoundaryMode::Ignore`] contribute nothing.
pub fn template_match_into<T: Element>(
    array: &ArrayView<'_, T>,
    template: &ArrayView<'_, T>,
    mode: BoundaryMode,
    out: &mut ArrayViewMut<'_, T>,
) -> Result<()> {
    check_output_shape(array, out)?;
    let mut neighbors = NeighborEnumerator::new(array, template, mode, false)?;
    debug!(
        "template match {:?} against {:?}, mode {}",
        array.shape(),
        template.shape(),
        mode
    );

    let mut cursor = array.cursor();
    let mut out_cursor = out.cursor();
    for _ in 0..array.size() {
        let mut acc = T::zero();
        for (j, value) in neighbors.present(&cursor) {
            let diff = value.abs_diff(neighbors.weight(j));
            acc = acc.wrapping_add(diff.wrapping_mul(diff));
        }
        out.set_at(&out_cursor, acc);
        neighbors.advance(&mut cursor);
        out_cursor.advance();
    }
    Ok(())
}
