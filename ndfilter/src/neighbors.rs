//! Boundary-aware neighbor enumeration.
//!
//! Every sliding-window filter in this crate walks its input the same way: a
//! [`Cursor`] over the center array visits each output position, and a
//! [`NeighborEnumerator`] moving in lock-step with it answers "what value does
//! window entry `j` see from here". The filters only differ in how they reduce
//! those values.
//!
//! ```text
//! let mut cursor = array.cursor();
//! for _ in 0..array.size() {
//!     for j in 0..neighbors.window_size() {
//!         if let Some(v) = neighbors.retrieve(&cursor, j) { ... }
//!     }
//!     neighbors.advance(&mut cursor);
//! }
//! ```
//!
//! Positions whose whole window lies inside the array use precomputed buffer
//! deltas; the boundary policy is only consulted near the edges.

use log::debug;
use ndview::{ArrayView, Cursor, Element, Position};
use num_traits::Zero;

use crate::boundary::{BoundaryMode, Resolved};
use crate::error::{FilterError, Result};

/// Kernel entries as signed offsets from the kernel center.
///
/// The center of each dimension is `extent / 2`, so an odd kernel is centered
/// exactly and an even one leans towards its start.
#[derive(Debug, Clone)]
pub struct KernelWindow<T> {
    offsets: Vec<Position>,
    weights: Vec<T>,
    lower: Vec<isize>,
    upper: Vec<isize>,
}

impl<T: Element> KernelWindow<T> {
    /// Build the window of `kernel`.
    ///
    /// With `footprint` set, zero-valued kernel entries are left out of the
    /// window entirely.
    pub fn new(kernel: &ArrayView<'_, T>, footprint: bool) -> Result<Self> {
        let rank = kernel.rank();
        let centre: Vec<isize> = kernel.shape().iter().map(|&e| (e / 2) as isize).collect();

        let mut offsets = Vec::new();
        let mut weights = Vec::new();
        offsets.try_reserve_exact(kernel.size())?;
        weights.try_reserve_exact(kernel.size())?;

        let mut cursor = kernel.cursor();
        for _ in 0..kernel.size() {
            let weight = kernel.value_at(&cursor);
            if !footprint || !weight.is_zero() {
                let mut offset = *cursor.position();
                for (d, c) in centre.iter().enumerate() {
                    offset[d] -= c;
                }
                offsets.push(offset);
                weights.push(weight);
            }
            cursor.advance();
        }

        let mut lower = vec![0isize; rank];
        let mut upper = vec![0isize; rank];
        for offset in &offsets {
            for d in 0..rank {
                lower[d] = lower[d].min(offset[d]);
                upper[d] = upper[d].max(offset[d]);
            }
        }

        Ok(Self {
            offsets,
            weights,
            lower,
            upper,
        })
    }

    /// Number of window entries
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True when the kernel selects nothing.
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Offset of entry `j` from the kernel center.
    pub fn offset(&self, j: usize) -> &Position {
        &self.offsets[j]
    }

    /// Kernel value stored for entry `j`
    pub fn weight(&self, j: usize) -> T {
        self.weights[j]
    }
}

/// Enumerates the neighbors of the current center position.
pub struct NeighborEnumerator<'a, T> {
    center: ArrayView<'a, T>,
    window: KernelWindow<T>,
    mode: BoundaryMode,
    /// Buffer index delta of each window entry, valid at interior positions
    deltas: Vec<isize>,
    position: Position,
    interior: bool,
}

impl<'a, T: Element> NeighborEnumerator<'a, T> {
    /// Pair `center` with the window of `kernel`.
    ///
    /// The enumerator starts at the all-zero position, matching a fresh
    /// `center.cursor()`.
    pub fn new(
        center: &ArrayView<'a, T>,
        kernel: &ArrayView<'_, T>,
        mode: BoundaryMode,
        footprint: bool,
    ) -> Result<Self> {
        if center.rank() != kernel.rank() {
            return Err(FilterError::RankMismatch {
                array: center.rank(),
                kernel: kernel.rank(),
            });
        }
        let window = KernelWindow::new(kernel, footprint)?;

        let mut deltas = Vec::new();
        deltas.try_reserve_exact(window.len())?;
        let strides = center.strides();
        deltas.extend(window.offsets.iter().map(|offset| {
            offset
                .as_slice()
                .iter()
                .zip(strides)
                .map(|(o, s)| o * s)
                .sum::<isize>()
        }));

        debug!(
            "neighbor window of {} offsets over shape {:?}, mode {}",
            window.len(),
            center.shape(),
            mode
        );

        let mut enumerator = Self {
            center: center.clone(),
            window,
            mode,
            deltas,
            position: Position::zeros(center.rank()),
            interior: false,
        };
        enumerator.interior = enumerator.whole_window_inside();
        Ok(enumerator)
    }

    /// Number of window entries, regardless of boundary effects
    pub fn window_size(&self) -> usize {
        self.window.len()
    }

    /// Boundary mode applied to out-of-range neighbors
    pub fn mode(&self) -> BoundaryMode {
        self.mode
    }

    /// The kernel's own value for window entry `j`.
    pub fn weight(&self, j: usize) -> T {
        self.window.weight(j)
    }

    /// Current reference position
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Advance `cursor` to the next center position and follow it.
    pub fn advance(&mut self, cursor: &mut Cursor) {
        cursor.advance();
        self.position = *cursor.position();
        self.interior = self.whole_window_inside();
    }

    /// Value seen by window entry `j` from the current position.
    ///
    /// `cursor` must come from the center view and have been moved only
    /// through [`Self::advance`]. Returns `None` when the entry falls outside
    /// the array under [`BoundaryMode::Ignore`]; the caller then skips it.
    #[inline]
    pub fn retrieve(&self, cursor: &Cursor, j: usize) -> Option<T> {
        debug_assert!(cursor.position() == &self.position);
        if self.interior {
            let index = cursor.index() as isize + self.deltas[j];
            return Some(self.center.value_at_index(index as usize));
        }

        let mut source = self.position + *self.window.offset(j);
        let shape = self.center.shape();
        for (d, &extent) in shape.iter().enumerate() {
            match self.mode.resolve(source[d], extent) {
                Resolved::Index(i) => source[d] = i as isize,
                Resolved::Zero => return Some(T::zero()),
                Resolved::Absent => return None,
            }
        }
        self.center.at(&source)
    }

    /// Present neighbors of the current position as `(j, value)` pairs.
    pub fn present<'s>(&'s self, cursor: &'s Cursor) -> impl Iterator<Item = (usize, T)> + 's {
        (0..self.window_size()).filter_map(move |j| self.retrieve(cursor, j).map(|v| (j, v)))
    }

    fn whole_window_inside(&self) -> bool {
        let shape = self.center.shape();
        (0..shape.len()).all(|d| {
            let p = self.position[d];
            p + self.window.lower[d] >= 0 && p + self.window.upper[d] < shape[d] as isize
        })
    }
}
