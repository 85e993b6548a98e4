//! Shape and stride metadata, and the row-major cursor that walks it.

use crate::error::{ArrayError, Result};
use crate::position::{Position, MAX_RANK};

/// Extents, element strides and base offset of an N-dimensional array.
///
/// A layout is validated against the length of its buffer once, when it is
/// built, so every position inside the extents maps to an element index inside
/// the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Vec<usize>,
    strides: Vec<isize>,
    offset: usize,
    size: usize,
}

impl Layout {
    /// Contiguous row-major (last dimension fastest) layout.
    pub fn row_major(shape: &[usize]) -> Result<Self> {
        if shape.len() > MAX_RANK {
            return Err(ArrayError::RankTooLarge(shape.len()));
        }
        let mut strides = vec![0isize; shape.len()];
        let mut step: usize = 1;
        for d in (0..shape.len()).rev() {
            strides[d] = step as isize;
            step = step
                .checked_mul(shape[d].max(1))
                .ok_or_else(|| ArrayError::Overflow(shape.to_vec()))?;
        }
        Ok(Self {
            shape: shape.to_vec(),
            strides,
            offset: 0,
            size: checked_size(shape)?,
        })
    }

    /// An arbitrary strided layout over a buffer of `len` elements.
    pub fn strided(shape: &[usize], strides: &[isize], offset: usize, len: usize) -> Result<Self> {
        if shape.len() > MAX_RANK {
            return Err(ArrayError::RankTooLarge(shape.len()));
        }
        if shape.len() != strides.len() {
            return Err(ArrayError::StrideLengthMismatch {
                shape: shape.len(),
                strides: strides.len(),
            });
        }
        let layout = Self {
            shape: shape.to_vec(),
            strides: strides.to_vec(),
            offset,
            size: checked_size(shape)?,
        };
        layout.check_bounds(len)?;
        Ok(layout)
    }

    /// Verify that every reachable element lies in `0..len`.
    pub(crate) fn check_bounds(&self, len: usize) -> Result<()> {
        if self.size() == 0 {
            return Ok(());
        }
        let overflow = || ArrayError::Overflow(self.shape.clone());
        let mut first = isize::try_from(self.offset).map_err(|_| overflow())?;
        let mut last = first;
        for (&extent, &stride) in self.shape.iter().zip(&self.strides) {
            let span = isize::try_from(extent - 1)
                .ok()
                .and_then(|e| e.checked_mul(stride))
                .ok_or_else(overflow)?;
            if span < 0 {
                first = first.checked_add(span).ok_or_else(overflow)?;
            } else {
                last = last.checked_add(span).ok_or_else(overflow)?;
            }
        }
        if first < 0 || last >= len as isize {
            return Err(ArrayError::OutOfBounds { first, last, len });
        }
        Ok(())
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Extent of dimension `i`
    pub fn dim(&self, i: usize) -> usize {
        self.shape[i]
    }

    /// Number of positions (product of extents)
    pub fn size(&self) -> usize {
        self.size
    }

    /// True when `pos` has this rank and every index lies inside the extents.
    pub fn contains(&self, pos: &Position) -> bool {
        pos.rank() == self.rank()
            && pos
                .as_slice()
                .iter()
                .zip(&self.shape)
                .all(|(&p, &extent)| p >= 0 && (p as usize) < extent)
    }

    /// Buffer index of a position known to be inside the extents.
    pub(crate) fn element_index(&self, pos: &Position) -> usize {
        let mut index = self.offset as isize;
        for d in 0..self.rank() {
            index += pos[d] * self.strides[d];
        }
        index as usize
    }

    /// Buffer index of `index`, or `None` when it is outside the extents.
    pub(crate) fn checked_index(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.rank() {
            return None;
        }
        let mut at = self.offset as isize;
        for ((&i, &extent), &stride) in index.iter().zip(&self.shape).zip(&self.strides) {
            if i >= extent {
                return None;
            }
            at += i as isize * stride;
        }
        Some(at as usize)
    }

    pub(crate) fn swap_axes(&mut self, a: usize, b: usize) -> Result<()> {
        for axis in [a, b] {
            if axis >= self.rank() {
                return Err(ArrayError::InvalidAxis {
                    axis,
                    rank: self.rank(),
                });
            }
        }
        self.shape.swap(a, b);
        self.strides.swap(a, b);
        Ok(())
    }

    /// A cursor positioned at the all-zero position.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            position: Position::zeros(self.rank()),
            index: self.offset as isize,
        }
    }
}

fn checked_size(shape: &[usize]) -> Result<usize> {
    shape
        .iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n))
        .ok_or_else(|| ArrayError::Overflow(shape.to_vec()))
}

/// Walks the positions of a layout in row-major order.
///
/// The cursor starts at the all-zero position. Callers advance it exactly
/// `size()` times; advancing from the last position wraps back to the start.
/// The buffer index is maintained incrementally, so stepping costs one add in
/// the common case.
#[derive(Debug, Clone)]
pub struct Cursor {
    shape: Vec<usize>,
    strides: Vec<isize>,
    position: Position,
    index: isize,
}

impl Cursor {
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Buffer index of the current position
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn advance(&mut self) {
        for d in (0..self.shape.len()).rev() {
            self.position[d] += 1;
            self.index += self.strides[d];
            if (self.position[d] as usize) < self.shape[d] {
                return;
            }
            self.index -= self.strides[d] * self.shape[d] as isize;
            self.position[d] = 0;
        }
    }
}

impl PartialEq for Cursor {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}
