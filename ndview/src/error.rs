use std::collections::TryReserveError;

use crate::position::MAX_RANK;

/// Error values returned when building arrays and views.
#[derive(Debug, thiserror::Error)]
pub enum ArrayError {
    /// More dimensions than a [`crate::Position`] can hold.
    #[error("rank {0} exceeds the maximum of {max}", max = MAX_RANK)]
    RankTooLarge(usize),

    /// Shape and stride vectors have different lengths.
    #[error("shape has {shape} dimensions but {strides} strides were given")]
    StrideLengthMismatch { shape: usize, strides: usize },

    /// The layout reaches elements outside the backing buffer.
    #[error("layout spans elements {first}..={last} but the buffer holds {len}")]
    OutOfBounds { first: isize, last: isize, len: usize },

    /// Data length does not match the product of the extents.
    #[error("shape {shape:?} needs {expected} elements, got {actual}")]
    SizeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// Axis index not below the rank.
    #[error("invalid axis {axis} for rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// The element count or the reach of the strides overflows.
    #[error("shape {0:?} is too large")]
    Overflow(Vec<usize>),

    /// The buffer could not be allocated.
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

pub type Result<T> = std::result::Result<T, ArrayError>;
