use std::collections::TryReserveError;

use ndview::{ArrayError, ElementKind};

/// Broad class of a [`FilterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed arrays that do not fit together.
    ContractViolation,
    /// A scalar argument (rank, table code, coefficients, mode) is out of range.
    InvalidParameter,
    /// An output or scratch buffer could not be obtained.
    AllocationFailure,
}

/// Error values that may be returned from filter and wavelet functions.
///
/// All of them are detected before the first output sample is written.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// Array and kernel (or template) do not have the same number of dimensions.
    #[error("rank mismatch: array has {array} dimensions, kernel has {kernel}")]
    RankMismatch { array: usize, kernel: usize },

    /// Two arrays that must share an element type do not.
    #[error("element type mismatch: expected {expected}, got {actual}")]
    ElementTypeMismatch {
        expected: ElementKind,
        actual: ElementKind,
    },

    /// The caller supplied output does not have the input's shape.
    #[error("output shape {actual:?} does not match input shape {expected:?}")]
    OutputShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Wavelet transforms only accept 2-D arrays.
    #[error("wavelet transforms need a 2-D array, got {0} dimensions")]
    NotTwoDimensional(usize),

    /// Wavelet rows must split into two equal halves.
    #[error("wavelet rows must have even length, got {0}")]
    OddRowLength(usize),

    /// Wavelet transforms only accept floating point arrays.
    #[error("wavelet transforms need a floating point array, got {0}")]
    NotFloatingPoint(ElementKind),

    /// Axis index not below the array rank.
    #[error("invalid axis {axis} for an array of rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// The centered array cannot contain the requested original shape.
    #[error("cannot extract shape {original:?} with border {border} from {centered:?}")]
    DecenterShape {
        centered: Vec<usize>,
        original: Vec<usize>,
        border: usize,
    },

    /// Invalid view or array layout.
    #[error(transparent)]
    Array(#[from] ArrayError),

    /// Rank index outside the window.
    #[error("rank {rank} is outside a window of {window_size} elements")]
    InvalidRank { rank: usize, window_size: usize },

    /// Daubechies table code outside 0..=9.
    #[error("unknown Daubechies code {0}")]
    InvalidDaubechiesCode(String),

    /// Coefficient buffers must be non-empty and of even length.
    #[error("coefficient buffer must have a non-zero even length, got {0}")]
    InvalidCoefficients(usize),

    /// Unknown boundary mode code or name.
    #[error("unknown boundary mode {0}")]
    InvalidBoundaryMode(String),

    /// Gaussian sigma must be finite and positive.
    #[error("sigma must be finite and positive, got {0}")]
    InvalidSigma(f64),

    /// Scratch buffer allocation failure.
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

impl FilterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RankMismatch { .. }
            | Self::ElementTypeMismatch { .. }
            | Self::OutputShapeMismatch { .. }
            | Self::NotTwoDimensional(_)
            | Self::OddRowLength(_)
            | Self::NotFloatingPoint(_)
            | Self::InvalidAxis { .. }
            | Self::DecenterShape { .. } => ErrorKind::ContractViolation,
            Self::Array(ArrayError::Allocation(_)) => ErrorKind::AllocationFailure,
            Self::Array(_) => ErrorKind::ContractViolation,
            Self::InvalidRank { .. }
            | Self::InvalidDaubechiesCode(_)
            | Self::InvalidCoefficients(_)
            | Self::InvalidBoundaryMode(_)
            | Self::InvalidSigma(_) => ErrorKind::InvalidParameter,
            Self::Allocation(_) => ErrorKind::AllocationFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            FilterError::RankMismatch { array: 2, kernel: 3 }.kind(),
            ErrorKind::ContractViolation
        );
        assert_eq!(
            FilterError::InvalidRank {
                rank: 9,
                window_size: 9
            }
            .kind(),
            ErrorKind::InvalidParameter
        );
        assert_eq!(
            FilterError::from(ArrayError::InvalidAxis { axis: 3, rank: 2 }).kind(),
            ErrorKind::ContractViolation
        );
        let reserve = Vec::<u8>::new().try_reserve_exact(usize::MAX).unwrap_err();
        assert_eq!(
            FilterError::from(reserve).kind(),
            ErrorKind::AllocationFailure
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            FilterError::OddRowLength(7).to_string(),
            "wavelet rows must have even length, got 7"
        );
        assert_eq!(
            FilterError::ElementTypeMismatch {
                expected: ElementKind::U8,
                actual: ElementKind::F32
            }
            .to_string(),
            "element type mismatch: expected u8, got f32"
        );
    }
}
