//! N-dimensional image filters and row-wise wavelet transforms.
//!
//! Three sliding-window filters share one neighbor enumeration engine
//! ([`neighbors`]) and one set of boundary policies ([`BoundaryMode`]):
//!
//! - [`convolve()`]: weighted sum of the window, accumulated in `f64`
//! - [`rank_filter()`]: k-th smallest value of the window selected by a footprint
//! - [`template_match()`]: sum of squared differences against a template, in the
//!   element's own width
//!
//! Each filter is written once, generic over [`ndview::Element`], and returns
//! an array of the input's shape and element type. The `_into` variants write
//! into a caller supplied output instead.
//!
//! The [`wavelet`] module transforms the rows (and, through transposed views,
//! the columns) of 2-D `f32`/`f64` arrays in place with Haar or Daubechies
//! filter banks.
//!
//! Arrays of runtime element type go through [`dispatch`].
//!
//! ```
//! use ndfilter::{convolve, BoundaryMode};
//! use ndview::Array;
//!
//! let a = Array::from_vec(&[5], vec![1i32, 2, 3, 4, 5]).unwrap();
//! let k = Array::from_vec(&[3], vec![1i32, 1, 1]).unwrap();
//! let out = convolve(&a.view(), &k.view(), BoundaryMode::Nearest).unwrap();
//! assert_eq!(out.as_slice(), &[4, 6, 9, 12, 14]);
//! ```
//!
//! All failures are reported as [`FilterError`] before any output sample is
//! written. [`FilterError::kind`] maps each one to an [`ErrorKind`].

pub mod boundary;
pub mod convolve;
pub mod dispatch;
pub mod error;
pub mod neighbors;
pub mod rank;
pub mod template;
pub mod wavelet;

pub use boundary::{BoundaryMode, Resolved};
pub use convolve::{convolve, convolve1d, convolve_into, gaussian_filter, gaussian_filter1d};
pub use dispatch::{
    convolve_any, daubechies_any, haar_any, idaubechies_any, ihaar_any, rank_filter_any,
    template_match_any,
};
pub use error::{ErrorKind, FilterError, Result};
pub use neighbors::{KernelWindow, NeighborEnumerator};
pub use rank::{median_filter, rank_filter, rank_filter_into};
pub use template::{template_match, template_match_into};
pub use wavelet::{Daubechies, FilterBank, WaveletProcessor};
