//! Strided N-dimensional array views.
//!
//! An array is a flat buffer plus a [`Layout`]: one extent and one stride (in
//! elements, possibly negative) per dimension and a base offset. Layouts are
//! checked against their buffer once, when a view is built, so indexing by any
//! in-range position afterwards stays inside the buffer.
//!
//! Positions are visited with a [`Cursor`] that starts at the all-zero position
//! and steps in row-major order, last dimension fastest. Two cursors compare
//! equal when they sit at the same logical position, even if the underlying
//! layouts map it to different buffer indices.
//!
//! ```
//! use ndview::{Array, ArrayView};
//!
//! let data = vec![1u8, 2, 3, 4, 5, 6];
//! let view = ArrayView::from_slice(&data, &[2, 3]).unwrap();
//! assert_eq!(view.get(&[1, 0]), Some(&4));
//!
//! let columns = view.swap_axes(0, 1).unwrap();
//! assert_eq!(columns.to_owned().unwrap().as_slice(), &[1, 4, 2, 5, 3, 6]);
//!
//! let zeros = Array::<f32>::try_zeros(&[2, 2]).unwrap();
//! assert_eq!(zeros.size(), 4);
//! ```

mod any;
mod array;
mod element;
mod error;
mod layout;
mod position;

pub use any::AnyArray;
pub use array::{Array, ArrayView, ArrayViewMut, Lane, LaneMut};
pub use element::{Element, ElementKind};
pub use error::{ArrayError, Result};
pub use layout::{Cursor, Layout};
pub use position::{Position, MAX_RANK};
