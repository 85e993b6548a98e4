//! Owned arrays and borrowed strided views.

use std::ops::{Index, IndexMut};

use crate::element::Element;
use crate::error::{ArrayError, Result};
use crate::layout::{Cursor, Layout};
use crate::position::Position;

/// An owned, row-major contiguous N-dimensional array.
#[derive(Debug, Clone, PartialEq)]
pub struct Array<T> {
    data: Vec<T>,
    layout: Layout,
}

impl<T: Element> Array<T> {
    /// Allocate a zero-filled array, reporting allocation failure instead of
    /// aborting.
    pub fn try_zeros(shape: &[usize]) -> Result<Self> {
        let layout = Layout::row_major(shape)?;
        let len = layout.size();
        let mut data = Vec::new();
        data.try_reserve_exact(len)?;
        data.resize(len, T::zero());
        Ok(Self { data, layout })
    }

    /// Wrap row-major data. `data.len()` must equal the product of `shape`.
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self> {
        let layout = Layout::row_major(shape)?;
        if layout.size() != data.len() {
            return Err(ArrayError::SizeMismatch {
                shape: shape.to_vec(),
                expected: layout.size(),
                actual: data.len(),
            });
        }
        Ok(Self { data, layout })
    }

    /// Build an array by evaluating `f` at every index, in row-major order.
    pub fn from_fn<F>(shape: &[usize], mut f: F) -> Result<Self>
    where
        F: FnMut(&[usize]) -> T,
    {
        let mut array = Self::try_zeros(shape)?;
        let mut cursor = array.layout.cursor();
        let mut index = vec![0usize; shape.len()];
        for value in array.data.iter_mut() {
            for (slot, &p) in index.iter_mut().zip(cursor.position().as_slice()) {
                *slot = p as usize;
            }
            *value = f(&index);
            cursor.advance();
        }
        Ok(array)
    }

    pub fn view(&self) -> ArrayView<'_, T> {
        ArrayView {
            data: &self.data,
            layout: self.layout.clone(),
        }
    }

    pub fn view_mut(&mut self) -> ArrayViewMut<'_, T> {
        ArrayViewMut {
            data: &mut self.data,
            layout: self.layout.clone(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    pub fn rank(&self) -> usize {
        self.layout.rank()
    }

    pub fn size(&self) -> usize {
        self.layout.size()
    }

    pub fn get(&self, index: &[usize]) -> Option<&T> {
        self.layout.checked_index(index).map(|i| &self.data[i])
    }

    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        self.layout.checked_index(index).map(move |i| &mut self.data[i])
    }

    /// Elements in row-major order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

/// A read-only strided view of borrowed data.
#[derive(Debug, Clone)]
pub struct ArrayView<'a, T> {
    data: &'a [T],
    layout: Layout,
}

/// A mutable strided view of borrowed data.
#[derive(Debug)]
pub struct ArrayViewMut<'a, T> {
    data: &'a mut [T],
    layout: Layout,
}

/// Accessors shared by both view kinds.
macro_rules! view_accessors {
    () => {
        pub fn layout(&self) -> &Layout {
            &self.layout
        }

        pub fn shape(&self) -> &[usize] {
            self.layout.shape()
        }

        pub fn strides(&self) -> &[isize] {
            self.layout.strides()
        }

        pub fn rank(&self) -> usize {
            self.layout.rank()
        }

        /// Extent of dimension `i`
        pub fn dim(&self, i: usize) -> usize {
            self.layout.dim(i)
        }

        pub fn size(&self) -> usize {
            self.layout.size()
        }

        pub fn cursor(&self) -> Cursor {
            self.layout.cursor()
        }

        pub fn get(&self, index: &[usize]) -> Option<&T> {
            self.layout.checked_index(index).map(|i| &self.data[i])
        }

        /// Value at a signed position, `None` outside the extents.
        pub fn at(&self, pos: &Position) -> Option<T> {
            if self.layout.contains(pos) {
                Some(self.data[self.layout.element_index(pos)])
            } else {
                None
            }
        }

        /// Value under a cursor obtained from this view's [`Self::cursor`].
        #[inline]
        pub fn value_at(&self, cursor: &Cursor) -> T {
            self.data[cursor.index()]
        }

        /// Value at a raw buffer index, for callers that maintain their own
        /// offsets relative to a cursor.
        #[inline]
        pub fn value_at_index(&self, index: usize) -> T {
            self.data[index]
        }

        /// Copy the viewed elements into a new contiguous array.
        pub fn to_owned(&self) -> Result<Array<T>> {
            let mut out = Array::try_zeros(self.shape())?;
            let mut cursor = self.cursor();
            for value in out.data.iter_mut() {
                *value = self.value_at(&cursor);
                cursor.advance();
            }
            Ok(out)
        }

        /// Row `outer` of a 2-D view.
        ///
        /// # Panics
        /// If the view is not 2-D or `outer` is out of range.
        pub fn lane(&self, outer: usize) -> Lane<'_, T> {
            let (start, step, len) = lane_geometry(&self.layout, outer);
            Lane {
                data: &*self.data,
                start,
                step,
                len,
            }
        }
    };
}

fn lane_geometry(layout: &Layout, outer: usize) -> (isize, isize, usize) {
    assert_eq!(layout.rank(), 2, "lanes are only defined for 2-D views");
    assert!(outer < layout.dim(0), "row {outer} out of range");
    let start = layout.offset() as isize + outer as isize * layout.strides()[0];
    (start, layout.strides()[1], layout.dim(1))
}

impl<'a, T: Element> ArrayView<'a, T> {
    /// View `data` through an explicit shape, element strides and offset.
    pub fn new(data: &'a [T], shape: &[usize], strides: &[isize], offset: usize) -> Result<Self> {
        let layout = Layout::strided(shape, strides, offset, data.len())?;
        Ok(Self { data, layout })
    }

    /// Contiguous row-major view.
    pub fn from_slice(data: &'a [T], shape: &[usize]) -> Result<Self> {
        let layout = Layout::row_major(shape)?;
        if layout.size() != data.len() {
            return Err(ArrayError::SizeMismatch {
                shape: shape.to_vec(),
                expected: layout.size(),
                actual: data.len(),
            });
        }
        Ok(Self { data, layout })
    }

    /// The same data with axes `a` and `b` exchanged.
    pub fn swap_axes(mut self, a: usize, b: usize) -> Result<Self> {
        self.layout.swap_axes(a, b)?;
        Ok(self)
    }

    view_accessors!();
}

impl<'a, T: Element> ArrayViewMut<'a, T> {
    /// Mutable view of `data` through an explicit shape, element strides and
    /// offset.
    pub fn new(
        data: &'a mut [T],
        shape: &[usize],
        strides: &[isize],
        offset: usize,
    ) -> Result<Self> {
        let layout = Layout::strided(shape, strides, offset, data.len())?;
        Ok(Self { data, layout })
    }

    pub fn swap_axes(mut self, a: usize, b: usize) -> Result<Self> {
        self.layout.swap_axes(a, b)?;
        Ok(self)
    }

    /// Reborrow as a shorter-lived mutable view.
    pub fn reborrow(&mut self) -> ArrayViewMut<'_, T> {
        ArrayViewMut {
            data: &mut *self.data,
            layout: self.layout.clone(),
        }
    }

    pub fn view(&self) -> ArrayView<'_, T> {
        ArrayView {
            data: &*self.data,
            layout: self.layout.clone(),
        }
    }

    view_accessors!();

    pub fn get_mut(&mut self, index: &[usize]) -> Option<&mut T> {
        self.layout
            .checked_index(index)
            .map(move |i| &mut self.data[i])
    }

    /// Store under a cursor obtained from this view's [`Self::cursor`].
    #[inline]
    pub fn set_at(&mut self, cursor: &Cursor, value: T) {
        self.data[cursor.index()] = value;
    }

    /// Apply `f` to every element.
    pub fn map_inplace<F: FnMut(T) -> T>(&mut self, mut f: F) {
        let mut cursor = self.cursor();
        for _ in 0..self.size() {
            let i = cursor.index();
            self.data[i] = f(self.data[i]);
            cursor.advance();
        }
    }

    /// Mutable row `outer` of a 2-D view.
    ///
    /// # Panics
    /// If the view is not 2-D or `outer` is out of range.
    pub fn lane_mut(&mut self, outer: usize) -> LaneMut<'_, T> {
        let (start, step, len) = lane_geometry(&self.layout, outer);
        LaneMut {
            data: &mut *self.data,
            start,
            step,
            len,
        }
    }
}

/// One row of a 2-D view, indexed `0..len()`.
#[derive(Debug)]
pub struct Lane<'a, T> {
    data: &'a [T],
    start: isize,
    step: isize,
    len: usize,
}

impl<T> Lane<'_, T> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Index<usize> for Lane<'_, T> {
    type Output = T;

    fn index(&self, x: usize) -> &T {
        assert!(x < self.len, "lane index {x} out of range {}", self.len);
        &self.data[(self.start + x as isize * self.step) as usize]
    }
}

/// One mutable row of a 2-D view.
#[derive(Debug)]
pub struct LaneMut<'a, T> {
    data: &'a mut [T],
    start: isize,
    step: isize,
    len: usize,
}

impl<T> LaneMut<'_, T> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T> Index<usize> for LaneMut<'_, T> {
    type Output = T;

    fn index(&self, x: usize) -> &T {
        assert!(x < self.len, "lane index {x} out of range {}", self.len);
        &self.data[(self.start + x as isize * self.step) as usize]
    }
}

impl<T> IndexMut<usize> for LaneMut<'_, T> {
    fn index_mut(&mut self, x: usize) -> &mut T {
        assert!(x < self.len, "lane index {x} out of range {}", self.len);
        &mut self.data[(self.start + x as isize * self.step) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_checks_length() {
        assert!(Array::from_vec(&[2, 2], vec![1u8, 2, 3, 4]).is_ok());
        assert!(matches!(
            Array::from_vec(&[2, 2], vec![1u8, 2, 3]),
            Err(ArrayError::SizeMismatch { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn test_from_fn_row_major() {
        let a = Array::from_fn(&[2, 3], |i| (i[0] * 10 + i[1]) as i32).unwrap();
        assert_eq!(a.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(a.get(&[1, 2]), Some(&12));
        assert_eq!(a.get(&[2, 0]), None);
    }

    #[test]
    fn test_strided_view_access() {
        // every other column of a 2x4 buffer
        let data: Vec<f32> = (0..8).map(|x| x as f32).collect();
        let view = ArrayView::new(&data, &[2, 2], &[4, 2], 1).unwrap();
        assert_eq!(view.get(&[0, 0]), Some(&1.0));
        assert_eq!(view.get(&[1, 1]), Some(&7.0));
        assert_eq!(view.at(&Position::from_slice(&[1, 0])), Some(5.0));
        assert_eq!(view.at(&Position::from_slice(&[-1, 0])), None);
        assert_eq!(view.to_owned().unwrap().as_slice(), &[1.0, 3.0, 5.0, 7.0]);
    }

    #[test]
    fn test_swap_axes_transposes() {
        let a = Array::from_vec(&[2, 3], vec![1, 2, 3, 4, 5, 6i16]).unwrap();
        let t = a.view().swap_axes(0, 1).unwrap();
        assert_eq!(t.shape(), &[3, 2]);
        assert_eq!(t.to_owned().unwrap().as_slice(), &[1, 4, 2, 5, 3, 6]);
        assert!(matches!(
            a.view().swap_axes(0, 2),
            Err(ArrayError::InvalidAxis { axis: 2, rank: 2 })
        ));
    }

    #[test]
    fn test_cursor_read_write() {
        let mut a = Array::<u16>::try_zeros(&[2, 2]).unwrap();
        {
            let mut view = a.view_mut();
            let mut cursor = view.cursor();
            for k in 0..4 {
                view.set_at(&cursor, k * 3);
                cursor.advance();
            }
        }
        assert_eq!(a.as_slice(), &[0, 3, 6, 9]);
    }

    #[test]
    fn test_lanes_follow_strides() {
        let mut a = Array::from_vec(&[2, 3], vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0f64]).unwrap();
        {
            let mut columns = a.view_mut().swap_axes(0, 1).unwrap();
            let mut lane = columns.lane_mut(2);
            assert_eq!(lane.len(), 2);
            assert_eq!(lane[1], 6.0);
            lane[0] = 30.0;
        }
        assert_eq!(a.as_slice(), &[1.0, 2.0, 30.0, 4.0, 5.0, 6.0]);
        let view = a.view();
        let row = view.lane(1);
        assert_eq!((row[0], row[2]), (4.0, 6.0));
    }

    #[test]
    fn test_map_inplace() {
        let mut a = Array::from_vec(&[3], vec![1, 2, 3u32]).unwrap();
        a.view_mut().map_inplace(|v| v * 2);
        assert_eq!(a.into_vec(), vec![2, 4, 6]);
    }
}
