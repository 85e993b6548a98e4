//! Fixed-capacity N-dimensional positions.

use std::fmt;
use std::ops::{Add, Index, IndexMut, Sub};

/// Maximum number of dimensions of any array.
pub const MAX_RANK: usize = 32;

/// An ordered tuple of signed indices, one per dimension.
///
/// Positions are signed so that a window offset can be added to a center and
/// land outside the array; validity is checked by the array layout.
#[derive(Clone, Copy)]
pub struct Position {
    rank: usize,
    index: [isize; MAX_RANK],
}

impl Position {
    /// The all-zero position of the given rank.
    ///
    /// # Panics
    /// If `rank` exceeds [`MAX_RANK`].
    pub fn zeros(rank: usize) -> Self {
        assert!(rank <= MAX_RANK, "rank {rank} exceeds {MAX_RANK}");
        Self {
            rank,
            index: [0; MAX_RANK],
        }
    }

    /// # Panics
    /// If more than [`MAX_RANK`] indices are given.
    pub fn from_slice(index: &[isize]) -> Self {
        let mut p = Self::zeros(index.len());
        p.index[..index.len()].copy_from_slice(index);
        p
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn as_slice(&self) -> &[isize] {
        &self.index[..self.rank]
    }
}

impl Index<usize> for Position {
    type Output = isize;

    fn index(&self, d: usize) -> &isize {
        &self.as_slice()[d]
    }
}

impl IndexMut<usize> for Position {
    fn index_mut(&mut self, d: usize) -> &mut isize {
        &mut self.index[..self.rank][d]
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Position {}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(mut self, rhs: Position) -> Position {
        assert_eq!(self.rank, rhs.rank, "adding positions of different rank");
        for d in 0..self.rank {
            self.index[d] += rhs.index[d];
        }
        self
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(mut self, rhs: Position) -> Position {
        assert_eq!(self.rank, rhs.rank, "subtracting positions of different rank");
        for d in 0..self.rank {
            self.index[d] -= rhs.index[d];
        }
        self
    }
}
