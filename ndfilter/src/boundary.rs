//! Boundary extension policies.
//!
//! A policy decides what a filter window sees when part of it hangs over the
//! edge of the array. With `abcd` as the row, the extensions are:
//!
//! | mode       | left      | row  | right     |
//! |------------|-----------|------|-----------|
//! | `Nearest`  | `a a`     | abcd | `d d`     |
//! | `Wrap`     | `c d`     | abcd | `a b`     |
//! | `Reflect`  | `b a`     | abcd | `d c`     |
//! | `Mirror`   | `c b`     | abcd | `c b`     |
//! | `Constant` | `0 0`     | abcd | `0 0`     |
//! | `Ignore`   | (absent)  | abcd | (absent)  |

use std::fmt;
use std::str::FromStr;

use crate::error::FilterError;

/// How to resolve a window access outside the array.
///
/// Integer codes accepted by `TryFrom<i32>` follow declaration order, starting
/// at 0 for `Nearest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundaryMode {
    /// Clamp to the nearest edge sample.
    Nearest,
    /// Periodic extension.
    Wrap,
    /// Half-sample symmetric extension, the edge sample is repeated.
    #[default]
    Reflect,
    /// Whole-sample symmetric extension, the edge sample is not repeated.
    Mirror,
    /// Outside samples read as zero.
    Constant,
    /// Outside samples are dropped from the window.
    Ignore,
}

/// Where an out-of-range access along one axis ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    /// A valid index inside the axis
    Index(usize),
    /// Read as zero
    Zero,
    /// Skip the sample
    Absent,
}

impl BoundaryMode {
    pub const ALL: [BoundaryMode; 6] = [
        Self::Nearest,
        Self::Wrap,
        Self::Reflect,
        Self::Mirror,
        Self::Constant,
        Self::Ignore,
    ];

    /// Resolve index `i` on an axis of `len` samples.
    ///
    /// In-range indices always resolve to themselves.
    pub fn resolve(self, i: isize, len: usize) -> Resolved {
        if i >= 0 && (i as usize) < len {
            return Resolved::Index(i as usize);
        }
        if len == 0 {
            return Resolved::Absent;
        }
        let n = len as isize;
        match self {
            Self::Constant => Resolved::Zero,
            Self::Ignore => Resolved::Absent,
            Self::Nearest => Resolved::Index(i.clamp(0, n - 1) as usize),
            Self::Wrap => Resolved::Index(i.rem_euclid(n) as usize),
            Self::Reflect => {
                let r = i.rem_euclid(2 * n);
                let folded = if r < n { r } else { 2 * n - 1 - r };
                Resolved::Index(folded as usize)
            }
            Self::Mirror => {
                if n == 1 {
                    return Resolved::Index(0);
                }
                let r = i.rem_euclid(2 * n - 2);
                let folded = if r < n { r } else { 2 * n - 2 - r };
                Resolved::Index(folded as usize)
            }
        }
    }

    /// Name as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Wrap => "wrap",
            Self::Reflect => "reflect",
            Self::Mirror => "mirror",
            Self::Constant => "constant",
            Self::Ignore => "ignore",
        }
    }
}

impl fmt::Display for BoundaryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryMode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| FilterError::InvalidBoundaryMode(format!("{s:?}")))
    }
}

impl TryFrom<i32> for BoundaryMode {
    type Error = FilterError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| FilterError::InvalidBoundaryMode(code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn extend(
        mode: BoundaryMode,
        len: usize,
        range: std::ops::RangeInclusive<isize>,
    ) -> Vec<Resolved> {
        range.map(|i| mode.resolve(i, len)).collect()
    }

    fn indices(values: &[usize]) -> Vec<Resolved> {
        values.iter().map(|&i| Resolved::Index(i)).collect()
    }

    #[test]
    fn test_in_range_is_identity() {
        for mode in BoundaryMode::ALL {
            assert_eq!(extend(mode, 4, 0..=3), indices(&[0, 1, 2, 3]));
        }
    }

    #[test]
    fn test_nearest() {
        assert_eq!(
            extend(BoundaryMode::Nearest, 4, -2..=5),
            indices(&[0, 0, 0, 1, 2, 3, 3, 3])
        );
    }

    #[test]
    fn test_wrap() {
        assert_eq!(
            extend(BoundaryMode::Wrap, 4, -2..=5),
            indices(&[2, 3, 0, 1, 2, 3, 0, 1])
        );
    }

    #[test]
    fn test_reflect() {
        assert_eq!(
            extend(BoundaryMode::Reflect, 4, -2..=5),
            indices(&[1, 0, 0, 1, 2, 3, 3, 2])
        );
        assert_eq!(extend(BoundaryMode::Reflect, 1, -2..=2), indices(&[0; 5]));
    }

    #[test]
    fn test_mirror() {
        assert_eq!(
            extend(BoundaryMode::Mirror, 4, -2..=5),
            indices(&[2, 1, 0, 1, 2, 3, 2, 1])
        );
        assert_eq!(extend(BoundaryMode::Mirror, 1, -3..=3), indices(&[0; 7]));
        assert_eq!(
            extend(BoundaryMode::Mirror, 2, -3..=4),
            indices(&[1, 0, 1, 0, 1, 0, 1, 0])
        );
    }

    #[test]
    fn test_constant_and_ignore() {
        assert_eq!(BoundaryMode::Constant.resolve(-1, 4), Resolved::Zero);
        assert_eq!(BoundaryMode::Constant.resolve(4, 4), Resolved::Zero);
        assert_eq!(BoundaryMode::Ignore.resolve(-1, 4), Resolved::Absent);
        assert_eq!(BoundaryMode::Ignore.resolve(9, 4), Resolved::Absent);
    }

    #[test]
    fn test_parse_codes_and_names() {
        assert_eq!(BoundaryMode::try_from(0).unwrap(), BoundaryMode::Nearest);
        assert_eq!(BoundaryMode::try_from(5).unwrap(), BoundaryMode::Ignore);
        assert_eq!(
            BoundaryMode::try_from(6).unwrap_err().kind(),
            ErrorKind::InvalidParameter
        );
        assert!(BoundaryMode::try_from(-1).is_err());
        assert_eq!("mirror".parse::<BoundaryMode>().unwrap(), BoundaryMode::Mirror);
        assert!("mirrored".parse::<BoundaryMode>().is_err());
        for mode in BoundaryMode::ALL {
            assert_eq!(mode.to_string().parse::<BoundaryMode>().unwrap(), mode);
        }
        assert_eq!(BoundaryMode::default(), BoundaryMode::Reflect);
    }
}
