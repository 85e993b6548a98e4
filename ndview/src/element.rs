//! Numeric element types that can be stored in an array.
//!
//! Every filter is written once against [`Element`] and instantiated for the ten
//! fixed-width types below. Runtime type tags ([`ElementKind`]) only exist for
//! callers that receive arrays of unknown type, see [`crate::AnyArray`].

use std::fmt;

use num_traits::Zero;

/// Runtime tag of an element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl ElementKind {
    /// Size of one element in bytes
    pub fn width(self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
        };
        f.write_str(name)
    }
}

/// A fixed-width numeric element.
///
/// Integer arithmetic is wrapping so that reductions which deliberately stay in
/// the element's own width (template matching) overflow the same way in debug
/// and release builds. For floats the wrapping operations are plain arithmetic.
pub trait Element:
    Copy + Default + PartialOrd + Zero + fmt::Debug + Send + Sync + 'static
{
    const KIND: ElementKind;

    /// Widen to `f64` for accumulation.
    fn to_f64(self) -> f64;

    /// Narrow from `f64` with `as` semantics (saturating for integers, NaN → 0).
    fn from_f64(value: f64) -> Self;

    fn wrapping_add(self, rhs: Self) -> Self;

    fn wrapping_sub(self, rhs: Self) -> Self;

    fn wrapping_mul(self, rhs: Self) -> Self;

    /// `|self - rhs|`, computed without leaving the element width.
    fn abs_diff(self, rhs: Self) -> Self {
        if self > rhs {
            self.wrapping_sub(rhs)
        } else {
            rhs.wrapping_sub(self)
        }
    }
}

macro_rules! impl_integer_element {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const KIND: ElementKind = ElementKind::$kind;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                #[inline]
                fn wrapping_add(self, rhs: Self) -> Self {
                    <$t>::wrapping_add(self, rhs)
                }

                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    <$t>::wrapping_sub(self, rhs)
                }

                #[inline]
                fn wrapping_mul(self, rhs: Self) -> Self {
                    <$t>::wrapping_mul(self, rhs)
                }
            }
        )*
    };
}

macro_rules! impl_float_element {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const KIND: ElementKind = ElementKind::$kind;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                #[inline]
                fn wrapping_add(self, rhs: Self) -> Self {
                    self + rhs
                }

                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                #[inline]
                fn wrapping_mul(self, rhs: Self) -> Self {
                    self * rhs
                }
            }
        )*
    };
}

impl_integer_element!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
);

impl_float_element!(f32 => F32, f64 => F64);
