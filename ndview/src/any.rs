//! Arrays whose element type is only known at runtime.

use crate::array::Array;
use crate::element::ElementKind;

/// An owned array tagged with its element type.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyArray {
    U8(Array<u8>),
    U16(Array<u16>),
    U32(Array<u32>),
    U64(Array<u64>),
    I8(Array<i8>),
    I16(Array<i16>),
    I32(Array<i32>),
    I64(Array<i64>),
    F32(Array<f32>),
    F64(Array<f64>),
}

/// Evaluate `$body` with `$a` bound to the typed array inside `$any`.
#[macro_export]
macro_rules! match_any {
    ($any:expr, $a:ident => $body:expr) => {
        match $any {
            $crate::AnyArray::U8($a) => $body,
            $crate::AnyArray::U16($a) => $body,
            $crate::AnyArray::U32($a) => $body,
            $crate::AnyArray::U64($a) => $body,
            $crate::AnyArray::I8($a) => $body,
            $crate::AnyArray::I16($a) => $body,
            $crate::AnyArray::I32($a) => $body,
            $crate::AnyArray::I64($a) => $body,
            $crate::AnyArray::F32($a) => $body,
            $crate::AnyArray::F64($a) => $body,
        }
    };
}

impl AnyArray {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::U8(_) => ElementKind::U8,
            Self::U16(_) => ElementKind::U16,
            Self::U32(_) => ElementKind::U32,
            Self::U64(_) => ElementKind::U64,
            Self::I8(_) => ElementKind::I8,
            Self::I16(_) => ElementKind::I16,
            Self::I32(_) => ElementKind::I32,
            Self::I64(_) => ElementKind::I64,
            Self::F32(_) => ElementKind::F32,
            Self::F64(_) => ElementKind::F64,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match_any!(self, a => a.shape())
    }

    pub fn rank(&self) -> usize {
        self.shape().len()
    }

    pub fn size(&self) -> usize {
        match_any!(self, a => a.size())
    }
}

macro_rules! impl_from_array {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Array<$t>> for AnyArray {
                fn from(array: Array<$t>) -> Self {
                    AnyArray::$variant(array)
                }
            }
        )*
    };
}

impl_from_array!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
);
