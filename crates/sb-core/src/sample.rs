//! Sample storage types and their representation families.
//!
//! Every storage type belongs to exactly one [`Kind`]. Values move between
//! widths of the same kind through a lossless *wide* type (`f64` for
//! floating, `i128` for fixed-point) and saturate on the way back down.

use core::fmt;

use crate::bit_depth::{clip_signed, clip_unsigned, BitDepth};

mod sealed {
    pub trait Sealed {}
}

/// Runtime tag for a sample representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Repr {
    /// Real numbers with nominal range `[-1.0, 1.0]`.
    Floating,
    /// Integers in `[-2^(d-1), 2^(d-1) - 1]`.
    Signed,
    /// Integers in `[0, 2^d - 1]`.
    Unsigned,
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Repr::Floating => "floating",
            Repr::Signed => "signed",
            Repr::Unsigned => "unsigned",
        };
        f.write_str(name)
    }
}

/// Compile-time representation family.
pub trait Kind: sealed::Sealed + 'static {
    /// Lossless intermediate type shared by all widths of this kind.
    type Wide: Copy + PartialOrd + fmt::Debug;
    const REPR: Repr;
}

/// Floating-point samples.
#[derive(Debug)]
pub enum Floating {}

/// Signed fixed-point samples.
#[derive(Debug)]
pub enum Signed {}

/// Unsigned fixed-point samples.
#[derive(Debug)]
pub enum Unsigned {}

impl sealed::Sealed for Floating {}
impl sealed::Sealed for Signed {}
impl sealed::Sealed for Unsigned {}

impl Kind for Floating {
    type Wide = f64;
    const REPR: Repr = Repr::Floating;
}

impl Kind for Signed {
    type Wide = i128;
    const REPR: Repr = Repr::Signed;
}

impl Kind for Unsigned {
    type Wide = i128;
    const REPR: Repr = Repr::Unsigned;
}

/// A native storage element of a signal buffer.
pub trait Sample:
    Copy + Default + PartialEq + PartialOrd + fmt::Debug + Send + Sync + 'static + sealed::Sealed
{
    type Kind: Kind;

    /// Storage width, the largest bit depth this type can carry.
    const WIDTH: BitDepth;

    /// Silence in storage (also for unsigned, where it is the zeroed slot).
    const ZERO: Self;

    const REPR: Repr = <Self::Kind as Kind>::REPR;

    /// Widen without loss.
    fn to_wide(self) -> <Self::Kind as Kind>::Wide;

    /// Narrow from the wide type, saturating to the storage range.
    fn from_wide(wide: <Self::Kind as Kind>::Wide) -> Self;

    /// Saturate to `depth`. Identity for floating samples.
    fn clip(self, depth: BitDepth) -> Self;
}

/// Floating-point storage (`f32`, `f64`).
pub trait Float: Sample<Kind = Floating> {
    #[inline]
    fn from_f64(value: f64) -> Self {
        Self::from_wide(value)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.to_wide()
    }
}

/// Fixed-point storage, signed or unsigned.
pub trait Fixed: Sample {
    fn to_i128(self) -> i128;

    /// Narrow from `i128`, saturating to the storage range.
    fn from_i128(value: i128) -> Self;
}

/// Signed fixed-point storage (`i8` .. `i64`).
pub trait SignedFixed: Fixed + Sample<Kind = Signed> {}

/// Unsigned fixed-point storage (`u8` .. `u64`).
pub trait UnsignedFixed: Fixed + Sample<Kind = Unsigned> {}

macro_rules! impl_float {
    ($t:ty, $width:expr) => {
        impl sealed::Sealed for $t {}

        impl Sample for $t {
            type Kind = Floating;
            const WIDTH: BitDepth = $width;
            const ZERO: Self = 0.0;

            #[inline]
            fn to_wide(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_wide(wide: f64) -> Self {
                wide as $t
            }

            #[inline]
            fn clip(self, _depth: BitDepth) -> Self {
                self
            }
        }

        impl Float for $t {}
    };
}

macro_rules! impl_fixed {
    ($t:ty, $width:expr, $kind:ty) => {
        impl sealed::Sealed for $t {}

        impl Fixed for $t {
            #[inline]
            fn to_i128(self) -> i128 {
                self as i128
            }

            #[inline]
            fn from_i128(value: i128) -> Self {
                value.clamp(<$t>::MIN as i128, <$t>::MAX as i128) as $t
            }
        }

        impl Sample for $t {
            type Kind = $kind;
            const WIDTH: BitDepth = $width;
            const ZERO: Self = 0;

            #[inline]
            fn to_wide(self) -> i128 {
                self.to_i128()
            }

            #[inline]
            fn from_wide(wide: i128) -> Self {
                Self::from_i128(wide)
            }

            #[inline]
            fn clip(self, depth: BitDepth) -> Self {
                <$kind as ClipKind>::clip(depth, self as i128) as $t
            }
        }
    };
}

/// Per-kind saturation used by the fixed-point `Sample::clip` impls.
trait ClipKind {
    fn clip(depth: BitDepth, value: i128) -> i128;
}

impl ClipKind for Signed {
    #[inline]
    fn clip(depth: BitDepth, value: i128) -> i128 {
        clip_signed(depth.bits(), value as i64) as i128
    }
}

impl ClipKind for Unsigned {
    #[inline]
    fn clip(depth: BitDepth, value: i128) -> i128 {
        clip_unsigned(depth.bits(), value as u64) as i128
    }
}

impl_float!(f32, BitDepth::B32);
impl_float!(f64, BitDepth::B64);

impl_fixed!(i8, BitDepth::B8, Signed);
impl_fixed!(i16, BitDepth::B16, Signed);
impl_fixed!(i32, BitDepth::B32, Signed);
impl_fixed!(i64, BitDepth::B64, Signed);
impl_fixed!(u8, BitDepth::B8, Unsigned);
impl_fixed!(u16, BitDepth::B16, Unsigned);
impl_fixed!(u32, BitDepth::B32, Unsigned);
impl_fixed!(u64, BitDepth::B64, Unsigned);

impl SignedFixed for i8 {}
impl SignedFixed for i16 {}
impl SignedFixed for i32 {}
impl SignedFixed for i64 {}
impl UnsignedFixed for u8 {}
impl UnsignedFixed for u16 {}
impl UnsignedFixed for u32 {}
impl UnsignedFixed for u64 {}
