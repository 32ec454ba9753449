//! Bit-depth ranges, clipping and rescale factors for fixed-point samples.

use core::fmt;

use crate::error::BufferError;

/// Largest signed value representable in `bits` bits, or 0 for `bits == 0`.
pub const fn max_signed(bits: u8) -> i64 {
    if bits == 0 {
        return 0;
    }
    ((1u64 << (bits - 1)) - 1) as i64
}

/// Smallest signed value representable in `bits` bits, or 0 for `bits == 0`.
pub const fn min_signed(bits: u8) -> i64 {
    if bits == 0 {
        return 0;
    }
    -max_signed(bits) - 1
}

/// Largest unsigned value representable in `bits` bits, or 0 for `bits == 0`.
pub const fn max_unsigned(bits: u8) -> u64 {
    match bits {
        0 => 0,
        64.. => u64::MAX,
        _ => (1u64 << bits) - 1,
    }
}

/// Clamp `value` into `[min_signed(bits), max_signed(bits)]`.
pub const fn clip_signed(bits: u8, value: i64) -> i64 {
    let max = max_signed(bits);
    let min = min_signed(bits);
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}

/// Clamp `value` into `[0, max_unsigned(bits)]`.
pub const fn clip_unsigned(bits: u8, value: u64) -> u64 {
    let max = max_unsigned(bits);
    if value > max {
        max
    } else {
        value
    }
}

/// Rescale factor `2^(high - low)` between two bit depths. `high >= low`.
pub const fn scale(high: u8, low: u8) -> i128 {
    1i128 << (high - low)
}

/// Number of bits used to quantize a fixed-point sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[repr(u8)]
pub enum BitDepth {
    B4 = 4,
    B8 = 8,
    B16 = 16,
    B24 = 24,
    B32 = 32,
    B64 = 64,
}

impl BitDepth {
    /// All supported depths, narrowest first.
    pub const ALL: [BitDepth; 6] = [
        BitDepth::B4,
        BitDepth::B8,
        BitDepth::B16,
        BitDepth::B24,
        BitDepth::B32,
        BitDepth::B64,
    ];

    /// Width in bits.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Limit this depth to a storage width (`min(self, width)`).
    pub fn clamp_to(self, width: BitDepth) -> BitDepth {
        self.min(width)
    }

    /// Largest signed value at this depth.
    pub const fn max_signed(self) -> i64 {
        max_signed(self.bits())
    }

    /// Smallest signed value at this depth.
    pub const fn min_signed(self) -> i64 {
        min_signed(self.bits())
    }

    /// Largest unsigned value at this depth.
    pub const fn max_unsigned(self) -> u64 {
        max_unsigned(self.bits())
    }

    /// Midpoint of the unsigned range, `max_signed + 1`. Unsigned silence.
    pub const fn midpoint(self) -> i128 {
        self.max_signed() as i128 + 1
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = BufferError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            4 => Ok(BitDepth::B4),
            8 => Ok(BitDepth::B8),
            16 => Ok(BitDepth::B16),
            24 => Ok(BitDepth::B24),
            32 => Ok(BitDepth::B32),
            64 => Ok(BitDepth::B64),
            _ => Err(BufferError::InvalidConfig {
                reason: "bit depth must be one of 4, 8, 16, 24, 32, 64",
            }),
        }
    }
}

impl From<BitDepth> for u8 {
    fn from(depth: BitDepth) -> u8 {
        depth.bits()
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_for_common_depths() {
        assert_eq!(max_signed(8), 127);
        assert_eq!(min_signed(8), -128);
        assert_eq!(max_unsigned(8), 255);
        assert_eq!(max_signed(16), 32767);
        assert_eq!(min_signed(16), -32768);
        assert_eq!(max_unsigned(24), 16_777_215);
        assert_eq!(max_signed(4), 7);
        assert_eq!(min_signed(4), -8);
        assert_eq!(max_unsigned(4), 15);
    }

    #[test]
    fn ranges_at_64_bits_fill_the_native_types() {
        assert_eq!(max_signed(64), i64::MAX);
        assert_eq!(min_signed(64), i64::MIN);
        assert_eq!(max_unsigned(64), u64::MAX);
    }

    #[test]
    fn zero_bits_is_an_empty_range() {
        assert_eq!(max_signed(0), 0);
        assert_eq!(min_signed(0), 0);
        assert_eq!(max_unsigned(0), 0);
    }

    #[test]
    fn clip_saturates_instead_of_wrapping() {
        assert_eq!(clip_signed(8, 200), 127);
        assert_eq!(clip_signed(8, -200), -128);
        assert_eq!(clip_signed(8, -5), -5);
        assert_eq!(clip_unsigned(4, 16), 15);
        assert_eq!(clip_unsigned(4, 3), 3);
        assert_eq!(clip_signed(64, i64::MIN), i64::MIN);
    }

    #[test]
    fn scale_is_power_of_two_difference() {
        assert_eq!(scale(16, 8), 256);
        assert_eq!(scale(8, 8), 1);
        assert_eq!(scale(64, 4), 1i128 << 60);
    }

    #[test]
    fn clamp_to_storage_width() {
        assert_eq!(BitDepth::B24.clamp_to(BitDepth::B16), BitDepth::B16);
        assert_eq!(BitDepth::B4.clamp_to(BitDepth::B16), BitDepth::B4);
        assert_eq!(BitDepth::B64.clamp_to(BitDepth::B8), BitDepth::B8);
    }

    #[test]
    fn try_from_rejects_unsupported_widths() {
        assert_eq!(BitDepth::try_from(24), Ok(BitDepth::B24));
        assert!(BitDepth::try_from(0).is_err());
        assert!(BitDepth::try_from(12).is_err());
    }

    #[test]
    fn midpoint_is_unsigned_silence() {
        assert_eq!(BitDepth::B8.midpoint(), 128);
        assert_eq!(BitDepth::B64.midpoint(), 1i128 << 63);
    }

    #[test]
    fn all_depths_are_ordered_and_parse_back() {
        assert!(BitDepth::ALL.windows(2).all(|w| w[0] < w[1]));
        for depth in BitDepth::ALL {
            assert_eq!(BitDepth::try_from(depth.bits()).unwrap(), depth);
        }
        assert!(BitDepth::try_from(12).is_err());
    }
}
