//! Per-sample range mapping between representations.
//!
//! These are the bit-exact rules every converter is built on. Fixed-point
//! values travel as `i128` and floating values as `f64`; callers narrow
//! the result into storage (which saturates).
//!
//! Floating values map onto the asymmetric fixed-point range so both ends
//! are reachable: `+1.0` becomes `M` and `-1.0` becomes `-(M + 1)`, where
//! `M` is the signed maximum of the fixed-point bit depth. Unsigned values
//! are the signed mapping shifted up by the midpoint `M + 1`.

use sb_core::bit_depth::scale;
use sb_core::BitDepth;

/// Clip a floating sample to `[-1.0, 1.0]`.
#[inline]
pub fn cap_float(sample: f64) -> f64 {
    sample.clamp(-1.0, 1.0)
}

/// Floating to signed fixed-point at `depth`.
#[inline]
pub fn float_to_signed(sample: f64, depth: BitDepth) -> i128 {
    let max = depth.max_signed() as f64;
    let s = cap_float(sample);
    if s >= 0.0 {
        (s * max) as i128
    } else {
        (s * (max + 1.0)) as i128
    }
}

/// Floating to unsigned fixed-point at `depth`. Zero maps to the midpoint.
#[inline]
pub fn float_to_unsigned(sample: f64, depth: BitDepth) -> i128 {
    let max = depth.max_signed() as f64;
    let mid = max + 1.0;
    let s = cap_float(sample);
    if s >= 0.0 {
        (s * max + mid) as i128
    } else {
        (s * mid + mid) as i128
    }
}

/// Signed fixed-point at `depth` to floating.
#[inline]
pub fn signed_to_float(sample: i128, depth: BitDepth) -> f64 {
    let max = depth.max_signed() as f64;
    if sample > 0 {
        sample as f64 / max
    } else {
        sample as f64 / (max + 1.0)
    }
}

/// Unsigned fixed-point at `depth` to floating.
///
/// The divisor is chosen on the raw unsigned value: every non-zero sample
/// divides its centered value by `M`, only 0 divides by `M + 1`.
#[inline]
pub fn unsigned_to_float(sample: i128, depth: BitDepth) -> f64 {
    let max = depth.max_signed() as f64;
    let centered = (sample - depth.midpoint()) as f64;
    if sample > 0 {
        centered / max
    } else {
        centered / (max + 1.0)
    }
}

/// Move a fixed-point value from bit depth `from` to bit depth `to`.
///
/// Narrowing divides by `2^(from - to)`, truncating toward zero. Widening
/// multiplies by `2^(to - from)`; strictly positive values are biased so
/// the narrow maximum lands on the wide maximum: `(v + 1) * k - 1`.
#[inline]
pub fn rescale(value: i128, from: BitDepth, to: BitDepth) -> i128 {
    if from >= to {
        value / scale(from.bits(), to.bits())
    } else {
        let k = scale(to.bits(), from.bits());
        if value > 0 {
            (value + 1) * k - 1
        } else {
            value * k
        }
    }
}

/// Signed at `from` to unsigned at `to`, through the midpoint of `to`.
#[inline]
pub fn signed_to_unsigned(value: i128, from: BitDepth, to: BitDepth) -> i128 {
    rescale(value, from, to) + to.midpoint()
}

/// Unsigned at `from` to signed at `to`, through the midpoint of `from`.
#[inline]
pub fn unsigned_to_signed(value: i128, from: BitDepth, to: BitDepth) -> i128 {
    rescale(value - from.midpoint(), from, to)
}

/// Unsigned at `from` to unsigned at `to`.
#[inline]
pub fn unsigned_to_unsigned(value: i128, from: BitDepth, to: BitDepth) -> i128 {
    rescale(value, from, to)
}
