//! Appending converters between representations.
//!
//! Each converter appends `min(src.len(), dst.cap() - dst.len())` samples
//! of `src` to `dst` and returns that count. The destination is never
//! grown, so converting into a pre-allocated buffer does not allocate.

use sb_core::{BufferError, Float, Result, Sample, Signal, SignalMut, SignedFixed, UnsignedFixed};

use crate::quantize;

/// Shared append loop: channel check, room cap, per-sample mapping.
fn append_mapped<T, U, S, D, F>(src: &S, dst: &mut D, map: F) -> Result<usize>
where
    T: Sample,
    U: Sample,
    S: Signal<T> + ?Sized,
    D: SignalMut<U> + ?Sized,
    F: Fn(T) -> U,
{
    if src.channels() != dst.channels() {
        return Err(BufferError::ChannelMismatch {
            expected: dst.channels(),
            actual: src.channels(),
        });
    }
    let n = src.len().min(dst.cap() - dst.len());
    for pos in 0..n {
        dst.append_sample(map(src.sample(pos)))?;
    }
    Ok(n)
}

/// Floating to signed at the destination's bit depth.
pub fn floating_as_signed<F, I, S, D>(src: &S, dst: &mut D) -> Result<usize>
where
    F: Float,
    I: SignedFixed,
    S: Signal<F> + ?Sized,
    D: SignalMut<I> + ?Sized,
{
    let depth = dst.bit_depth();
    append_mapped(src, dst, |s: F| I::from_i128(quantize::float_to_signed(s.to_f64(), depth)))
}

/// Floating to unsigned at the destination's bit depth.
pub fn floating_as_unsigned<F, U, S, D>(src: &S, dst: &mut D) -> Result<usize>
where
    F: Float,
    U: UnsignedFixed,
    S: Signal<F> + ?Sized,
    D: SignalMut<U> + ?Sized,
{
    let depth = dst.bit_depth();
    append_mapped(src, dst, |s: F| U::from_i128(quantize::float_to_unsigned(s.to_f64(), depth)))
}

/// Floating to floating of another width, clipped to `[-1.0, 1.0]`.
pub fn floating_as_floating<F, G, S, D>(src: &S, dst: &mut D) -> Result<usize>
where
    F: Float,
    G: Float,
    S: Signal<F> + ?Sized,
    D: SignalMut<G> + ?Sized,
{
    append_mapped(src, dst, |s: F| G::from_f64(quantize::cap_float(s.to_f64())))
}

/// Signed at the source's bit depth to floating.
pub fn signed_as_floating<I, F, S, D>(src: &S, dst: &mut D) -> Result<usize>
where
    I: SignedFixed,
    F: Float,
    S: Signal<I> + ?Sized,
    D: SignalMut<F> + ?Sized,
{
    let depth = src.bit_depth();
    append_mapped(src, dst, |s: I| F::from_f64(quantize::signed_to_float(s.to_i128(), depth)))
}

/// Signed to signed, rescaling between the two bit depths.
pub fn signed_as_signed<I, J, S, D>(src: &S, dst: &mut D) -> Result<usize>
where
    I: SignedFixed,
    J: SignedFixed,
    S: Signal<I> + ?Sized,
    D: SignalMut<J> + ?Sized,
{
    let (from, to) = (src.bit_depth(), dst.bit_depth());
    append_mapped(src, dst, |s: I| J::from_i128(quantize::rescale(s.to_i128(), from, to)))
}

/// Signed to unsigned, rescaling and shifting to the destination midpoint.
pub fn signed_as_unsigned<I, U, S, D>(src: &S, dst: &mut D) -> Result<usize>
where
    I: SignedFixed,
    U: UnsignedFixed,
    S: Signal<I> + ?Sized,
    D: SignalMut<U> + ?Sized,
{
    let (from, to) = (src.bit_depth(), dst.bit_depth());
    append_mapped(src, dst, |s: I| {
        U::from_i128(quantize::signed_to_unsigned(s.to_i128(), from, to))
    })
}

/// Unsigned at the source's bit depth to floating.
pub fn unsigned_as_floating<U, F, S, D>(src: &S, dst: &mut D) -> Result<usize>
where
    U: UnsignedFixed,
    F: Float,
    S: Signal<U> + ?Sized,
    D: SignalMut<F> + ?Sized,
{
    let depth = src.bit_depth();
    append_mapped(src, dst, |s: U| F::from_f64(quantize::unsigned_to_float(s.to_i128(), depth)))
}

/// Unsigned to signed, centering on the source midpoint then rescaling.
pub fn unsigned_as_signed<U, I, S, D>(src: &S, dst: &mut D) -> Result<usize>
where
    U: UnsignedFixed,
    I: SignedFixed,
    S: Signal<U> + ?Sized,
    D: SignalMut<I> + ?Sized,
{
    let (from, to) = (src.bit_depth(), dst.bit_depth());
    append_mapped(src, dst, |s: U| {
        I::from_i128(quantize::unsigned_to_signed(s.to_i128(), from, to))
    })
}

/// Unsigned to unsigned, rescaling between the two bit depths.
pub fn unsigned_as_unsigned<U, V, S, D>(src: &S, dst: &mut D) -> Result<usize>
where
    U: UnsignedFixed,
    V: UnsignedFixed,
    S: Signal<U> + ?Sized,
    D: SignalMut<V> + ?Sized,
{
    let (from, to) = (src.bit_depth(), dst.bit_depth());
    append_mapped(src, dst, |s: U| {
        V::from_i128(quantize::unsigned_to_unsigned(s.to_i128(), from, to))
    })
}
