//! Flat (interleaved) transfer between slices and signals.

use sb_core::{Sample, Signal, SignalMut};

// --- Writing ---

/// Write `src` into `dst` from index 0 with saturation.
///
/// Writes `min(src.len(), dst.len())` samples and returns the number of
/// whole frames written. `src` may be any width of `dst`'s kind.
pub fn write<T, U, D>(src: &[T], dst: &mut D) -> usize
where
    T: Sample,
    U: Sample<Kind = <T as Sample>::Kind>,
    D: SignalMut<U> + ?Sized,
{
    let n = src.len().min(dst.len());
    for (pos, &value) in src[..n].iter().enumerate() {
        dst.set_sample(pos, U::from_wide(value.to_wide()));
    }
    n / dst.channels()
}

// --- Reading ---

/// Read `src` into `dst` from index 0.
///
/// Reads `min(src.len(), dst.len())` samples, saturating each to the range
/// of `T` rather than to the signal's bit depth, and returns the number of
/// whole frames read.
pub fn read<T, U, S>(src: &S, dst: &mut [T]) -> usize
where
    T: Sample,
    U: Sample<Kind = <T as Sample>::Kind>,
    S: Signal<U> + ?Sized,
{
    let n = src.len().min(dst.len());
    for (pos, slot) in dst[..n].iter_mut().enumerate() {
        *slot = T::from_wide(src.sample(pos).to_wide());
    }
    n / src.channels()
}
