//! Striped transfer: one slice per channel.
//!
//! Per-channel DSP nodes work on stripes; the signal stays interleaved.
//! An empty stripe is skipped on read and zero-filled on write.

use sb_core::{layout, BufferError, Result, Sample, Signal, SignalMut};

// --- Writing ---

/// Write one stripe per channel into `dst`.
///
/// `src.len()` must equal `dst.channels()`. Every channel is written up to
/// the longest stripe (capped to `dst.length()`); positions a shorter
/// stripe lacks are written as zero. Returns the frames written.
pub fn write_striped<T, U, D, C>(src: &[C], dst: &mut D) -> Result<usize>
where
    T: Sample,
    U: Sample<Kind = <T as Sample>::Kind>,
    D: SignalMut<U> + ?Sized,
    C: AsRef<[T]>,
{
    let channels = dst.channels();
    check_channels(channels, src.len())?;

    let longest = src.iter().map(|stripe| stripe.as_ref().len()).max().unwrap_or(0);
    let frames = longest.min(dst.length());
    let len = dst.len();
    for (channel, stripe) in src.iter().enumerate() {
        let stripe = stripe.as_ref();
        let n = frames.min(layout::channel_frames(channels, len, channel));
        for i in 0..n {
            let value = stripe.get(i).map_or(U::ZERO, |&v| U::from_wide(v.to_wide()));
            dst.set_sample(layout::buffer_index(channels, channel, i), value);
        }
    }
    Ok(frames)
}

// --- Reading ---

/// Read `src` into one stripe per channel.
///
/// `dst.len()` must equal `src.channels()`. Each stripe receives
/// `min(stripe.len(), src.length())` samples saturated to `T`; empty
/// stripes are skipped. Returns the longest count read.
pub fn read_striped<T, U, S, C>(src: &S, dst: &mut [C]) -> Result<usize>
where
    T: Sample,
    U: Sample<Kind = <T as Sample>::Kind>,
    S: Signal<U> + ?Sized,
    C: AsMut<[T]>,
{
    let channels = src.channels();
    check_channels(channels, dst.len())?;

    let len = src.len();
    let mut longest = 0;
    for (channel, stripe) in dst.iter_mut().enumerate() {
        let stripe = stripe.as_mut();
        let n = stripe.len().min(layout::channel_frames(channels, len, channel));
        for (i, slot) in stripe[..n].iter_mut().enumerate() {
            let value = src.sample(layout::buffer_index(channels, channel, i));
            *slot = T::from_wide(value.to_wide());
        }
        longest = longest.max(n);
    }
    Ok(longest)
}

fn check_channels(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(BufferError::ChannelMismatch { expected, actual });
    }
    Ok(())
}
