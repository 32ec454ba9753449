//! Interleaved layout: per-channel positions to flat storage indices.
//!
//! Channels are interleaved, so `data[i * channels + c]` is the sample of
//! channel `c` at frame `i`.

/// Flat index of `channel` at per-channel position `index`.
#[inline]
pub const fn buffer_index(channels: usize, channel: usize, index: usize) -> usize {
    index * channels + channel
}

/// Per-channel length of `elems` interleaved samples. A partial final
/// frame counts as one frame.
#[inline]
pub const fn frames(channels: usize, elems: usize) -> usize {
    elems.div_ceil(channels)
}

/// Samples of `channel` present in `elems` interleaved samples. Trailing
/// channels of a partial final frame have one sample fewer.
#[inline]
pub const fn channel_frames(channels: usize, elems: usize, channel: usize) -> usize {
    elems.saturating_sub(channel).div_ceil(channels)
}

/// Per-channel capacity of `elems` interleaved slots.
#[inline]
pub const fn capacity_frames(channels: usize, elems: usize) -> usize {
    elems / channels
}

/// Round `elems` up to whole frames.
#[inline]
pub const fn align_up(channels: usize, elems: usize) -> usize {
    frames(channels, elems) * channels
}
