//! Channel-interleaved sample buffer.
//!
//! [`Buffer`] is generic over its storage so the same accessors serve the
//! owning buffer and the borrowed slice views that alias it:
//!
//! - [`SignalBuffer`] owns a `Vec<T>` whose length is the capacity.
//! - [`BufferRef`] / [`BufferMut`] borrow a parent's storage from some
//!   frame to the parent's capacity end.
//!
//! Length and capacity are reported both per channel (`length`,
//! `capacity`) and in whole-buffer elements (`len`, `cap`).

use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::bit_depth::BitDepth;
use crate::channel::Channel;
use crate::error::{BufferError, Result};
use crate::layout;
use crate::sample::{Fixed, Repr, Sample};

/// Interleaved samples of type `T` held in storage `S`.
#[derive(Clone, Debug)]
pub struct Buffer<T, S> {
    data: S,
    len: usize,
    channels: usize,
    depth: BitDepth,
    _sample: PhantomData<T>,
}

/// Owning buffer.
pub type SignalBuffer<T> = Buffer<T, Vec<T>>;

/// Shared view aliasing part of another buffer.
pub type BufferRef<'a, T> = Buffer<T, &'a [T]>;

/// Mutable view aliasing part of another buffer.
pub type BufferMut<'a, T> = Buffer<T, &'a mut [T]>;

impl<T: Sample> Buffer<T, Vec<T>> {
    /// Zeroed buffer with `length` of `capacity` frames filled.
    /// Callers validate the shape; see [`crate::Allocator`].
    pub(crate) fn zeroed(channels: usize, length: usize, capacity: usize, depth: BitDepth) -> Self {
        Self {
            data: vec![T::ZERO; channels * capacity],
            len: channels * length,
            channels,
            depth,
            _sample: PhantomData,
        }
    }

    /// Append every filled sample of `src`, growing storage if needed.
    ///
    /// Both buffers must have the same channel count and, for fixed-point
    /// samples, the same bit depth. A partial final frame left behind by
    /// [`append_sample`](Self::append_sample) is completed with silence so
    /// the result always ends on a frame boundary.
    pub fn append<S: AsRef<[T]>>(&mut self, src: &Buffer<T, S>) -> Result<()> {
        if src.channels != self.channels {
            return Err(BufferError::ChannelMismatch {
                expected: self.channels,
                actual: src.channels,
            });
        }
        if T::REPR != Repr::Floating && src.depth != self.depth {
            return Err(BufferError::BitDepthMismatch {
                expected: self.depth,
                actual: src.depth,
            });
        }

        let incoming = src.samples();
        let filled = self.len + incoming.len();
        let end = layout::align_up(self.channels, filled);
        if end > self.data.len() {
            self.data.resize(end, T::ZERO);
        }
        self.data[self.len..filled].copy_from_slice(incoming);
        self.data[filled..end].fill(T::ZERO);
        self.len = end;
        Ok(())
    }

    /// Zero every slot and reset the length to 0. Capacity is kept.
    pub fn clear(&mut self) {
        self.data.fill(T::ZERO);
        self.len = 0;
    }

    /// Set the per-channel length. Newly exposed frames are zeroed.
    pub fn set_length(&mut self, length: usize) -> Result<()> {
        let capacity = self.capacity();
        if length > capacity {
            return Err(BufferError::InvalidRange {
                start: 0,
                end: length,
                capacity,
            });
        }
        let len = length * self.channels;
        if len > self.len {
            self.data[self.len..len].fill(T::ZERO);
        }
        self.len = len;
        Ok(())
    }

    /// Consume the buffer, returning its filled samples.
    pub fn into_samples(mut self) -> Vec<T> {
        self.data.truncate(self.len);
        self.data
    }
}

impl<T: Sample, S: AsRef<[T]>> Buffer<T, S> {
    /// Number of interleaved channels.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Quantization depth. For floating buffers this is the storage width
    /// and carries no range meaning.
    pub fn bit_depth(&self) -> BitDepth {
        self.depth
    }

    /// Representation of the stored samples.
    pub fn repr(&self) -> Repr {
        T::REPR
    }

    /// Filled samples across all channels.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Sample slots across all channels.
    pub fn cap(&self) -> usize {
        self.data.as_ref().len()
    }

    /// Filled frames; a partial final frame counts as one.
    pub fn length(&self) -> usize {
        layout::frames(self.channels, self.len)
    }

    /// Frame slots.
    pub fn capacity(&self) -> usize {
        layout::capacity_frames(self.channels, self.cap())
    }

    /// True when no sample is filled.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when every slot is filled.
    pub fn is_full(&self) -> bool {
        self.len == self.cap()
    }

    /// Sample at flat index `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= self.len()`.
    pub fn sample(&self, pos: usize) -> T {
        self.samples()[pos]
    }

    /// Filled interleaved region.
    pub fn samples(&self) -> &[T] {
        &self.data.as_ref()[..self.len]
    }

    /// Complete frames, each `channels` samples wide.
    pub fn frames(&self) -> core::slice::ChunksExact<'_, T> {
        self.samples().chunks_exact(self.channels)
    }

    /// Shared view of the whole buffer.
    pub fn view(&self) -> BufferRef<'_, T> {
        Buffer {
            data: self.data.as_ref(),
            len: self.len,
            channels: self.channels,
            depth: self.depth,
            _sample: PhantomData,
        }
    }

    /// Frames `start..end` as a view aliasing this buffer. The view's
    /// capacity extends to the end of this buffer's capacity.
    pub fn slice(&self, start: usize, end: usize) -> Result<BufferRef<'_, T>> {
        self.check_range(start, end)?;
        Ok(Buffer {
            data: &self.data.as_ref()[start * self.channels..],
            len: (end - start) * self.channels,
            channels: self.channels,
            depth: self.depth,
            _sample: PhantomData,
        })
    }

    /// Single-channel view of channel `channel`.
    pub fn channel(&self, channel: usize) -> Result<Channel<T, &[T]>> {
        self.check_channel(channel)?;
        Ok(Channel::new(self.view(), channel))
    }

    /// Copy into an owning buffer with the same shape and capacity.
    pub fn to_owned(&self) -> SignalBuffer<T> {
        Buffer {
            data: self.data.as_ref().to_vec(),
            len: self.len,
            channels: self.channels,
            depth: self.depth,
            _sample: PhantomData,
        }
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        let capacity = self.capacity();
        if start > end || end > capacity {
            return Err(BufferError::InvalidRange {
                start,
                end,
                capacity,
            });
        }
        Ok(())
    }

    fn check_channel(&self, channel: usize) -> Result<()> {
        if channel >= self.channels {
            return Err(BufferError::ChannelOutOfRange {
                channel,
                channels: self.channels,
            });
        }
        Ok(())
    }
}

impl<T: Sample, S: AsRef<[T]> + AsMut<[T]>> Buffer<T, S> {
    /// Write `value` at flat index `pos`, saturated to the bit depth.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= self.len()`.
    pub fn set_sample(&mut self, pos: usize, value: T) {
        let value = value.clip(self.depth);
        self.samples_mut()[pos] = value;
    }

    /// Append one sample if there is room; a full buffer ignores it.
    ///
    /// May leave a partial final frame.
    pub fn append_sample(&mut self, value: T) {
        let value = value.clip(self.depth);
        let len = self.len;
        if let Some(slot) = self.data.as_mut().get_mut(len) {
            *slot = value;
            self.len += 1;
        }
    }

    /// Mutable filled interleaved region. Writes bypass saturation.
    pub fn samples_mut(&mut self) -> &mut [T] {
        &mut self.data.as_mut()[..self.len]
    }

    /// Mutable view of the whole buffer.
    pub fn view_mut(&mut self) -> BufferMut<'_, T> {
        Buffer {
            data: self.data.as_mut(),
            len: self.len,
            channels: self.channels,
            depth: self.depth,
            _sample: PhantomData,
        }
    }

    /// Frames `start..end` as a mutable view aliasing this buffer.
    ///
    /// Appending to the view writes into this buffer's storage past the
    /// view's end without changing this buffer's length.
    pub fn slice_mut(&mut self, start: usize, end: usize) -> Result<BufferMut<'_, T>> {
        self.check_range(start, end)?;
        let channels = self.channels;
        let depth = self.depth;
        Ok(Buffer {
            data: &mut self.data.as_mut()[start * channels..],
            len: (end - start) * channels,
            channels,
            depth,
            _sample: PhantomData,
        })
    }

    /// Mutable single-channel view of channel `channel`.
    pub fn channel_mut(&mut self, channel: usize) -> Result<Channel<T, &mut [T]>> {
        self.check_channel(channel)?;
        Ok(Channel::new(self.view_mut(), channel))
    }
}

impl<T: Fixed, S: AsRef<[T]>> Buffer<T, S> {
    /// Largest value this buffer can store.
    pub fn max_value(&self) -> T {
        T::from_i128(i128::MAX).clip(self.depth)
    }

    /// Smallest value this buffer can store.
    pub fn min_value(&self) -> T {
        T::from_i128(i128::MIN).clip(self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Allocator;

    fn floats(channels: usize, length: usize, capacity: usize) -> SignalBuffer<f64> {
        Allocator::new(channels, length, capacity).float().unwrap()
    }

    #[test]
    fn allocation_reports_shape() {
        let buf = floats(3, 2, 5);
        assert_eq!(buf.channels(), 3);
        assert_eq!(buf.length(), 2);
        assert_eq!(buf.capacity(), 5);
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.cap(), 15);
        assert!(buf.samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn allocation_reports_repr() {
        let shape = Allocator::new(1, 1, 1);
        assert_eq!(floats(1, 1, 1).repr(), Repr::Floating);
        assert_eq!(shape.signed::<i16>(None).unwrap().repr(), Repr::Signed);
        assert_eq!(shape.unsigned::<u8>(None).unwrap().repr(), Repr::Unsigned);
    }

    #[test]
    fn set_sample_saturates_signed() {
        let mut buf: SignalBuffer<i16> = Allocator::new(1, 2, 2).signed(BitDepth::B8).unwrap();
        buf.set_sample(0, 200);
        buf.set_sample(1, -200);
        assert_eq!(buf.sample(0), 127);
        assert_eq!(buf.sample(1), -128);
    }

    #[test]
    fn set_sample_saturates_unsigned() {
        let mut buf: SignalBuffer<u32> = Allocator::new(1, 1, 1).unsigned(BitDepth::B4).unwrap();
        buf.set_sample(0, 99);
        assert_eq!(buf.sample(0), 15);
    }

    #[test]
    fn float_storage_keeps_out_of_range_values() {
        let mut buf: SignalBuffer<f32> = Allocator::new(1, 1, 1).float().unwrap();
        buf.set_sample(0, 3.0);
        assert_eq!(buf.sample(0), 3.0);
    }

    #[test]
    #[should_panic]
    fn sample_past_len_panics() {
        let buf = floats(2, 1, 4);
        buf.sample(2);
    }

    #[test]
    fn append_sample_stops_at_capacity() {
        let mut buf = floats(2, 0, 2);
        for i in 0..10 {
            buf.append_sample(i as f64);
        }
        assert_eq!(buf.len(), buf.cap());
        assert!(buf.is_full());
        assert_eq!(buf.samples(), &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn append_sample_leaves_partial_frame() {
        let mut buf = floats(2, 0, 2);
        buf.append_sample(1.0);
        buf.append_sample(2.0);
        buf.append_sample(3.0);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.length(), 2);
        assert_eq!(buf.frames().count(), 1);
    }

    #[test]
    fn slice_aliases_parent() {
        let mut buf = floats(2, 4, 4);
        {
            let mut view = buf.slice_mut(1, 3).unwrap();
            assert_eq!(view.length(), 2);
            assert_eq!(view.capacity(), 3);
            view.set_sample(0, 0.5);
            view.set_sample(3, -0.5);
        }
        assert_eq!(buf.sample(2), 0.5);
        assert_eq!(buf.sample(5), -0.5);
        let view = buf.slice(1, 3).unwrap();
        assert_eq!(view.sample(0), 0.5);
    }

    #[test]
    fn slice_rejects_bad_ranges() {
        let buf = floats(2, 2, 4);
        assert!(buf.slice(0, 4).is_ok());
        assert!(buf.slice(4, 4).unwrap().is_empty());
        assert_eq!(
            buf.slice(3, 1).unwrap_err(),
            BufferError::InvalidRange {
                start: 3,
                end: 1,
                capacity: 4
            }
        );
        assert!(buf.slice(0, 5).is_err());
    }

    #[test]
    fn slice_of_slice_is_relative() {
        let mut buf = floats(1, 6, 6);
        for i in 0..6 {
            buf.set_sample(i, i as f64);
        }
        let outer = buf.slice(1, 5).unwrap();
        let inner = outer.slice(1, 3).unwrap();
        assert_eq!(inner.samples(), &[2.0, 3.0]);
        assert_eq!(inner.capacity(), 4);
    }

    #[test]
    fn append_sample_through_view_writes_parent_storage() {
        let mut buf = floats(1, 2, 4);
        {
            let mut view = buf.slice_mut(0, 2).unwrap();
            view.append_sample(9.0);
            assert_eq!(view.len(), 3);
        }
        assert_eq!(buf.len(), 2);
        buf.set_length(3).unwrap();
        // Growing the length zeroes the newly exposed frame.
        assert_eq!(buf.sample(2), 0.0);
    }

    #[test]
    fn append_grows_and_keeps_alignment() {
        let mut dst = floats(2, 1, 1);
        let mut src = floats(2, 3, 3);
        for i in 0..6 {
            src.set_sample(i, i as f64 + 1.0);
        }
        dst.append(&src).unwrap();
        assert_eq!(dst.len(), 8);
        assert_eq!(dst.cap() % 2, 0);
        assert_eq!(dst.samples(), &[0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn append_within_capacity_does_not_grow() {
        let mut dst = floats(1, 0, 8);
        let src = floats(1, 3, 3);
        dst.append(&src).unwrap();
        assert_eq!(dst.cap(), 8);
        assert_eq!(dst.len(), 3);
    }

    #[test]
    fn append_completes_partial_frame() {
        let mut dst = floats(2, 0, 4);
        dst.append_sample(1.0);
        let src = floats(2, 1, 1);
        dst.append(&src).unwrap();
        assert_eq!(dst.len(), 4);
        assert_eq!(dst.len() % dst.channels(), 0);
    }

    #[test]
    fn append_requires_matching_channels() {
        let mut dst = floats(2, 0, 2);
        let src = floats(3, 1, 1);
        assert_eq!(
            dst.append(&src),
            Err(BufferError::ChannelMismatch {
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn append_requires_matching_bit_depth() {
        let mut dst: SignalBuffer<i32> = Allocator::new(1, 0, 2).signed(BitDepth::B16).unwrap();
        let src: SignalBuffer<i32> = Allocator::new(1, 1, 1).signed(BitDepth::B24).unwrap();
        assert_eq!(
            dst.append(&src),
            Err(BufferError::BitDepthMismatch {
                expected: BitDepth::B16,
                actual: BitDepth::B24
            })
        );
    }

    #[test]
    fn append_slice_of_another_buffer() {
        let mut input = floats(3, 3, 3);
        for i in 0..3 {
            input.set_sample(i * 3 + 1, (i + 1) as f64);
            input.set_sample(i * 3 + 2, (i + 11) as f64);
        }
        let mut out = floats(3, 0, 2);
        out.append(&input.slice(1, 3).unwrap()).unwrap();
        assert_eq!(out.length(), 2);
        assert_eq!(out.capacity(), 2);
        assert_eq!(out.samples(), &[0.0, 2.0, 12.0, 0.0, 3.0, 13.0]);
    }

    #[test]
    fn to_owned_detaches() {
        let mut buf = floats(1, 2, 3);
        let mut copy = buf.slice(0, 2).unwrap().to_owned();
        copy.set_sample(0, 1.0);
        assert_eq!(buf.sample(0), 0.0);
        assert_eq!(copy.capacity(), 3);
        buf.set_sample(1, 2.0);
        assert_eq!(copy.sample(1), 0.0);
    }

    #[test]
    fn clear_zeroes_and_empties() {
        let mut buf = floats(2, 2, 2);
        buf.set_sample(3, 1.0);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.cap(), 4);
        buf.set_length(2).unwrap();
        assert!(buf.samples().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn set_length_is_bounded_by_capacity() {
        let mut buf = floats(2, 0, 2);
        assert!(buf.set_length(3).is_err());
        buf.set_length(2).unwrap();
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn frames_yield_interleaved_tuples() {
        let mut buf = floats(2, 2, 2);
        for i in 0..4 {
            buf.set_sample(i, i as f64);
        }
        let frames: Vec<&[f64]> = buf.frames().collect();
        assert_eq!(frames, vec![&[0.0, 1.0][..], &[2.0, 3.0][..]]);
    }

    #[test]
    fn fixed_range_follows_bit_depth() {
        let buf: SignalBuffer<i32> = Allocator::new(1, 0, 1).signed(BitDepth::B24).unwrap();
        assert_eq!(buf.max_value(), 8_388_607);
        assert_eq!(buf.min_value(), -8_388_608);
        let buf: SignalBuffer<u8> = Allocator::new(1, 0, 1).unsigned(None).unwrap();
        assert_eq!(buf.max_value(), 255);
        assert_eq!(buf.min_value(), 0);
    }

    #[test]
    fn into_samples_drops_unfilled_slots() {
        let mut buf = floats(1, 0, 4);
        buf.append_sample(0.25);
        assert_eq!(buf.into_samples(), vec![0.25]);
    }
}
