//! Single-channel view over an interleaved buffer.
//!
//! A [`Channel`] can read and write samples of one channel but cannot
//! change the buffer's structure: there is no `append`, no nested
//! `channel`, and it cannot be returned to a pool. Through the
//! [`SignalMut`](crate::SignalMut) trait, `append_sample` reports
//! [`BufferError::OperationNotSupported`].

use alloc::vec::Vec;

use crate::bit_depth::BitDepth;
use crate::buffer::Buffer;
use crate::error::Result;
use crate::layout;
use crate::sample::Sample;

/// View of channel `channel` of a buffer with storage `S`.
#[derive(Clone, Debug)]
pub struct Channel<T, S> {
    buf: Buffer<T, S>,
    channel: usize,
}

/// Shared single-channel view.
pub type ChannelRef<'a, T> = Channel<T, &'a [T]>;

/// Mutable single-channel view.
pub type ChannelMut<'a, T> = Channel<T, &'a mut [T]>;

impl<T: Sample, S: AsRef<[T]>> Channel<T, S> {
    pub(crate) fn new(buf: Buffer<T, S>, channel: usize) -> Self {
        Self { buf, channel }
    }

    /// Index of the viewed channel in the parent.
    pub fn index(&self) -> usize {
        self.channel
    }

    /// Quantization depth of the parent buffer.
    pub fn bit_depth(&self) -> BitDepth {
        self.buf.bit_depth()
    }

    /// Samples present in this channel. Equals the parent's `length()`
    /// unless the parent ends in a partial frame that misses this channel.
    pub fn length(&self) -> usize {
        layout::channel_frames(self.buf.channels(), self.buf.len(), self.channel)
    }

    /// Sample slots in this channel.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// True when this channel holds no sample.
    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    /// Sample at per-channel position `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.length()`.
    pub fn sample(&self, index: usize) -> T {
        self.buf.sample(self.position(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.length()).map(move |i| self.sample(i))
    }

    /// Copy this channel's samples out.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Frames `start..end` of this channel, still a channel view.
    pub fn slice(&self, start: usize, end: usize) -> Result<Channel<T, &[T]>> {
        Ok(Channel::new(self.buf.slice(start, end)?, self.channel))
    }

    fn position(&self, index: usize) -> usize {
        layout::buffer_index(self.buf.channels(), self.channel, index)
    }
}

impl<T: Sample, S: AsRef<[T]> + AsMut<[T]>> Channel<T, S> {
    /// Write at per-channel position `index`, saturated to the bit depth.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.length()`.
    pub fn set_sample(&mut self, index: usize, value: T) {
        let pos = self.position(index);
        self.buf.set_sample(pos, value);
    }

    /// Mutable frames `start..end` of this channel.
    pub fn slice_mut(&mut self, start: usize, end: usize) -> Result<Channel<T, &mut [T]>> {
        let channel = self.channel;
        Ok(Channel::new(self.buf.slice_mut(start, end)?, channel))
    }
}
