//! Buffer shape configuration and allocation.

use crate::bit_depth::BitDepth;
use crate::buffer::SignalBuffer;
use crate::error::{BufferError, Result};
use crate::sample::{Float, Sample, SignedFixed, UnsignedFixed};

/// Shape of a buffer: channel count plus per-channel length and capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocator {
    pub channels: usize,
    /// Frames filled on allocation.
    pub length: usize,
    /// Frames allocated.
    pub capacity: usize,
}

impl Allocator {
    pub const fn new(channels: usize, length: usize, capacity: usize) -> Self {
        Self {
            channels,
            length,
            capacity,
        }
    }

    /// Check that the shape can be allocated.
    pub fn validate(&self) -> Result<()> {
        if self.channels == 0 {
            return Err(BufferError::InvalidConfig {
                reason: "channels must be at least 1",
            });
        }
        if self.length > self.capacity {
            return Err(BufferError::InvalidConfig {
                reason: "length exceeds capacity",
            });
        }
        if self.channels.checked_mul(self.capacity).is_none() {
            return Err(BufferError::InvalidConfig {
                reason: "capacity overflows",
            });
        }
        Ok(())
    }

    /// Sample slots across all channels.
    pub const fn cap_elems(&self) -> usize {
        self.channels * self.capacity
    }

    /// Filled samples across all channels.
    pub const fn len_elems(&self) -> usize {
        self.channels * self.length
    }

    /// Bit depth a `T` buffer gets for a requested depth: `None` means the
    /// storage width, and anything wider than storage is clamped to it.
    /// Floating buffers always report their storage width.
    pub fn effective_depth<T: Sample>(depth: Option<BitDepth>) -> BitDepth {
        match depth {
            Some(depth) if T::REPR != crate::Repr::Floating => depth.clamp_to(T::WIDTH),
            _ => T::WIDTH,
        }
    }

    /// Allocate a zeroed buffer of any sample type.
    pub fn allocate<T: Sample>(&self, depth: impl Into<Option<BitDepth>>) -> Result<SignalBuffer<T>> {
        self.validate()?;
        let depth = Self::effective_depth::<T>(depth.into());
        Ok(SignalBuffer::zeroed(self.channels, self.length, self.capacity, depth))
    }

    /// Allocate a floating buffer.
    pub fn float<T: Float>(&self) -> Result<SignalBuffer<T>> {
        self.allocate(None)
    }

    /// Allocate a signed fixed-point buffer.
    pub fn signed<T: SignedFixed>(&self, depth: impl Into<Option<BitDepth>>) -> Result<SignalBuffer<T>> {
        self.allocate(depth)
    }

    /// Allocate an unsigned fixed-point buffer. Slots start at 0, not at
    /// the midpoint.
    pub fn unsigned<T: UnsignedFixed>(&self, depth: impl Into<Option<BitDepth>>) -> Result<SignalBuffer<T>> {
        self.allocate(depth)
    }
}
