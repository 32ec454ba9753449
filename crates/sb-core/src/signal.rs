//! Sample-level access shared by buffers, slice views and channel views.
//!
//! Codecs and converters are written against these traits. A channel view
//! presents itself as a mono signal.

use crate::bit_depth::BitDepth;
use crate::buffer::Buffer;
use crate::channel::Channel;
use crate::error::{BufferError, Result};
use crate::layout;
use crate::sample::Sample;

/// Read access to an interleaved signal.
pub trait Signal<T: Sample> {
    fn channels(&self) -> usize;

    fn bit_depth(&self) -> BitDepth;

    /// Filled samples across all channels.
    fn len(&self) -> usize;

    /// Sample slots across all channels.
    fn cap(&self) -> usize;

    /// Sample at flat index `pos`; `pos < len()`.
    fn sample(&self, pos: usize) -> T;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Filled frames, counting a partial final frame.
    fn length(&self) -> usize {
        layout::frames(self.channels(), self.len())
    }

    /// Frame slots.
    fn capacity(&self) -> usize {
        layout::capacity_frames(self.channels(), self.cap())
    }
}

/// Write access to an interleaved signal.
pub trait SignalMut<T: Sample>: Signal<T> {
    /// Write at flat index `pos` with saturation; `pos < len()`.
    fn set_sample(&mut self, pos: usize, value: T);

    /// Append one sample; silently ignored when full.
    fn append_sample(&mut self, value: T) -> Result<()>;
}

impl<T: Sample, S: AsRef<[T]>> Signal<T> for Buffer<T, S> {
    fn channels(&self) -> usize {
        Buffer::channels(self)
    }

    fn bit_depth(&self) -> BitDepth {
        Buffer::bit_depth(self)
    }

    fn len(&self) -> usize {
        Buffer::len(self)
    }

    fn cap(&self) -> usize {
        Buffer::cap(self)
    }

    fn sample(&self, pos: usize) -> T {
        Buffer::sample(self, pos)
    }
}

impl<T: Sample, S: AsRef<[T]> + AsMut<[T]>> SignalMut<T> for Buffer<T, S> {
    fn set_sample(&mut self, pos: usize, value: T) {
        Buffer::set_sample(self, pos, value);
    }

    fn append_sample(&mut self, value: T) -> Result<()> {
        Buffer::append_sample(self, value);
        Ok(())
    }
}

impl<T: Sample, S: AsRef<[T]>> Signal<T> for Channel<T, S> {
    fn channels(&self) -> usize {
        1
    }

    fn bit_depth(&self) -> BitDepth {
        Channel::bit_depth(self)
    }

    fn len(&self) -> usize {
        Channel::length(self)
    }

    fn cap(&self) -> usize {
        Channel::capacity(self)
    }

    fn sample(&self, pos: usize) -> T {
        Channel::sample(self, pos)
    }
}

impl<T: Sample, S: AsRef<[T]> + AsMut<[T]>> SignalMut<T> for Channel<T, S> {
    fn set_sample(&mut self, pos: usize, value: T) {
        Channel::set_sample(self, pos, value);
    }

    fn append_sample(&mut self, _value: T) -> Result<()> {
        Err(BufferError::OperationNotSupported {
            operation: "append_sample",
        })
    }
}

impl<T: Sample, X: Signal<T> + ?Sized> Signal<T> for &X {
    fn channels(&self) -> usize {
        (**self).channels()
    }

    fn bit_depth(&self) -> BitDepth {
        (**self).bit_depth()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn cap(&self) -> usize {
        (**self).cap()
    }

    fn sample(&self, pos: usize) -> T {
        (**self).sample(pos)
    }
}
