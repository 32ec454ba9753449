//! RAII handle over a pooled buffer.

use core::ops::{Deref, DerefMut};

use sb_core::{Sample, SignalBuffer};

use crate::pool::BufferPool;

/// A buffer on loan from a [`BufferPool`].
///
/// Derefs to the buffer and goes back to its pool when dropped. A buffer
/// whose shape drifted while on loan is discarded instead.
pub struct PooledBuffer<T: Sample> {
    // `None` only once released by `into_inner` or `drop`.
    buf: Option<SignalBuffer<T>>,
    pool: BufferPool<T>,
}

impl<T: Sample> PooledBuffer<T> {
    pub(crate) fn new(buf: SignalBuffer<T>, pool: BufferPool<T>) -> Self {
        Self {
            buf: Some(buf),
            pool,
        }
    }

    /// Detach the buffer from its pool.
    pub fn into_inner(mut self) -> SignalBuffer<T> {
        match self.buf.take() {
            Some(buf) => buf,
            None => unreachable!("pooled buffer already released"),
        }
    }
}

impl<T: Sample> Deref for PooledBuffer<T> {
    type Target = SignalBuffer<T>;

    fn deref(&self) -> &SignalBuffer<T> {
        match self.buf.as_ref() {
            Some(buf) => buf,
            None => unreachable!("pooled buffer already released"),
        }
    }
}

impl<T: Sample> DerefMut for PooledBuffer<T> {
    fn deref_mut(&mut self) -> &mut SignalBuffer<T> {
        match self.buf.as_mut() {
            Some(buf) => buf,
            None => unreachable!("pooled buffer already released"),
        }
    }
}

impl<T: Sample> Drop for PooledBuffer<T> {
    fn drop(&mut self) {
        if let Some(buf) = self.buf.take() {
            self.pool.reclaim(buf);
        }
    }
}

impl<T: Sample> core::fmt::Debug for PooledBuffer<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("PooledBuffer").field(&self.buf).finish()
    }
}
