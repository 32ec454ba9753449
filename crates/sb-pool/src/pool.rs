//! Shape-checked free list of owned buffers.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use sb_core::{Allocator, BitDepth, BufferError, Float, Result, Sample, SignalBuffer, SignedFixed, UnsignedFixed};
use spin::Mutex;

use crate::lease::PooledBuffer;

/// Counters describing what a pool has done so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Buffers allocated because the free list was empty.
    pub allocated: usize,
    /// Buffers handed out from the free list.
    pub reused: usize,
    /// Buffers accepted back.
    pub returned: usize,
    /// Buffers refused because their shape drifted.
    pub rejected: usize,
    /// Buffers currently waiting in the free list.
    pub idle: usize,
}

/// Thread-safe pool of identically shaped buffers.
///
/// Every buffer handed out has the pool's channel count, capacity, bit
/// depth and configured length, with all samples zeroed. Buffers coming
/// back are checked against that shape; a buffer that grew through
/// [`append`](sb_core::Buffer::append) or otherwise drifted is refused and
/// dropped. Returned buffers sit in the free list zeroed and empty.
///
/// Cloning a pool shares its free list.
#[derive(Clone)]
pub struct BufferPool<T: Sample> {
    inner: Arc<PoolInner<T>>,
}

impl<T: Sample> BufferPool<T> {
    /// Pool for buffers of shape `config`. `None` depth means the storage
    /// width of `T`.
    pub fn new(config: Allocator, depth: impl Into<Option<BitDepth>>) -> Result<Self> {
        config.validate()?;
        let depth = Allocator::effective_depth::<T>(depth.into());
        Ok(Self {
            inner: Arc::new(PoolInner {
                config,
                depth,
                max_idle: AtomicUsize::new(usize::MAX),
                free_list: Mutex::new(Vec::new()),
                metrics: PoolMetrics::default(),
            }),
        })
    }

    /// Bound the free list to `max_idle` buffers. Returns beyond the bound
    /// are accepted and dropped.
    pub fn with_max_idle(self, max_idle: usize) -> Self {
        self.inner.max_idle.store(max_idle, Ordering::Relaxed);
        self
    }

    /// Shape of every buffer this pool hands out.
    pub fn config(&self) -> Allocator {
        self.inner.config
    }

    /// Bit depth of every buffer this pool hands out.
    pub fn bit_depth(&self) -> BitDepth {
        self.inner.depth
    }

    /// Take a buffer, reusing an idle one when available.
    pub fn get(&self) -> Result<SignalBuffer<T>> {
        let inner = &self.inner;
        let reused = inner.free_list.lock().pop();
        let buf = match reused {
            Some(mut buf) => {
                buf.set_length(inner.config.length)?;
                inner.metrics.reused.fetch_add(1, Ordering::Relaxed);
                log::trace!("buffer pool: reusing idle {}-channel buffer", inner.config.channels);
                buf
            }
            None => {
                let buf = inner.config.allocate(inner.depth)?;
                inner.metrics.allocated.fetch_add(1, Ordering::Relaxed);
                log::trace!(
                    "buffer pool: free list empty, allocated {} samples",
                    inner.config.cap_elems()
                );
                buf
            }
        };
        Ok(buf)
    }

    /// Take a buffer that comes back to the pool when dropped.
    pub fn lease(&self) -> Result<PooledBuffer<T>> {
        Ok(PooledBuffer::new(self.get()?, self.clone()))
    }

    /// Give a buffer back.
    ///
    /// Fails with [`BufferError::CapacityMismatch`],
    /// [`BufferError::ChannelMismatch`] or [`BufferError::BitDepthMismatch`]
    /// when the buffer no longer has the pool's shape; it is dropped.
    pub fn put(&self, buf: SignalBuffer<T>) -> Result<()> {
        self.inner.recycle(buf).map_err(|err| {
            log::warn!("buffer pool: dropping returned buffer: {err}");
            err
        })
    }

    /// Release every idle buffer. Returns how many were released.
    pub fn shrink(&self) -> usize {
        let released = {
            let mut list = self.inner.free_list.lock();
            let released = list.len();
            list.clear();
            list.shrink_to_fit();
            released
        };
        log::debug!("buffer pool: released {released} idle buffers");
        released
    }

    /// Snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        let metrics = &self.inner.metrics;
        PoolStats {
            allocated: metrics.allocated.load(Ordering::Relaxed),
            reused: metrics.reused.load(Ordering::Relaxed),
            returned: metrics.returned.load(Ordering::Relaxed),
            rejected: metrics.rejected.load(Ordering::Relaxed),
            idle: self.inner.free_list.lock().len(),
        }
    }

    /// Return path for leases: a drifted buffer is dropped without a warning.
    pub(crate) fn reclaim(&self, buf: SignalBuffer<T>) {
        if let Err(err) = self.inner.recycle(buf) {
            log::trace!("buffer pool: discarding leased buffer: {err}");
        }
    }
}

impl<T: Float> BufferPool<T> {
    /// Pool of floating buffers.
    pub fn floating(config: Allocator) -> Result<Self> {
        Self::new(config, None)
    }
}

impl<T: SignedFixed> BufferPool<T> {
    /// Pool of signed fixed-point buffers at `depth`.
    pub fn signed(config: Allocator, depth: impl Into<Option<BitDepth>>) -> Result<Self> {
        Self::new(config, depth)
    }
}

impl<T: UnsignedFixed> BufferPool<T> {
    /// Pool of unsigned fixed-point buffers at `depth`.
    pub fn unsigned(config: Allocator, depth: impl Into<Option<BitDepth>>) -> Result<Self> {
        Self::new(config, depth)
    }
}

impl<T: Sample> core::fmt::Debug for BufferPool<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BufferPool")
            .field("config", &self.inner.config)
            .field("depth", &self.inner.depth)
            .field("stats", &self.stats())
            .finish()
    }
}

struct PoolInner<T> {
    config: Allocator,
    depth: BitDepth,
    max_idle: AtomicUsize,
    free_list: Mutex<Vec<SignalBuffer<T>>>,
    metrics: PoolMetrics,
}

impl<T: Sample> PoolInner<T> {
    fn recycle(&self, mut buf: SignalBuffer<T>) -> Result<()> {
        if let Err(err) = self.check_shape(&buf) {
            self.metrics.rejected.fetch_add(1, Ordering::Relaxed);
            return Err(err);
        }
        buf.clear();
        self.metrics.returned.fetch_add(1, Ordering::Relaxed);

        let max_idle = self.max_idle.load(Ordering::Relaxed);
        let mut list = self.free_list.lock();
        if list.len() < max_idle {
            list.push(buf);
        }
        Ok(())
    }

    fn check_shape(&self, buf: &SignalBuffer<T>) -> Result<()> {
        let expected = self.config.cap_elems();
        if buf.cap() != expected {
            return Err(BufferError::CapacityMismatch {
                expected,
                actual: buf.cap(),
            });
        }
        if buf.channels() != self.config.channels {
            return Err(BufferError::ChannelMismatch {
                expected: self.config.channels,
                actual: buf.channels(),
            });
        }
        if buf.bit_depth() != self.depth {
            return Err(BufferError::BitDepthMismatch {
                expected: self.depth,
                actual: buf.bit_depth(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
struct PoolMetrics {
    allocated: AtomicUsize,
    reused: AtomicUsize,
    returned: AtomicUsize,
    rejected: AtomicUsize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo() -> BufferPool<f32> {
        BufferPool::floating(Allocator::new(2, 256, 512)).unwrap()
    }

    #[test]
    fn pool_reports_its_shape() {
        let pool = stereo();
        assert_eq!(pool.config(), Allocator::new(2, 256, 512));
        assert_eq!(pool.bit_depth(), BitDepth::B32);
    }

    #[test]
    fn returned_buffer_comes_back_zeroed_at_configured_length() {
        let pool = stereo();
        let mut buf = pool.get().unwrap();
        assert_eq!(buf.capacity(), 512);
        assert_eq!(buf.len(), 512);
        buf.set_sample(0, 0.5);
        pool.put(buf).unwrap();

        let buf = pool.get().unwrap();
        assert_eq!(buf.capacity(), 512);
        assert_eq!(buf.length(), 256);
        assert!(buf.samples().iter().all(|&s| s == 0.0));
        assert_eq!(
            pool.stats(),
            PoolStats {
                allocated: 1,
                reused: 1,
                returned: 1,
                rejected: 0,
                idle: 0,
            }
        );
    }

    #[test]
    fn idle_buffers_are_empty() {
        let pool = stereo();
        let mut buf = pool.get().unwrap();
        buf.samples_mut().fill(1.0);
        pool.put(buf).unwrap();
        let idle = pool.inner.free_list.lock();
        assert_eq!(idle[0].len(), 0);
        assert_eq!(idle[0].cap(), 1024);
    }

    #[test]
    fn grown_buffer_is_rejected() {
        let pool = stereo();
        let mut buf = pool.get().unwrap();
        let extra = Allocator::new(2, 300, 300).float::<f32>().unwrap();
        buf.append(&extra).unwrap();
        assert_eq!(
            pool.put(buf),
            Err(BufferError::CapacityMismatch {
                expected: 1024,
                actual: 1112,
            })
        );
        let stats = pool.stats();
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.idle, 0);
    }

    #[test]
    fn foreign_channel_count_is_rejected() {
        let pool = stereo();
        let mono = Allocator::new(1, 0, 1024).float::<f32>().unwrap();
        assert_eq!(
            pool.put(mono),
            Err(BufferError::ChannelMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn foreign_bit_depth_is_rejected() {
        let pool: BufferPool<i32> = BufferPool::signed(Allocator::new(1, 4, 4), BitDepth::B16).unwrap();
        assert_eq!(pool.bit_depth(), BitDepth::B16);
        let wide = Allocator::new(1, 4, 4).signed::<i32>(BitDepth::B24).unwrap();
        assert_eq!(
            pool.put(wide),
            Err(BufferError::BitDepthMismatch {
                expected: BitDepth::B16,
                actual: BitDepth::B24
            })
        );
        let buf = pool.get().unwrap();
        assert_eq!(buf.bit_depth(), BitDepth::B16);
        assert_eq!(buf.max_value(), 32767);
    }

    #[test]
    fn unsigned_pool_hands_out_zeroed_slots() {
        let pool: BufferPool<u8> = BufferPool::unsigned(Allocator::new(1, 2, 2), None).unwrap();
        let buf = pool.get().unwrap();
        assert_eq!(buf.samples(), &[0, 0]);
        assert_eq!(buf.bit_depth(), BitDepth::B8);
    }

    #[test]
    fn invalid_config_is_refused() {
        assert!(matches!(
            BufferPool::<f64>::floating(Allocator::new(0, 0, 8)),
            Err(BufferError::InvalidConfig { .. })
        ));
        assert!(matches!(
            BufferPool::<f64>::floating(Allocator::new(1, 9, 8)),
            Err(BufferError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn max_idle_bounds_the_free_list() {
        let pool = stereo().with_max_idle(1);
        let a = pool.get().unwrap();
        let b = pool.get().unwrap();
        pool.put(a).unwrap();
        pool.put(b).unwrap();
        let stats = pool.stats();
        assert_eq!(stats.returned, 2);
        assert_eq!(stats.idle, 1);
    }

    #[test]
    fn shrink_releases_idle_buffers() {
        let pool = stereo();
        let bufs: Vec<_> = (0..3).map(|_| pool.get().unwrap()).collect();
        for buf in bufs {
            pool.put(buf).unwrap();
        }
        assert_eq!(pool.shrink(), 3);
        assert_eq!(pool.stats().idle, 0);
        assert_eq!(pool.shrink(), 0);
    }

    #[test]
    fn clones_share_the_free_list() {
        let pool = stereo();
        let other = pool.clone();
        other.put(pool.get().unwrap()).unwrap();
        assert_eq!(pool.stats().idle, 1);
        pool.get().unwrap();
        assert_eq!(other.stats().reused, 1);
    }

    #[test]
    fn concurrent_get_and_put() {
        let pool = stereo();
        std::thread::scope(|scope| {
            for worker in 0..4 {
                let pool = pool.clone();
                scope.spawn(move || {
                    for i in 0..100 {
                        let mut buf = pool.get().unwrap();
                        assert!(buf.samples().iter().all(|&s| s == 0.0));
                        buf.set_sample(i % buf.len(), worker as f32);
                        pool.put(buf).unwrap();
                    }
                });
            }
        });
        let stats = pool.stats();
        assert_eq!(stats.allocated + stats.reused, 400);
        assert_eq!(stats.returned, 400);
        assert!(stats.allocated <= 4);
        assert_eq!(stats.idle, stats.allocated);
    }
}
