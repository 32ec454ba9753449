//! Buffer pooling for sigbuf.
//!
//! A [`BufferPool`] amortizes allocation for workloads that keep taking
//! and returning buffers of one shape. It is `Send + Sync` and cheap to
//! clone; the free list sits behind a spin lock held only for a push or a
//! pop.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod lease;
mod pool;

pub use lease::PooledBuffer;
pub use pool::{BufferPool, PoolStats};
