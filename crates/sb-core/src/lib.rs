//! Core types for sigbuf.
//!
//! Defines the quantization model (bit depths and sample kinds), the
//! channel-interleaved [`Buffer`] with its slice and channel views, and
//! the [`Allocator`] shape every buffer is created from. The codec,
//! converter and pool crates build on these types.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod allocator;
pub mod bit_depth;
mod buffer;
mod channel;
mod error;
pub mod layout;
mod sample;
mod signal;

pub use allocator::Allocator;
pub use bit_depth::BitDepth;
pub use buffer::{Buffer, BufferMut, BufferRef, SignalBuffer};
pub use channel::{Channel, ChannelMut, ChannelRef};
pub use error::{BufferError, Result};
pub use sample::{Fixed, Float, Floating, Kind, Repr, Sample, Signed, SignedFixed, Unsigned, UnsignedFixed};
pub use signal::{Signal, SignalMut};
