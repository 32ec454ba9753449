//! Channel-interleaved quantized sample buffers.
//!
//! `sigbuf` stores multi-channel signals as one interleaved vector of
//! `f32`/`f64`, signed or unsigned integer samples at a declared bit
//! depth, and moves them between representations bit-exactly.
//!
//! ```
//! use sigbuf::{codec, convert, Allocator, BitDepth, SignalBuffer};
//!
//! let shape = Allocator::new(1, 3, 3);
//! let mut src: SignalBuffer<f64> = shape.float()?;
//! codec::write(&[-2.0f64, 0.0, 2.0], &mut src);
//!
//! let mut dst: SignalBuffer<i16> = Allocator::new(1, 0, 3).signed(BitDepth::B16)?;
//! convert::floating_as_signed(&src, &mut dst)?;
//! assert_eq!(dst.samples(), &[-32768, 0, 32767]);
//! # Ok::<(), sigbuf::BufferError>(())
//! ```
//!
//! The pieces live in separate crates re-exported here:
//!
//! - core types ([`SignalBuffer`], [`Channel`], [`Allocator`], [`BitDepth`])
//! - [`codec`]: flat and striped transfer to and from slices
//! - [`convert`]: appending converters and the per-sample [`convert::quantize`] rules
//! - [`pool`]: the thread-safe [`BufferPool`]

#![cfg_attr(not(feature = "std"), no_std)]

pub use sb_core::{
    bit_depth, layout, Allocator, BitDepth, Buffer, BufferError, BufferMut, BufferRef, Channel,
    ChannelMut, ChannelRef, Fixed, Float, Floating, Kind, Repr, Result, Sample, Signal,
    SignalBuffer, SignalMut, Signed, SignedFixed, Unsigned, UnsignedFixed,
};

pub mod codec {
    //! Flat and striped sample transfer.
    pub use sb_codec::*;
}

pub mod convert {
    //! Cross-representation converters.
    pub use sb_convert::*;
}

pub mod pool {
    //! Shape-checked buffer reuse.
    pub use sb_pool::*;
}

pub use sb_pool::{BufferPool, PoolStats, PooledBuffer};
