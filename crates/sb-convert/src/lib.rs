//! Bit-exact conversion between sample representations.
//!
//! The [`quantize`] module holds the per-sample rules. The converters
//! apply them while appending one signal to another of a different
//! representation or bit depth, without growing the destination.

#![cfg_attr(not(feature = "std"), no_std)]

mod convert;
pub mod quantize;

pub use convert::{
    floating_as_floating, floating_as_signed, floating_as_unsigned, signed_as_floating,
    signed_as_signed, signed_as_unsigned, unsigned_as_floating, unsigned_as_signed,
    unsigned_as_unsigned,
};
