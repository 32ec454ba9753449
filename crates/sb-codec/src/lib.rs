//! Sample codecs for sigbuf.
//!
//! Moves samples between external slices and signals, either flat
//! (interleaved, as on the wire) or striped (one slice per channel, as
//! per-channel DSP nodes want them). External slices may use any width of
//! the signal's representation; values saturate on the way in and out.

#![cfg_attr(not(feature = "std"), no_std)]

mod interleaved;
mod striped;

pub use interleaved::{read, write};
pub use striped::{read_striped, write_striped};
