//! Error type shared by every sigbuf crate.
//!
//! These are precondition violations on the caller's side. Out-of-range
//! sample values are never errors; they saturate.

use crate::bit_depth::BitDepth;

/// Error type for buffer, codec, converter and pool operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Zero channels, `length > capacity`, or an unsupported bit depth.
    #[error("invalid buffer config: {reason}")]
    InvalidConfig { reason: &'static str },

    /// Source and destination disagree on channel count.
    #[error("channel mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    /// Fixed-point buffers of the same type but different bit depths.
    #[error("bit depth mismatch: expected {expected}, got {actual}")]
    BitDepthMismatch { expected: BitDepth, actual: BitDepth },

    /// Slice bounds outside `[0, capacity]` or `start > end`.
    #[error("invalid range {start}..{end} for capacity {capacity}")]
    InvalidRange {
        start: usize,
        end: usize,
        capacity: usize,
    },

    /// Channel selector outside `[0, channels)`.
    #[error("channel {channel} out of range for {channels} channels")]
    ChannelOutOfRange { channel: usize, channels: usize },

    /// Structural operation attempted on a single-channel view.
    #[error("{operation} is not supported on a channel view")]
    OperationNotSupported { operation: &'static str },

    /// Buffer returned to a pool whose shape it no longer matches.
    #[error("capacity mismatch: expected {expected} samples, got {actual}")]
    CapacityMismatch { expected: usize, actual: usize },
}

/// Result alias used across sigbuf.
pub type Result<T> = core::result::Result<T, BufferError>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_the_offending_values() {
        let err = BufferError::ChannelMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "channel mismatch: expected 2, got 3");

        let err = BufferError::BitDepthMismatch {
            expected: BitDepth::B16,
            actual: BitDepth::B8,
        };
        assert_eq!(err.to_string(), "bit depth mismatch: expected 16-bit, got 8-bit");

        let err = BufferError::InvalidRange {
            start: 3,
            end: 1,
            capacity: 4,
        };
        assert_eq!(err.to_string(), "invalid range 3..1 for capacity 4");
    }
}
