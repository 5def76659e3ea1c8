//! Framing and packet error types

use thiserror::Error;

/// Protocol errors
///
/// Every rejection reason is its own variant so callers can match on the kind
/// without looking at the rendered message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Text frame has no room for brackets plus at least one content byte
    #[error("frame too short: {len} bytes (min {min})")]
    FrameTooShort {
        /// Length of the rejected frame
        len: usize,
        /// Minimum accepted length
        min: usize,
    },

    /// Text frame does not start with `<` and end with `>`
    #[error("frame is not enclosed in '<' and '>'")]
    NotBracketed,

    /// Payload too large
    #[error("payload too large: {size} bytes (max {max})")]
    PayloadTooLarge {
        /// Payload size
        size: usize,
        /// Maximum allowed
        max: usize,
    },

    /// Start or end marker mismatch
    #[error("invalid markers: start {start:#04x}, end {end:#04x}")]
    InvalidMarkers {
        /// Start marker found in the packet
        start: u8,
        /// End marker found in the packet
        end: u8,
    },

    /// Length field exceeds the payload capacity
    #[error("invalid length field: {length} (max {max})")]
    InvalidLength {
        /// Length field found in the packet
        length: u8,
        /// Payload capacity
        max: usize,
    },

    /// Checksum mismatch
    #[error("checksum mismatch: expected {expected:#04x}, got {found:#04x}")]
    ChecksumMismatch {
        /// Checksum recomputed from the packet contents
        expected: u8,
        /// Checksum stored in the packet
        found: u8,
    },

    /// Reserved wire byte is not zero
    #[error("reserved byte set: {value:#04x}")]
    ReservedByteSet {
        /// Value found in the reserved byte
        value: u8,
    },

    /// Absent buffer or zero capacity
    #[error("invalid arguments: {0}")]
    InvalidArguments(&'static str),

    /// Buffer too small
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall {
        /// Needed size
        needed: usize,
        /// Actual size
        got: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
