//! Single-byte XOR checksums
//!
//! Two flavours live here and must not be confused:
//!
//! - the packet checksum folds the length byte and the meaningful payload
//!   bytes, so a truncated or extended payload is caught even when the
//!   remaining bytes are unchanged;
//! - the buffer checksum folds raw bytes only, starting from zero.

/// Packet-level checksum over `length` and `payload`.
///
/// The fold is seeded with `length`, so an empty payload yields `length`
/// itself.
#[must_use]
pub fn compute_checksum(length: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(length, |acc, byte| acc ^ byte)
}

/// Check a packet-level checksum.
#[must_use]
pub fn verify_checksum(length: u8, payload: &[u8], expected: u8) -> bool {
    compute_checksum(length, payload) == expected
}

/// Buffer-level checksum over raw bytes.
#[must_use]
pub fn buffer_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0, |acc, byte| acc ^ byte)
}

/// Check a buffer-level checksum.
#[must_use]
pub fn verify_buffer_checksum(data: &[u8], expected: u8) -> bool {
    buffer_checksum(data) == expected
}
