//! Fixed-size binary packet
//!
//! Every packet is exactly 37 bytes on the wire, whatever its payload length.

use std::fmt;

use tracing::{debug, trace};

use super::checksum::compute_checksum;
use super::{
    CHECKSUM_OFFSET, END_MARKER, END_OFFSET, Error, LENGTH_OFFSET, MAX_PAYLOAD, PACKET_SIZE,
    PAYLOAD_OFFSET, RESERVED_OFFSET, Result, START_MARKER, START_OFFSET,
};

/// Binary packet (37 bytes)
///
/// # Wire Format
///
/// ```text
/// +-------+--------+----------------------+----------+----------+-------+
/// | START | LENGTH |   PAYLOAD (32 bytes) | CHECKSUM | RESERVED |  END  |
/// | 0xAA  |  0-32  |  zero-padded         |   XOR    |   0x00   | 0xBB  |
/// +-------+--------+----------------------+----------+----------+-------+
///     0       1            2..34               34         35        36
/// ```
///
/// The checksum is the XOR of the length byte and the first `length`
/// payload bytes. Bytes past `length` are padding and never trusted. The
/// reserved byte keeps the end marker on the last wire byte and must be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet {
    start_marker: u8,
    length: u8,
    payload: [u8; MAX_PAYLOAD],
    checksum: u8,
    reserved: u8,
    end_marker: u8,
}

impl Packet {
    /// Build a packet around `payload`.
    ///
    /// # Errors
    ///
    /// [`Error::PayloadTooLarge`] if `payload` exceeds `MAX_PAYLOAD` bytes.
    pub fn new(payload: &[u8]) -> Result<Self> {
        let Ok(length) = u8::try_from(payload.len()) else {
            return Err(too_large(payload.len()));
        };
        if payload.len() > MAX_PAYLOAD {
            return Err(too_large(payload.len()));
        }

        let mut buf = [0u8; MAX_PAYLOAD];
        buf[..payload.len()].copy_from_slice(payload);

        trace!(length, "building packet");

        Ok(Self {
            start_marker: START_MARKER,
            length,
            payload: buf,
            checksum: compute_checksum(length, payload),
            reserved: 0,
            end_marker: END_MARKER,
        })
    }

    /// Get start marker
    #[must_use]
    pub const fn start_marker(&self) -> u8 {
        self.start_marker
    }

    /// Get length field
    #[must_use]
    pub const fn length(&self) -> u8 {
        self.length
    }

    /// Meaningful payload bytes.
    ///
    /// Clamped to the payload capacity when the length field is corrupt, so
    /// this never panics. Use [`Packet::validate`] before trusting the bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload[..self.clamped_len()]
    }

    /// Full payload field, padding included
    #[must_use]
    pub const fn raw_payload(&self) -> &[u8; MAX_PAYLOAD] {
        &self.payload
    }

    /// Get stored checksum
    #[must_use]
    pub const fn checksum(&self) -> u8 {
        self.checksum
    }

    /// Get reserved byte
    #[must_use]
    pub const fn reserved(&self) -> u8 {
        self.reserved
    }

    /// Get end marker
    #[must_use]
    pub const fn end_marker(&self) -> u8 {
        self.end_marker
    }

    /// Validate the packet and return its payload.
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// markers, then length, then checksum, then the reserved byte.
    pub fn validate(&self) -> Result<&[u8]> {
        if self.start_marker != START_MARKER || self.end_marker != END_MARKER {
            debug!(
                start = self.start_marker,
                end = self.end_marker,
                "packet rejected: bad markers"
            );
            return Err(Error::InvalidMarkers {
                start: self.start_marker,
                end: self.end_marker,
            });
        }

        if usize::from(self.length) > MAX_PAYLOAD {
            debug!(length = self.length, "packet rejected: bad length");
            return Err(Error::InvalidLength {
                length: self.length,
                max: MAX_PAYLOAD,
            });
        }

        let payload = &self.payload[..usize::from(self.length)];
        let calculated = compute_checksum(self.length, payload);
        if calculated != self.checksum {
            debug!(
                expected = calculated,
                found = self.checksum,
                "packet rejected: checksum mismatch"
            );
            return Err(Error::ChecksumMismatch {
                expected: calculated,
                found: self.checksum,
            });
        }

        if self.reserved != 0 {
            debug!(value = self.reserved, "packet rejected: reserved byte set");
            return Err(Error::ReservedByteSet {
                value: self.reserved,
            });
        }

        Ok(payload)
    }

    /// Check whether the packet passes [`Packet::validate`]
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }

    /// Convert to wire bytes
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        let mut bytes = [0u8; PACKET_SIZE];

        bytes[START_OFFSET] = self.start_marker;
        bytes[LENGTH_OFFSET] = self.length;
        bytes[PAYLOAD_OFFSET..CHECKSUM_OFFSET].copy_from_slice(&self.payload);
        bytes[CHECKSUM_OFFSET] = self.checksum;
        bytes[RESERVED_OFFSET] = self.reserved;
        bytes[END_OFFSET] = self.end_marker;

        bytes
    }

    /// Parse fields from wire bytes without validating them.
    ///
    /// Extra trailing bytes are ignored. Run [`Packet::validate`] on the
    /// result before using the payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let Some(bytes) = bytes.get(..PACKET_SIZE) else {
            return Err(Error::BufferTooSmall {
                needed: PACKET_SIZE,
                got: bytes.len(),
            });
        };

        let mut payload = [0u8; MAX_PAYLOAD];
        payload.copy_from_slice(&bytes[PAYLOAD_OFFSET..CHECKSUM_OFFSET]);

        Ok(Self {
            start_marker: bytes[START_OFFSET],
            length: bytes[LENGTH_OFFSET],
            payload,
            checksum: bytes[CHECKSUM_OFFSET],
            reserved: bytes[RESERVED_OFFSET],
            end_marker: bytes[END_OFFSET],
        })
    }

    /// Copy of this packet with one wire bit flipped.
    ///
    /// Diagnostic helper for showing how a damaged packet is rejected. The
    /// result is decoded with [`Packet::from_bytes`] and is not validated.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArguments`] if `offset` is outside the packet or
    /// `bit` is not in `0..8`.
    pub fn with_flipped_bit(&self, offset: usize, bit: u8) -> Result<Self> {
        if offset >= PACKET_SIZE {
            return Err(Error::InvalidArguments("offset outside the packet"));
        }
        if bit >= 8 {
            return Err(Error::InvalidArguments("bit index must be below 8"));
        }

        let mut bytes = self.to_bytes();
        bytes[offset] ^= 1 << bit;
        Self::from_bytes(&bytes)
    }

    fn clamped_len(&self) -> usize {
        usize::from(self.length).min(MAX_PAYLOAD)
    }
}

fn too_large(size: usize) -> Error {
    debug!(size, "payload rejected: too large");
    Error::PayloadTooLarge {
        size,
        max: MAX_PAYLOAD,
    }
}

/// Build a packet around `payload`. See [`Packet::new`].
pub fn build_packet(payload: &[u8]) -> Result<Packet> {
    Packet::new(payload)
}

/// Validate `packet` and return its payload. See [`Packet::validate`].
pub fn parse_packet(packet: &Packet) -> Result<&[u8]> {
    packet.validate()
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Binary Packet ===")?;
        writeln!(f, "Start Byte: {:#04X}", self.start_marker)?;
        writeln!(f, "Length: {} bytes", self.length)?;
        write!(f, "Payload (hex):")?;
        for byte in self.payload() {
            write!(f, " {byte:02X}")?;
        }
        writeln!(f)?;
        writeln!(f, "Checksum: {:#04X}", self.checksum)?;
        writeln!(f, "End Byte: {:#04X}", self.end_marker)?;
        write!(f, "Total Size: {PACKET_SIZE} bytes")
    }
}
