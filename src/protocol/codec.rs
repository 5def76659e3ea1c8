//! Text frame <-> binary packet conversion
//!
//! This module turns `<COMMAND>` frames into packets, packets back into
//! frames, and packets into their 37-byte wire form.

use tracing::{debug, instrument, trace};

use super::frame::is_valid_text_frame;
use super::{Error, FRAME_CLOSE, FRAME_OPEN, MIN_FRAME_LEN, PACKET_SIZE, Packet, Result};

/// Convert a bracketed text command into a packet
///
/// # Errors
///
/// Returns an error if:
/// - The frame is shorter than `<X>` ([`Error::FrameTooShort`])
/// - The frame is not enclosed in brackets ([`Error::NotBracketed`])
/// - The command exceeds `MAX_PAYLOAD` ([`Error::PayloadTooLarge`])
#[instrument(level = "trace", skip_all, fields(len = text.len()))]
pub fn text_to_binary(text: &[u8]) -> Result<Packet> {
    if text.len() < MIN_FRAME_LEN {
        debug!("text frame too short");
        return Err(Error::FrameTooShort {
            len: text.len(),
            min: MIN_FRAME_LEN,
        });
    }

    if !is_valid_text_frame(text) {
        debug!("text frame not bracketed");
        return Err(Error::NotBracketed);
    }

    Packet::new(&text[1..text.len() - 1])
}

/// Convert a packet back into a bracketed text command
///
/// The packet is validated first; an invalid packet never produces text.
#[instrument(level = "trace", skip_all, fields(length = packet.length()))]
pub fn binary_to_text(packet: &Packet) -> Result<Vec<u8>> {
    let payload = packet.validate()?;

    let mut text = Vec::with_capacity(payload.len() + 2);
    text.push(FRAME_OPEN);
    text.extend_from_slice(payload);
    text.push(FRAME_CLOSE);

    Ok(text)
}

/// Render a packet for diagnostics
///
/// Shows every field in hex, the payload length and the fixed wire size.
/// An empty payload renders as an empty list.
#[must_use]
pub fn render_packet(packet: &Packet) -> String {
    packet.to_string()
}

/// Encode a packet to wire bytes
///
/// # Format
///
/// ```text
/// [START (1)] [LENGTH (1)] [PAYLOAD (32)] [CHECKSUM (1)] [RESERVED (1)] [END (1)]
/// ```
#[must_use]
pub fn encode(packet: &Packet) -> [u8; PACKET_SIZE] {
    packet.to_bytes()
}

/// Decode and validate a packet from wire bytes
///
/// # Errors
///
/// Returns an error if:
/// - Buffer is shorter than `PACKET_SIZE`
/// - Start or end marker is wrong
/// - Length field exceeds `MAX_PAYLOAD`
/// - Checksum doesn't match
/// - Reserved byte is not zero
pub fn decode(bytes: &[u8]) -> Result<Packet> {
    let packet = Packet::from_bytes(bytes)?;
    packet.validate()?;

    trace!(length = packet.length(), "decoded packet");
    Ok(packet)
}
