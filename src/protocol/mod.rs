//! Framing protocol core
//!
//! This module provides the wire format, text frame validation, checksums,
//! conversion and command dispatch.

mod bounded;
mod checksum;
mod codec;
mod command;
mod dispatch;
mod error;
mod frame;
mod packet;

pub use bounded::{bounded_copy, bounded_copy_opt};
pub use checksum::{buffer_checksum, compute_checksum, verify_buffer_checksum, verify_checksum};
pub use codec::{binary_to_text, decode, encode, render_packet, text_to_binary};
pub use command::Command;
pub use dispatch::{Action, CommandBinding, DispatchConfig, Dispatcher, dispatch};
pub use error::{Error, Result};
pub use frame::{extract_command, is_valid_text_frame};
pub use packet::{Packet, build_packet, parse_packet};

/// Packet start marker
pub const START_MARKER: u8 = 0xAA;

/// Packet end marker
pub const END_MARKER: u8 = 0xBB;

/// Payload capacity in bytes
pub const MAX_PAYLOAD: usize = 32;

/// Packet size on the wire (markers, length, payload, checksum, reserved)
pub const PACKET_SIZE: usize = 5 + MAX_PAYLOAD;

/// Wire offset of the start marker
pub const START_OFFSET: usize = 0;

/// Wire offset of the length field
pub const LENGTH_OFFSET: usize = START_OFFSET + 1;

/// Wire offset of the first payload byte
pub const PAYLOAD_OFFSET: usize = LENGTH_OFFSET + 1;

/// Wire offset of the checksum
pub const CHECKSUM_OFFSET: usize = PAYLOAD_OFFSET + MAX_PAYLOAD;

/// Wire offset of the reserved byte (must be zero)
pub const RESERVED_OFFSET: usize = CHECKSUM_OFFSET + 1;

/// Wire offset of the end marker, always the last byte
pub const END_OFFSET: usize = RESERVED_OFFSET + 1;

const _: () = assert!(END_OFFSET == PACKET_SIZE - 1);

/// Text frame opening bracket
pub const FRAME_OPEN: u8 = b'<';

/// Text frame closing bracket
pub const FRAME_CLOSE: u8 = b'>';

/// Shortest text frame carrying a command (`<X>`)
pub const MIN_FRAME_LEN: usize = 3;

/// Terminator written by [`bounded_copy`]
pub const TERMINATOR: u8 = 0;
