//! framelink - bracketed text commands over fixed-size checksummed packets
//!
//! This library converts human-readable commands such as `<LED_ON>` into
//! 37-byte binary packets with start/end markers and an XOR checksum, and
//! validates packets on the receiving side before their payload is trusted.
//!
//! # Quick Start
//!
//! ```rust
//! use framelink::{Action, Dispatcher, text_to_binary};
//!
//! // Text frame to packet
//! let packet = text_to_binary(b"<LED_ON>")?;
//! assert_eq!(packet.length(), 6);
//!
//! // Packet to wire bytes and back through the receive pipeline
//! let wire = packet.to_bytes();
//! let action = Dispatcher::default().handle_packet(&wire)?;
//! assert_eq!(action, Action::LedOn);
//! # Ok::<(), framelink::Error>(())
//! ```
//!
//! # Features
//!
//! - **Fixed layout** - every packet is `PACKET_SIZE` bytes, payload zero-padded
//! - **Ordered validation** - markers, then length, then checksum
//! - **Typed errors** - every rejection reason is its own [`Error`] variant
//! - **Exact dispatch** - no prefix or case-insensitive matching
//!
//! The library is synchronous and holds no shared state. It logs through
//! `tracing` and never installs a subscriber.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod protocol;

pub use protocol::{
    Action, Command, DispatchConfig, Dispatcher, END_MARKER, Error, MAX_PAYLOAD, PACKET_SIZE,
    Packet, Result, START_MARKER, dispatch, text_to_binary,
};

/// Crate version, taken from `Cargo.toml`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
