//! Bracketed text frames
//!
//! ```text
//! '<' COMMAND (1..=32 bytes) '>'
//! ```
//!
//! Only the brackets are checked here. Which command names mean something is
//! up to the dispatcher.

use tracing::debug;

use super::{Command, Error, FRAME_CLOSE, FRAME_OPEN, MAX_PAYLOAD, MIN_FRAME_LEN, Result};

/// Check that `buffer` starts with `<` and ends with `>`.
///
/// Buffers shorter than two bytes are never valid. Interior bytes are not
/// inspected, so `<>` passes.
#[must_use]
pub fn is_valid_text_frame(buffer: &[u8]) -> bool {
    match buffer {
        [first, .., last] => *first == FRAME_OPEN && *last == FRAME_CLOSE,
        _ => false,
    }
}

/// Copy the bytes strictly between the brackets into a [`Command`].
///
/// # Errors
///
/// - [`Error::FrameTooShort`] if there is no room for a content byte
/// - [`Error::NotBracketed`] if the frame is not enclosed in brackets
/// - [`Error::PayloadTooLarge`] if the content exceeds `MAX_PAYLOAD`
pub fn extract_command(buffer: &[u8]) -> Result<Command> {
    if buffer.len() < MIN_FRAME_LEN {
        debug!(len = buffer.len(), "rejecting short text frame");
        return Err(Error::FrameTooShort {
            len: buffer.len(),
            min: MIN_FRAME_LEN,
        });
    }

    if !is_valid_text_frame(buffer) {
        debug!(len = buffer.len(), "rejecting unbracketed text frame");
        return Err(Error::NotBracketed);
    }

    let content = &buffer[1..buffer.len() - 1];
    if content.len() > MAX_PAYLOAD {
        debug!(size = content.len(), "rejecting oversized text frame");
        return Err(Error::PayloadTooLarge {
            size: content.len(),
            max: MAX_PAYLOAD,
        });
    }

    Command::new(content)
}
