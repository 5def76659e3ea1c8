//! Owned command payload

use std::fmt;

use bytes::Bytes;

use super::{Error, MAX_PAYLOAD, Result};

/// Command bytes recovered from a frame or packet.
///
/// The bytes are copied out of the source buffer on construction, so a
/// `Command` never borrows from the buffer it was extracted from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Bytes", into = "Bytes")
)]
pub struct Command {
    bytes: Bytes,
}

impl Command {
    /// Copy `bytes` into a new command.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > MAX_PAYLOAD {
            return Err(Error::PayloadTooLarge {
                size: bytes.len(),
                max: MAX_PAYLOAD,
            });
        }

        Ok(Self {
            bytes: Bytes::copy_from_slice(bytes),
        })
    }

    /// Wrap a static name known to fit.
    pub(crate) const fn from_static(bytes: &'static [u8]) -> Self {
        Self {
            bytes: Bytes::from_static(bytes),
        }
    }

    /// Get command bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get command length
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check whether the command is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Command as UTF-8, if it is valid UTF-8
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

impl AsRef<[u8]> for Command {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<Bytes> for Command {
    type Error = Error;

    fn try_from(bytes: Bytes) -> Result<Self> {
        if bytes.len() > MAX_PAYLOAD {
            return Err(Error::PayloadTooLarge {
                size: bytes.len(),
                max: MAX_PAYLOAD,
            });
        }
        Ok(Self { bytes })
    }
}

impl From<Command> for Bytes {
    fn from(command: Command) -> Self {
        command.bytes
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.bytes))
    }
}
