//! Command dispatch and the receive pipeline

use std::fmt;

use tracing::{debug, instrument, trace};

use super::bounded::bounded_copy;
use super::codec::decode;
use super::frame::extract_command;
use super::{Command, Error, FRAME_CLOSE, FRAME_OPEN, MAX_PAYLOAD, Result};

/// Action requested by a command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Turn the LED on
    LedOn,
    /// Turn the LED off
    LedOff,
    /// Well-framed command with no binding
    UnknownCommand(Command),
}

impl Action {
    /// Whether the command matched a binding
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::UnknownCommand(_))
    }

    /// Message for the outer layer to show the user
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::LedOn => "LED turned ON",
            Self::LedOff => "LED turned OFF",
            Self::UnknownCommand(_) => "Unknown command",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Command name bound to an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandBinding {
    name: Command,
    action: Action,
}

impl CommandBinding {
    /// Get bound name
    #[must_use]
    pub fn name(&self) -> &[u8] {
        self.name.as_bytes()
    }

    /// Get bound action
    #[must_use]
    pub const fn action(&self) -> &Action {
        &self.action
    }
}

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    bindings: Vec<CommandBinding>,
}

impl DispatchConfig {
    /// Configuration with no bindings
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Bind `name` to `action`, replacing any existing binding for `name`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArguments`] if `name` is empty, longer than
    /// `MAX_PAYLOAD`, contains a bracket, or `action` is
    /// [`Action::UnknownCommand`].
    pub fn bind(mut self, name: &[u8], action: Action) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidArguments("command name is empty"));
        }
        if name.len() > MAX_PAYLOAD {
            return Err(Error::InvalidArguments("command name exceeds payload capacity"));
        }
        if name.iter().any(|&b| b == FRAME_OPEN || b == FRAME_CLOSE) {
            return Err(Error::InvalidArguments("command name contains a bracket"));
        }
        if !action.is_known() {
            return Err(Error::InvalidArguments("cannot bind to an unknown command"));
        }

        let name = Command::new(name)?;
        self.bindings.retain(|binding| binding.name != name);
        self.bindings.push(CommandBinding { name, action });
        Ok(self)
    }

    /// Configured bindings
    #[must_use]
    pub fn bindings(&self) -> &[CommandBinding] {
        &self.bindings
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            bindings: vec![
                CommandBinding {
                    name: Command::from_static(b"LED_ON"),
                    action: Action::LedOn,
                },
                CommandBinding {
                    name: Command::from_static(b"LED_OFF"),
                    action: Action::LedOff,
                },
            ],
        }
    }
}

/// Maps recovered commands to actions
///
/// Matching is exact: same bytes, same length, same case.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: DispatchConfig,
}

impl Dispatcher {
    /// Create a dispatcher from a configuration
    #[must_use]
    pub const fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Map `command` to its action.
    #[must_use]
    pub fn dispatch(&self, command: &[u8]) -> Action {
        let found = self
            .config
            .bindings
            .iter()
            .find(|binding| binding.name.as_bytes() == command);

        if let Some(binding) = found {
            trace!(action = %binding.action, "command matched");
            return binding.action.clone();
        }

        debug!(len = command.len(), "unknown command");
        // Only direct calls can exceed the capacity; frames and packets are
        // already bounded.
        let kept = &command[..command.len().min(MAX_PAYLOAD)];
        Action::UnknownCommand(Command::new(kept).unwrap_or_default())
    }

    /// Run a raw text frame through the validator and dispatch it.
    ///
    /// # Errors
    ///
    /// [`Error::FrameTooShort`], [`Error::NotBracketed`] or
    /// [`Error::PayloadTooLarge`] when the frame is malformed.
    #[instrument(level = "trace", skip_all, fields(len = buffer.len()))]
    pub fn handle_text(&self, buffer: &[u8]) -> Result<Action> {
        let command = extract_command(buffer)?;
        Ok(self.dispatch(command.as_bytes()))
    }

    /// Decode a wire packet, verify it, and dispatch its payload.
    ///
    /// The payload goes through [`bounded_copy`], so a NUL inside the
    /// payload ends the command.
    ///
    /// # Errors
    ///
    /// Any error from [`decode`]: [`Error::BufferTooSmall`],
    /// [`Error::InvalidMarkers`], [`Error::InvalidLength`],
    /// [`Error::ChecksumMismatch`] or [`Error::ReservedByteSet`].
    #[instrument(level = "trace", skip_all, fields(len = wire.len()))]
    pub fn handle_packet(&self, wire: &[u8]) -> Result<Action> {
        let packet = decode(wire)?;

        let mut scratch = [0u8; MAX_PAYLOAD + 1];
        let copied = bounded_copy(&mut scratch, packet.payload())?;

        Ok(self.dispatch(&scratch[..copied]))
    }
}

/// Map `command` to an action using the built-in bindings.
#[must_use]
pub fn dispatch(command: &[u8]) -> Action {
    Dispatcher::default().dispatch(command)
}
