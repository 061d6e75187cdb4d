//! Unified error types for the thermostat firmware.
//!
//! A single `Error` enum that every layer converts into, keeping the
//! control loop's error handling uniform.  All variants are `Copy` so they
//! can be passed through the dispatcher and resource layer without
//! allocation.
//!
//! Only [`Error::Conflict`] is ever visible to a network client; the rest
//! describe local misconfiguration or transport trouble.

use core::fmt;

use crate::app::ports::Subsystem;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Activation refused because the rival thermal subsystem is running.
    Conflict {
        requested: Subsystem,
        active: Subsystem,
    },
    /// The addressed component was disabled in the configuration.
    Disabled(&'static str),
    /// The cooperative event queue had no room left.
    QueueFull,
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
    /// The network transport failed.
    Transport(TransportError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict { requested, active } => {
                write!(f, "conflict: cannot start {requested} while {active} is active")
            }
            Self::Disabled(what) => write!(f, "disabled: {what}"),
            Self::QueueFull => write!(f, "event queue full"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Socket could not be bound.
    BindFailed,
    /// Datagram could not be sent.
    SendFailed,
    /// Datagram was not a recognised request line.
    Malformed,
    /// Bounded channel to or from the control loop is full.
    ChannelFull,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BindFailed => write!(f, "bind failed"),
            Self::SendFailed => write!(f, "send failed"),
            Self::Malformed => write!(f, "malformed request"),
            Self::ChannelFull => write!(f, "channel full"),
        }
    }
}

impl core::error::Error for TransportError {}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
