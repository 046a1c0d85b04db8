//! Error and fault types for the gesture button core.
//!
//! Two families live here:
//!
//! - [`Fault`]: anomalies the state machine detects on its own (a press
//!   that never ends, a state the button's capabilities do not allow).
//!   These never surface as `Err`: the button logs them and falls back to
//!   `Idle`, or panics when `Capabilities::fatal_faults` is set.
//! - [`Error`]: what the public API returns: pin read failures and
//!   rejected configuration.

use core::fmt;

use embedded_hal::digital::ErrorKind;

use crate::button::ButtonState;

// ---------------------------------------------------------------------------
// State machine faults
// ---------------------------------------------------------------------------

/// Anomaly detected while advancing a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The button stayed pressed past the normal timeout.
    NormalTimeout,
    /// The previous button of a combination stayed pressed past the
    /// combination timeout.
    CombinationTimeout,
    /// The button was found in (or asked to enter) a state its
    /// capabilities do not enable.
    InvalidState(ButtonState),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NormalTimeout => write!(f, "normal long push time out"),
            Self::CombinationTimeout => write!(f, "combination long push time out"),
            Self::InvalidState(state) => write!(f, "invalid button state {}", state.name()),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A timing value failed range validation.
    /// The `&'static str` describes which field and why.
    Invalid(&'static str),
    /// One of the buttons in a combination does not have the combination
    /// capability enabled.
    CombinationDisabled,
    /// A button cannot be its own combination predecessor.
    SelfLink,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(msg) => write!(f, "invalid timing: {msg}"),
            Self::CombinationDisabled => write!(f, "combination capability disabled"),
            Self::SelfLink => write!(f, "button linked to itself"),
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Reading the button's input pin failed.
    Pin(ErrorKind),
    /// Configuration was rejected.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin(kind) => write!(f, "pin: {kind:?}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self::Pin(kind)
    }
}

impl core::error::Error for Error {}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
