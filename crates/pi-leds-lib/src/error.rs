//! Unified error type for the pi-leds-lib crate.
//!
//! [`PiLedsError`] wraps the driver's [`LedError`] and the failure kinds that
//! only matter at process level (`Config`, `Server`, `Signal`). `From` impls
//! let `?` propagate across module boundaries.

use std::fmt;

use crate::led::LedError;

/// Unified error type for pi-leds-lib operations.
#[derive(Debug)]
pub enum PiLedsError {
    /// LED write failed (permission or I/O).
    Led(LedError),
    /// Standard I/O error (config persistence, thread spawn).
    Io(std::io::Error),
    /// Configuration missing or invalid.
    Config(String),
    /// The HTTP control surface stopped or could not start.
    Server(String),
    /// Termination signal handler could not be installed.
    Signal(String),
}

impl fmt::Display for PiLedsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PiLedsError::Led(e) => write!(f, "{e}"),
            PiLedsError::Io(e) => write!(f, "I/O error: {e}"),
            PiLedsError::Config(e) => write!(f, "Config error: {e}"),
            PiLedsError::Server(e) => write!(f, "Server error: {e}"),
            PiLedsError::Signal(e) => write!(f, "Signal handler error: {e}"),
        }
    }
}

impl std::error::Error for PiLedsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PiLedsError::Led(e) => Some(e),
            PiLedsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LedError> for PiLedsError {
    fn from(e: LedError) -> Self {
        PiLedsError::Led(e)
    }
}

impl From<std::io::Error> for PiLedsError {
    fn from(e: std::io::Error) -> Self {
        PiLedsError::Io(e)
    }
}

/// Crate-level Result alias using [`PiLedsError`].
pub type Result<T> = std::result::Result<T, PiLedsError>;
