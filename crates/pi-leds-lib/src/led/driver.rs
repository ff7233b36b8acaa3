//! LED driver: set or toggle one channel, or sweep all of them.
//!
//! Every function takes the state and backend explicitly; serialization is
//! the caller's job (see [`LedController`](crate::controller::LedController)).

use std::fmt;
use std::io;
use std::path::PathBuf;

use super::{Channel, LedBackend, on_off};
use crate::state::LedState;

/// LED driver errors.
#[derive(Debug)]
pub enum LedError {
    /// No candidate path existed. Informational: the driver simulates.
    NotDetected(Channel),
    /// The sysfs write was refused (add-on not privileged).
    PermissionDenied {
        channel: Channel,
        path: PathBuf,
        source: io::Error,
    },
    /// Any other write failure.
    Io {
        channel: Channel,
        path: PathBuf,
        source: io::Error,
    },
}

impl LedError {
    pub fn channel(&self) -> Channel {
        match self {
            LedError::NotDetected(channel)
            | LedError::PermissionDenied { channel, .. }
            | LedError::Io { channel, .. } => *channel,
        }
    }

    fn from_write(channel: Channel, path: PathBuf, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::PermissionDenied {
            LedError::PermissionDenied {
                channel,
                path,
                source,
            }
        } else {
            LedError::Io {
                channel,
                path,
                source,
            }
        }
    }
}

impl fmt::Display for LedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedError::NotDetected(c) => write!(f, "no {c} LED found"),
            LedError::PermissionDenied {
                channel,
                path,
                source,
            } => write!(
                f,
                "permission denied setting {channel} LED at {}: {source} (is the add-on privileged?)",
                path.display()
            ),
            LedError::Io {
                channel,
                path,
                source,
            } => write!(
                f,
                "error setting {channel} LED at {}: {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LedError::NotDetected(_) => None,
            LedError::PermissionDenied { source, .. } | LedError::Io { source, .. } => {
                Some(source)
            }
        }
    }
}

/// How a successful [`set`] was carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Written to the detected sysfs file.
    Written,
    /// No hardware for this channel; only the in-memory state changed.
    Simulated,
    /// The service is shutting down; nothing changed.
    Skipped,
}

/// Drive one channel to `on`.
///
/// With hardware, `is_on` only changes after the write succeeded. Without
/// hardware the call always succeeds and just records the new level.
pub fn set(
    state: &mut LedState,
    backend: &dyn LedBackend,
    channel: Channel,
    on: bool,
) -> Result<WriteOutcome, LedError> {
    let ch = state.channel_mut(channel);
    let Some(path) = ch.detected_path.clone() else {
        log::debug!(
            "No path found for {channel} LED, simulating {}",
            on_off(on)
        );
        ch.is_on = on;
        return Ok(WriteOutcome::Simulated);
    };
    match backend.write(&path, on) {
        Ok(()) => {
            ch.is_on = on;
            log::info!("{} LED set to: {}", channel.label(), on_off(on));
            Ok(WriteOutcome::Written)
        }
        Err(source) => {
            let err = LedError::from_write(channel, path, source);
            log::error!("{err}");
            Err(err)
        }
    }
}

/// Flip one channel.
pub fn toggle(
    state: &mut LedState,
    backend: &dyn LedBackend,
    channel: Channel,
) -> Result<WriteOutcome, LedError> {
    let on = !state.is_on(channel);
    set(state, backend, channel, on)
}

/// Drive every channel to `on`, power first. Channels are independent: a
/// failure is collected and the sweep continues.
pub fn set_all(
    state: &mut LedState,
    backend: &dyn LedBackend,
    on: bool,
) -> Result<(), Vec<LedError>> {
    let errors: Vec<LedError> = Channel::ALL
        .into_iter()
        .filter_map(|c| set(state, backend, c, on).err())
        .collect();
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub fn enable_all(state: &mut LedState, backend: &dyn LedBackend) -> Result<(), Vec<LedError>> {
    log::info!("Enabling all LEDs...");
    set_all(state, backend, true)
}

pub fn disable_all(state: &mut LedState, backend: &dyn LedBackend) -> Result<(), Vec<LedError>> {
    log::info!("Disabling all LEDs...");
    set_all(state, backend, false)
}
