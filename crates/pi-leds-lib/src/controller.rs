//! LED controller, the single owner of [`LedState`].
//!
//! Wraps the state and the sysfs backend behind one mutex so HTTP handlers
//! and the shutdown hook can share it through an `Arc`. Each method holds the
//! lock for its whole duration, so a sweep over all channels is never
//! interleaved with another request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::led::{self, Channel, LedBackend, LedError, LedPaths, WriteOutcome};
use crate::state::{ChannelState, LedState, StatusSnapshot};

pub struct LedController {
    state: Mutex<LedState>,
    backend: Box<dyn LedBackend>,
    // Set under the state lock by `restore_on_exit`; read under it by every mutation.
    closed: AtomicBool,
}

impl LedController {
    pub fn new(state: LedState, backend: impl LedBackend + 'static) -> Self {
        Self {
            state: Mutex::new(state),
            backend: Box::new(backend),
            closed: AtomicBool::new(false),
        }
    }

    /// Probe the hardware and take ownership of the resulting state.
    pub fn resolve(paths: &LedPaths, auto_mode: bool, backend: impl LedBackend + 'static) -> Self {
        let state = led::resolve(paths, &backend, auto_mode);
        Self::new(state, backend)
    }

    // State is plain data, so a panic elsewhere can't leave it half-written.
    fn lock(&self) -> MutexGuard<'_, LedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock for a mutation, or `None` once the exit restore has run.
    fn lock_open(&self, op: &str) -> Option<MutexGuard<'_, LedState>> {
        let state = self.lock();
        if self.closed.load(Ordering::SeqCst) {
            log::debug!("Ignoring {op}: shutting down");
            return None;
        }
        Some(state)
    }

    /// Whether [`restore_on_exit`](Self::restore_on_exit) has run.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        self.lock().snapshot()
    }

    pub fn channel_state(&self, channel: Channel) -> ChannelState {
        self.lock().channel(channel).clone()
    }

    pub fn auto_mode(&self) -> bool {
        self.lock().auto_mode
    }

    pub fn has_leds(&self) -> bool {
        self.lock().has_leds()
    }

    pub fn set(&self, channel: Channel, on: bool) -> Result<WriteOutcome, LedError> {
        let Some(mut state) = self.lock_open("set") else {
            return Ok(WriteOutcome::Skipped);
        };
        led::set(&mut state, self.backend.as_ref(), channel, on)
    }

    pub fn toggle(&self, channel: Channel) -> Result<WriteOutcome, LedError> {
        let Some(mut state) = self.lock_open("toggle") else {
            return Ok(WriteOutcome::Skipped);
        };
        led::toggle(&mut state, self.backend.as_ref(), channel)
    }

    pub fn enable_all(&self) -> Result<(), Vec<LedError>> {
        match self.lock_open("enable_all") {
            Some(mut state) => led::enable_all(&mut state, self.backend.as_ref()),
            None => Ok(()),
        }
    }

    pub fn disable_all(&self) -> Result<(), Vec<LedError>> {
        match self.lock_open("disable_all") {
            Some(mut state) => led::disable_all(&mut state, self.backend.as_ref()),
            None => Ok(()),
        }
    }

    /// Flip the auto-mode flag and return the new value.
    pub fn toggle_auto_mode(&self) -> bool {
        let Some(mut state) = self.lock_open("auto mode toggle") else {
            return self.auto_mode();
        };
        state.auto_mode = !state.auto_mode;
        log::info!("Auto mode toggled: {}", led::on_off(state.auto_mode));
        state.auto_mode
    }

    /// Turn everything off if auto mode is on. Returns `None` when auto mode
    /// is off and nothing was touched.
    pub fn dim_for_service(&self) -> Option<Result<(), Vec<LedError>>> {
        let mut state = self.lock_open("startup dim")?;
        if !state.auto_mode {
            return None;
        }
        Some(led::disable_all(&mut state, self.backend.as_ref()))
    }

    /// Turn everything back on if auto mode is on and real LEDs exist.
    /// Returns `None` when the LEDs were left as they are.
    ///
    /// Closes the controller either way: later mutations are no-ops, so a
    /// request racing process exit can't undo the restore.
    pub fn restore_on_exit(&self) -> Option<Result<(), Vec<LedError>>> {
        let mut state = self.lock_open("exit restore")?;
        self.closed.store(true, Ordering::SeqCst);
        if !(state.auto_mode && state.has_leds()) {
            return None;
        }
        Some(led::enable_all(&mut state, self.backend.as_ref()))
    }
}
