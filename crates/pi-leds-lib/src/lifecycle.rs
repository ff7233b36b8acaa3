//! Startup and shutdown hooks.
//!
//! With auto mode on, the LEDs go dark while the service runs and come back
//! when it stops. Whatever ends the service (a signal or the HTTP server
//! dying) is funnelled through one channel so the restore runs exactly once.

use std::sync::mpsc::Receiver;

use crate::controller::LedController;

/// Why the service is going down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGINT / SIGTERM.
    Signal,
    /// The HTTP server exited on its own, with the reason.
    ServerStopped(String),
}

/// Run at startup, after hardware resolution and before the server accepts requests.
pub fn startup(controller: &LedController) {
    match controller.dim_for_service() {
        None => log::info!("Auto mode is off, leaving LEDs as they are"),
        Some(Ok(())) => log::info!("Auto mode on: LEDs disabled while the service runs"),
        Some(Err(errors)) => {
            log::warn!("Auto mode on, but {} LED(s) could not be disabled", errors.len());
        }
    }
}

/// Run once on the way out. Returns `true` if the LEDs were switched back on.
///
/// Write failures are logged and otherwise ignored; the process exits anyway.
pub fn shutdown(controller: &LedController) -> bool {
    match controller.restore_on_exit() {
        None => {
            log::info!("Shutting down, leaving LEDs as they are");
            false
        }
        Some(Ok(())) => {
            log::info!("Shutting down, LEDs restored");
            true
        }
        Some(Err(errors)) => {
            log::warn!("Shutting down, {} LED(s) could not be restored", errors.len());
            true
        }
    }
}

/// Block until something requests shutdown, then run [`shutdown`].
///
/// A closed channel (every sender dropped) is treated like a signal.
pub fn wait_for_shutdown(rx: &Receiver<ShutdownReason>, controller: &LedController) -> ShutdownReason {
    let reason = rx.recv().unwrap_or(ShutdownReason::Signal);
    match &reason {
        ShutdownReason::Signal => log::info!("Shutdown requested"),
        ShutdownReason::ServerStopped(why) => log::error!("HTTP server stopped: {why}"),
    }
    shutdown(controller);
    reason
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::led::{Channel, LedPaths, mock::MockBackend};
    use std::sync::Arc;
    use std::sync::mpsc;

    const PWR: &str = "/sys/class/leds/led1/brightness";
    const ACT: &str = "/sys/class/leds/led0/brightness";

    fn hardware(auto_mode: bool) -> (Arc<MockBackend>, LedController) {
        let backend = Arc::new(MockBackend::new().with_file(PWR, "1").with_file(ACT, "1"));
        let ctl = LedController::resolve(&LedPaths::default(), auto_mode, Arc::clone(&backend));
        (backend, ctl)
    }

    #[test]
    fn startup_with_auto_mode_turns_leds_off() {
        let (backend, ctl) = hardware(true);
        startup(&ctl);
        assert_eq!(backend.contents(PWR.as_ref()).as_deref(), Some("0"));
        assert_eq!(backend.contents(ACT.as_ref()).as_deref(), Some("0"));
    }

    #[test]
    fn startup_without_auto_mode_touches_nothing() {
        let (backend, ctl) = hardware(false);
        startup(&ctl);
        assert!(backend.writes().is_empty());
        assert!(ctl.snapshot().power);
    }

    #[test]
    fn startup_in_simulation_marks_state_off() {
        let ctl = LedController::resolve(&LedPaths::default(), true, MockBackend::new());
        ctl.set(Channel::Power, true).unwrap();
        startup(&ctl);
        assert!(!ctl.snapshot().power);
    }

    #[test]
    fn shutdown_restores_when_auto_mode_and_hardware() {
        let (backend, ctl) = hardware(true);
        startup(&ctl);
        assert!(shutdown(&ctl));
        assert_eq!(backend.contents(PWR.as_ref()).as_deref(), Some("1"));
        assert_eq!(backend.contents(ACT.as_ref()).as_deref(), Some("1"));
    }

    #[test]
    fn shutdown_after_auto_mode_toggled_off_leaves_leds() {
        let (backend, ctl) = hardware(true);
        startup(&ctl);
        ctl.toggle_auto_mode();
        backend.clear_writes();
        assert!(!shutdown(&ctl));
        assert!(backend.writes().is_empty());
    }

    #[test]
    fn shutdown_in_simulation_is_a_noop() {
        let ctl = LedController::resolve(&LedPaths::default(), true, MockBackend::new());
        assert!(!shutdown(&ctl));
    }

    #[test]
    fn shutdown_with_failed_write_still_reports_attempt() {
        let (backend, ctl) = hardware(true);
        startup(&ctl);
        backend.deny_write(PWR);
        assert!(shutdown(&ctl));
        let snap = ctl.snapshot();
        assert!(!snap.power);
        assert!(snap.activity);
    }

    #[test]
    fn wait_for_shutdown_returns_reason_and_restores() {
        let (backend, ctl) = hardware(true);
        startup(&ctl);
        let (tx, rx) = mpsc::channel();
        tx.send(ShutdownReason::ServerStopped("bind failed".into())).unwrap();
        let reason = wait_for_shutdown(&rx, &ctl);
        assert_eq!(reason, ShutdownReason::ServerStopped("bind failed".into()));
        assert_eq!(backend.contents(PWR.as_ref()).as_deref(), Some("1"));
    }

    #[test]
    fn wait_for_shutdown_treats_closed_channel_as_signal() {
        let (_, ctl) = hardware(false);
        let (tx, rx) = mpsc::channel::<ShutdownReason>();
        drop(tx);
        assert_eq!(wait_for_shutdown(&rx, &ctl), ShutdownReason::Signal);
    }
}
