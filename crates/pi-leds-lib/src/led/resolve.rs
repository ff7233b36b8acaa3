//! Hardware path resolution: pick the first existing sysfs file per channel.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{Channel, LedBackend, LedError, on_off};
use crate::state::{ChannelState, LedState};

/// Ordered candidate `brightness` files per channel.
///
/// The LED names differ between Pi models and kernels (`led0`/`led1` on
/// older images, `ACT`/`PWR` on newer ones), so each channel carries a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedPaths {
    #[serde(default = "default_power_paths")]
    pub power: Vec<PathBuf>,
    #[serde(default = "default_activity_paths")]
    pub activity: Vec<PathBuf>,
}

fn default_power_paths() -> Vec<PathBuf> {
    vec![
        "/sys/class/leds/led1/brightness".into(),
        "/sys/class/leds/PWR/brightness".into(),
        "/sys/class/leds/pwr/brightness".into(),
    ]
}

fn default_activity_paths() -> Vec<PathBuf> {
    vec![
        "/sys/class/leds/led0/brightness".into(),
        "/sys/class/leds/ACT/brightness".into(),
        "/sys/class/leds/act/brightness".into(),
    ]
}

impl Default for LedPaths {
    fn default() -> Self {
        Self {
            power: default_power_paths(),
            activity: default_activity_paths(),
        }
    }
}

impl LedPaths {
    pub fn candidates(&self, channel: Channel) -> &[PathBuf] {
        match channel {
            Channel::Power => &self.power,
            Channel::Activity => &self.activity,
        }
    }
}

/// Probe every channel once and build the initial state.
///
/// Never fails: a channel without an existing candidate is simulated, and a
/// detected file that can't be read counts as detected but off.
pub fn resolve(paths: &LedPaths, backend: &dyn LedBackend, auto_mode: bool) -> LedState {
    let channels = Channel::ALL.map(|c| resolve_channel(c, paths.candidates(c), backend));
    let state = LedState::new(auto_mode, channels);
    if !state.has_leds() {
        log::warn!("No LED paths found. This might not be a Raspberry Pi or we lack permissions.");
        log::info!("Continuing in simulation mode.");
    }
    state
}

fn resolve_channel(
    channel: Channel,
    candidates: &[PathBuf],
    backend: &dyn LedBackend,
) -> ChannelState {
    let Some(path) = candidates.iter().find(|p| backend.exists(p)) else {
        log::info!("{}", LedError::NotDetected(channel));
        return ChannelState::simulated();
    };
    let is_on = match backend.read(path) {
        Ok(on) => {
            log::info!(
                "Found {channel} LED at {}, current state: {}",
                path.display(),
                on_off(on)
            );
            on
        }
        Err(e) => {
            log::warn!(
                "Found {channel} LED at {} but couldn't read state: {e}",
                path.display()
            );
            false
        }
    };
    ChannelState::detected(path.clone(), is_on)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::led::SysfsBackend;
    use crate::led::mock::MockBackend;
    use std::path::Path;

    fn paths(power: &[&str], activity: &[&str]) -> LedPaths {
        LedPaths {
            power: power.iter().map(PathBuf::from).collect(),
            activity: activity.iter().map(PathBuf::from).collect(),
        }
    }

    #[test]
    fn defaults_cover_both_naming_schemes() {
        let p = LedPaths::default();
        assert_eq!(p.power[0], Path::new("/sys/class/leds/led1/brightness"));
        assert_eq!(p.activity[0], Path::new("/sys/class/leds/led0/brightness"));
        assert_eq!(p.power.len(), 3);
        assert_eq!(p.activity.len(), 3);
    }

    #[test]
    fn first_existing_candidate_wins() {
        let backend = MockBackend::new()
            .with_file("/leds/PWR", "1")
            .with_file("/leds/pwr", "0")
            .with_file("/leds/ACT", "0");
        let state = resolve(
            &paths(&["/leds/led1", "/leds/PWR", "/leds/pwr"], &["/leds/led0", "/leds/ACT"]),
            &backend,
            true,
        );

        let power = state.channel(Channel::Power);
        assert_eq!(power.detected_path.as_deref(), Some(Path::new("/leds/PWR")));
        assert!(power.is_on);
        assert!(power.has_hardware);

        let activity = state.channel(Channel::Activity);
        assert_eq!(activity.detected_path.as_deref(), Some(Path::new("/leds/ACT")));
        assert!(!activity.is_on);
        assert!(state.has_leds());
        assert!(state.auto_mode);
    }

    #[test]
    fn no_candidates_means_simulation() {
        let backend = MockBackend::new();
        let state = resolve(&LedPaths::default(), &backend, true);
        assert!(!state.has_leds());
        for c in Channel::ALL {
            let ch = state.channel(c);
            assert_eq!(ch.detected_path, None);
            assert!(!ch.has_hardware);
            assert!(!ch.is_on);
        }
    }

    #[test]
    fn unreadable_path_is_detected_but_off() {
        let backend = MockBackend::new().with_file("/leds/led1", "1");
        backend.deny_read("/leds/led1");
        let state = resolve(&paths(&["/leds/led1"], &[]), &backend, false);

        let power = state.channel(Channel::Power);
        assert!(power.has_hardware);
        assert!(!power.is_on);
        assert!(state.has_leds());
        assert!(!state.channel(Channel::Activity).has_hardware);
    }

    #[test]
    fn garbage_contents_are_detected_but_off() {
        let backend = MockBackend::new().with_file("/leds/led0", "bogus");
        let state = resolve(&paths(&[], &["/leds/led0"]), &backend, true);
        let activity = state.channel(Channel::Activity);
        assert!(activity.has_hardware);
        assert!(!activity.is_on);
    }

    #[test]
    fn resolves_against_a_real_directory() {
        let dir = tempfile::tempdir().unwrap();
        let act = dir.path().join("ACT");
        std::fs::write(&act, "255\n").unwrap();
        let led_paths = LedPaths {
            power: vec![dir.path().join("PWR")],
            activity: vec![dir.path().join("led0"), act.clone()],
        };

        let state = resolve(&led_paths, &SysfsBackend, true);
        assert!(!state.channel(Channel::Power).has_hardware);
        assert_eq!(state.channel(Channel::Activity).detected_path, Some(act));
        assert!(state.is_on(Channel::Activity));
    }
}
