//! LED state store: per-channel state plus the auto-mode flag.
//!
//! `LedState` is plain data. It is owned by exactly one
//! [`LedController`](crate::controller::LedController), which serializes every
//! access; the driver functions in [`crate::led`] are the only writers of
//! `is_on`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::led::Channel;

/// State of a single LED channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelState {
    /// The sysfs file selected by the resolver, if any candidate existed.
    pub detected_path: Option<PathBuf>,
    /// Last known level. Simulated when `has_hardware` is false.
    pub is_on: bool,
    pub has_hardware: bool,
}

impl ChannelState {
    /// No hardware found: in-memory only, starts off.
    pub fn simulated() -> Self {
        Self {
            detected_path: None,
            is_on: false,
            has_hardware: false,
        }
    }

    pub fn detected(path: PathBuf, is_on: bool) -> Self {
        Self {
            detected_path: Some(path),
            is_on,
            has_hardware: true,
        }
    }
}

/// Whole-service LED state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedState {
    /// LEDs off while the service runs, restored on exit.
    pub auto_mode: bool,
    /// Indexed by [`Channel::index`]; always exactly one entry per channel.
    channels: [ChannelState; 2],
}

impl LedState {
    /// Build from per-channel states given in [`Channel::ALL`] order.
    pub fn new(auto_mode: bool, channels: [ChannelState; 2]) -> Self {
        Self {
            auto_mode,
            channels,
        }
    }

    /// Every channel simulated.
    pub fn simulated(auto_mode: bool) -> Self {
        Self::new(
            auto_mode,
            [ChannelState::simulated(), ChannelState::simulated()],
        )
    }

    pub fn channel(&self, channel: Channel) -> &ChannelState {
        &self.channels[channel.index()]
    }

    pub(crate) fn channel_mut(&mut self, channel: Channel) -> &mut ChannelState {
        &mut self.channels[channel.index()]
    }

    pub fn is_on(&self, channel: Channel) -> bool {
        self.channel(channel).is_on
    }

    /// True iff at least one channel was detected.
    pub fn has_leds(&self) -> bool {
        self.channels.iter().any(|c| c.has_hardware)
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            power: self.is_on(Channel::Power),
            activity: self.is_on(Channel::Activity),
            auto_mode: self.auto_mode,
            has_leds: self.has_leds(),
        }
    }
}

/// Wire view of [`LedState`] served by `/api/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub power: bool,
    pub activity: bool,
    pub auto_mode: bool,
    pub has_leds: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_state_has_no_leds() {
        let state = LedState::simulated(true);
        assert!(!state.has_leds());
        for c in Channel::ALL {
            assert!(!state.is_on(c));
            assert_eq!(state.channel(c).detected_path, None);
        }
    }

    #[test]
    fn one_detected_channel_is_enough() {
        let state = LedState::new(
            true,
            [
                ChannelState::simulated(),
                ChannelState::detected("/sys/class/leds/ACT/brightness".into(), true),
            ],
        );
        assert!(state.has_leds());
        assert!(state.is_on(Channel::Activity));
        assert!(!state.channel(Channel::Power).has_hardware);
    }

    #[test]
    fn snapshot_serializes_to_wire_shape() {
        let mut state = LedState::simulated(false);
        state.channel_mut(Channel::Power).is_on = true;
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "power": true,
                "activity": false,
                "auto_mode": false,
                "has_leds": false,
            })
        );
    }
}
