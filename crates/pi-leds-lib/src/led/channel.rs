use std::fmt;
use std::str::FromStr;

/// One of the board's status LEDs.
///
/// The order of [`Channel::ALL`] is the order every "all LEDs" operation
/// walks: power before activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Power,
    Activity,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Power, Channel::Activity];

    /// Lowercase name used in URLs, JSON, and config keys.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Power => "power",
            Channel::Activity => "activity",
        }
    }

    /// Capitalized name for log lines.
    pub fn label(self) -> &'static str {
        match self {
            Channel::Power => "Power",
            Channel::Activity => "Activity",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown LED channel: {s}"))
    }
}
