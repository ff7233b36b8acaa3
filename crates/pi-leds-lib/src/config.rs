//! Service configuration: TOML on disk, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::led::{Channel, LedPaths};
use crate::template::DEFAULT_TEMPLATE_PATH;

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# pi-leds configuration. Command-line flags override these values.\n\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Address the control panel listens on. Default: "0.0.0.0".
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Control panel port. Default: 8099 (the add-on's ingress port).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Turn LEDs off while the service runs and back on when it stops.
    #[serde(default = "default_true")]
    pub auto_mode: bool,

    /// Override template for the control page. Empty = embedded page only.
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,

    /// Candidate sysfs brightness files per LED, tried in order.
    #[serde(default)]
    pub led_paths: LedPaths,
}

fn default_bind() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8099
}
fn default_template_path() -> PathBuf {
    DEFAULT_TEMPLATE_PATH.into()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: default_bind(),
            port: default_port(),
            auto_mode: true,
            template_path: default_template_path(),
            led_paths: LedPaths::default(),
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Port 0 would bind a random port the ingress proxy can't find.
    InvalidPort,
    /// The `bind` field is empty or whitespace-only.
    EmptyBind,
    /// A channel has no candidate paths at all.
    NoCandidates(Channel),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidPort => write!(f, "port must be between 1 and 65535"),
            ValidationError::EmptyBind => write!(f, "bind address cannot be empty"),
            ValidationError::NoCandidates(c) => {
                write!(f, "led_paths.{c} must list at least one path")
            }
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pi-leds"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// `bind:port`, ready for a listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind.trim(), self.port)
    }

    /// Template override, or `None` when the embedded page should be used.
    pub fn template_override(&self) -> Option<PathBuf> {
        if self.template_path.as_os_str().is_empty() {
            None
        } else {
            Some(self.template_path.clone())
        }
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push(ValidationError::InvalidPort);
        }
        if self.bind.trim().is_empty() {
            errors.push(ValidationError::EmptyBind);
        }
        for c in Channel::ALL {
            if self.led_paths.candidates(c).is_empty() {
                errors.push(ValidationError::NoCandidates(c));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
