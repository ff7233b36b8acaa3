//! Add-on options (`/data/options.json`).

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{RenewError, Result};

/// Where the Home Assistant supervisor writes the add-on options.
pub const DEFAULT_OPTIONS_PATH: &str = "/data/options.json";

const DEFAULT_INTERVAL_HOURS: u64 = 48;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Options {
    /// Renewal URL, including the session token.
    #[serde(default)]
    pub url: String,

    /// Hours between renewals. Default: 48.
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,
}

fn default_interval_hours() -> u64 {
    DEFAULT_INTERVAL_HOURS
}

impl Options {
    /// Reject options the renewer can't run with.
    pub fn validate(&self) -> Result<()> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(RenewError::Config(
                "URL is required but not provided in configuration".into(),
            ));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(RenewError::Config(
                "URL must start with http:// or https://".into(),
            ));
        }
        if self.interval_hours == 0 {
            return Err(RenewError::Config(
                "interval_hours must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours.saturating_mul(3600))
    }
}

/// Read and validate the options file. Every failure is a `Config` error.
pub fn load_options(path: &Path) -> Result<Options> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        RenewError::Config(format!(
            "cannot read configuration file {}: {e}",
            path.display()
        ))
    })?;
    let options: Options = serde_json::from_str(&contents)
        .map_err(|e| RenewError::Config(format!("failed to parse configuration: {e}")))?;
    options.validate()?;
    log::info!("Configuration loaded successfully");
    log::info!("URL: {}", options.url);
    log::info!("Interval: {} hours", options.interval_hours);
    Ok(options)
}
