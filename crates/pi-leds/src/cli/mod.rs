//! CLI subcommands: run the service, inspect and switch LEDs, show config.

mod config_cmd;
mod serve;
mod status;
mod switch;

use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

pub(super) use pi_leds_lib::config::Config;
pub(super) use pi_leds_lib::controller::LedController;
pub(super) use pi_leds_lib::error::{PiLedsError, Result};
pub(super) use pi_leds_lib::led::{self, Channel, SysfsBackend};

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Load config from `--config` or the default location, logging parse warnings.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    match custom_path {
        Some(path) => {
            let (config, warnings) = Config::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    }
}

/// Path the config would be read from.
pub(super) fn config_path(custom_path: Option<&Path>) -> Option<PathBuf> {
    custom_path.map(Path::to_path_buf).or_else(Config::path)
}

/// Serialize as pretty JSON onto stdout.
pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| PiLedsError::Config(format!("JSON serialization failed: {e}")))?;
    println!("{text}");
    Ok(())
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct ChannelStatusJson {
    pub detected_path: Option<String>,
    pub is_on: bool,
    pub has_hardware: bool,
}

#[derive(Serialize)]
pub(super) struct StatusOutput {
    pub version: String,
    pub power: ChannelStatusJson,
    pub activity: ChannelStatusJson,
    pub auto_mode: bool,
    pub has_leds: bool,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the LED control service (default)
    Serve(ServeArgs),

    /// Show detected LED paths and their current state
    Status,

    /// Turn every LED on
    Enable,

    /// Turn every LED off
    Disable,

    /// Show current configuration and file path
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

/// `serve` flags, kept on the subcommand so `pi-leds` alone still serves.
#[derive(clap::Args, Default)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind (overrides config)
    #[arg(long)]
    pub bind: Option<String>,

    /// Template file for the control page (overrides config)
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve(ServeArgs::default())
    }
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, config_path: Option<&Path>, json: bool) -> Result<()> {
    match cmd {
        Command::Serve(args) => {
            if json {
                warn_json_unsupported("serve");
            }
            serve::cmd_serve(config_path, args)
        }
        Command::Status => status::cmd_status(config_path, json),
        Command::Enable => switch::cmd_switch(config_path, true, json),
        Command::Disable => switch::cmd_switch(config_path, false, json),
        Command::Config { init } => config_cmd::cmd_config(config_path, init, json),
    }
}

#[cfg(test)]
mod format_tests {
    use super::*;

    #[test]
    fn kv_width_top_only() {
        let w = kv_width(&["Version:", "LEDs detected:"], &[]);
        // "LEDs detected:" = 14 + PADDING = 16
        assert_eq!(w, 16);
    }

    #[test]
    fn kv_width_indent_drives_width() {
        let w = kv_width(&["A:"], &["template_path:"]);
        // "template_path:" = 14 + PADDING + 2 = 18
        assert_eq!(w, 18);
    }

    #[test]
    fn values_align_across_levels() {
        let w = kv_width(&["Auto mode:"], &["State:"]);
        let top = format_kv("Auto mode:", "V", w);
        let indent = format!("  {:<width$}{}", "State:", "V", width = w - 2);
        assert_eq!(top.find('V'), indent.find('V'));
    }

    #[test]
    fn format_kv_overlong_key_gets_no_padding() {
        assert_eq!(format_kv("ExactWidth:", "val", 10), "ExactWidth:val");
    }
}
