//! `config` subcommand: show current configuration and file path.

use std::path::Path;

use super::{Channel, Config, ConfigOutput, PiLedsError, Result, kv, kv_indent, kv_width, led};

/// Write the effective config (defaults merged with any existing file).
fn init_config(config: &Config, path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Err(PiLedsError::Config("no config directory available".into()));
    };
    config.save_to(path)?;
    log::info!("Config written to {}", path.display());
    Ok(())
}

pub(super) fn cmd_config(custom_path: Option<&Path>, init: bool, json: bool) -> Result<()> {
    let config = super::load_config(custom_path);
    let config_path = super::config_path(custom_path);
    if init {
        init_config(&config, config_path.as_deref())?;
    }
    let config_exists = config_path.as_ref().is_some_and(|p| p.exists());

    if json {
        let output = ConfigOutput {
            config_file: config_path.as_ref().map(|p| p.display().to_string()),
            config_file_exists: config_exists,
            settings: config,
        };
        return super::print_json(&output);
    }

    // Human-readable output
    let w = kv_width(
        &["Config file:"],
        &["bind:", "port:", "auto_mode:", "template_path:", "power:", "activity:"],
    );

    match &config_path {
        Some(p) if config_exists => kv("Config file:", format_args!("{} (loaded)", p.display()), w),
        Some(p) => kv(
            "Config file:",
            format_args!("{} (not found, using defaults)", p.display()),
            w,
        ),
        None => kv("Config file:", "(no config directory)", w),
    }
    println!();

    println!("Settings:");
    kv_indent("bind:", &config.bind, w);
    kv_indent("port:", config.port, w);
    kv_indent("auto_mode:", led::on_off(config.auto_mode), w);
    match config.template_override() {
        Some(p) => kv_indent("template_path:", p.display(), w),
        None => kv_indent("template_path:", "(embedded)", w),
    }
    println!();

    println!("LED candidates:");
    for c in Channel::ALL {
        let paths = config
            .led_paths
            .candidates(c)
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        kv_indent(&format!("{c}:"), paths, w);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_loadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pi-leds").join("config.toml");
        let config = Config {
            port: 8123,
            ..Config::default()
        };
        init_config(&config, Some(&path)).unwrap();
        let (loaded, warnings) = Config::load_from(&path);
        assert!(warnings.is_empty());
        assert_eq!(loaded, config);
    }

    #[test]
    fn init_without_directory_is_config_error() {
        let err = init_config(&Config::default(), None).unwrap_err();
        assert!(matches!(err, PiLedsError::Config(_)));
    }

    #[test]
    fn cmd_config_with_custom_path_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(cmd_config(Some(&path), false, false).is_ok());
        assert!(cmd_config(Some(&path), false, true).is_ok());
        assert!(!path.exists());
    }
}
