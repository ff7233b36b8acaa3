//! `status` subcommand: resolve hardware and report without writing.

use std::path::Path;

use super::{
    Channel, ChannelStatusJson, LedController, Result, StatusOutput, SysfsBackend, kv, kv_indent,
    kv_width, led,
};

/// Gather the controller's view into the JSON/human output shape.
pub(super) fn collect_status(ctl: &LedController) -> StatusOutput {
    let channel = |c: Channel| {
        let s = ctl.channel_state(c);
        ChannelStatusJson {
            detected_path: s.detected_path.map(|p| p.display().to_string()),
            is_on: s.is_on,
            has_hardware: s.has_hardware,
        }
    };
    let snap = ctl.snapshot();
    StatusOutput {
        version: env!("CARGO_PKG_VERSION").to_string(),
        power: channel(Channel::Power),
        activity: channel(Channel::Activity),
        auto_mode: snap.auto_mode,
        has_leds: snap.has_leds,
    }
}

/// Print or serialize a status report.
pub(super) fn print_status(status: &StatusOutput, json: bool) -> Result<()> {
    if json {
        return super::print_json(status);
    }

    let w = kv_width(
        &["Version:", "LEDs detected:", "Auto mode:"],
        &["Path:", "State:"],
    );
    kv("Version:", &status.version, w);
    kv(
        "LEDs detected:",
        if status.has_leds {
            "Yes"
        } else {
            "No (simulation mode)"
        },
        w,
    );
    kv("Auto mode:", led::on_off(status.auto_mode), w);

    for (c, ch) in [
        (Channel::Power, &status.power),
        (Channel::Activity, &status.activity),
    ] {
        println!();
        println!("{} LED:", c.label());
        kv_indent(
            "Path:",
            ch.detected_path.as_deref().unwrap_or("(not found)"),
            w,
        );
        let state = if ch.has_hardware {
            led::on_off(ch.is_on).to_string()
        } else {
            format!("{} (simulated)", led::on_off(ch.is_on))
        };
        kv_indent("State:", state, w);
    }
    Ok(())
}

pub(super) fn cmd_status(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = super::load_config(config_path);
    let ctl = LedController::resolve(&config.led_paths, config.auto_mode, SysfsBackend);
    print_status(&collect_status(&ctl), json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pi_leds_lib::led::LedPaths;
    use pi_leds_lib::led::mock::MockBackend;

    #[test]
    fn collect_status_reports_paths_and_levels() {
        let backend = MockBackend::new().with_file("/leds/pwr", "1");
        let paths = LedPaths {
            power: vec!["/leds/pwr".into()],
            activity: vec!["/leds/act".into()],
        };
        let ctl = LedController::resolve(&paths, true, backend);
        let status = collect_status(&ctl);

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(json["power"]["detected_path"], "/leds/pwr");
        assert_eq!(json["power"]["is_on"], true);
        assert!(json["activity"]["detected_path"].is_null());
        assert_eq!(json["activity"]["has_hardware"], false);
        assert_eq!(json["auto_mode"], true);
        assert_eq!(json["has_leds"], true);
    }

    #[test]
    fn print_status_human_and_json_succeed() {
        let ctl = LedController::resolve(&LedPaths::default(), false, MockBackend::new());
        let status = collect_status(&ctl);
        assert!(print_status(&status, false).is_ok());
        assert!(print_status(&status, true).is_ok());
    }
}
