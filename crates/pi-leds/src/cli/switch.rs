//! `enable` / `disable` subcommands: one-shot sweep over every LED.

use std::path::Path;

use super::{LedController, Result, SysfsBackend};

pub(super) fn cmd_switch(config_path: Option<&Path>, on: bool, json: bool) -> Result<()> {
    let config = super::load_config(config_path);
    let ctl = LedController::resolve(&config.led_paths, config.auto_mode, SysfsBackend);
    let result = if on {
        ctl.enable_all()
    } else {
        ctl.disable_all()
    };

    super::status::print_status(&super::status::collect_status(&ctl), json)?;

    // Each failure was already logged; surface the first as the exit status.
    match result {
        Ok(()) => Ok(()),
        Err(errors) => match errors.into_iter().next() {
            Some(first) => Err(first.into()),
            None => Ok(()),
        },
    }
}
