//! `serve` subcommand: the long-running add-on service.

use std::path::Path;
use std::sync::{Arc, mpsc};

use pi_leds_lib::lifecycle::{self, ShutdownReason};
use pi_leds_lib::server::{self, AppState};
use pi_leds_lib::template::TemplateSource;

use super::{Config, LedController, PiLedsError, Result, ServeArgs, SysfsBackend};

/// Apply command-line overrides on top of the loaded config.
fn apply_overrides(config: &mut Config, args: ServeArgs) {
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(template) = args.template {
        config.template_path = template;
    }
}

pub(super) fn cmd_serve(config_path: Option<&Path>, args: ServeArgs) -> Result<()> {
    let mut config = super::load_config(config_path);
    apply_overrides(&mut config, args);
    if let Err(errors) = config.validate() {
        let msg = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(PiLedsError::Config(msg));
    }

    log::info!("Starting Raspberry Pi LED Control");
    let controller = Arc::new(LedController::resolve(
        &config.led_paths,
        config.auto_mode,
        SysfsBackend,
    ));

    let (tx, rx) = mpsc::channel();
    let signal_tx = tx.clone();
    ctrlc::set_handler(move || {
        let _ = signal_tx.send(ShutdownReason::Signal);
    })
    .map_err(|e| PiLedsError::Signal(e.to_string()))?;

    // LEDs go dark before the first request can observe them.
    lifecycle::startup(&controller);

    let app = Arc::new(AppState {
        controller: Arc::clone(&controller),
        template: TemplateSource::new(config.template_override()),
    });
    let _server = server::spawn(config.listen_addr(), app, tx)?;

    match lifecycle::wait_for_shutdown(&rx, &controller) {
        ShutdownReason::Signal => Ok(()),
        ShutdownReason::ServerStopped(why) => Err(PiLedsError::Server(why)),
    }
}
