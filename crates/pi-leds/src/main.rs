//! pi-leds: Raspberry Pi power/activity LED control with a web panel.
//!
//! Runs as a Home Assistant add-on (`serve`, the default) or as a one-shot
//! tool for inspecting and switching the LEDs.

use std::path::PathBuf;

use clap::Parser;

mod cli;

#[derive(Parser)]
#[command(
    name = "pi-leds",
    version,
    about = "Raspberry Pi power and activity LED control"
)]
struct Args {
    /// Output as JSON (for status, enable, disable, config)
    #[arg(long, global = true)]
    json: bool,

    /// Config file to use instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<cli::Command>,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();

    let command = args.command.unwrap_or_default();
    if let Err(e) = cli::run(command, args.config.as_deref(), args.json) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
