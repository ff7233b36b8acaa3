//! dev-session-renew: Home Assistant add-on that keeps an LG webOS
//! developer-mode session from expiring.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use clap::Parser;

use dev_session::RenewError;
use dev_session::error::Result;
use dev_session::options::{self, DEFAULT_OPTIONS_PATH};
use dev_session::renew::{self, RenewOutcome};
use dev_session::schedule::{self, CHECK_INTERVAL, Schedule};

/// Shared shutdown flag, cleared by the signal handler.
static RUNNING: AtomicBool = AtomicBool::new(true);

#[derive(Parser)]
#[command(
    name = "dev-session-renew",
    version,
    about = "Periodically renew an LG webOS developer-mode session"
)]
struct Args {
    /// Add-on options file
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OPTIONS_PATH)]
    options: PathBuf,

    /// Renew once and exit (non-zero on failure)
    #[arg(long)]
    once: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// One renewal attempt. Failures are logged, never fatal.
fn attempt(client: &reqwest::blocking::Client, url: &str, label: &str) -> Result<RenewOutcome> {
    log::info!("{label} session renewal starting...");
    let result = renew::renew(client, url);
    match &result {
        Ok(outcome) if outcome.is_success() => {
            log::info!("{label} session renewal completed successfully");
        }
        Ok(_) => log::error!("{label} session renewal failed"),
        Err(e) => log::error!("{label} session renewal failed: {e}"),
    }
    result
}

fn run(args: &Args) -> Result<()> {
    log::info!("Starting LG Dev Session Auto Renew");
    let options = options::load_options(&args.options)?;
    let client = renew::client()?;

    let initial = attempt(&client, &options.url, "Initial");
    if args.once {
        return match initial? {
            RenewOutcome::Rejected {
                error_code,
                error_msg,
                ..
            } => Err(RenewError::Rejected {
                error_code,
                error_msg,
            }),
            _ => Ok(()),
        };
    }
    if !matches!(&initial, Ok(outcome) if outcome.is_success()) {
        log::warn!("Initial session renewal failed, will retry according to schedule");
    }

    let mut schedule = Schedule::new(options.interval(), Instant::now());
    log::info!(
        "Session renewal scheduled every {} hours",
        options.interval_hours
    );

    while schedule::sleep_while_running(&RUNNING, CHECK_INTERVAL) {
        let now = Instant::now();
        if schedule.is_due(now) {
            let _ = attempt(&client, &options.url, "Scheduled");
            schedule.mark_ran(Instant::now());
        }
    }
    log::info!("Stopped");
    Ok(())
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_target(false)
        .init();

    ctrlc::set_handler(move || {
        RUNNING.store(false, Ordering::SeqCst);
    })
    .ok();

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
