//! Jog pendant controller entry point.
//!
//! Dry-run harness: pendant events are read from stdin in the replay line
//! format and every resolved command only writes a log line, so a button
//! table or wheel tuning can be checked without a machine attached.
//!
//! ```text
//! main()
//!  └─ load_config()             -- platform config file or defaults
//!  └─ ControllerSession::start()
//!       ├─ ReplayDevice         (stdin reader thread)
//!       └─ LoggingActionDirectory
//!  └─ wait for Ctrl-C, then stop the session off the async runtime
//! ```

use std::io::BufReader;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use jog_pendant::application::controller_session::{
    ready_channel, ControllerSession, StartupGate, StopOutcome,
};
use jog_pendant::infrastructure::action_directory::logging::LoggingActionDirectory;
use jog_pendant::infrastructure::device_source::{
    replay::ReplayDevice, InputDevice, StaticDeviceEnvironment,
};
use jog_pendant::infrastructure::storage::config::{load_config, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_error) = match load_config() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.pendant.log_level)),
        )
        .init();

    info!("jog pendant starting");
    if let Some(e) = config_error {
        warn!("{e}; using default configuration");
    }

    let mappings = config.mappings().context("invalid pendant mapping")?;
    let mut options = config.session_options();

    let device = ReplayDevice::spawn(
        &options.device_name,
        BufReader::new(std::io::stdin()),
    )
    .context("failed to start stdin reader")?;
    let devices: Vec<Box<dyn InputDevice>> = vec![Box::new(device)];
    let environment = StaticDeviceEnvironment::new(devices);

    // The logging directory is fully populated on construction.
    let directory = Arc::new(LoggingActionDirectory::new());
    let (notifier, signal) = ready_channel();
    options.startup = StartupGate::Ready(signal);
    notifier.notify();

    let mut session = ControllerSession::start(&environment, directory, mappings, options)
        .context("failed to start pendant session")?;
    if !session.is_enabled() {
        return Ok(());
    }

    info!("jog pendant ready.  Press Ctrl-C to exit.");

    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c() => {
                signal.context("failed to listen for Ctrl-C")?;
                info!("shutdown signal received");
                break;
            }
            _ = tokio::time::sleep(Duration::from_millis(100)) => {
                if !session.is_running() {
                    warn!("pendant worker exited on its own");
                    break;
                }
            }
        }
    }

    let outcome = tokio::task::spawn_blocking(move || session.stop()).await?;
    if outcome == StopOutcome::TimedOut {
        warn!("exiting with the pendant worker still busy");
    }

    info!("jog pendant stopped");
    Ok(())
}
