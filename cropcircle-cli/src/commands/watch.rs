//! Long-running recalculation over a sightings file.
//!
//! Loads the file into an in-memory store, then runs the recalculation
//! daemon until Ctrl+C. The final published estimates are printed as JSON on
//! shutdown.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use cropcircle::logging::init_logging;
use cropcircle::service::{RecalculationDaemon, Recalculator};
use cropcircle::store::{MemorySightingStore, PublishedDistributions};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::common::load_tracker;
use crate::error::CliError;
use crate::input::{load_into_store, load_records};

/// Arguments for `cropcircle watch`.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// JSON file of sightings
    #[arg(long)]
    pub sightings: PathBuf,

    /// Configuration file (defaults to ~/.cropcircle/config.ini)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Seconds between passes, overriding the configuration file
    #[arg(long)]
    pub interval_secs: Option<u64>,
}

/// Run the watch command.
pub fn run(args: WatchArgs) -> Result<(), CliError> {
    let (config, tracker) = load_tracker(args.config.as_deref())?;

    let interval_secs = args.interval_secs.unwrap_or(config.schedule.interval_secs);
    if interval_secs == 0 {
        return Err(CliError::Argument(
            "--interval-secs must be a positive number of seconds".to_string(),
        ));
    }

    let _logging_guard = init_logging(&config.logging.directory, &config.logging.file)
        .map_err(CliError::LoggingInit)?;

    let store = Arc::new(MemorySightingStore::new());
    let records = load_records(&args.sightings)?;
    let rejected = load_into_store(
        &records,
        &store,
        &config.world_bounds(),
        &tracker.geometry(),
    );
    info!(
        file = %args.sightings.display(),
        sightings = store.len(),
        rejected,
        "Loaded sightings"
    );

    let published = Arc::new(PublishedDistributions::new());
    let recalculator = Recalculator::new(tracker, store.clone(), store, published.clone())
        .with_retention(config.retention_policy());
    let daemon = RecalculationDaemon::new(Arc::new(recalculator))
        .with_interval(Duration::from_secs(interval_secs));

    let shutdown = CancellationToken::new();
    let handler_token = shutdown.clone();
    ctrlc::set_handler(move || {
        handler_token.cancel();
    })
    .map_err(|e| CliError::Runtime(format!("Failed to install Ctrl+C handler: {}", e)))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(format!("Failed to start runtime: {}", e)))?;

    info!("Watching sightings, press Ctrl+C to stop");
    let summary = runtime.block_on(daemon.run(shutdown));
    info!(
        passes = summary.passes,
        failures = summary.failures,
        "Stopped"
    );

    let json = serde_json::to_string_pretty(&published.snapshot())
        .map_err(|e| CliError::Runtime(format!("Failed to encode output: {}", e)))?;
    println!("{}", json);
    Ok(())
}
