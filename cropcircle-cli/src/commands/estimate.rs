//! One-shot estimate over a sightings file.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::Args;
use cropcircle::config::TrackerConfig;
use cropcircle::reconcile::{reconcile_all, WorldReconciliation};
use cropcircle::sighting::{SightingId, World, WorldBounds};
use cropcircle::window::LikelihoodDistribution;
use serde::Serialize;
use tracing::info;

use super::common::load_tracker;
use crate::error::CliError;
use crate::input::{load_records, validate_records};

/// Arguments for `cropcircle estimate`.
#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// JSON file of sightings
    #[arg(long)]
    pub sightings: PathBuf,

    /// Evaluate as of this instant (RFC 3339), defaults to the current time
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// Configuration file (defaults to ~/.cropcircle/config.ini)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Estimate for one world.
#[derive(Debug, Serialize)]
pub struct WorldEstimate {
    pub world: World,
    /// `[start, end)` of the combined window.
    pub window: Option<(i64, i64)>,
    pub likelihoods: Option<LikelihoodDistribution>,
    pub current: Vec<SightingId>,
    pub stale: Vec<SightingId>,
}

impl From<&WorldReconciliation> for WorldEstimate {
    fn from(result: &WorldReconciliation) -> Self {
        Self {
            world: result.world,
            window: result.combined_window.map(|w| (w.start(), w.end())),
            likelihoods: result.likelihoods(),
            current: result.current_sighting_ids.clone(),
            stale: result.stale_sighting_ids.clone(),
        }
    }
}

/// Output of `cropcircle estimate`.
#[derive(Debug, Serialize)]
pub struct EstimateReport {
    pub now: DateTime<Utc>,
    pub rejected: usize,
    pub worlds: Vec<WorldEstimate>,
}

/// Run the estimate command.
pub fn run(args: EstimateArgs) -> Result<(), CliError> {
    let (config, tracker) = load_tracker(args.config.as_deref())?;
    let now = args.now.unwrap_or_else(Utc::now);
    let report = estimate(&args.sightings, now, &tracker, &config.world_bounds())?;

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| CliError::Runtime(format!("Failed to encode output: {}", e)))?;
    println!("{}", json);
    Ok(())
}

fn estimate(
    path: &Path,
    now: DateTime<Utc>,
    tracker: &TrackerConfig,
    bounds: &WorldBounds,
) -> Result<EstimateReport, CliError> {
    let records = load_records(path)?;
    let validated = validate_records(&records, bounds, &tracker.geometry())?;
    info!(
        sightings = validated.sightings.len(),
        rejected = validated.rejected,
        "Loaded sightings"
    );

    let worlds = reconcile_all(validated.sightings, now, tracker)
        .iter()
        .map(WorldEstimate::from)
        .collect();

    Ok(EstimateReport {
        now,
        rejected: validated.rejected,
        worlds,
    })
}
