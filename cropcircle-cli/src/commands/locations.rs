//! Lists the locations of the configured rotation.

use std::path::PathBuf;

use clap::Args;
use cropcircle::ring::{location_name, RingGeometry};

use super::common::load_tracker;
use crate::error::CliError;

/// Arguments for `cropcircle locations`.
#[derive(Debug, Args)]
pub struct LocationsArgs {
    /// Configuration file (defaults to ~/.cropcircle/config.ini)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Print every location with its phase range.
pub fn run(args: LocationsArgs) -> Result<(), CliError> {
    let (_, tracker) = load_tracker(args.config.as_deref())?;
    print!("{}", location_table(&tracker.geometry()));
    Ok(())
}

fn location_table(ring: &RingGeometry) -> String {
    let mut table = format!(
        "{} locations, {}s each\n\n",
        ring.location_count(),
        ring.period_secs()
    );
    for location in 0..ring.location_count() {
        table.push_str(&format!(
            "{:>3}  {:>6}s  {}\n",
            location,
            ring.location_start(location),
            location_name(location).unwrap_or("(unnamed)")
        ));
    }
    table
}
