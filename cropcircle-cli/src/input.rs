//! Sightings files.
//!
//! A sightings file is a JSON array of records:
//!
//! ```json
//! [
//!   {"id": 7, "world": 420, "location": 3, "observed_at": "2024-03-08T12:00:00Z"},
//!   {"world": 421, "location": 0, "observed_at": "2024-03-08T11:52:10Z"}
//! ]
//! ```
//!
//! `id` is optional and must be unique when given. Records without one are
//! numbered after the largest explicit id.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use cropcircle::ring::RingGeometry;
use cropcircle::sighting::{Sighting, SightingId, SightingReport, WorldBounds};
use cropcircle::store::MemorySightingStore;
use serde::Deserialize;
use tracing::warn;

use crate::error::CliError;

/// One record of a sightings file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SightingRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub world: i64,
    pub location: i64,
    pub observed_at: DateTime<Utc>,
}

impl SightingRecord {
    fn report(&self) -> SightingReport {
        SightingReport::new(self.world, self.location)
    }
}

/// Read and parse a sightings file.
pub fn load_records(path: &Path) -> Result<Vec<SightingRecord>, CliError> {
    let content = fs::read_to_string(path).map_err(|error| CliError::InputRead {
        path: path.to_path_buf(),
        error,
    })?;
    serde_json::from_str(&content).map_err(|error| CliError::InputParse {
        path: path.to_path_buf(),
        error,
    })
}

/// Validated sightings plus the number of records that were rejected.
#[derive(Debug, Default)]
pub struct Validated {
    pub sightings: Vec<Sighting>,
    pub rejected: usize,
}

/// Validate records into sightings, keeping their ids.
///
/// Records without an id are numbered in file order, starting above the
/// largest explicit id. Invalid records are logged and skipped.
///
/// # Errors
///
/// Returns [`CliError::DuplicateId`] if two records carry the same explicit id.
pub fn validate_records(
    records: &[SightingRecord],
    bounds: &WorldBounds,
    ring: &RingGeometry,
) -> Result<Validated, CliError> {
    let mut explicit = BTreeSet::new();
    for record in records {
        if let Some(id) = record.id {
            if !explicit.insert(id) {
                return Err(CliError::DuplicateId(id));
            }
        }
    }
    let mut next_id = explicit.last().map_or(1, |max| max + 1);

    let mut validated = Validated::default();
    for (index, record) in records.iter().enumerate() {
        let id = match record.id {
            Some(id) => SightingId(id),
            None => {
                next_id += 1;
                SightingId(next_id - 1)
            }
        };
        match record.report().validate(bounds, ring) {
            Ok((world, location)) => {
                validated
                    .sightings
                    .push(Sighting::new(id, world, location, record.observed_at));
            }
            Err(e) => {
                warn!(record = index, error = %e, "Skipping invalid sighting");
                validated.rejected += 1;
            }
        }
    }
    Ok(validated)
}

/// Record every valid entry in `store`, which assigns fresh ids.
///
/// Returns the number of rejected records.
pub fn load_into_store(
    records: &[SightingRecord],
    store: &MemorySightingStore,
    bounds: &WorldBounds,
    ring: &RingGeometry,
) -> usize {
    let mut rejected = 0;
    for (index, record) in records.iter().enumerate() {
        if let Err(e) = store.record(record.report(), record.observed_at, bounds, ring) {
            warn!(record = index, error = %e, "Skipping invalid sighting");
            rejected += 1;
        }
    }
    rejected
}
