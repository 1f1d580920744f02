//! In-memory sighting store.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

use super::{SightingSink, SightingSource, StoreError};
use crate::ring::RingGeometry;
use crate::sighting::{Sighting, SightingId, SightingReport, ValidationError, World, WorldBounds};

/// Sightings held in memory, keyed by id.
///
/// Ids are assigned on insert and increase monotonically, so they also order
/// sightings by arrival.
#[derive(Debug, Default)]
pub struct MemorySightingStore {
    sightings: RwLock<BTreeMap<SightingId, Sighting>>,
    next_id: AtomicU64,
}

impl MemorySightingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a raw report and store it as a sighting observed at `observed_at`.
    pub fn record(
        &self,
        report: SightingReport,
        observed_at: DateTime<Utc>,
        bounds: &WorldBounds,
        ring: &RingGeometry,
    ) -> Result<Sighting, ValidationError> {
        let (world, location) = report.validate(bounds, ring)?;
        Ok(self.insert(world, location, observed_at))
    }

    /// Store an already validated observation.
    pub fn insert(&self, world: World, location: u32, observed_at: DateTime<Utc>) -> Sighting {
        let id = SightingId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let sighting = Sighting::new(id, world, location, observed_at);
        debug!(sighting = %sighting, "Recorded sighting");
        self.sightings.write().insert(id, sighting.clone());
        sighting
    }

    /// Number of stored sightings.
    pub fn len(&self) -> usize {
        self.sightings.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sightings.read().is_empty()
    }

    /// Whether a sighting with `id` is stored.
    pub fn contains(&self, id: SightingId) -> bool {
        self.sightings.read().contains_key(&id)
    }
}

impl SightingSource for MemorySightingStore {
    fn list_sightings(&self, world: Option<World>) -> Result<Vec<Sighting>, StoreError> {
        let sightings = self.sightings.read();
        Ok(sightings
            .values()
            .filter(|s| world.map_or(true, |w| s.world == w))
            .cloned()
            .collect())
    }
}

impl SightingSink for MemorySightingStore {
    fn delete_sightings(&self, ids: &[SightingId]) -> Result<usize, StoreError> {
        let mut sightings = self.sightings.write();
        Ok(ids.iter().filter(|id| sightings.remove(*id).is_some()).count())
    }

    fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut sightings = self.sightings.write();
        let before = sightings.len();
        sightings.retain(|_, s| s.observed_at >= cutoff);
        Ok(before - sightings.len())
    }
}
