//! One full recalculation pass.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::error::RecalculateError;
use crate::clock::{Clock, SystemClock};
use crate::config::TrackerConfig;
use crate::reconcile::reconcile_all;
use crate::retention::RetentionPolicy;
use crate::sighting::{SightingId, World};
use crate::store::{DistributionSink, SightingSink, SightingSource};

/// Summary of a completed pass.
#[derive(Debug, Clone, PartialEq)]
pub struct PassReport {
    /// Instant the pass evaluated sightings at.
    pub now: DateTime<Utc>,
    /// Worlds whose distribution was published.
    pub worlds_published: Vec<World>,
    /// Worlds whose previously published distribution was removed.
    pub worlds_cleared: Vec<World>,
    /// Sightings removed by the retention cutoff.
    pub sightings_expired: usize,
    /// Sightings removed as contradicted by newer ones.
    pub stale_sightings: Vec<SightingId>,
    /// Wall-clock duration of the pass in milliseconds.
    pub duration_ms: u64,
}

impl fmt::Display for PassReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pass: published {} worlds, cleared {}, expired {} sightings, discarded {} stale in {}ms",
            self.worlds_published.len(),
            self.worlds_cleared.len(),
            self.sightings_expired,
            self.stale_sightings.len(),
            self.duration_ms
        )
    }
}

/// Reconciles every world and publishes the results.
///
/// Holds no state between passes: each pass reads the current sightings,
/// builds fresh windows and replaces what was published.
pub struct Recalculator {
    config: TrackerConfig,
    retention: RetentionPolicy,
    source: Arc<dyn SightingSource>,
    sink: Arc<dyn SightingSink>,
    distributions: Arc<dyn DistributionSink>,
    clock: Arc<dyn Clock>,
}

impl Recalculator {
    /// Create a recalculator using the system clock and no retention cutoff.
    pub fn new(
        config: TrackerConfig,
        source: Arc<dyn SightingSource>,
        sink: Arc<dyn SightingSink>,
        distributions: Arc<dyn DistributionSink>,
    ) -> Self {
        Self {
            config,
            retention: RetentionPolicy::Disabled,
            source,
            sink,
            distributions,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use `clock` as the source of "now".
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Purge sightings according to `retention` at the start of each pass.
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Run a single pass.
    ///
    /// 1. Purge sightings older than the retention cutoff
    /// 2. Reconcile every world with sightings
    /// 3. Publish each world's distribution, clearing worlds without one
    /// 4. Clear worlds that no longer have any sightings
    /// 5. Delete the stale sightings
    pub fn run_pass(&self) -> Result<PassReport, RecalculateError> {
        let started = Instant::now();
        let now = self.clock.now();
        debug!(now = %now.to_rfc3339(), "Starting recalculation pass");

        let sightings_expired = match self.retention.cutoff(now) {
            Some(cutoff) => {
                let removed = self
                    .sink
                    .delete_before(cutoff)
                    .map_err(RecalculateError::Delete)?;
                if removed > 0 {
                    info!(removed, cutoff = %cutoff.to_rfc3339(), "Purged expired sightings");
                }
                removed
            }
            None => 0,
        };

        let sightings = self
            .source
            .list_sightings(None)
            .map_err(RecalculateError::List)?;
        let results = reconcile_all(sightings, now, &self.config);

        let previously_published = self
            .distributions
            .published_worlds()
            .map_err(RecalculateError::Publish)?;

        let mut seen = BTreeSet::new();
        let mut worlds_published = Vec::new();
        let mut worlds_cleared = Vec::new();
        let mut stale_sightings = Vec::new();

        for result in &results {
            seen.insert(result.world);
            match result.likelihoods() {
                Some(distribution) => {
                    debug!(
                        world = %result.world,
                        current = result.current_sighting_ids.len(),
                        stale = result.stale_sighting_ids.len(),
                        distribution = ?distribution,
                        "Publishing likelihoods"
                    );
                    self.distributions
                        .publish(result.world, distribution, now)
                        .map_err(RecalculateError::Publish)?;
                    worlds_published.push(result.world);
                }
                None => {
                    self.distributions
                        .clear(result.world)
                        .map_err(RecalculateError::Publish)?;
                    worlds_cleared.push(result.world);
                }
            }
            stale_sightings.extend_from_slice(&result.stale_sighting_ids);
        }

        for world in previously_published.difference(&seen) {
            debug!(world = %world, "Clearing world without sightings");
            self.distributions
                .clear(*world)
                .map_err(RecalculateError::Publish)?;
            worlds_cleared.push(*world);
        }

        if !stale_sightings.is_empty() {
            let removed = self
                .sink
                .delete_sightings(&stale_sightings)
                .map_err(RecalculateError::Delete)?;
            debug!(removed, "Removed stale sightings");
        }

        let report = PassReport {
            now,
            worlds_published,
            worlds_cleared,
            sightings_expired,
            stale_sightings,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            published = report.worlds_published.len(),
            cleared = report.worlds_cleared.len(),
            expired = report.sightings_expired,
            stale = report.stale_sightings.len(),
            duration_ms = report.duration_ms,
            "Finished recalculation pass"
        );
        Ok(report)
    }
}
