//! Reconciliation of a world's sightings into one combined window.
//!
//! Sightings are folded newest-first. Each one's window is intersected into
//! the running estimate until the first contradiction; that sighting and
//! every older one are then considered stale, whether or not the older ones
//! agree among themselves. Only the most recent unbroken run of mutually
//! consistent sightings shapes the estimate.
//!
//! ```text
//! newest ──────────────────────────────────────────► oldest
//!   S1 ∩ S2 ∩ S3   │  S4 (contradicts)   S5   S6
//!   ── current ──  │  ─────────── stale ──────────
//! ```
//!
//! Worlds are independent, so [`reconcile_all`] processes them in parallel.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::debug;

use crate::config::TrackerConfig;
use crate::sighting::{Sighting, SightingId, World};
use crate::window::{LikelihoodDistribution, RotationWindow};

/// Outcome of reconciling one world.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldReconciliation {
    pub world: World,
    /// Intersection of every current sighting's window. `None` only when the
    /// world had no sightings.
    pub combined_window: Option<RotationWindow>,
    /// Sightings that contributed to the window, newest first.
    pub current_sighting_ids: Vec<SightingId>,
    /// Sightings discarded as contradicted by newer ones, newest first.
    pub stale_sighting_ids: Vec<SightingId>,
}

impl WorldReconciliation {
    /// Likelihood of each location, if the world has a window.
    pub fn likelihoods(&self) -> Option<LikelihoodDistribution> {
        self.combined_window.as_ref().map(RotationWindow::likelihoods)
    }
}

/// Reconcile one world's sightings as of `now`.
pub fn reconcile_world(
    world: World,
    sightings: &[Sighting],
    now: DateTime<Utc>,
    config: &TrackerConfig,
) -> WorldReconciliation {
    let mut ordered: Vec<&Sighting> = sightings.iter().collect();
    // Newest first; equal timestamps fall back to the higher id.
    ordered.sort_by(|a, b| {
        b.observed_at
            .cmp(&a.observed_at)
            .then_with(|| b.id.cmp(&a.id))
    });

    let mut accepted: Option<RotationWindow> = None;
    let mut current = Vec::new();
    let mut stale = Vec::new();
    let mut consistent = true;

    for sighting in ordered {
        debug_assert_eq!(sighting.world, world, "sighting from another world");
        if !consistent {
            stale.push(sighting.id);
            continue;
        }

        let window = sighting.window_at(now, config);
        match accepted {
            None => {
                accepted = Some(window);
                current.push(sighting.id);
            }
            Some(running) => match running.combine(&window) {
                Ok(combined) => {
                    accepted = Some(combined);
                    current.push(sighting.id);
                }
                Err(_) => {
                    debug!(
                        world = %world,
                        sighting = %sighting.id,
                        running = %running,
                        window = %window,
                        "Sighting contradicts newer sightings, discarding it and everything older"
                    );
                    consistent = false;
                    stale.push(sighting.id);
                }
            },
        }
    }

    WorldReconciliation {
        world,
        combined_window: accepted,
        current_sighting_ids: current,
        stale_sighting_ids: stale,
    }
}

/// Group sightings by world, keeping worlds in ascending order.
pub fn group_by_world<I>(sightings: I) -> BTreeMap<World, Vec<Sighting>>
where
    I: IntoIterator<Item = Sighting>,
{
    let mut grouped: BTreeMap<World, Vec<Sighting>> = BTreeMap::new();
    for sighting in sightings {
        grouped.entry(sighting.world).or_default().push(sighting);
    }
    grouped
}

/// Reconcile every world present in `sightings`.
///
/// Results are ordered by world.
pub fn reconcile_all(
    sightings: Vec<Sighting>,
    now: DateTime<Utc>,
    config: &TrackerConfig,
) -> Vec<WorldReconciliation> {
    let grouped: Vec<(World, Vec<Sighting>)> = group_by_world(sightings).into_iter().collect();
    grouped
        .par_iter()
        .map(|(world, sightings)| reconcile_world(*world, sightings, now, config))
        .collect()
}
