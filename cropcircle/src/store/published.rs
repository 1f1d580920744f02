//! Published per-world distributions.
//!
//! Each world maps to an immutable [`PublishedEstimate`] behind an `Arc`.
//! Publishing swaps the whole record in one insert, so readers see either the
//! previous estimate or the new one, never a mix.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;

use super::{DistributionSink, StoreError};
use crate::sighting::World;
use crate::window::LikelihoodDistribution;

/// A world's published distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishedEstimate {
    pub world: World,
    /// Incremented on every publish for this world, starting at 1.
    pub version: u64,
    pub computed_at: DateTime<Utc>,
    pub distribution: LikelihoodDistribution,
}

/// Concurrent map of the latest estimate per world.
#[derive(Debug, Default)]
pub struct PublishedDistributions {
    estimates: DashMap<World, Arc<PublishedEstimate>>,
}

impl PublishedDistributions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest estimate for `world`.
    pub fn get(&self, world: World) -> Option<Arc<PublishedEstimate>> {
        self.estimates.get(&world).map(|entry| Arc::clone(entry.value()))
    }

    /// Every world's distribution, ordered by world.
    pub fn snapshot(&self) -> BTreeMap<World, LikelihoodDistribution> {
        self.estimates
            .iter()
            .map(|entry| (*entry.key(), entry.value().distribution.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.estimates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.estimates.is_empty()
    }
}

impl DistributionSink for PublishedDistributions {
    fn publish(
        &self,
        world: World,
        distribution: LikelihoodDistribution,
        computed_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        match self.estimates.entry(world) {
            Entry::Occupied(mut entry) => {
                let version = entry.get().version + 1;
                entry.insert(Arc::new(PublishedEstimate {
                    world,
                    version,
                    computed_at,
                    distribution,
                }));
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(PublishedEstimate {
                    world,
                    version: 1,
                    computed_at,
                    distribution,
                }));
            }
        }
        Ok(())
    }

    fn clear(&self, world: World) -> Result<(), StoreError> {
        self.estimates.remove(&world);
        Ok(())
    }

    fn published_worlds(&self) -> Result<BTreeSet<World>, StoreError> {
        Ok(self.estimates.iter().map(|entry| *entry.key()).collect())
    }
}
