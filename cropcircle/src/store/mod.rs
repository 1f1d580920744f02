//! Collaborators around the reconciliation core.
//!
//! The core reads sightings from a [`SightingSource`], asks a
//! [`SightingSink`] to delete stale or expired ones, and hands finished
//! distributions to a [`DistributionSink`]. In-memory implementations are
//! provided for the service and for tests:
//!
//! - [`MemorySightingStore`] - sighting source and sink
//! - [`PublishedDistributions`] - versioned per-world published estimates
//!
//! # Thread Safety
//!
//! All traits require `Send + Sync` so that implementations can be shared
//! between the driving loop and readers through `Arc`.

mod memory;
mod published;

pub use memory::MemorySightingStore;
pub use published::{PublishedDistributions, PublishedEstimate};

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::sighting::{Sighting, SightingId, World};
use crate::window::LikelihoodDistribution;

/// Errors reported by collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the operation.
    #[error("Store operation failed: {0}")]
    Operation(String),
}

/// Read access to stored sightings.
pub trait SightingSource: Send + Sync {
    /// All sightings, or only those of `world` when given.
    fn list_sightings(&self, world: Option<World>) -> Result<Vec<Sighting>, StoreError>;
}

/// Removal of stored sightings.
pub trait SightingSink: Send + Sync {
    /// Delete the given sightings. Unknown ids are ignored.
    ///
    /// Returns how many sightings were removed.
    fn delete_sightings(&self, ids: &[SightingId]) -> Result<usize, StoreError>;

    /// Delete every sighting observed before `cutoff`.
    ///
    /// Returns how many sightings were removed.
    fn delete_before(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError>;
}

/// Destination for per-world distributions.
pub trait DistributionSink: Send + Sync {
    /// Replace `world`'s distribution.
    fn publish(
        &self,
        world: World,
        distribution: LikelihoodDistribution,
        computed_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Remove `world`'s distribution, if any.
    fn clear(&self, world: World) -> Result<(), StoreError>;

    /// Worlds that currently have a published distribution.
    fn published_worlds(&self) -> Result<BTreeSet<World>, StoreError>;
}
