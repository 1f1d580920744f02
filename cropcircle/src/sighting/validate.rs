//! Validation of raw sighting reports at the ingestion boundary.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::World;
use crate::ring::RingGeometry;

/// Default accepted world numbers (half-open).
pub const DEFAULT_WORLD_RANGE: Range<u32> = 300..600;

/// Errors for reports that cannot become sightings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// World number outside the accepted range.
    #[error("Invalid world: {world} (expected {min}..{max})")]
    InvalidWorld { world: i64, min: u32, max: u32 },

    /// Location index not on the ring.
    #[error("Invalid location: {location} (expected 0..{count})")]
    InvalidLocation { location: i64, count: u32 },
}

/// Accepted range of world numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldBounds {
    pub min: u32,
    pub max: u32,
}

impl WorldBounds {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Whether `world` falls within `[min, max)`.
    pub fn contains(&self, world: i64) -> bool {
        world >= self.min as i64 && world < self.max as i64
    }
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(DEFAULT_WORLD_RANGE.start, DEFAULT_WORLD_RANGE.end)
    }
}

/// A raw, unvalidated observation as submitted by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SightingReport {
    pub world: i64,
    pub location: i64,
}

impl SightingReport {
    pub fn new(world: i64, location: i64) -> Self {
        Self { world, location }
    }

    /// Check the report against the accepted worlds and the ring.
    ///
    /// Returns the typed world and location on success.
    pub fn validate(
        &self,
        bounds: &WorldBounds,
        ring: &RingGeometry,
    ) -> Result<(World, u32), ValidationError> {
        if !bounds.contains(self.world) {
            return Err(ValidationError::InvalidWorld {
                world: self.world,
                min: bounds.min,
                max: bounds.max,
            });
        }
        let location = u32::try_from(self.location)
            .ok()
            .filter(|l| ring.contains_location(*l))
            .ok_or(ValidationError::InvalidLocation {
                location: self.location,
                count: ring.location_count(),
            })?;
        Ok((World(self.world as u32), location))
    }
}
