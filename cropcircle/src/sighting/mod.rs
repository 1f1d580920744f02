//! Crowd-sourced sightings and their rotation windows.
//!
//! A [`Sighting`] records that a world's rotation was seen at a location at a
//! given instant. [`Sighting::window_at`] turns it into the window of phases
//! the rotation can occupy at a later instant.
//!
//! Raw reports are checked by [`SightingReport::validate`] before a sighting
//! is ever constructed.

mod validate;
mod windowing;

pub use validate::{SightingReport, ValidationError, WorldBounds, DEFAULT_WORLD_RANGE};
pub use windowing::{elapsed_secs, server_lag_secs};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::TrackerConfig;
use crate::window::RotationWindow;

/// Identifier assigned to a sighting by the store that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SightingId(pub u64);

impl fmt::Display for SightingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An independently rotating instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct World(pub u32);

impl fmt::Display for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single observation: `world`'s rotation was at `location` at `observed_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sighting {
    pub id: SightingId,
    pub world: World,
    pub location: u32,
    pub observed_at: DateTime<Utc>,
}

impl Sighting {
    pub fn new(id: SightingId, world: World, location: u32, observed_at: DateTime<Utc>) -> Self {
        Self {
            id,
            world,
            location,
            observed_at,
        }
    }

    /// Window of phases the rotation can occupy at `now`.
    ///
    /// The sighting pins the rotation to `location`'s dwell slot at
    /// `observed_at`; that slot is carried forward by the elapsed time and its
    /// trailing edge widened by the modelled server lag. Future-dated
    /// sightings are treated as observed at `now`.
    pub fn window_at(&self, now: DateTime<Utc>, config: &TrackerConfig) -> RotationWindow {
        let ring = config.geometry();
        let elapsed = elapsed_secs(self.observed_at, now);
        let start = ring.location_start(self.location) + elapsed;
        let lag = server_lag_secs(elapsed, config);
        RotationWindow::new(start, start + ring.period_secs() + lag, ring)
    }
}

impl fmt::Display for Sighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (world {}, location {} at {})",
            self.id,
            self.world,
            self.location,
            self.observed_at.to_rfc3339()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn config() -> TrackerConfig {
        TrackerConfig::new(4, 900, 300.0 / 86_400.0, 600).unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fresh_sighting_covers_one_period() {
        let s = Sighting::new(SightingId(1), World(301), 2, t0());
        let w = s.window_at(t0(), &config());
        assert_eq!(w.start(), 1800);
        assert_eq!(w.end(), 2700);
        assert_eq!(w.length(), 900);
    }

    #[test]
    fn test_elapsed_shifts_window() {
        let s = Sighting::new(SightingId(1), World(301), 0, t0());
        let w = s.window_at(t0() + Duration::seconds(901), &config());
        // 901s of elapsed time adds floor(901 * 300 / 86400) = 3s of lag.
        assert_eq!(w.start(), 901);
        assert_eq!(w.end(), 1804);
    }

    #[test]
    fn test_future_sighting_is_clamped() {
        let s = Sighting::new(SightingId(1), World(301), 1, t0() + Duration::seconds(30));
        let w = s.window_at(t0(), &config());
        assert_eq!(w.start(), 900);
        assert_eq!(w.end(), 1800);
    }

    #[test]
    fn test_old_sighting_lag_is_capped() {
        let s = Sighting::new(SightingId(1), World(301), 0, t0());
        let w = s.window_at(t0() + Duration::days(30), &config());
        assert_eq!(w.length(), 900 + 600);
    }

    #[test]
    fn test_display() {
        let s = Sighting::new(SightingId(7), World(420), 3, t0());
        let text = s.to_string();
        assert!(text.contains("#7"));
        assert!(text.contains("world 420"));
        assert!(text.contains("location 3"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_sighting_windows_stay_under_half_circumference(
                location in 0u32..18,
                elapsed in -10_000i64..10_000_000,
            ) {
                let config = TrackerConfig::default();
                let s = Sighting::new(SightingId(1), World(300), location, t0());
                let w = s.window_at(t0() + Duration::seconds(elapsed), &config);
                prop_assert!(w.length() < config.geometry().half_circumference());
                prop_assert!(w.length() >= config.geometry().period_secs());
            }
        }
    }
}
