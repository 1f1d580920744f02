//! Cropcircle - position estimates for rotating crop circles
//!
//! Every world runs the same rotation: a crop circle dwells at each of a fixed
//! ring of locations for one period before moving to the next. Players report
//! where they saw it; this library turns those sightings into a probability
//! per location for each world.
//!
//! # Overview
//!
//! - [`ring`] - the circular timeline and its named locations
//! - [`window`] - arcs of the timeline, their intersection and projection
//!   onto locations
//! - [`sighting`] - observations and the window each implies at a given
//!   instant
//! - [`reconcile`] - folding a world's sightings into one window
//! - [`store`] - sighting storage and published distributions
//! - [`service`] - the periodic recalculation loop
//! - [`config`], [`retention`], [`clock`], [`logging`] - supporting pieces
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use cropcircle::config::TrackerConfig;
//! use cropcircle::reconcile::reconcile_world;
//! use cropcircle::sighting::{Sighting, SightingId, World};
//!
//! let config = TrackerConfig::default();
//! let now = Utc::now();
//! let sightings = vec![Sighting::new(SightingId(1), World(420), 3, now - Duration::minutes(5))];
//!
//! let result = reconcile_world(World(420), &sightings, now, &config);
//! let likelihoods = result.likelihoods().unwrap();
//! assert!((likelihoods.total() - 1.0).abs() < 1e-9);
//! ```

pub mod clock;
pub mod config;
pub mod logging;
pub mod reconcile;
pub mod retention;
pub mod ring;
pub mod service;
pub mod sighting;
pub mod store;
pub mod window;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
