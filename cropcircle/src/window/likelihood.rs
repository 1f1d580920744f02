//! Projection of a rotation window onto discrete locations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::RotationWindow;

/// Probability of the rotation currently being at each location.
///
/// Locations are kept in ascending order. Only locations with a non-zero
/// probability are present, and the probabilities sum to 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LikelihoodDistribution {
    probabilities: BTreeMap<u32, f64>,
}

impl LikelihoodDistribution {
    /// Distribution placing all weight on one location.
    pub fn certain(location: u32) -> Self {
        let mut probabilities = BTreeMap::new();
        probabilities.insert(location, 1.0);
        Self { probabilities }
    }

    /// Probability for `location`, or 0.0 when it is not a candidate.
    pub fn probability(&self, location: u32) -> f64 {
        self.probabilities.get(&location).copied().unwrap_or(0.0)
    }

    /// Iterate `(location, probability)` pairs in location order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.probabilities.iter().map(|(&l, &p)| (l, p))
    }

    /// Number of candidate locations.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// The most likely location. Ties go to the lower index.
    pub fn most_likely(&self) -> Option<(u32, f64)> {
        self.iter()
            .fold(None, |best: Option<(u32, f64)>, (location, p)| match best {
                Some((_, best_p)) if best_p >= p => best,
                _ => Some((location, p)),
            })
    }

    fn insert(&mut self, location: u32, probability: f64) {
        if probability > 0.0 {
            self.probabilities.insert(location, probability);
        }
    }
}

/// Spread the window's length over the locations it covers.
///
/// The first location receives the remainder of its dwell slot, fully
/// covered locations receive a whole period, and the last location receives
/// the part of its slot reached by the window's end.
pub(super) fn project(window: &RotationWindow) -> LikelihoodDistribution {
    let ring = window.ring();
    let period = ring.period_secs();
    let (start_location, start_offset) = ring.locate(window.start());
    let (end_location, end_offset) = ring.locate(window.end());

    if start_location == end_location {
        return LikelihoodDistribution::certain(start_location);
    }

    let length = window.length() as f64;
    let mut distribution = LikelihoodDistribution::default();
    distribution.insert(start_location, (period - start_offset) as f64 / length);

    let mut location = ring.successor(start_location);
    while location != end_location {
        distribution.insert(location, period as f64 / length);
        location = ring.successor(location);
    }

    distribution.insert(end_location, end_offset as f64 / length);
    distribution
}
