//! Ring geometry for the rotation timeline.
//!
//! A rotation visits `location_count` locations in order, dwelling for
//! `period_secs` at each one before advancing. One full cycle therefore lasts
//! `location_count * period_secs` seconds (the circumference), and every phase
//! on the timeline is a value in `[0, circumference)`.
//!
//! All modular arithmetic in the crate goes through [`RingGeometry::wrap`],
//! which floor-normalizes negative values into range.

mod locations;

pub use locations::{location_name, DEFAULT_LOCATION_NAMES};

/// Default number of locations in one rotation.
pub const DEFAULT_LOCATION_COUNT: u32 = 18;

/// Default dwell time at each location (15 minutes).
pub const DEFAULT_PERIOD_SECS: i64 = 15 * 60;

/// Fixed dimensions of the cyclic timeline.
///
/// `RingGeometry` is `Copy` and is carried by every
/// [`RotationWindow`](crate::window::RotationWindow) so that window operations
/// never need a separate context argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RingGeometry {
    location_count: u32,
    period_secs: i64,
}

impl RingGeometry {
    /// Create a geometry without validation.
    ///
    /// Use [`TrackerConfig::new`](crate::config::TrackerConfig::new) to obtain a
    /// validated geometry.
    pub(crate) const fn new_unchecked(location_count: u32, period_secs: i64) -> Self {
        Self {
            location_count,
            period_secs,
        }
    }

    /// Number of distinct locations in one rotation.
    #[inline]
    pub fn location_count(&self) -> u32 {
        self.location_count
    }

    /// Seconds spent at each location.
    #[inline]
    pub fn period_secs(&self) -> i64 {
        self.period_secs
    }

    /// Length of one full rotation in seconds.
    #[inline]
    pub fn circumference(&self) -> i64 {
        self.location_count as i64 * self.period_secs
    }

    /// Half of the circumference. Every window must be strictly shorter.
    #[inline]
    pub fn half_circumference(&self) -> i64 {
        self.circumference() / 2
    }

    /// Normalize a phase into `[0, circumference)`.
    ///
    /// Uses Euclidean remainder so negative inputs land in range
    /// (`wrap(-1) == circumference - 1`).
    #[inline]
    pub fn wrap(&self, phase: i64) -> i64 {
        phase.rem_euclid(self.circumference())
    }

    /// Phase at which `location` begins its dwell slot.
    #[inline]
    pub fn location_start(&self, location: u32) -> i64 {
        location as i64 * self.period_secs
    }

    /// Split a phase into the location it falls in and the offset within
    /// that location's dwell slot.
    #[inline]
    pub fn locate(&self, phase: i64) -> (u32, i64) {
        let phase = self.wrap(phase);
        (
            (phase / self.period_secs) as u32,
            phase % self.period_secs,
        )
    }

    /// The location visited after `location`.
    #[inline]
    pub fn successor(&self, location: u32) -> u32 {
        (location + 1) % self.location_count
    }

    /// Whether `location` is a valid index on this ring.
    #[inline]
    pub fn contains_location(&self, location: u32) -> bool {
        location < self.location_count
    }
}

impl Default for RingGeometry {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_LOCATION_COUNT, DEFAULT_PERIOD_SECS)
    }
}
