//! Validated estimation parameters.

use thiserror::Error;

use crate::ring::{RingGeometry, DEFAULT_PERIOD_SECS};

/// Default growth of server lag: five minutes per day of elapsed time.
pub const DEFAULT_LAG_RATE: f64 = (5.0 * 60.0) / (24.0 * 60.0 * 60.0);

/// Default upper bound on server lag (one period).
pub const DEFAULT_LAG_CAP_SECS: i64 = DEFAULT_PERIOD_SECS;

/// Invalid estimation parameters. Fatal at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: location count must be at least 2, got {0}")]
    TooFewLocations(u32),

    #[error("Invalid configuration: period must be positive, got {0}s")]
    NonPositivePeriod(i64),

    #[error("Invalid configuration: lag rate must be finite and non-negative, got {0}")]
    InvalidLagRate(f64),

    #[error("Invalid configuration: lag cap must be non-negative, got {0}s")]
    NegativeLagCap(i64),

    #[error("Invalid configuration: rotation length overflows ({location_count} x {period_secs}s)")]
    CircumferenceOverflow { location_count: u32, period_secs: i64 },

    /// A sighting window (one period plus the maximum lag) would reach half the
    /// rotation, where windows can overlap in two places.
    #[error(
        "Invalid configuration: period {period_secs}s + lag cap {lag_cap_secs}s must stay below half the rotation ({half_circumference}s)"
    )]
    WindowTooWide {
        period_secs: i64,
        lag_cap_secs: i64,
        half_circumference: i64,
    },
}

/// Parameters shared by sighting windowing and reconciliation.
///
/// Constant for the lifetime of the process. Construct with
/// [`TrackerConfig::new`], which enforces that every sighting window stays
/// strictly shorter than half the rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    geometry: RingGeometry,
    lag_rate: f64,
    lag_cap_secs: i64,
}

impl TrackerConfig {
    /// Validate and build a configuration.
    ///
    /// # Arguments
    ///
    /// * `location_count` - Number of locations in one rotation
    /// * `period_secs` - Seconds spent at each location
    /// * `lag_rate` - Seconds of lag gained per second elapsed
    /// * `lag_cap_secs` - Maximum lag in seconds
    pub fn new(
        location_count: u32,
        period_secs: i64,
        lag_rate: f64,
        lag_cap_secs: i64,
    ) -> Result<Self, ConfigError> {
        if location_count <= 1 {
            return Err(ConfigError::TooFewLocations(location_count));
        }
        if period_secs <= 0 {
            return Err(ConfigError::NonPositivePeriod(period_secs));
        }
        if !lag_rate.is_finite() || lag_rate < 0.0 {
            return Err(ConfigError::InvalidLagRate(lag_rate));
        }
        if lag_cap_secs < 0 {
            return Err(ConfigError::NegativeLagCap(lag_cap_secs));
        }
        let circumference = (location_count as i64).checked_mul(period_secs).ok_or(
            ConfigError::CircumferenceOverflow {
                location_count,
                period_secs,
            },
        )?;

        let half_circumference = circumference / 2;
        let widest = period_secs.checked_add(lag_cap_secs).unwrap_or(i64::MAX);
        // Compare against the exact half so odd circumferences are not rounded down.
        if widest.saturating_mul(2) >= circumference {
            return Err(ConfigError::WindowTooWide {
                period_secs,
                lag_cap_secs,
                half_circumference,
            });
        }

        Ok(Self {
            geometry: RingGeometry::new_unchecked(location_count, period_secs),
            lag_rate,
            lag_cap_secs,
        })
    }

    /// Ring the rotation runs on.
    #[inline]
    pub fn geometry(&self) -> RingGeometry {
        self.geometry
    }

    /// Seconds of lag gained per second elapsed.
    #[inline]
    pub fn lag_rate(&self) -> f64 {
        self.lag_rate
    }

    /// Maximum lag in seconds.
    #[inline]
    pub fn lag_cap_secs(&self) -> i64 {
        self.lag_cap_secs
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            geometry: RingGeometry::default(),
            lag_rate: DEFAULT_LAG_RATE,
            lag_cap_secs: DEFAULT_LAG_CAP_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::DEFAULT_LOCATION_COUNT;

    #[test]
    fn test_default_is_valid() {
        let default = TrackerConfig::default();
        let built = TrackerConfig::new(
            DEFAULT_LOCATION_COUNT,
            DEFAULT_PERIOD_SECS,
            DEFAULT_LAG_RATE,
            DEFAULT_LAG_CAP_SECS,
        )
        .unwrap();
        assert_eq!(default, built);
    }

    #[test]
    fn test_rejects_single_location() {
        assert_eq!(
            TrackerConfig::new(1, 900, 0.0, 0),
            Err(ConfigError::TooFewLocations(1))
        );
    }

    #[test]
    fn test_rejects_non_positive_period() {
        assert_eq!(
            TrackerConfig::new(18, 0, 0.0, 0),
            Err(ConfigError::NonPositivePeriod(0))
        );
    }

    #[test]
    fn test_rejects_bad_lag_rate() {
        assert!(matches!(
            TrackerConfig::new(18, 900, -0.1, 0),
            Err(ConfigError::InvalidLagRate(_))
        ));
        assert!(matches!(
            TrackerConfig::new(18, 900, f64::NAN, 0),
            Err(ConfigError::InvalidLagRate(_))
        ));
    }

    #[test]
    fn test_rejects_lag_cap_at_half_rotation() {
        // 4 x 900s ring: half is 1800s, so period + cap must be < 1800.
        assert!(TrackerConfig::new(4, 900, 0.0, 899).is_ok());
        assert!(matches!(
            TrackerConfig::new(4, 900, 0.0, 900),
            Err(ConfigError::WindowTooWide { .. })
        ));
        assert!(matches!(
            TrackerConfig::new(18, 900, 0.0, 8_100),
            Err(ConfigError::WindowTooWide { .. })
        ));
    }

    #[test]
    fn test_two_locations_cannot_hold_a_window() {
        assert!(matches!(
            TrackerConfig::new(2, 900, 0.0, 0),
            Err(ConfigError::WindowTooWide { .. })
        ));
    }

    #[test]
    fn test_rejects_overflow() {
        assert!(matches!(
            TrackerConfig::new(u32::MAX, i64::MAX / 2, 0.0, 0),
            Err(ConfigError::CircumferenceOverflow { .. })
        ));
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::NonPositivePeriod(-5);
        assert!(err.to_string().contains("Invalid configuration"));
        assert!(err.to_string().contains("-5"));
    }
}
