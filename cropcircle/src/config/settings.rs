//! Settings structs backing the configuration file.

use std::path::PathBuf;

use chrono::{NaiveTime, Weekday};
use chrono_tz::Tz;

use super::defaults::*;
use super::tracker::{ConfigError, TrackerConfig, DEFAULT_LAG_CAP_SECS, DEFAULT_LAG_RATE};
use crate::retention::{RetentionPolicy, WeeklyReset};
use crate::ring::{DEFAULT_LOCATION_COUNT, DEFAULT_PERIOD_SECS};
use crate::sighting::{WorldBounds, DEFAULT_WORLD_RANGE};

/// Complete contents of `config.ini`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub tracker: TrackerSettings,
    pub schedule: ScheduleSettings,
    pub retention: RetentionSettings,
    pub worlds: WorldSettings,
    pub logging: LoggingSettings,
}

/// `[tracker]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSettings {
    pub location_count: u32,
    pub period_secs: i64,
    pub lag_rate: f64,
    pub lag_cap_secs: i64,
}

/// `[schedule]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSettings {
    pub interval_secs: u64,
}

/// `[retention]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionSettings {
    pub enabled: bool,
    pub reset_weekday: Weekday,
    pub reset_time: NaiveTime,
    pub time_zone: Tz,
}

/// `[worlds]` section. Accepted world numbers are `min..max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldSettings {
    pub min: u32,
    pub max: u32,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            location_count: DEFAULT_LOCATION_COUNT,
            period_secs: DEFAULT_PERIOD_SECS,
            lag_rate: DEFAULT_LAG_RATE,
            lag_cap_secs: DEFAULT_LAG_CAP_SECS,
        }
    }
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_RECALCULATE_INTERVAL_SECS,
        }
    }
}

impl Default for RetentionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            reset_weekday: DEFAULT_RESET_WEEKDAY,
            reset_time: default_reset_time(),
            time_zone: DEFAULT_RESET_TIME_ZONE,
        }
    }
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            min: DEFAULT_WORLD_RANGE.start,
            max: DEFAULT_WORLD_RANGE.end,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LOG_DIR),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            tracker: TrackerSettings::default(),
            schedule: ScheduleSettings::default(),
            retention: RetentionSettings::default(),
            worlds: WorldSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl ConfigFile {
    /// Validated estimation parameters from the `[tracker]` section.
    pub fn tracker_config(&self) -> Result<TrackerConfig, ConfigError> {
        TrackerConfig::new(
            self.tracker.location_count,
            self.tracker.period_secs,
            self.tracker.lag_rate,
            self.tracker.lag_cap_secs,
        )
    }

    /// Retention policy from the `[retention]` section.
    pub fn retention_policy(&self) -> RetentionPolicy {
        if self.retention.enabled {
            let reset = WeeklyReset::new(self.retention.reset_weekday, self.retention.reset_time)
                .in_time_zone(self.retention.time_zone);
            RetentionPolicy::Weekly(reset)
        } else {
            RetentionPolicy::Disabled
        }
    }

    /// Accepted world numbers from the `[worlds]` section.
    pub fn world_bounds(&self) -> WorldBounds {
        WorldBounds::new(self.worlds.min, self.worlds.max)
    }
}
