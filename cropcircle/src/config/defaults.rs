//! Default values for the configuration file.

use chrono::{NaiveTime, Weekday};
use chrono_tz::Tz;

/// Default seconds between recalculation passes.
pub const DEFAULT_RECALCULATE_INTERVAL_SECS: u64 = 10;

/// Default weekday of the weekly reset that invalidates older sightings.
pub const DEFAULT_RESET_WEEKDAY: Weekday = Weekday::Wed;

/// Default time zone the weekly reset is scheduled in.
pub const DEFAULT_RESET_TIME_ZONE: Tz = chrono_tz::Europe::London;

/// Default local time of day of the weekly reset.
pub fn default_reset_time() -> NaiveTime {
    NaiveTime::from_hms_opt(11, 30, 0).unwrap_or_default()
}

/// Default log directory.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "cropcircle.log";
