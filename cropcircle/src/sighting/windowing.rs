//! Time arithmetic behind sighting windows.

use chrono::{DateTime, Utc};

use crate::config::TrackerConfig;

/// Whole seconds from `observed_at` to `now`, clamped at zero.
pub fn elapsed_secs(observed_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - observed_at).num_seconds().max(0)
}

/// Extra uncertainty accumulated over `elapsed` seconds.
///
/// Grows linearly at the configured lag rate and never exceeds the lag cap.
pub fn server_lag_secs(elapsed: i64, config: &TrackerConfig) -> i64 {
    let lag = (elapsed.max(0) as f64 * config.lag_rate()).floor();
    if lag >= config.lag_cap_secs() as f64 {
        config.lag_cap_secs()
    } else {
        lag as i64
    }
}
