//! Serialization of `ConfigFile` back to commented INI text.

use super::settings::ConfigFile;

/// Render the configuration as INI text.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"; Cropcircle configuration

[tracker]
; Number of locations in one rotation
location_count = {location_count}
; Seconds spent at each location
period_secs = {period_secs}
; Seconds of server lag gained per second since a sighting
lag_rate = {lag_rate}
; Maximum server lag in seconds
lag_cap_secs = {lag_cap_secs}

[schedule]
; Seconds between recalculation passes
interval_secs = {interval_secs}

[retention]
; Drop sightings made before the most recent weekly reset
enabled = {enabled}
reset_weekday = {reset_weekday}
; Local time of day (HH:MM) in the time zone below
reset_time = {reset_time}
; IANA time zone name, e.g. Europe/London or UTC
timezone = {time_zone}

[worlds]
; Accepted world numbers are min..max (max excluded)
min = {world_min}
max = {world_max}

[logging]
directory = {log_dir}
file = {log_file}
"#,
        location_count = config.tracker.location_count,
        period_secs = config.tracker.period_secs,
        lag_rate = config.tracker.lag_rate,
        lag_cap_secs = config.tracker.lag_cap_secs,
        interval_secs = config.schedule.interval_secs,
        enabled = config.retention.enabled,
        reset_weekday = config.retention.reset_weekday,
        reset_time = config.retention.reset_time.format("%H:%M"),
        time_zone = config.retention.time_zone,
        world_min = config.worlds.min,
        world_max = config.worlds.max,
        log_dir = config.logging.directory.display(),
        log_file = config.logging.file,
    )
}
