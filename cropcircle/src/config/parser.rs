//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{NaiveTime, Weekday};
use chrono_tz::Tz;
use ini::{Ini, Properties};

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [tracker] section
    if let Some(section) = ini.section(Some("tracker")) {
        if let Some(v) = parse_value(
            section,
            "tracker",
            "location_count",
            "must be a positive integer",
        )? {
            config.tracker.location_count = v;
        }
        if let Some(v) = parse_value(
            section,
            "tracker",
            "period_secs",
            "must be a positive integer (seconds)",
        )? {
            config.tracker.period_secs = v;
        }
        if let Some(v) = parse_value(
            section,
            "tracker",
            "lag_rate",
            "must be a non-negative number",
        )? {
            config.tracker.lag_rate = v;
        }
        if let Some(v) = parse_value(
            section,
            "tracker",
            "lag_cap_secs",
            "must be a non-negative integer (seconds)",
        )? {
            config.tracker.lag_cap_secs = v;
        }
    }

    // [schedule] section
    if let Some(section) = ini.section(Some("schedule")) {
        if let Some(v) = parse_value(
            section,
            "schedule",
            "interval_secs",
            "must be a positive integer (seconds)",
        )? {
            if v == 0 {
                return Err(invalid(
                    "schedule",
                    "interval_secs",
                    "0",
                    "must be a positive integer (seconds)",
                ));
            }
            config.schedule.interval_secs = v;
        }
    }

    // [retention] section
    if let Some(section) = ini.section(Some("retention")) {
        if let Some(v) = section.get("enabled") {
            config.retention.enabled = parse_bool(v)
                .ok_or_else(|| invalid("retention", "enabled", v, "must be 'true' or 'false'"))?;
        }
        if let Some(v) = parse_value::<Weekday>(
            section,
            "retention",
            "reset_weekday",
            "must be a weekday name like 'wed'",
        )? {
            config.retention.reset_weekday = v;
        }
        if let Some(v) = section.get("reset_time") {
            config.retention.reset_time = NaiveTime::parse_from_str(v.trim(), "%H:%M")
                .map_err(|_| invalid("retention", "reset_time", v, "expected HH:MM"))?;
        }
        if let Some(v) = parse_value::<Tz>(
            section,
            "retention",
            "timezone",
            "must be an IANA time zone like 'Europe/London'",
        )? {
            config.retention.time_zone = v;
        }
    }

    // [worlds] section
    if let Some(section) = ini.section(Some("worlds")) {
        if let Some(v) = parse_value(
            section,
            "worlds",
            "min",
            "must be a non-negative integer",
        )? {
            config.worlds.min = v;
        }
        if let Some(v) = parse_value(
            section,
            "worlds",
            "max",
            "must be a non-negative integer",
        )? {
            config.worlds.max = v;
        }
        if config.worlds.min >= config.worlds.max {
            return Err(invalid(
                "worlds",
                "max",
                &config.worlds.max.to_string(),
                "must be greater than worlds.min",
            ));
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

/// Parse `key` from `section` if present.
fn parse_value<T: FromStr>(
    section: &Properties,
    section_name: &str,
    key: &str,
    reason: &str,
) -> Result<Option<T>, ConfigFileError> {
    match section.get(key) {
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(section_name, key, v, reason)),
        None => Ok(None),
    }
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_tracker_section() {
        let config = parse(
            "[tracker]\nlocation_count = 6\nperiod_secs = 600\nlag_rate = 0.001\nlag_cap_secs = 300\n",
        )
        .unwrap();
        assert_eq!(config.tracker.location_count, 6);
        assert_eq!(config.tracker.period_secs, 600);
        assert_eq!(config.tracker.lag_rate, 0.001);
        assert_eq!(config.tracker.lag_cap_secs, 300);
        assert!(config.tracker_config().is_ok());
    }

    #[test]
    fn test_invalid_number() {
        let err = parse("[tracker]\nperiod_secs = soon\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::InvalidValue { ref key, .. } if key == "period_secs"
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(parse("[schedule]\ninterval_secs = 0\n").is_err());
    }

    #[test]
    fn test_retention_section() {
        let config =
            parse("[retention]\nenabled = no\nreset_weekday = friday\nreset_time = 06:15\n").unwrap();
        assert!(!config.retention.enabled);
        assert_eq!(config.retention.reset_weekday, Weekday::Fri);
        assert_eq!(config.retention.time_zone, chrono_tz::Europe::London);
        assert_eq!(
            config.retention.reset_time,
            NaiveTime::from_hms_opt(6, 15, 0).unwrap()
        );
    }

    #[test]
    fn test_retention_time_zone() {
        let config = parse("[retention]\ntimezone = America/New_York\n").unwrap();
        assert_eq!(config.retention.time_zone, chrono_tz::America::New_York);

        let err = parse("[retention]\ntimezone = Mars/Olympus\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigFileError::InvalidValue { ref key, .. } if key == "timezone"
        ));
    }

    #[test]
    fn test_bad_reset_time() {
        assert!(parse("[retention]\nreset_time = noon\n").is_err());
    }

    #[test]
    fn test_world_range_must_be_ordered() {
        assert!(parse("[worlds]\nmin = 500\nmax = 400\n").is_err());
        let config = parse("[worlds]\nmin = 1\nmax = 10\n").unwrap();
        assert_eq!(config.world_bounds().min, 1);
        assert_eq!(config.world_bounds().max, 10);
    }

    #[test]
    fn test_logging_section() {
        let config = parse("[logging]\ndirectory = /var/log/cc\nfile = cc.log\n").unwrap();
        assert_eq!(config.logging.directory, PathBuf::from("/var/log/cc"));
        assert_eq!(config.logging.file, "cc.log");
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
