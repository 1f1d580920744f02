//! Configuration for the tracker and its driving loop.
//!
//! - [`TrackerConfig`] holds the validated estimation parameters (location
//!   count, period, lag rate and lag cap).
//! - [`ConfigFile`] is the user-facing `config.ini`, which also carries the
//!   schedule, retention, world range and logging settings.
//!
//! # Example
//!
//! ```
//! use cropcircle::config::{ConfigFile, TrackerConfig};
//!
//! let file = ConfigFile::default();
//! let tracker: TrackerConfig = file.tracker_config().unwrap();
//! assert_eq!(tracker.geometry().location_count(), 18);
//! ```

mod defaults;
mod file;
mod parser;
mod settings;
mod tracker;
mod writer;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{
    ConfigFile, LoggingSettings, RetentionSettings, ScheduleSettings, TrackerSettings,
    WorldSettings,
};
pub use tracker::{ConfigError, TrackerConfig, DEFAULT_LAG_CAP_SECS, DEFAULT_LAG_RATE};
