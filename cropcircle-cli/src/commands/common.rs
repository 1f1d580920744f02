//! Common helpers shared across CLI commands.

use std::path::Path;

use cropcircle::config::{config_file_path, ConfigFile, TrackerConfig};

use crate::error::CliError;

/// Load the configuration file, from `path` if given, else the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load_from(&config_file_path())?,
    };
    Ok(config)
}

/// Load the configuration and validate its tracker settings.
pub fn load_tracker(path: Option<&Path>) -> Result<(ConfigFile, TrackerConfig), CliError> {
    let config = load_config(path)?;
    let tracker = config.tracker_config()?;
    Ok((config, tracker))
}
