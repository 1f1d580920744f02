//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use cropcircle::config::{ConfigError, ConfigFileError};
use cropcircle::service::RecalculateError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(std::io::Error),
    /// Configuration file could not be read or holds invalid values
    ConfigFile(ConfigFileError),
    /// Tracker settings do not describe a usable rotation
    Config(ConfigError),
    /// Failed to read the sightings file
    InputRead { path: PathBuf, error: std::io::Error },
    /// Sightings file is not valid JSON of the expected shape
    InputParse {
        path: PathBuf,
        error: serde_json::Error,
    },
    /// Two records in the sightings file share an id
    DuplicateId(u64),
    /// Invalid command-line argument
    Argument(String),
    /// Failed to start the async runtime or signal handler
    Runtime(String),
    /// A recalculation pass failed
    Recalculate(RecalculateError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::ConfigFile(_) | CliError::Config(_) => {
                eprintln!();
                eprintln!("Check the file with: cropcircle config show");
            }
            CliError::InputParse { .. } => {
                eprintln!();
                eprintln!("Expected a JSON array of sightings, for example:");
                eprintln!(
                    r#"  [{{"world": 420, "location": 3, "observed_at": "2024-03-08T12:00:00Z"}}]"#
                );
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::ConfigFile(e) => write!(f, "{}", e),
            CliError::Config(e) => write!(f, "{}", e),
            CliError::InputRead { path, error } => {
                write!(f, "Failed to read '{}': {}", path.display(), error)
            }
            CliError::InputParse { path, error } => {
                write!(f, "Failed to parse '{}': {}", path.display(), error)
            }
            CliError::DuplicateId(id) => {
                write!(f, "Sighting id {} appears more than once in the input", id)
            }
            CliError::Argument(msg) => write!(f, "{}", msg),
            CliError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
            CliError::Recalculate(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::ConfigFile(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::InputRead { error, .. } => Some(error),
            CliError::InputParse { error, .. } => Some(error),
            CliError::Recalculate(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::ConfigFile(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<RecalculateError> for CliError {
    fn from(e: RecalculateError) -> Self {
        CliError::Recalculate(e)
    }
}
