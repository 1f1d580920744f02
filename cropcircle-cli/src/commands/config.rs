//! Configuration commands.
//!
//! Provides `config path` and `config show`.

use std::path::PathBuf;

use clap::Subcommand;
use cropcircle::config::config_file_path;

use super::common::load_config;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective settings as INI
    Show {
        /// Configuration file (defaults to ~/.cropcircle/config.ini)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => {
            println!("{}", config_file_path().display());
            Ok(())
        }
        ConfigCommands::Show { config } => {
            let config = load_config(config.as_deref())?;
            // Surface invalid tracker settings before printing them as if usable.
            config.tracker_config()?;
            print!("{}", config.to_config_string());
            Ok(())
        }
    }
}
