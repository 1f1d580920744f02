//! Cropcircle CLI - Command-line interface
//!
//! Estimates where each world's crop circle currently is from a file of
//! sightings.

mod commands;
mod error;
mod input;

use clap::{Parser, Subcommand};
use cropcircle::logging::init_stderr_logging;

use commands::config::ConfigCommands;
use commands::estimate::EstimateArgs;
use commands::locations::LocationsArgs;
use commands::watch::WatchArgs;

#[derive(Parser)]
#[command(name = "cropcircle")]
#[command(version = cropcircle::VERSION)]
#[command(about = "Estimate crop circle positions from crowd-sourced sightings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a sightings file once and print per-world likelihoods
    Estimate(EstimateArgs),

    /// Recalculate periodically until Ctrl+C
    Watch(WatchArgs),

    /// View configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// List the locations of the rotation
    Locations(LocationsArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Estimate(args) => {
            init_stderr_logging("warn");
            commands::estimate::run(args)
        }
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Config { command } => commands::config::run(command),
        Commands::Locations(args) => commands::locations::run(args),
    };

    if let Err(e) = result {
        e.exit();
    }
}
