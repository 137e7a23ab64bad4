//! cruiseplan CLI - Command-line interface
//!
//! Inspects and edits planner settings, shows the resolved configuration,
//! and replays recorded control cycles through the planner.

mod commands;
mod error;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::settings::SettingsCommands;
use error::CliError;

/// cruiseplan - per-cycle cruise planning decisions
#[derive(Debug, Parser)]
#[command(name = "cruiseplan")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Settings file (default: <config dir>/cruiseplan/settings.ini)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Enable debug logging for the planner
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// View and modify settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Resolve settings into the planner configuration and print it as JSON
    Resolve {
        /// Write the resolution's effects to the stores
        #[arg(long)]
        apply: bool,

        /// Runtime-memory INI file receiving memory writes
        #[arg(long)]
        memory: Option<PathBuf>,
    },

    /// Replay recorded cycles (JSON lines) and print one plan per cycle
    Replay {
        /// Recorded cycles file
        file: PathBuf,

        /// Runtime-memory INI file (default: in-memory)
        #[arg(long)]
        memory: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = cli.settings.as_deref();

    match cli.command {
        Commands::Settings(command) => commands::settings::run(command, settings),
        Commands::Resolve { apply, memory } => {
            commands::resolve::run(settings, memory.as_deref(), apply)
        }
        Commands::Replay { file, memory } => {
            commands::replay::run(&file, settings, memory.as_deref())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _guard = match logging::init(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
