//! # Trackside Setup CLI
//!
//! Terminal front end for `setup_core`: pressure corrections, ARB stiffness
//! and setup search, wing balance, and session reports.
//!
//! Every command prints a human-readable summary, or the JSON result with
//! `--json` (for scripts and LLM tooling).

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use setup_core::errors::CalcError;
use setup_core::settings::Settings;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "setup", version, about = "Tire pressure correction and ARB setup calculator")]
struct Cli {
    /// Settings file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Correct cold pressures for one session input file
    Correct {
        /// Session input (JSON)
        #[arg(long)]
        input: PathBuf,
    },
    /// Axle stiffness and front distribution for blade positions
    Stiffness {
        /// Front left and right blade positions
        #[arg(long, num_args = 2, value_names = ["LEFT", "RIGHT"], allow_negative_numbers = true)]
        front: Vec<f64>,
        /// Rear left and right blade positions
        #[arg(long, num_args = 2, value_names = ["LEFT", "RIGHT"], allow_negative_numbers = true)]
        rear: Vec<f64>,
    },
    /// Find bar positions that give a target front distribution
    Search {
        /// Target front distribution, percent
        #[arg(long)]
        target: f64,
        /// Allowed deviation, percentage points (defaults to the settings value)
        #[arg(long)]
        tolerance: Option<f64>,
    },
    /// Distribution for every tabulated front/rear position pair
    Heatmap,
    /// Wing slot balance map, or one slot
    Wing {
        /// Slot number (e.g. 6 for P6)
        position: Option<u8>,
    },
    /// Export a sessions file as a report (.xlsx, falls back to .csv)
    Report {
        /// Sessions file: JSON array of session inputs
        #[arg(long)]
        sessions: PathBuf,
        /// Report destination
        #[arg(long)]
        out: PathBuf,
        /// Semicolon-delimited CSV with decimal commas
        #[arg(long)]
        european: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, CalcError> {
    match path {
        Some(path) => Settings::load(path),
        None => Ok(Settings::default()),
    }
}

fn run(cli: Cli) -> Result<(), CalcError> {
    let settings = load_settings(cli.config.as_ref())?;
    let output = commands::Output { json: cli.json };

    match cli.command {
        Command::Correct { input } => commands::correct(&input, output),
        Command::Stiffness { front, rear } => commands::stiffness(&front, &rear, output),
        Command::Search { target, tolerance } => {
            let tolerance = tolerance.unwrap_or(settings.search.default_tolerance_pct);
            commands::search(target, tolerance, output)
        }
        Command::Heatmap => commands::heatmap(output),
        Command::Wing { position } => commands::wing(position, output),
        Command::Report { sessions, out, european } => {
            let export = if european { Settings::european().export } else { settings.export };
            commands::report(&sessions, &out, &export, output)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_stiffness() {
        let cli = Cli::try_parse_from(["setup", "stiffness", "--front", "2.0", "2.5", "--rear", "6", "6"]).unwrap();
        match cli.command {
            Command::Stiffness { front, rear } => {
                assert_eq!(front, vec![2.0, 2.5]);
                assert_eq!(rear, vec![6.0, 6.0]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_search_with_global_flags() {
        let cli = Cli::try_parse_from(["setup", "search", "--target", "19.1", "--json"]).unwrap();
        assert!(cli.json);
        match cli.command {
            Command::Search { target, tolerance } => {
                assert_eq!(target, 19.1);
                assert_eq!(tolerance, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_stiffness_needs_two_positions() {
        assert!(Cli::try_parse_from(["setup", "stiffness", "--front", "2.0", "--rear", "6", "6"]).is_err());
    }
}
