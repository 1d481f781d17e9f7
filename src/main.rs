//! Standoff CLI - Command-line interface for playing and replaying encounters.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Standoff - a stat-and-engagement encounter engine
#[derive(Parser, Debug)]
#[command(name = "standoff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Encounter settings accepted by every command.
#[derive(Args, Debug)]
struct EncounterArgs {
    /// Opponent name (default: "Enemy Flappy")
    #[arg(long)]
    opponent: Option<String>,

    /// Opponent base power (default: 10)
    #[arg(long, allow_negative_numbers = true)]
    base_power: Option<i64>,

    /// Highest crime value that still allows passing (default: 3)
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<i64>,

    /// Refuse pass and fight when they are not on offer
    #[arg(long)]
    strict: bool,
}

impl From<EncounterArgs> for cli::EncounterOverrides {
    fn from(args: EncounterArgs) -> Self {
        Self {
            opponent: args.opponent,
            base_power: args.base_power,
            threshold: args.threshold,
            strict: args.strict,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play an encounter, reading commands from stdin
    Play {
        #[command(flatten)]
        encounter: EncounterArgs,

        /// Save the accepted actions as a script
        #[arg(long)]
        save: Option<std::path::PathBuf>,
    },

    /// Replay a script file
    Run {
        /// Script file (.json)
        #[arg(required = true)]
        script: std::path::PathBuf,

        #[command(flatten)]
        encounter: EncounterArgs,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },
}

/// Log filter used when `STANDOFF_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";

fn init_tracing() {
    let env_filter = EnvFilter::try_from_env("STANDOFF_LOG")
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // stdout carries rendered output; logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing();

    let result = match args.command {
        Commands::Play { encounter, save } => cli::play::execute(encounter.into(), save.as_deref()),

        Commands::Run {
            script,
            encounter,
            format,
        } => cli::run::execute(&script, encounter.into(), format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
