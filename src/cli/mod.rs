//! CLI command implementations for standoff.

pub(crate) mod play;
pub(crate) mod run;

mod output;

use clap::ValueEnum;
use standoff::{EncounterConfig, Policy};
use std::error::Error;
use std::fmt;

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Encounter settings shared by the commands.
#[derive(Debug, Clone, Default)]
pub(crate) struct EncounterOverrides {
    /// Opponent display name.
    pub(crate) opponent: Option<String>,
    /// Opponent base power.
    pub(crate) base_power: Option<i64>,
    /// Highest crime value that still allows passing.
    pub(crate) threshold: Option<i64>,
    /// Enforce pass/fight gating in the core.
    pub(crate) strict: bool,
}

impl EncounterOverrides {
    /// Apply the overrides on top of `config`.
    pub(crate) fn apply(self, mut config: EncounterConfig) -> EncounterConfig {
        if let Some(name) = self.opponent {
            config.opponent_name = name;
        }
        if let Some(base_power) = self.base_power {
            config.opponent_base_power = base_power;
        }
        if let Some(threshold) = self.threshold {
            config.pass_threshold = threshold;
        }
        if self.strict {
            config.policy = Policy::Strict;
        }
        config
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<standoff::ScriptError> for CliError {
    fn from(e: standoff::ScriptError) -> Self {
        Self::new(e.to_string())
    }
}
