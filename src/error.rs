//! Error types for encounters and scripts.

use std::fmt;

use crate::encounter::Presentation;

/// Player-facing action that an encounter can refuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatedAction {
    /// Skipping the engagement.
    Pass,
    /// Engaging the opponent.
    Fight,
}

impl fmt::Display for GatedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Fight => write!(f, "fight"),
        }
    }
}

/// Errors raised by an encounter running under the strict policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterError {
    /// The action is not offered in the current presentation state.
    InvalidState {
        /// The refused action.
        action: GatedAction,
        /// What the encounter was presenting at the time.
        presentation: Presentation,
    },
}

impl fmt::Display for EncounterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidState {
                action,
                presentation,
            } => write!(f, "cannot {action} while presenting {presentation}"),
        }
    }
}

impl std::error::Error for EncounterError {}

/// Result type for gated encounter operations.
pub type EncounterResult<T> = Result<T, EncounterError>;

/// A stat name that is not one of money, health, power or crime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatKindError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for ParseStatKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown stat '{}' (expected money, health, power or crime)",
            self.input
        )
    }
}

impl std::error::Error for ParseStatKindError {}

/// Failure to parse a command line such as `inc power` or `adjust crime -2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseActionError {
    /// The line was blank.
    Empty,
    /// The verb is not recognised.
    UnknownCommand(String),
    /// The verb needs a stat name and none was given.
    MissingStat,
    /// The stat name is invalid.
    Stat(ParseStatKindError),
    /// `adjust` needs a delta and none was given.
    MissingDelta,
    /// The delta is not an integer.
    InvalidDelta(String),
    /// Extra words after a complete command.
    TrailingInput(String),
}

impl fmt::Display for ParseActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::UnknownCommand(verb) => write!(f, "unknown command '{verb}'"),
            Self::MissingStat => write!(f, "missing stat name"),
            Self::Stat(e) => write!(f, "{e}"),
            Self::MissingDelta => write!(f, "missing delta"),
            Self::InvalidDelta(raw) => write!(f, "invalid delta '{raw}'"),
            Self::TrailingInput(rest) => write!(f, "unexpected input '{rest}'"),
        }
    }
}

impl std::error::Error for ParseActionError {}

impl From<ParseStatKindError> for ParseActionError {
    fn from(e: ParseStatKindError) -> Self {
        Self::Stat(e)
    }
}

/// Errors from loading, saving or replaying a script.
#[derive(Debug)]
pub enum ScriptError {
    /// Reading or writing the script file failed.
    Io(std::io::Error),
    /// The script is not valid JSON for the expected shape.
    Json(serde_json::Error),
    /// An action was refused during replay.
    Rejected {
        /// Zero-based index of the refused action.
        index: usize,
        /// Why it was refused.
        error: EncounterError,
    },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "script I/O failed: {e}"),
            Self::Json(e) => write!(f, "invalid script: {e}"),
            Self::Rejected { index, error } => {
                write!(f, "action {index} rejected: {error}")
            }
        }
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Rejected { error, .. } => Some(error),
        }
    }
}

impl From<std::io::Error> for ScriptError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
