//! Encounter scripts.
//!
//! Encounters are deterministic, so a script needs only:
//! - `config: EncounterConfig` - opponent and gating settings
//! - `actions: Vec<Action>` - the player's inputs in order
//!
//! Replaying a script re-runs the actions from a fresh encounter and records
//! the event each one produced.
//!
//! # Format
//!
//! ```json
//! {
//!   "config": { "opponent_name": "Enemy Flappy", "policy": "strict" },
//!   "actions": [
//!     { "action": "adjust", "stat": "crime", "delta": 4 },
//!     { "action": "increase", "stat": "power" },
//!     { "action": "fight" }
//!   ]
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::encounter::{Encounter, EncounterConfig, EncounterSnapshot, Event, StatKind};
use crate::error::{ParseActionError, ScriptError};

/// A single player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Add an arbitrary delta to a stat.
    Adjust {
        /// Target stat.
        stat: StatKind,
        /// Amount to add; may be negative.
        delta: i64,
    },
    /// Add one to a stat.
    Increase {
        /// Target stat.
        stat: StatKind,
    },
    /// Subtract one from a stat.
    Decrease {
        /// Target stat.
        stat: StatKind,
    },
    /// Skip the engagement.
    Pass,
    /// Fight the opponent.
    Fight,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adjust { stat, delta } => write!(f, "adjust {} {delta}", stat.ident()),
            Self::Increase { stat } => write!(f, "inc {}", stat.ident()),
            Self::Decrease { stat } => write!(f, "dec {}", stat.ident()),
            Self::Pass => write!(f, "pass"),
            Self::Fight => write!(f, "fight"),
        }
    }
}

impl FromStr for Action {
    type Err = ParseActionError;

    /// Parse the command-line form: `inc power`, `dec crime`,
    /// `adjust money -3`, `pass`, `fight`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words.next().ok_or(ParseActionError::Empty)?;

        let action = match verb.to_ascii_lowercase().as_str() {
            "inc" | "increase" | "+" => Self::Increase {
                stat: next_stat(&mut words)?,
            },
            "dec" | "decrease" | "-" => Self::Decrease {
                stat: next_stat(&mut words)?,
            },
            "adjust" => {
                let stat = next_stat(&mut words)?;
                let raw = words.next().ok_or(ParseActionError::MissingDelta)?;
                let delta = raw
                    .parse()
                    .map_err(|_| ParseActionError::InvalidDelta(raw.to_string()))?;
                Self::Adjust { stat, delta }
            }
            "pass" => Self::Pass,
            "fight" => Self::Fight,
            _ => return Err(ParseActionError::UnknownCommand(verb.to_string())),
        };

        let rest: Vec<&str> = words.collect();
        if rest.is_empty() {
            Ok(action)
        } else {
            Err(ParseActionError::TrailingInput(rest.join(" ")))
        }
    }
}

fn next_stat<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<StatKind, ParseActionError> {
    Ok(words.next().ok_or(ParseActionError::MissingStat)?.parse()?)
}

/// A replayable encounter: configuration plus ordered actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Encounter configuration.
    #[serde(default)]
    pub config: EncounterConfig,
    /// Actions in the order they were taken.
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// One replayed action and what it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    /// The action taken.
    pub action: Action,
    /// The resulting event.
    pub event: Event,
}

/// Result of replaying a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transcript {
    /// Every action with its event, in order.
    pub entries: Vec<TranscriptEntry>,
    /// Encounter state after the last action.
    pub final_state: EncounterSnapshot,
}

impl Script {
    /// Create a script with no actions.
    #[must_use]
    pub fn new(config: EncounterConfig) -> Self {
        Self {
            config,
            actions: Vec::new(),
        }
    }

    /// Append an action.
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Parse a script from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Json`] if the text is not a valid script.
    pub fn from_json(text: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ScriptError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a script from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Save the script to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), ScriptError> {
        let mut text = self.to_json()?;
        text.push('\n');
        fs::write(path, text)?;
        Ok(())
    }

    /// Run every action against a fresh encounter.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Rejected`] for the first action the encounter
    /// refuses.
    pub fn replay(&self) -> Result<Transcript, ScriptError> {
        let mut encounter = Encounter::new(&self.config);
        let mut entries = Vec::with_capacity(self.actions.len());

        for (index, &action) in self.actions.iter().enumerate() {
            let event = encounter
                .apply(action)
                .map_err(|error| ScriptError::Rejected { index, error })?;
            entries.push(TranscriptEntry { action, event });
        }

        tracing::debug!(actions = entries.len(), "script replayed");

        Ok(Transcript {
            entries,
            final_state: encounter.snapshot(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounter::{Outcome, Policy, Presentation};

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            "inc power".parse::<Action>(),
            Ok(Action::Increase {
                stat: StatKind::Power
            })
        );
        assert_eq!(
            "  dec   Crime ".parse::<Action>(),
            Ok(Action::Decrease {
                stat: StatKind::Crime
            })
        );
        assert_eq!(
            "adjust money -3".parse::<Action>(),
            Ok(Action::Adjust {
                stat: StatKind::Money,
                delta: -3
            })
        );
        assert_eq!("pass".parse::<Action>(), Ok(Action::Pass));
        assert_eq!("FIGHT".parse::<Action>(), Ok(Action::Fight));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Action>(), Err(ParseActionError::Empty));
        assert_eq!("inc".parse::<Action>(), Err(ParseActionError::MissingStat));
        assert!(matches!(
            "inc luck".parse::<Action>(),
            Err(ParseActionError::Stat(_))
        ));
        assert_eq!(
            "adjust power".parse::<Action>(),
            Err(ParseActionError::MissingDelta)
        );
        assert_eq!(
            "adjust power lots".parse::<Action>(),
            Err(ParseActionError::InvalidDelta("lots".to_string()))
        );
        assert_eq!(
            "dance".parse::<Action>(),
            Err(ParseActionError::UnknownCommand("dance".to_string()))
        );
        assert_eq!(
            "pass now please".parse::<Action>(),
            Err(ParseActionError::TrailingInput("now please".to_string()))
        );
    }

    #[test]
    fn test_display_parses_back() {
        let actions = [
            Action::Adjust {
                stat: StatKind::Health,
                delta: -12,
            },
            Action::Increase {
                stat: StatKind::Money,
            },
            Action::Pass,
        ];
        for action in actions {
            assert_eq!(action.to_string().parse::<Action>(), Ok(action));
        }
    }

    #[test]
    fn test_from_json_defaults_config() {
        let script = Script::from_json(r#"{"actions":[{"action":"fight"}]}"#).unwrap();
        assert_eq!(script.config, EncounterConfig::default());
        assert_eq!(script.actions, vec![Action::Fight]);
    }

    #[test]
    fn test_from_json_partial_config() {
        let script = Script::from_json(
            r#"{"config":{"policy":"strict","opponent_base_power":3},"actions":[]}"#,
        )
        .unwrap();
        assert_eq!(script.config.policy, Policy::Strict);
        assert_eq!(script.config.opponent_base_power, 3);
        assert_eq!(script.config.pass_threshold, 3);
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        let misspelled = Script::from_json(r#"{"config":{"polcy":"strict"},"actions":[]}"#);
        assert!(matches!(misspelled, Err(ScriptError::Json(_))));

        let extra = Script::from_json(r#"{"config":{},"actions":[],"seed":7}"#);
        assert!(matches!(extra, Err(ScriptError::Json(_))));
    }

    #[test]
    fn test_from_json_rejects_unknown_stat() {
        let result = Script::from_json(r#"{"actions":[{"action":"increase","stat":"luck"}]}"#);
        assert!(matches!(result, Err(ScriptError::Json(_))));
    }

    #[test]
    fn test_replay_end_to_end() {
        let mut script = Script::default();
        script.push(Action::Adjust {
            stat: StatKind::Crime,
            delta: 4,
        });
        script.push(Action::Adjust {
            stat: StatKind::Power,
            delta: 10,
        });
        script.push(Action::Fight);

        let transcript = script.replay().unwrap();
        assert_eq!(transcript.entries.len(), 3);
        assert_eq!(transcript.final_state.presentation, Presentation::ShowFight);
        assert_eq!(transcript.final_state.opponent_power, 20);

        let Event::Fought(report) = transcript.entries[2].event else {
            panic!("expected a fight event");
        };
        assert_eq!(report.outcome, Outcome::Defeat);
    }

    #[test]
    fn test_replay_reports_rejected_index() {
        let mut script = Script::new(EncounterConfig {
            policy: Policy::Strict,
            ..EncounterConfig::default()
        });
        script.push(Action::Pass);
        script.push(Action::Fight);

        match script.replay() {
            Err(ScriptError::Rejected { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}
