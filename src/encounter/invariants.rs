//! Encounter invariants - sanity checks that detect bugs.
//!
//! These should never trigger for an encounter driven only through its public
//! operations. Tests and the fuzz target call them after every action.

use crate::encounter::{Encounter, Presentation, StatKind};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all encounter invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(encounter: &Encounter) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let opponent = encounter.opponent();
    let power = encounter.stat(StatKind::Power);

    // Observed power lags nothing while the power stat is attached
    if power.is_attached() && opponent.observed_power() != power.value() {
        violations.push(InvariantViolation {
            message: format!(
                "Opponent observed power {} != player power {}",
                opponent.observed_power(),
                power.value()
            ),
        });
    }

    let expected = opponent
        .base_power()
        .saturating_add(opponent.observed_power());
    if opponent.effective_power() != expected {
        violations.push(InvariantViolation {
            message: format!(
                "Opponent effective power {} != base {} + observed {}",
                opponent.effective_power(),
                opponent.base_power(),
                opponent.observed_power()
            ),
        });
    }

    let presentation = encounter.presentation();
    if encounter.controller().has_passed() && presentation != Presentation::ShowNeither {
        violations.push(InvariantViolation {
            message: format!("Passed encounter presents {presentation}"),
        });
    }

    for kind in StatKind::ALL {
        if encounter.stat(kind).kind() != kind {
            violations.push(InvariantViolation {
                message: format!(
                    "Stat slot {kind} holds {}",
                    encounter.stat(kind).kind()
                ),
            });
        }
    }

    violations
}
