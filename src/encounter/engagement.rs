//! Engagement rules: when a fight may be skipped and who wins it.
//!
//! Passing is offered only while the player's crime stat is at or below the
//! threshold. Once passed, the encounter stays passed.

use std::fmt;

use serde::Serialize;

/// Highest crime value at which passing is still offered.
pub const DEFAULT_PASS_THRESHOLD: i64 = 3;

/// Engagement lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementState {
    /// Nothing decided yet.
    Idle,
    /// The engagement was skipped. Terminal.
    Passed,
}

/// Result of a fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Player power met or beat the opponent.
    Victory,
    /// Opponent was stronger.
    Defeat,
}

/// Which engagement choice the presentation layer should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Presentation {
    /// Offer pass, hide fight.
    ShowPass,
    /// Offer fight, hide pass.
    ShowFight,
    /// Offer nothing; the encounter was passed.
    ShowNeither,
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShowPass => write!(f, "show-pass"),
            Self::ShowFight => write!(f, "show-fight"),
            Self::ShowNeither => write!(f, "show-neither"),
        }
    }
}

/// Resolve a fight. Ties go to the player.
#[must_use]
pub fn resolve_fight(player_power: i64, opponent_power: i64) -> Outcome {
    if player_power >= opponent_power {
        Outcome::Victory
    } else {
        Outcome::Defeat
    }
}

/// Tracks whether the engagement was passed and answers legality queries.
///
/// The controller owns no stat data. Callers hand it the current crime value
/// on each query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementController {
    has_passed: bool,
    pass_threshold: i64,
}

impl Default for EngagementController {
    fn default() -> Self {
        Self::new(DEFAULT_PASS_THRESHOLD)
    }
}

impl EngagementController {
    /// Create an idle controller with the given crime threshold.
    #[must_use]
    pub fn new(pass_threshold: i64) -> Self {
        Self {
            has_passed: false,
            pass_threshold,
        }
    }

    /// Crime threshold for passing.
    #[must_use]
    pub fn pass_threshold(&self) -> i64 {
        self.pass_threshold
    }

    /// Whether [`EngagementController::pass`] has been called.
    #[must_use]
    pub fn has_passed(&self) -> bool {
        self.has_passed
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> EngagementState {
        if self.has_passed {
            EngagementState::Passed
        } else {
            EngagementState::Idle
        }
    }

    /// Passing is offered iff `crime` is at or below the threshold.
    #[must_use]
    pub fn can_offer_pass(&self, crime: i64) -> bool {
        crime <= self.pass_threshold
    }

    /// Enter the terminal passed state.
    ///
    /// Performs no legality check; see [`crate::encounter::Policy`] for
    /// the gated variant.
    pub fn pass(&mut self) {
        self.has_passed = true;
    }

    /// See [`resolve_fight`].
    #[must_use]
    pub fn resolve_fight(player_power: i64, opponent_power: i64) -> Outcome {
        resolve_fight(player_power, opponent_power)
    }

    /// Which choice to offer for the given crime value.
    #[must_use]
    pub fn presentation_state(&self, crime: i64) -> Presentation {
        if self.has_passed {
            Presentation::ShowNeither
        } else if self.can_offer_pass(crime) {
            Presentation::ShowPass
        } else {
            Presentation::ShowFight
        }
    }
}

/// Kani formal verification proofs.
///
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    use super::{Outcome, resolve_fight};

    /// A tie never ends in defeat.
    #[kani::proof]
    fn prove_tie_favors_player() {
        let power: i64 = kani::any();
        assert!(resolve_fight(power, power) == Outcome::Victory);
    }

    /// Swapping strictly unequal powers swaps the outcome.
    #[kani::proof]
    fn prove_strict_inequality_is_antisymmetric() {
        let a: i64 = kani::any();
        let b: i64 = kani::any();
        kani::assume(a != b);
        assert!(resolve_fight(a, b) != resolve_fight(b, a));
    }
}
