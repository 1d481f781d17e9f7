//! The opponent and its derived power.

use crate::encounter::PowerObserver;

/// Baseline power every opponent starts with.
pub const DEFAULT_BASE_POWER: i64 = 10;

/// The opponent faced in an encounter.
///
/// Effective power is the fixed base plus the last player power it observed,
/// so a stronger player always meets a stronger opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opponent {
    name: String,
    base_power: i64,
    observed_power: i64,
}

impl Opponent {
    /// Create an opponent with [`DEFAULT_BASE_POWER`].
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_base_power(name, DEFAULT_BASE_POWER)
    }

    /// Create an opponent with a custom base power.
    #[must_use]
    pub fn with_base_power(name: impl Into<String>, base_power: i64) -> Self {
        Self {
            name: name.into(),
            base_power,
            observed_power: 0,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fixed baseline.
    #[must_use]
    pub fn base_power(&self) -> i64 {
        self.base_power
    }

    /// Last player power pushed to this opponent.
    #[must_use]
    pub fn observed_power(&self) -> i64 {
        self.observed_power
    }

    /// Base plus observed player power.
    #[must_use]
    pub fn effective_power(&self) -> i64 {
        self.base_power.saturating_add(self.observed_power)
    }
}

impl PowerObserver for Opponent {
    fn on_player_power_changed(&mut self, value: i64) {
        self.observed_power = value;
        tracing::debug!(
            opponent = %self.name,
            observed = value,
            effective = self.effective_power(),
            "opponent power updated"
        );
    }
}
