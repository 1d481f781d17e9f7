//! Player stat counters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseStatKindError;

/// The four player stats.
///
/// Script JSON names stats in exact lowercase (`"power"`); parsing from
/// text with [`FromStr`] ignores ASCII case (`"Power"` works too).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    /// Money held.
    Money,
    /// Health remaining.
    Health,
    /// Combat power. The only stat the opponent watches.
    Power,
    /// Crime level. Gates whether the engagement can be passed.
    Crime,
}

impl StatKind {
    /// Every kind, in display order.
    pub const ALL: [Self; 4] = [Self::Money, Self::Health, Self::Power, Self::Crime];

    /// Position of this kind in [`StatKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Money => 0,
            Self::Health => 1,
            Self::Power => 2,
            Self::Crime => 3,
        }
    }

    /// Capitalised name used in rendered labels.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Money => "Money",
            Self::Health => "Health",
            Self::Power => "Power",
            Self::Crime => "Crime",
        }
    }

    /// Lowercase identifier used by scripts and the command line.
    #[must_use]
    pub const fn ident(self) -> &'static str {
        match self {
            Self::Money => "money",
            Self::Health => "health",
            Self::Power => "power",
            Self::Crime => "crime",
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatKind {
    type Err = ParseStatKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.ident().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseStatKindError {
                input: s.to_string(),
            })
    }
}

/// Receiver of power stat changes.
pub trait PowerObserver {
    /// Called with the new value each time an attached power stat changes.
    fn on_player_power_changed(&mut self, value: i64);
}

/// The new value of a stat after an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatChange {
    /// Which stat changed.
    pub kind: StatKind,
    /// Value after the change.
    pub value: i64,
}

/// A single named player counter.
///
/// Values are unbounded in the domain sense: they may go negative and have no
/// ceiling. Arithmetic saturates only at the limits of `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerStat {
    kind: StatKind,
    value: i64,
    attached: bool,
}

impl PlayerStat {
    /// Create a detached stat with value 0.
    #[must_use]
    pub fn new(kind: StatKind) -> Self {
        Self {
            kind,
            value: 0,
            attached: false,
        }
    }

    /// Kind of this stat.
    #[must_use]
    pub fn kind(&self) -> StatKind {
        self.kind
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Whether changes are pushed to an observer.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Start pushing changes to the observer handed to [`PlayerStat::adjust`].
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Stop pushing changes.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Add `delta` to the value.
    ///
    /// If this is an attached power stat, `observer` receives the new value.
    pub fn adjust(&mut self, delta: i64, observer: &mut dyn PowerObserver) -> StatChange {
        self.value = self.value.saturating_add(delta);
        tracing::debug!(stat = %self.kind, delta, value = self.value, "stat adjusted");

        if self.kind == StatKind::Power && self.attached {
            observer.on_player_power_changed(self.value);
        }

        StatChange {
            kind: self.kind,
            value: self.value,
        }
    }

    /// Add one.
    pub fn increase(&mut self, observer: &mut dyn PowerObserver) -> StatChange {
        self.adjust(1, observer)
    }

    /// Subtract one.
    pub fn decrease(&mut self, observer: &mut dyn PowerObserver) -> StatChange {
        self.adjust(-1, observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every notification it receives.
    #[derive(Debug, Default)]
    struct Recorder {
        seen: Vec<i64>,
    }

    impl PowerObserver for Recorder {
        fn on_player_power_changed(&mut self, value: i64) {
            self.seen.push(value);
        }
    }

    #[test]
    fn test_stat_starts_at_zero() {
        for kind in StatKind::ALL {
            let stat = PlayerStat::new(kind);
            assert_eq!(stat.kind(), kind);
            assert_eq!(stat.value(), 0);
            assert!(!stat.is_attached());
        }
    }

    #[test]
    fn test_copied_stat_is_independent() {
        let mut recorder = Recorder::default();
        let mut money = PlayerStat::new(StatKind::Money);
        let snapshot = money;

        money.increase(&mut recorder);
        assert_eq!(money.value(), 1);
        assert_eq!(snapshot.value(), 0);
    }

    #[test]
    fn test_adjust_sums_deltas() {
        let mut recorder = Recorder::default();
        let mut power = PlayerStat::new(StatKind::Power);

        power.increase(&mut recorder);
        power.increase(&mut recorder);
        power.increase(&mut recorder);
        let change = power.decrease(&mut recorder);

        assert_eq!(change.value, 2);
        assert_eq!(power.value(), 2);
    }

    #[test]
    fn test_value_may_go_negative() {
        let mut recorder = Recorder::default();
        let mut money = PlayerStat::new(StatKind::Money);

        money.decrease(&mut recorder);
        money.adjust(-5, &mut recorder);

        assert_eq!(money.value(), -6);
    }

    #[test]
    fn test_attached_power_notifies() {
        let mut recorder = Recorder::default();
        let mut power = PlayerStat::new(StatKind::Power);
        power.attach();

        power.increase(&mut recorder);
        power.adjust(4, &mut recorder);

        assert_eq!(recorder.seen, vec![1, 5]);
    }

    #[test]
    fn test_other_kinds_never_notify() {
        let mut recorder = Recorder::default();
        for kind in [StatKind::Money, StatKind::Health, StatKind::Crime] {
            let mut stat = PlayerStat::new(kind);
            stat.attach();
            stat.adjust(3, &mut recorder);
        }
        assert!(recorder.seen.is_empty());
    }

    #[test]
    fn test_detached_power_is_silent() {
        let mut recorder = Recorder::default();
        let mut power = PlayerStat::new(StatKind::Power);
        power.attach();
        power.increase(&mut recorder);
        power.detach();
        power.increase(&mut recorder);

        assert_eq!(recorder.seen, vec![1]);
        assert_eq!(power.value(), 2);
    }

    #[test]
    fn test_double_attach_notifies_once() {
        let mut recorder = Recorder::default();
        let mut power = PlayerStat::new(StatKind::Power);
        power.attach();
        power.attach();
        power.increase(&mut recorder);

        assert_eq!(recorder.seen, vec![1]);
    }

    #[test]
    fn test_parse_stat_kind() {
        assert_eq!("power".parse::<StatKind>(), Ok(StatKind::Power));
        assert_eq!("CRIME".parse::<StatKind>(), Ok(StatKind::Crime));
        assert!("luck".parse::<StatKind>().is_err());

        // JSON names are exact
        assert!(serde_json::from_str::<StatKind>(r#""crime""#).is_ok());
        assert!(serde_json::from_str::<StatKind>(r#""CRIME""#).is_err());
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, kind) in StatKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
