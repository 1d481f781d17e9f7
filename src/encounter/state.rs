//! Encounter state management.

use serde::{Deserialize, Serialize};

use crate::encounter::{
    DEFAULT_BASE_POWER, DEFAULT_PASS_THRESHOLD, EngagementController, EngagementState, Message,
    Opponent, Outcome, PlayerStat, Presentation, StatChange, StatKind, Verdict,
};
use crate::error::{EncounterError, EncounterResult, GatedAction};
use crate::script::Action;

/// Name given to the opponent when none is configured.
pub const DEFAULT_OPPONENT_NAME: &str = "Enemy Flappy";

/// How strictly an encounter guards pass and fight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Pass and fight are always accepted; the caller is trusted to gate them.
    #[default]
    Permissive,
    /// Pass requires [`Presentation::ShowPass`] and fight requires
    /// [`Presentation::ShowFight`].
    Strict,
}

/// Encounter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncounterConfig {
    /// Opponent display name.
    pub opponent_name: String,
    /// Opponent power before any player power is observed.
    pub opponent_base_power: i64,
    /// Highest crime value at which passing is offered.
    pub pass_threshold: i64,
    /// Guarding policy for pass and fight.
    pub policy: Policy,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            opponent_name: DEFAULT_OPPONENT_NAME.to_string(),
            opponent_base_power: DEFAULT_BASE_POWER,
            pass_threshold: DEFAULT_PASS_THRESHOLD,
            policy: Policy::Permissive,
        }
    }
}

/// A stat change together with the opponent power it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatUpdate {
    /// The changed stat.
    #[serde(flatten)]
    pub change: StatChange,
    /// Opponent effective power after the change.
    pub opponent_power: i64,
}

/// The powers compared in a fight and its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FightReport {
    /// Player power stat at the time of the fight.
    pub player_power: i64,
    /// Opponent effective power at the time of the fight.
    pub opponent_power: i64,
    /// Who won.
    pub outcome: Outcome,
}

/// Outbound notification produced by an encounter action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A stat was adjusted.
    StatChanged(StatUpdate),
    /// The engagement was passed.
    Passed,
    /// A fight was resolved.
    Fought(FightReport),
}

impl Event {
    /// Verdict to display, if this event ends in one.
    #[must_use]
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Self::StatChanged(_) => None,
            Self::Passed => Some(Verdict::Passed),
            Self::Fought(report) => Some(report.outcome.into()),
        }
    }
}

/// Read-only view of an encounter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncounterSnapshot {
    /// Money stat.
    pub money: i64,
    /// Health stat.
    pub health: i64,
    /// Power stat.
    pub power: i64,
    /// Crime stat.
    pub crime: i64,
    /// Opponent display name.
    pub opponent_name: String,
    /// Opponent effective power.
    pub opponent_power: i64,
    /// Engagement lifecycle state.
    pub state: EngagementState,
    /// Which choice is currently offered.
    pub presentation: Presentation,
}

/// One encounter: four player stats, an opponent and the engagement.
///
/// Every stat is attached to the opponent on creation and detached when the
/// encounter is dropped.
#[derive(Debug)]
pub struct Encounter {
    stats: [PlayerStat; 4],
    opponent: Opponent,
    controller: EngagementController,
    policy: Policy,
}

impl Default for Encounter {
    fn default() -> Self {
        Self::new(&EncounterConfig::default())
    }
}

impl Encounter {
    /// Start a fresh encounter with every stat at 0.
    #[must_use]
    pub fn new(config: &EncounterConfig) -> Self {
        let opponent =
            Opponent::with_base_power(config.opponent_name.clone(), config.opponent_base_power);
        let stats = StatKind::ALL.map(|kind| {
            let mut stat = PlayerStat::new(kind);
            stat.attach();
            stat
        });

        tracing::debug!(
            opponent = %opponent.name(),
            base_power = opponent.base_power(),
            policy = ?config.policy,
            "encounter started"
        );

        Self {
            stats,
            opponent,
            controller: EngagementController::new(config.pass_threshold),
            policy: config.policy,
        }
    }

    /// The stat of the given kind.
    #[must_use]
    pub fn stat(&self, kind: StatKind) -> &PlayerStat {
        &self.stats[kind.index()]
    }

    /// Current value of a stat.
    #[must_use]
    pub fn value(&self, kind: StatKind) -> i64 {
        self.stat(kind).value()
    }

    /// The opponent.
    #[must_use]
    pub fn opponent(&self) -> &Opponent {
        &self.opponent
    }

    /// The engagement controller.
    #[must_use]
    pub fn controller(&self) -> &EngagementController {
        &self.controller
    }

    /// Guarding policy in force.
    #[must_use]
    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Add `delta` to a stat and push power changes to the opponent.
    pub fn adjust(&mut self, kind: StatKind, delta: i64) -> StatUpdate {
        let change = self.stats[kind.index()].adjust(delta, &mut self.opponent);
        StatUpdate {
            change,
            opponent_power: self.opponent.effective_power(),
        }
    }

    /// Add one to a stat.
    pub fn increase(&mut self, kind: StatKind) -> StatUpdate {
        self.adjust(kind, 1)
    }

    /// Subtract one from a stat.
    pub fn decrease(&mut self, kind: StatKind) -> StatUpdate {
        self.adjust(kind, -1)
    }

    /// Whether passing is offered at the current crime level.
    #[must_use]
    pub fn can_offer_pass(&self) -> bool {
        self.controller.can_offer_pass(self.value(StatKind::Crime))
    }

    /// Which choice to offer right now.
    #[must_use]
    pub fn presentation(&self) -> Presentation {
        self.controller
            .presentation_state(self.value(StatKind::Crime))
    }

    /// Skip the engagement.
    ///
    /// # Errors
    ///
    /// Under [`Policy::Strict`], returns [`EncounterError::InvalidState`]
    /// unless passing is currently offered.
    pub fn pass(&mut self) -> EncounterResult<()> {
        self.gate(GatedAction::Pass, Presentation::ShowPass)?;
        self.controller.pass();

        let message = Message::for_verdict(Verdict::Passed);
        tracing::info!(color = %message.color.hex(), "{message}");
        Ok(())
    }

    /// Fight the opponent with the current power stat.
    ///
    /// # Errors
    ///
    /// Under [`Policy::Strict`], returns [`EncounterError::InvalidState`]
    /// unless fighting is currently offered.
    pub fn fight(&self) -> EncounterResult<FightReport> {
        self.gate(GatedAction::Fight, Presentation::ShowFight)?;

        let player_power = self.value(StatKind::Power);
        let opponent_power = self.opponent.effective_power();
        let outcome = EngagementController::resolve_fight(player_power, opponent_power);

        let message = Message::for_verdict(outcome.into());
        tracing::info!(
            player_power,
            opponent_power,
            color = %message.color.hex(),
            "{message}"
        );

        Ok(FightReport {
            player_power,
            opponent_power,
            outcome,
        })
    }

    /// Run one action.
    ///
    /// # Errors
    ///
    /// Propagates refusals from [`Encounter::pass`] and [`Encounter::fight`].
    pub fn apply(&mut self, action: Action) -> EncounterResult<Event> {
        match action {
            Action::Adjust { stat, delta } => Ok(Event::StatChanged(self.adjust(stat, delta))),
            Action::Increase { stat } => Ok(Event::StatChanged(self.increase(stat))),
            Action::Decrease { stat } => Ok(Event::StatChanged(self.decrease(stat))),
            Action::Pass => self.pass().map(|()| Event::Passed),
            Action::Fight => self.fight().map(Event::Fought),
        }
    }

    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> EncounterSnapshot {
        EncounterSnapshot {
            money: self.value(StatKind::Money),
            health: self.value(StatKind::Health),
            power: self.value(StatKind::Power),
            crime: self.value(StatKind::Crime),
            opponent_name: self.opponent.name().to_string(),
            opponent_power: self.opponent.effective_power(),
            state: self.controller.state(),
            presentation: self.presentation(),
        }
    }

    fn gate(&self, action: GatedAction, required: Presentation) -> EncounterResult<()> {
        if self.policy == Policy::Permissive {
            return Ok(());
        }

        let presentation = self.presentation();
        if presentation == required {
            Ok(())
        } else {
            tracing::warn!(%action, %presentation, "action refused");
            Err(EncounterError::InvalidState {
                action,
                presentation,
            })
        }
    }
}

impl Drop for Encounter {
    fn drop(&mut self) {
        for stat in &mut self.stats {
            stat.detach();
        }
        tracing::debug!(opponent = %self.opponent.name(), "encounter ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict() -> Encounter {
        Encounter::new(&EncounterConfig {
            policy: Policy::Strict,
            ..EncounterConfig::default()
        })
    }

    #[test]
    fn test_new_encounter() {
        let encounter = Encounter::default();
        for kind in StatKind::ALL {
            assert_eq!(encounter.value(kind), 0);
            assert!(encounter.stat(kind).is_attached());
        }
        assert_eq!(encounter.opponent().name(), DEFAULT_OPPONENT_NAME);
        assert_eq!(encounter.opponent().effective_power(), 10);
        assert_eq!(encounter.presentation(), Presentation::ShowPass);
        assert_eq!(encounter.policy(), Policy::Permissive);
    }

    #[test]
    fn test_power_drives_opponent() {
        let mut encounter = Encounter::default();
        for _ in 0..5 {
            encounter.increase(StatKind::Power);
        }
        assert_eq!(encounter.opponent().observed_power(), 5);
        assert_eq!(encounter.opponent().effective_power(), 15);

        let update = encounter.decrease(StatKind::Power);
        assert_eq!(update.change.value, 4);
        assert_eq!(update.opponent_power, 14);
    }

    #[test]
    fn test_other_stats_leave_opponent_alone() {
        let mut encounter = Encounter::default();
        encounter.adjust(StatKind::Money, 7);
        encounter.adjust(StatKind::Health, -2);
        let update = encounter.adjust(StatKind::Crime, 4);

        assert_eq!(update.opponent_power, 10);
        assert_eq!(encounter.opponent().observed_power(), 0);
    }

    #[test]
    fn test_crime_flips_presentation() {
        let mut encounter = Encounter::default();
        encounter.adjust(StatKind::Crime, 3);
        assert!(encounter.can_offer_pass());
        assert_eq!(encounter.presentation(), Presentation::ShowPass);

        encounter.increase(StatKind::Crime);
        assert!(!encounter.can_offer_pass());
        assert_eq!(encounter.presentation(), Presentation::ShowFight);

        encounter.decrease(StatKind::Crime);
        assert_eq!(encounter.presentation(), Presentation::ShowPass);
    }

    #[test]
    fn test_end_to_end_defeat() {
        let mut encounter = Encounter::default();
        encounter.adjust(StatKind::Crime, 4);
        assert_eq!(encounter.presentation(), Presentation::ShowFight);

        encounter.adjust(StatKind::Power, 10);
        assert_eq!(encounter.opponent().effective_power(), 20);

        let report = encounter.fight().unwrap();
        assert_eq!(report.player_power, 10);
        assert_eq!(report.opponent_power, 20);
        assert_eq!(report.outcome, Outcome::Defeat);
    }

    #[test]
    fn test_weak_opponent_loses() {
        let mut encounter = Encounter::new(&EncounterConfig {
            opponent_base_power: -1,
            ..EncounterConfig::default()
        });
        encounter.adjust(StatKind::Power, 3);
        let report = encounter.fight().unwrap();
        assert_eq!(report.opponent_power, 2);
        assert_eq!(report.outcome, Outcome::Victory);
    }

    #[test]
    fn test_zero_base_power_ties_in_player_favor() {
        let mut encounter = Encounter::new(&EncounterConfig {
            opponent_base_power: 0,
            ..EncounterConfig::default()
        });
        encounter.adjust(StatKind::Power, 6);
        assert_eq!(encounter.fight().unwrap().outcome, Outcome::Victory);
    }

    #[test]
    fn test_permissive_allows_everything() {
        let mut encounter = Encounter::default();
        encounter.adjust(StatKind::Crime, 9);
        encounter.pass().unwrap();
        encounter.pass().unwrap();
        assert_eq!(encounter.controller().state(), EngagementState::Passed);
        assert_eq!(encounter.presentation(), Presentation::ShowNeither);

        assert!(encounter.fight().is_ok());
    }

    #[test]
    fn test_passed_stays_passed_after_stat_changes() {
        let mut encounter = Encounter::default();
        encounter.pass().unwrap();
        encounter.adjust(StatKind::Crime, 10);
        encounter.adjust(StatKind::Crime, -20);
        assert_eq!(encounter.presentation(), Presentation::ShowNeither);
    }

    #[test]
    fn test_strict_rejects_pass_above_threshold() {
        let mut encounter = strict();
        encounter.adjust(StatKind::Crime, 4);
        assert_eq!(
            encounter.pass(),
            Err(EncounterError::InvalidState {
                action: GatedAction::Pass,
                presentation: Presentation::ShowFight,
            })
        );
        assert!(!encounter.controller().has_passed());
    }

    #[test]
    fn test_strict_rejects_fight_after_pass() {
        let mut encounter = strict();
        encounter.pass().unwrap();
        assert_eq!(
            encounter.fight(),
            Err(EncounterError::InvalidState {
                action: GatedAction::Fight,
                presentation: Presentation::ShowNeither,
            })
        );
        assert!(encounter.pass().is_err());
    }

    #[test]
    fn test_strict_rejects_fight_while_pass_offered() {
        let encounter = strict();
        assert!(encounter.fight().is_err());
    }

    #[test]
    fn test_apply_events() {
        let mut encounter = Encounter::default();
        let event = encounter
            .apply(Action::Increase {
                stat: StatKind::Power,
            })
            .unwrap();
        assert_eq!(
            event,
            Event::StatChanged(StatUpdate {
                change: StatChange {
                    kind: StatKind::Power,
                    value: 1,
                },
                opponent_power: 11,
            })
        );
        assert_eq!(event.verdict(), None);

        let event = encounter.apply(Action::Fight).unwrap();
        assert_eq!(event.verdict(), Some(Verdict::Defeat));

        let event = encounter.apply(Action::Pass).unwrap();
        assert_eq!(event, Event::Passed);
        assert_eq!(event.verdict(), Some(Verdict::Passed));
    }

    #[test]
    fn test_snapshot() {
        let mut encounter = Encounter::default();
        encounter.adjust(StatKind::Money, 2);
        encounter.adjust(StatKind::Health, 3);
        encounter.adjust(StatKind::Power, 4);
        encounter.adjust(StatKind::Crime, 5);

        let snapshot = encounter.snapshot();
        assert_eq!(snapshot.money, 2);
        assert_eq!(snapshot.health, 3);
        assert_eq!(snapshot.power, 4);
        assert_eq!(snapshot.crime, 5);
        assert_eq!(snapshot.opponent_power, 14);
        assert_eq!(snapshot.state, EngagementState::Idle);
        assert_eq!(snapshot.presentation, Presentation::ShowFight);
    }

    #[test]
    fn test_event_json_shape() {
        let event = Event::Fought(FightReport {
            player_power: 1,
            opponent_power: 11,
            outcome: Outcome::Defeat,
        });
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["event"], "fought");
        assert_eq!(json["outcome"], "defeat");
        assert_eq!(json["opponent_power"], 11);
    }
}
