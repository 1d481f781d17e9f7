//! Encounter layer for standoff.
//!
//! Implements the rules of a single encounter:
//! - Four player stats (money, health, power, crime)
//! - An opponent whose power follows the player's power stat
//! - The pass/fight engagement gated by the crime stat
//! - Verdict messages for the presentation layer

mod engagement;
mod invariants;
mod message;
mod opponent;
mod stat;
mod state;

pub use engagement::{
    DEFAULT_PASS_THRESHOLD, EngagementController, EngagementState, Outcome, Presentation,
    resolve_fight,
};
pub use invariants::{InvariantViolation, check_invariants};
pub use message::{Message, Rgb, Verdict, opponent_label, stat_label};
pub use opponent::{DEFAULT_BASE_POWER, Opponent};
pub use stat::{PlayerStat, PowerObserver, StatChange, StatKind};
pub use state::{
    DEFAULT_OPPONENT_NAME, Encounter, EncounterConfig, EncounterSnapshot, Event, FightReport,
    Policy, StatUpdate,
};
