// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Standoff: a deterministic stat-and-engagement encounter engine.
//!
//! A player raises and lowers four stats. An opponent's power follows the
//! player's power stat. The crime stat decides whether the fight can be
//! skipped.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Presentation (CLI, any UI)        │
//! ├─────────────────────────────────────┤
//! │   Scripts (record / replay)         │
//! ├─────────────────────────────────────┤
//! │   Encounter rules                   │
//! └─────────────────────────────────────┘
//! ```

pub mod encounter;
pub mod error;
pub mod script;

pub use error::{EncounterError, EncounterResult, ScriptError};

// Re-export key encounter types at crate root for convenience
pub use encounter::{
    Encounter, EncounterConfig, Event, Opponent, Outcome, PlayerStat, Policy, Presentation,
    StatKind, Verdict,
};
pub use script::{Action, Script, Transcript};
