#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use standoff::encounter::{Presentation, check_invariants};
use standoff::{Action, Encounter, EncounterConfig, Policy, StatKind};

/// One fuzzed player input.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzAction {
    Adjust { stat: u8, delta: i64 },
    Increase { stat: u8 },
    Decrease { stat: u8 },
    Pass,
    Fight,
}

/// Structured input for encounter fuzzing.
#[derive(Arbitrary, Debug)]
struct EncounterInput {
    /// Opponent base power.
    base_power: i64,
    /// Crime threshold for passing.
    threshold: i64,
    /// Whether to run under the strict policy.
    strict: bool,
    /// Player inputs in order.
    actions: Vec<FuzzAction>,
}

fn stat(raw: u8) -> StatKind {
    StatKind::ALL[usize::from(raw) % StatKind::ALL.len()]
}

fuzz_target!(|input: EncounterInput| {
    let policy = if input.strict {
        Policy::Strict
    } else {
        Policy::Permissive
    };
    let mut encounter = Encounter::new(&EncounterConfig {
        opponent_base_power: input.base_power,
        pass_threshold: input.threshold,
        policy,
        ..EncounterConfig::default()
    });

    // Cap inputs to keep runs short
    for fuzz_action in input.actions.into_iter().take(256) {
        let action = match fuzz_action {
            FuzzAction::Adjust { stat: raw, delta } => Action::Adjust {
                stat: stat(raw),
                delta,
            },
            FuzzAction::Increase { stat: raw } => Action::Increase { stat: stat(raw) },
            FuzzAction::Decrease { stat: raw } => Action::Decrease { stat: stat(raw) },
            FuzzAction::Pass => Action::Pass,
            FuzzAction::Fight => Action::Fight,
        };

        let was_passed = encounter.controller().has_passed();
        let before = encounter.presentation();

        // Must not panic, including at i64 extremes
        let result = encounter.apply(action);

        if !input.strict {
            assert!(result.is_ok(), "permissive encounter refused {action:?}");
        } else if matches!(action, Action::Pass) {
            assert_eq!(result.is_ok(), before == Presentation::ShowPass);
        } else if matches!(action, Action::Fight) {
            assert_eq!(result.is_ok(), before == Presentation::ShowFight);
        }

        // Passed is terminal
        if was_passed {
            assert!(encounter.controller().has_passed());
        }

        let violations = check_invariants(&encounter);
        assert!(
            violations.is_empty(),
            "Invariants violated after {action:?}: {violations:?}"
        );
    }
});
