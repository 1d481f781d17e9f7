//! Output formatting utilities for CLI.

use crossterm::style::{Color, Stylize};
use standoff::encounter::{EncounterSnapshot, Message, Rgb, opponent_label, stat_label};
use standoff::{Event, Presentation, StatKind, Transcript, Verdict};
use std::fmt::Write;

/// Wrap a verdict message in its color when `color` is set.
pub(super) fn paint(message: Message, color: bool) -> String {
    if color {
        let Rgb { r, g, b } = message.color;
        message.to_string().with(Color::Rgb { r, g, b }).to_string()
    } else {
        message.to_string()
    }
}

/// The lines a renderer shows for one event.
pub(super) fn format_event(event: &Event, color: bool) -> String {
    match event {
        Event::StatChanged(update) => format!(
            "{}\n{}",
            stat_label(update.change.kind, update.change.value),
            opponent_label(update.opponent_power)
        ),
        Event::Passed => paint(Message::for_verdict(Verdict::Passed), color),
        Event::Fought(report) => format!(
            "{} vs {}: {}",
            report.player_power,
            report.opponent_power,
            paint(Message::for_verdict(report.outcome.into()), color)
        ),
    }
}

/// Which buttons a UI would show.
pub(super) fn format_presentation(presentation: Presentation) -> &'static str {
    match presentation {
        Presentation::ShowPass => "Options: pass",
        Presentation::ShowFight => "Options: fight",
        Presentation::ShowNeither => "Options: none (encounter passed)",
    }
}

/// Full status block for a snapshot.
pub(super) fn format_status(snapshot: &EncounterSnapshot) -> String {
    let mut output = String::new();
    for kind in StatKind::ALL {
        let value = match kind {
            StatKind::Money => snapshot.money,
            StatKind::Health => snapshot.health,
            StatKind::Power => snapshot.power,
            StatKind::Crime => snapshot.crime,
        };
        let _ = writeln!(output, "  {}", stat_label(kind, value));
    }
    let _ = writeln!(
        output,
        "  {} ({})",
        opponent_label(snapshot.opponent_power),
        snapshot.opponent_name
    );
    let _ = writeln!(output, "  {}", format_presentation(snapshot.presentation));
    output
}

/// Format a replayed script as human-readable text.
pub(super) fn format_transcript(transcript: &Transcript, color: bool) -> String {
    let mut output = String::new();

    for (i, entry) in transcript.entries.iter().enumerate() {
        let _ = writeln!(output, "[{}] {}", i + 1, entry.action);
        for line in format_event(&entry.event, color).lines() {
            let _ = writeln!(output, "    {line}");
        }
    }

    output.push_str("\nFinal state:\n");
    output.push_str(&format_status(&transcript.final_state));
    output
}
