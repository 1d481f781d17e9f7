//! Verdict messages and stat labels handed to the presentation layer.

use std::fmt;

use serde::Serialize;

use crate::encounter::{Outcome, StatKind};

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Bright green used for good news.
    pub const GREEN: Self = Self::new(0x07, 0xFF, 0x00);
    /// Red used for defeat.
    pub const RED: Self = Self::new(0xFF, 0x00, 0x00);

    /// Build a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Format as `#RRGGBB`.
    #[must_use]
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// What happened to the engagement, as shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The player won the fight.
    Victory,
    /// The player lost the fight.
    Defeat,
    /// The player skipped the fight.
    Passed,
}

impl From<Outcome> for Verdict {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Victory => Self::Victory,
            Outcome::Defeat => Self::Defeat,
        }
    }
}

/// A colored line of text describing a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Display color.
    pub color: Rgb,
    /// Message body without trailing punctuation.
    pub text: &'static str,
}

impl Message {
    /// The message shown for `verdict`.
    #[must_use]
    pub fn for_verdict(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Victory => Self {
                color: Rgb::GREEN,
                text: "Win",
            },
            Verdict::Defeat => Self {
                color: Rgb::RED,
                text: "Lose",
            },
            Verdict::Passed => Self {
                color: Rgb::GREEN,
                text: "Passed",
            },
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!!!", self.text)
    }
}

/// Label for a player stat, e.g. `Player Power 3`.
#[must_use]
pub fn stat_label(kind: StatKind, value: i64) -> String {
    format!("Player {} {value}", kind.name())
}

/// Label for the opponent's effective power, e.g. `Enemy Power 13`.
#[must_use]
pub fn opponent_label(power: i64) -> String {
    format!("Enemy Power {power}")
}
