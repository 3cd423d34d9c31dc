//! Stat value object - the five attributes tracked for the player character.
//!
//! Provides type safety for stat references instead of using magic strings like
//! "intimacy" or "speed".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::DomainError;

/// Player attributes that conversation and training can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    /// Trust between coach and player
    Intimacy,
    /// Confidence and composure
    Mental,
    /// Conditioning
    Stamina,
    /// Hitting and throwing strength
    Power,
    /// Base-running ability
    Speed,
}

impl StatKind {
    /// All stats in canonical order.
    pub const ALL: [StatKind; 5] = [
        Self::Intimacy,
        Self::Mental,
        Self::Stamina,
        Self::Power,
        Self::Speed,
    ];

    /// Returns the wire name (e.g., "intimacy", "speed").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intimacy => "intimacy",
            Self::Mental => "mental",
            Self::Stamina => "stamina",
            Self::Power => "power",
            Self::Speed => "speed",
        }
    }

    /// Returns a human-readable name (e.g., "Base running").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Intimacy => "Intimacy",
            Self::Mental => "Mental",
            Self::Stamina => "Stamina",
            Self::Power => "Power",
            Self::Speed => "Base running",
        }
    }

    /// Documented per-turn change range.
    ///
    /// The emotional stats swing wider than the physical ones.
    pub fn change_range(&self) -> RangeInclusive<i32> {
        match self {
            Self::Intimacy | Self::Mental => -10..=10,
            Self::Stamina | Self::Power | Self::Speed => -5..=5,
        }
    }

    /// Clip a change into [`Self::change_range`].
    pub fn clamp_change(&self, value: i32) -> i32 {
        let range = self.change_range();
        value.clamp(*range.start(), *range.end())
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "intimacy" => Ok(Self::Intimacy),
            "mental" => Ok(Self::Mental),
            "stamina" => Ok(Self::Stamina),
            "power" => Ok(Self::Power),
            "speed" => Ok(Self::Speed),
            _ => Err(DomainError::parse(format!("Unknown stat: {}", s))),
        }
    }
}
