//! Intimacy tiers - banded view of the coach/player trust score.
//!
//! The raw score nominally runs 0-100 but any `i32` resolves: values below the
//! first threshold saturate to [`IntimacyTier::VeryLow`], values at or above the
//! last to [`IntimacyTier::VeryHigh`]. Each band includes its lower bound.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Disposition of the player toward the coach, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntimacyTier {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl IntimacyTier {
    /// Tiers in ascending order.
    pub const ALL: [IntimacyTier; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Moderate,
        Self::High,
        Self::VeryHigh,
    ];

    /// Convert a raw intimacy score to its tier
    pub fn from_score(intimacy: i32) -> Self {
        match intimacy {
            s if s >= 80 => Self::VeryHigh,
            s if s >= 60 => Self::High,
            s if s >= 40 => Self::Moderate,
            s if s >= 20 => Self::Low,
            _ => Self::VeryLow,
        }
    }

    /// Inclusive lower bound of the band. `VeryLow` is open below.
    pub fn lower_bound(&self) -> Option<i32> {
        match self {
            Self::VeryLow => None,
            Self::Low => Some(20),
            Self::Moderate => Some(40),
            Self::High => Some(60),
            Self::VeryHigh => Some(80),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very low",
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very high",
        }
    }

    /// Narrative descriptor used by dialogue and UI.
    pub fn descriptor(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very low - barely willing to talk",
            Self::Low => "Low - guarded and keeps their distance",
            Self::Moderate => "Moderate - starting to open up little by little",
            Self::High => "High - trusting and cooperative",
            Self::VeryHigh => "Very high - sincerely respects and follows the coach",
        }
    }
}

impl fmt::Display for IntimacyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
