//! Training types and their fixed stat bonuses.
//!
//! Static game-balance data, independent of the conversation oracle. Adding a
//! training type means adding a variant; the match in [`TrainingType::bonus`]
//! won't compile until it has a bonus.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{StatDelta, StatKind};
use crate::DomainError;

/// Training sessions the coach can schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrainingType {
    /// Conditioning work
    StaminaTraining,
    /// Weight room
    StrengthTraining,
    /// Base-running and stealing drills
    BaseRunning,
    /// Batting practice
    Batting,
    /// Mental coaching session
    MentalTraining,
}

impl TrainingType {
    /// Get all training types for UI dropdowns
    pub fn all() -> &'static [TrainingType] {
        &[
            TrainingType::StaminaTraining,
            TrainingType::StrengthTraining,
            TrainingType::BaseRunning,
            TrainingType::Batting,
            TrainingType::MentalTraining,
        ]
    }

    /// Wire label (e.g. "strength-training").
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingType::StaminaTraining => "stamina-training",
            TrainingType::StrengthTraining => "strength-training",
            TrainingType::BaseRunning => "base-running",
            TrainingType::Batting => "batting",
            TrainingType::MentalTraining => "mental-training",
        }
    }

    /// Fixed stat bonus granted by one session.
    pub fn bonus(&self) -> StatDelta {
        let entries: &[(StatKind, i32)] = match self {
            TrainingType::StaminaTraining => &[(StatKind::Stamina, 5), (StatKind::Mental, 2)],
            TrainingType::StrengthTraining => &[(StatKind::Power, 5), (StatKind::Stamina, -2)],
            // Overcoming the stealing fear on the basepaths also lifts mental
            TrainingType::BaseRunning => &[(StatKind::Speed, 5), (StatKind::Mental, 3)],
            TrainingType::Batting => &[(StatKind::Power, 3), (StatKind::Mental, 2)],
            TrainingType::MentalTraining => &[(StatKind::Mental, 5), (StatKind::Intimacy, 2)],
        };
        entries
            .iter()
            .map(|(kind, value)| (kind.as_str(), *value))
            .collect()
    }

    /// Bonus for a free-text label; unknown labels yield an empty delta.
    pub fn bonus_for_label(label: &str) -> StatDelta {
        label
            .parse::<TrainingType>()
            .map(|training| training.bonus())
            .unwrap_or_default()
    }
}

impl fmt::Display for TrainingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TrainingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stamina-training" | "stamina" => Ok(TrainingType::StaminaTraining),
            "strength-training" | "strength" => Ok(TrainingType::StrengthTraining),
            "base-running" | "running" => Ok(TrainingType::BaseRunning),
            "batting" => Ok(TrainingType::Batting),
            "mental-training" | "mental" => Ok(TrainingType::MentalTraining),
            _ => Err(DomainError::parse(format!("Unknown training type: {}", s))),
        }
    }
}
