//! Read-only view of the game state the stat engine needs.
//!
//! Storage of the full game state lives outside this workspace. The engine
//! only ever reads the current month and the five stats, and never writes back.

use serde::{Deserialize, Serialize};

use crate::value_objects::StatSnapshot;
use crate::DomainError;

/// What the stat engine reads from the surrounding game.
pub trait GameStateView: Send + Sync {
    /// In-game month (1-12).
    fn current_month(&self) -> u32;

    /// Current stat values.
    fn stats(&self) -> StatSnapshot;
}

/// Plain-data game state for callers that don't own a richer model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub current_month: u32,
    pub stats: StatSnapshot,
}

impl GameSnapshot {
    pub fn new(current_month: u32, stats: StatSnapshot) -> Self {
        Self {
            current_month,
            stats,
        }
    }

    /// Like [`GameSnapshot::new`] but rejects months outside 1..=12.
    pub fn validated(current_month: u32, stats: StatSnapshot) -> Result<Self, DomainError> {
        if !(1..=12).contains(&current_month) {
            return Err(DomainError::validation(format!(
                "month must be within 1..=12, got {}",
                current_month
            )));
        }
        Ok(Self::new(current_month, stats))
    }
}

impl GameStateView for GameSnapshot {
    fn current_month(&self) -> u32 {
        self.current_month
    }

    fn stats(&self) -> StatSnapshot {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_accepts_calendar_months() {
        assert!(GameSnapshot::validated(1, StatSnapshot::default()).is_ok());
        assert!(GameSnapshot::validated(12, StatSnapshot::default()).is_ok());
    }

    #[test]
    fn test_validated_rejects_out_of_range_month() {
        let err = GameSnapshot::validated(13, StatSnapshot::default()).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(GameSnapshot::validated(0, StatSnapshot::default()).is_err());
    }

    #[test]
    fn test_view_exposes_fields() {
        let state = GameSnapshot::new(7, StatSnapshot::new(10, 20, 30, 40, 50));
        let view: &dyn GameStateView = &state;
        assert_eq!(view.current_month(), 7);
        assert_eq!(view.stats().power, 40);
    }
}
