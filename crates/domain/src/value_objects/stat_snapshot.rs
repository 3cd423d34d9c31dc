//! Point-in-time view of the player's five stats.

use serde::{Deserialize, Serialize};

use super::StatKind;
use crate::game_state::GameStateView;

/// Current values of the five stats, read from the game state at call time.
///
/// Field order is the canonical stat order; serialization preserves it, which
/// keeps prompts stable across calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSnapshot {
    pub intimacy: i32,
    pub mental: i32,
    pub stamina: i32,
    pub power: i32,
    pub speed: i32,
}

impl StatSnapshot {
    pub fn new(intimacy: i32, mental: i32, stamina: i32, power: i32, speed: i32) -> Self {
        Self {
            intimacy,
            mental,
            stamina,
            power,
            speed,
        }
    }

    /// Read the stats out of an opaque game state.
    pub fn read_from(state: &dyn GameStateView) -> Self {
        state.stats()
    }

    /// Value of a single stat.
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Intimacy => self.intimacy,
            StatKind::Mental => self.mental,
            StatKind::Stamina => self.stamina,
            StatKind::Power => self.power,
            StatKind::Speed => self.speed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GameSnapshot;

    #[test]
    fn test_get_by_kind() {
        let stats = StatSnapshot::new(30, 50, 60, 40, 45);
        assert_eq!(stats.get(StatKind::Intimacy), 30);
        assert_eq!(stats.get(StatKind::Mental), 50);
        assert_eq!(stats.get(StatKind::Stamina), 60);
        assert_eq!(stats.get(StatKind::Power), 40);
        assert_eq!(stats.get(StatKind::Speed), 45);
    }

    #[test]
    fn test_read_from_game_state() {
        let state = GameSnapshot::new(3, StatSnapshot::new(1, 2, 3, 4, 5));
        assert_eq!(
            StatSnapshot::read_from(&state),
            StatSnapshot::new(1, 2, 3, 4, 5)
        );
    }

    #[test]
    fn test_serializes_in_canonical_order() {
        let stats = StatSnapshot::new(30, 50, 60, 40, 45);
        assert_eq!(
            serde_json::to_string(&stats).unwrap(),
            r#"{"intimacy":30,"mental":50,"stamina":60,"power":40,"speed":45}"#
        );
    }
}
