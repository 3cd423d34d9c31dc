//! Dugout domain - stat vocabulary and game-balance rule tables.
//!
//! Pure types only: no I/O, no async. The engine crate builds on these.

pub mod error;
pub mod game_state;
pub mod value_objects;

pub use error::DomainError;

pub use game_state::{GameSnapshot, GameStateView};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    ConversationTurn, DeltaPolicy, IntimacyTier, StatDelta, StatKind, StatSnapshot, TrainingType,
};
