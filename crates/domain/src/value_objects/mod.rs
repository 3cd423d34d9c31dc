//! Value objects - Immutable objects defined by their attributes

mod conversation;
mod intimacy;
mod stat;
mod stat_delta;
mod stat_snapshot;
mod training;

pub use conversation::ConversationTurn;
pub use intimacy::IntimacyTier;
pub use stat::StatKind;
pub use stat_delta::{DeltaPolicy, StatDelta};
pub use stat_snapshot::StatSnapshot;
pub use training::TrainingType;
