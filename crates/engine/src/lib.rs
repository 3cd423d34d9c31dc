//! Dugout Engine library.
//!
//! Turns coach/player conversations into stat changes by asking an LLM to
//! score each exchange, and exposes the flat training and intimacy tables.
//!
//! ## Structure
//!
//! - `use_cases/` - Stat analysis orchestration (prompt, parse, facade)
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use infrastructure::config::EngineConfig;
pub use infrastructure::ports::{LlmError, LlmPort};
pub use use_cases::{AnalysisResult, StatCalculator};
