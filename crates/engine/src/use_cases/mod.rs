//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod stat_analysis;

pub use stat_analysis::{AnalysisResult, ParseFailureKind, ParsedAnalysis, StatCalculator};
