//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod config;
pub mod ollama;
pub mod ports;
pub mod resilient_llm;
pub mod telemetry;
