//! Engine configuration loaded from the environment.

use std::env;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dugout_domain::DeltaPolicy;

use crate::infrastructure::ollama::{
    OllamaClient, DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL, DEFAULT_TIMEOUT_SECS,
};
use crate::infrastructure::ports::LlmPort;
use crate::infrastructure::resilient_llm::{ResilientLlmClient, RetryConfig};

/// Default sampling temperature for stat analysis. Low, since the output is
/// a scored JSON object rather than prose.
pub const DEFAULT_ANALYSIS_TEMPERATURE: f32 = 0.3;

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Ollama API base URL (OpenAI-compatible)
    pub ollama_base_url: String,
    /// Model used for stat analysis
    pub ollama_model: String,
    /// Per-request timeout in seconds
    pub llm_timeout_secs: u64,
    /// Retry behavior for transient oracle failures
    pub retry: RetryConfig,
    /// Stat analysis configuration
    pub analysis: AnalysisConfig,
}

/// Stat analysis configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Sampling temperature for the analysis request
    pub temperature: f32,
    /// How raw deltas are normalized
    pub delta_policy: DeltaPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_ANALYSIS_TEMPERATURE,
            delta_policy: DeltaPolicy::default(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ollama_base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            llm_timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry: RetryConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults; set but malformed keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let retry_defaults = &defaults.retry;

        let ollama_base_url = lookup("OLLAMA_BASE_URL")
            .or_else(|| lookup("OLLAMA_URL"))
            .unwrap_or(defaults.ollama_base_url.clone());

        Ok(Self {
            ollama_base_url,
            ollama_model: lookup("OLLAMA_MODEL").unwrap_or(defaults.ollama_model.clone()),
            llm_timeout_secs: parse_or(&lookup, "LLM_TIMEOUT_SECS", defaults.llm_timeout_secs)?,
            retry: RetryConfig {
                max_retries: parse_or(&lookup, "LLM_MAX_RETRIES", retry_defaults.max_retries)?,
                base_delay_ms: parse_or(
                    &lookup,
                    "LLM_RETRY_BASE_DELAY_MS",
                    retry_defaults.base_delay_ms,
                )?,
                max_delay_ms: parse_or(
                    &lookup,
                    "LLM_RETRY_MAX_DELAY_MS",
                    retry_defaults.max_delay_ms,
                )?,
                jitter_factor: retry_defaults.jitter_factor,
            },
            analysis: AnalysisConfig {
                temperature: parse_or(
                    &lookup,
                    "LLM_TEMPERATURE",
                    defaults.analysis.temperature,
                )?
                .clamp(0.0, 2.0),
                delta_policy: parse_or(
                    &lookup,
                    "STAT_DELTA_POLICY",
                    defaults.analysis.delta_policy,
                )?,
            },
        })
    }

    /// Compose the oracle client: Ollama behind the retry wrapper.
    pub fn build_llm(&self) -> Arc<dyn LlmPort> {
        let ollama = Arc::new(OllamaClient::with_timeout(
            &self.ollama_base_url,
            &self.ollama_model,
            self.llm_timeout_secs,
        ));
        tracing::info!(
            base_url = %self.ollama_base_url,
            model = %self.ollama_model,
            max_retries = self.retry.max_retries,
            base_delay_ms = self.retry.base_delay_ms,
            "LLM client configured"
        );
        Arc::new(ResilientLlmClient::new(ollama, self.retry.clone()))
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| anyhow::anyhow!("{}", e))
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
    }
}

/// Load `.env.local` then `.env` from `dir`, if present.
///
/// Values already in the process environment win over file values.
pub fn load_dotenv_from(dir: &Path) {
    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = dir.join(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load env file");
            }
        }
    }
}

/// Load env files from the current working directory.
pub fn load_dotenv() {
    match env::current_dir() {
        Ok(dir) => load_dotenv_from(&dir),
        Err(e) => tracing::warn!(error = %e, "Cannot resolve working directory for .env"),
    }
}
