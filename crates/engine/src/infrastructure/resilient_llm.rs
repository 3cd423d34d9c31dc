//! Retry wrapper for the oracle.
//!
//! The stat analyzer never retries on its own. Deployments that want retries
//! put this wrapper in front of the real client (see `EngineConfig::build_llm`).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::infrastructure::ports::{LlmError, LlmPort, LlmRequest, LlmResponse};

/// Retry behavior for transient oracle failures
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt (0 = single attempt)
    pub max_retries: u32,
    /// Delay before the first retry
    pub base_delay_ms: u64,
    /// Upper bound for any single delay
    pub max_delay_ms: u64,
    /// Random spread applied to each delay, as a fraction of it (0.0-1.0)
    pub jitter_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
            max_delay_ms: 30000,
            jitter_factor: 0.2,
        }
    }
}

impl RetryConfig {
    /// A single attempt, no retries.
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay before retry number `retry` (1-based), doubling each time up to
    /// `max_delay_ms`, then spread by `jitter_factor`.
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let doublings = retry.saturating_sub(1).min(63);
        let delay_ms = self
            .base_delay_ms
            .saturating_mul(1u64 << doublings)
            .min(self.max_delay_ms);

        let spread = (delay_ms as f64 * self.jitter_factor.clamp(0.0, 1.0)) as i64;
        let jittered = if spread > 0 {
            let offset = rand::thread_rng().gen_range(-spread..=spread);
            (delay_ms as i64).saturating_add(offset).max(0) as u64
        } else {
            delay_ms
        };

        Duration::from_millis(jittered)
    }
}

/// Wraps any [`LlmPort`] and retries transient failures with backoff.
pub struct ResilientLlmClient {
    inner: Arc<dyn LlmPort>,
    config: RetryConfig,
}

impl ResilientLlmClient {
    pub fn new(inner: Arc<dyn LlmPort>, config: RetryConfig) -> Self {
        Self { inner, config }
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }
}

#[async_trait]
impl LlmPort for ResilientLlmClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let mut retry = 0;

        loop {
            let error = match self.inner.generate(request.clone()).await {
                Ok(response) => {
                    if retry > 0 {
                        tracing::info!(retries = retry, "LLM request succeeded after retry");
                    }
                    return Ok(response);
                }
                Err(e) => e,
            };

            if !error.is_transient() {
                tracing::error!(
                    error = %error,
                    status = ?error.status_code(),
                    "LLM request failed with non-retryable error"
                );
                return Err(error);
            }

            if retry >= self.config.max_retries {
                tracing::error!(
                    attempts = self.config.total_attempts(),
                    error = %error,
                    "LLM request failed after all retry attempts"
                );
                return Err(error);
            }

            retry += 1;
            let delay = self.config.backoff_delay(retry);
            tracing::warn!(
                retry = retry,
                max_retries = self.config.max_retries,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "LLM request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
