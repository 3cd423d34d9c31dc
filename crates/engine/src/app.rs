//! Application state and composition.

use std::sync::Arc;

use anyhow::Result;

use crate::infrastructure::config::{AnalysisConfig, EngineConfig};
use crate::infrastructure::ports::LlmPort;
use crate::use_cases::StatCalculator;

/// Main application state.
///
/// Holds the oracle client and the use cases built on top of it.
pub struct App {
    pub llm: Arc<dyn LlmPort>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub stats: StatCalculator,
}

impl App {
    /// Create a new App with an already-built oracle client.
    pub fn new(llm: Arc<dyn LlmPort>, analysis: &AnalysisConfig) -> Self {
        let use_cases = UseCases {
            stats: StatCalculator::from_config(llm.clone(), analysis),
        };

        Self { llm, use_cases }
    }

    /// Build everything from configuration: Ollama behind the retry wrapper.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.build_llm(), &config.analysis)
    }

    /// Load `.env` files and the environment, then compose.
    pub fn from_env() -> Result<Self> {
        crate::infrastructure::config::load_dotenv();
        let config = EngineConfig::from_env()?;
        Ok(Self::from_config(&config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{LlmResponse, MockLlmPort};
    use dugout_domain::{DeltaPolicy, GameSnapshot, StatSnapshot};

    #[tokio::test]
    async fn test_app_wires_analysis_config() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().times(1).returning(|_| {
            Ok(LlmResponse::text(
                r#"{"stat_changes":{"mental":40},"reason":"Huge boost"}"#,
            ))
        });

        let config = AnalysisConfig {
            delta_policy: DeltaPolicy::Clamp,
            ..AnalysisConfig::default()
        };
        let app = App::new(Arc::new(llm), &config);
        assert_eq!(app.use_cases.stats.policy(), DeltaPolicy::Clamp);

        let state = GameSnapshot::new(6, StatSnapshot::new(50, 50, 50, 50, 50));
        let result = app
            .use_cases
            .stats
            .analyze_conversation("You're ready", "I think so too", &state, None)
            .await
            .unwrap();

        assert_eq!(result.delta.get("mental"), Some(10));
    }

    #[test]
    fn test_from_config_builds_without_network() {
        let app = App::from_config(&EngineConfig::default());
        assert_eq!(app.use_cases.stats.policy(), DeltaPolicy::PassThrough);
    }
}
