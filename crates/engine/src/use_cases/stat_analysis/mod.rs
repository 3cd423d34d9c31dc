//! Conversation stat analysis.
//!
//! Turns one coach/player exchange into a small stat delta plus a reason, and
//! exposes the static training and intimacy rule tables alongside it.
//!
//! Failure policy: only oracle transport errors propagate. Any response that
//! arrives but can't be understood becomes a turn with no stat change.

mod parser;
mod prompt;

#[cfg(test)]
mod integration_tests;

use std::sync::Arc;

use dugout_domain::{
    ConversationTurn, DeltaPolicy, GameStateView, IntimacyTier, StatDelta, StatSnapshot,
    TrainingType,
};

use crate::infrastructure::config::{AnalysisConfig, DEFAULT_ANALYSIS_TEMPERATURE};
use crate::infrastructure::ports::{LlmError, LlmPort};

pub use parser::{
    parse_stat_response, AnalysisResult, ParseFailureKind, ParsedAnalysis, DEFAULT_REASON,
    FAILURE_REASON,
};
pub use prompt::{
    build_human_message, stats_json, StatPrompt, PLAYER_NAME, STAT_ANALYSIS_SYSTEM_PROMPT,
};

/// Facade the game engine calls once per conversation turn.
pub struct StatCalculator {
    llm: Arc<dyn LlmPort>,
    temperature: f32,
    policy: DeltaPolicy,
}

impl StatCalculator {
    pub fn new(llm: Arc<dyn LlmPort>) -> Self {
        Self {
            llm,
            temperature: DEFAULT_ANALYSIS_TEMPERATURE,
            policy: DeltaPolicy::default(),
        }
    }

    pub fn from_config(llm: Arc<dyn LlmPort>, config: &AnalysisConfig) -> Self {
        Self::new(llm)
            .with_temperature(config.temperature)
            .with_policy(config.delta_policy)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    pub fn with_policy(mut self, policy: DeltaPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DeltaPolicy {
        self.policy
    }

    /// Analyze one exchange and return the stat changes with a reason.
    ///
    /// # Returns
    /// * `Ok(AnalysisResult)` - Parsed result, or the no-op `"analysis failed"`
    ///   result when the response was unusable
    /// * `Err(LlmError)` - Only if the oracle call itself failed
    pub async fn analyze_conversation(
        &self,
        user_message: &str,
        bot_reply: &str,
        game_state: &dyn GameStateView,
        conversation_context: Option<&str>,
    ) -> Result<AnalysisResult, LlmError> {
        let mut turn = ConversationTurn::new(user_message, bot_reply);
        if let Some(context) = conversation_context {
            turn = turn.with_context(context);
        }

        Ok(self.analyze_turn(&turn, game_state).await?.into_result())
    }

    /// Like [`StatCalculator::analyze_conversation`], but keeps parse failures
    /// distinguishable.
    pub async fn analyze_turn(
        &self,
        turn: &ConversationTurn,
        game_state: &dyn GameStateView,
    ) -> Result<ParsedAnalysis, LlmError> {
        let month = game_state.current_month();
        let stats = StatSnapshot::read_from(game_state);

        let request = StatPrompt::build(month, &stats, turn).into_request(self.temperature);

        tracing::debug!(
            month = month,
            stats = ?stats,
            has_context = turn.context().is_some(),
            "Analyzing conversation turn via LLM"
        );

        let response = self.llm.generate(request).await?;

        let parsed = parse_stat_response(&response.content).map_delta(|d| self.policy.apply(d));

        match &parsed {
            ParsedAnalysis::Parsed { delta, reason, .. } => {
                tracing::info!(
                    delta = %delta,
                    reason = %reason,
                    policy = %self.policy,
                    "Conversation stat analysis complete"
                );
            }
            ParsedAnalysis::Failed { kind, message } => {
                tracing::warn!(
                    kind = %kind,
                    error = %message,
                    response = %response.content,
                    "Stat analysis failed - applying no stat change"
                );
            }
        }

        Ok(parsed)
    }

    /// Fixed bonus for a training session. Unknown types yield an empty delta.
    ///
    /// The game state is not consulted; bonuses are flat.
    pub fn calculate_training_bonus(
        &self,
        training_type: &str,
        _game_state: &dyn GameStateView,
    ) -> StatDelta {
        TrainingType::bonus_for_label(training_type)
    }

    /// Descriptor for an intimacy score.
    pub fn get_intimacy_level(&self, intimacy: i32) -> &'static str {
        IntimacyTier::from_score(intimacy).descriptor()
    }
}
