//! Prompt construction for conversation stat analysis.
//!
//! Pure functions of their inputs: the same turn and game state always produce
//! the same request text.

use dugout_domain::{ConversationTurn, StatSnapshot};

use crate::infrastructure::ports::{ChatMessage, LlmRequest};

/// Fixed rubric and output contract sent as the system prompt.
pub const STAT_ANALYSIS_SYSTEM_PROMPT: &str = r#"You are an expert analyst of baseball player coaching sessions.

Analyze the conversation between the coach (user) and the player (AI) and evaluate its effect on the following stats:

**Stats and change ranges:**
- intimacy: -10 to +10
  * Empathy, encouragement, personal interest -> increase
  * Dismissal, blame, coercive attitude -> decrease

- mental: -10 to +10
  * Building confidence, emphasizing past successes -> increase
  * Criticism, emphasizing failure, pressure -> decrease

- stamina: -5 to +5
  * Mentions of conditioning work or recommending rest -> change
  * Excessive training -> decrease

- power: -5 to +5
  * Mentions of strength training or batting practice -> change

- speed (base running): -5 to +5
  * Mentions of base-running or stealing drills -> change
  * Negative remarks about stealing -> decrease (consider the trauma)

**Important:**
- Ordinary small talk may cause little or no stat change
- Only concrete training or a genuine emotional exchange causes large changes
- Consider the player's trauma: a deep fear of stealing bases
- If current intimacy is low, positive effects are also limited

**Response format (JSON):**
{
    "stat_changes": {
        "intimacy": 0,
        "mental": 0,
        "stamina": 0,
        "power": 0,
        "speed": 0
    },
    "reason": "One sentence explaining the change",
    "analysis": "Detailed analysis (optional)"
}

Stats that do not change may be set to 0 or omitted.
Respond with the JSON object only."#;

/// Name the player character goes by in the transcript.
pub const PLAYER_NAME: &str = "Minseok";

/// A two-part prompt ready to hand to the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatPrompt {
    pub system: String,
    pub human: String,
}

impl StatPrompt {
    /// Build the prompt for one conversation turn.
    pub fn build(month: u32, stats: &StatSnapshot, turn: &ConversationTurn) -> Self {
        Self {
            system: STAT_ANALYSIS_SYSTEM_PROMPT.to_string(),
            human: build_human_message(
                month,
                stats,
                turn.user_message(),
                turn.bot_reply(),
                turn.context(),
            ),
        }
    }

    /// Convert into a JSON-mode LLM request.
    pub fn into_request(self, temperature: f32) -> LlmRequest {
        LlmRequest::new(vec![ChatMessage::user(self.human)])
            .with_system_prompt(self.system)
            .with_temperature(temperature)
            .with_json_response(true)
    }
}

/// Per-call instruction embedding the game state and the exchange.
pub fn build_human_message(
    month: u32,
    stats: &StatSnapshot,
    user_message: &str,
    bot_reply: &str,
    context: Option<&str>,
) -> String {
    let context_info = context
        .filter(|c| !c.is_empty())
        .map(|c| format!("[Conversation context]\n{}", c))
        .unwrap_or_default();

    format!(
        "[Current game state]\n\
         - Current month: {month}\n\
         - Current stats: {stats}\n\
         \n\
         [This conversation]\n\
         Coach (user): {user_message}\n\
         {player} (AI): {bot_reply}\n\
         \n\
         {context_info}\n\
         \n\
         Analyze how this conversation affects {player}'s stats.",
        month = month,
        stats = stats_json(stats),
        user_message = user_message,
        bot_reply = bot_reply,
        player = PLAYER_NAME,
        context_info = context_info,
    )
}

/// Compact JSON object of the stats, in canonical field order.
pub fn stats_json(stats: &StatSnapshot) -> String {
    serde_json::to_string(stats).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to serialize stat snapshot for prompt");
        "{}".to_string()
    })
}
