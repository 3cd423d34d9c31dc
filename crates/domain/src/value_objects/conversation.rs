//! One coach/player exchange submitted for stat analysis.

use serde::{Deserialize, Serialize};

/// A single turn: the coach's message, the player's reply, and optional
/// free-text context passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    user_message: String,
    bot_reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<String>,
}

impl ConversationTurn {
    pub fn new(user_message: impl Into<String>, bot_reply: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            bot_reply: bot_reply.into(),
            context: None,
        }
    }

    /// Attach context, kept verbatim. Only an empty string means no context.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = if context.is_empty() {
            None
        } else {
            Some(context)
        };
        self
    }

    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    pub fn bot_reply(&self) -> &str {
        &self.bot_reply
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let turn = ConversationTurn::new("Nice swing today", "Thanks, coach")
            .with_context("After the scrimmage");
        assert_eq!(turn.user_message(), "Nice swing today");
        assert_eq!(turn.bot_reply(), "Thanks, coach");
        assert_eq!(turn.context(), Some("After the scrimmage"));
    }

    #[test]
    fn test_empty_context_is_none() {
        let turn = ConversationTurn::new("a", "b").with_context("");
        assert_eq!(turn.context(), None);
    }

    #[test]
    fn test_whitespace_context_is_kept_verbatim() {
        let turn = ConversationTurn::new("a", "b").with_context("   ");
        assert_eq!(turn.context(), Some("   "));
    }
}
