//! End-to-end stat analysis against a mocked oracle.

use std::sync::Arc;

use dugout_domain::{DeltaPolicy, GameSnapshot, StatDelta, StatKind, StatSnapshot};

use super::*;
use crate::infrastructure::config::AnalysisConfig;
use crate::infrastructure::ports::{LlmResponse, MessageRole, MockLlmPort};

fn march_state() -> GameSnapshot {
    GameSnapshot::new(3, StatSnapshot::new(30, 50, 60, 40, 45))
}

fn responding_with(content: &'static str) -> MockLlmPort {
    let mut llm = MockLlmPort::new();
    llm.expect_generate()
        .times(1)
        .returning(move |_| Ok(LlmResponse::text(content)));
    llm
}

#[tokio::test]
async fn test_encouragement_scenario() {
    let calculator = StatCalculator::new(Arc::new(responding_with(
        r#"{"stat_changes":{"intimacy":5,"mental":3,"stamina":0},"reason":"Positive encouragement"}"#,
    )));

    let (delta, reason) = calculator
        .analyze_conversation(
            "You did great today, keep it up!",
            "Thanks, coach!",
            &march_state(),
            None,
        )
        .await
        .unwrap()
        .into_parts();

    let expected: StatDelta = [("intimacy", 5), ("mental", 3)].into_iter().collect();
    assert_eq!(delta, expected);
    assert_eq!(reason, "Positive encouragement");
}

#[tokio::test]
async fn test_prompt_carries_game_state_and_turn() {
    let mut llm = MockLlmPort::new();
    llm.expect_generate()
        .withf(|request| {
            let human = &request.messages[0].content;
            request.messages.len() == 1
                && request.messages[0].role == MessageRole::User
                && request.system_prompt.as_deref() == Some(STAT_ANALYSIS_SYSTEM_PROMPT)
                && request.json_response
                && human.contains("- Current month: 3")
                && human.contains(
                    r#"{"intimacy":30,"mental":50,"stamina":60,"power":40,"speed":45}"#,
                )
                && human.contains("Coach (user): You did great today, keep it up!")
                && human.contains("Minseok (AI): Thanks, coach!")
                && human.contains("[Conversation context]\nAfter a rough loss")
        })
        .times(1)
        .returning(|_| {
            Ok(LlmResponse::text(
                r#"{"stat_changes":{"mental":2},"reason":"Lifted spirits"}"#,
            ))
        });

    let result = calculator_with(llm)
        .analyze_conversation(
            "You did great today, keep it up!",
            "Thanks, coach!",
            &march_state(),
            Some("After a rough loss"),
        )
        .await
        .unwrap();

    assert_eq!(result.delta.get_stat(StatKind::Mental), 2);
}

#[tokio::test]
async fn test_configured_temperature_reaches_request() {
    let mut llm = MockLlmPort::new();
    llm.expect_generate()
        .withf(|request| request.temperature == Some(0.7))
        .times(1)
        .returning(|_| Ok(LlmResponse::text(r#"{"stat_changes":{},"reason":"ok"}"#)));

    let config = AnalysisConfig {
        temperature: 0.7,
        delta_policy: DeltaPolicy::PassThrough,
    };
    let calculator = StatCalculator::from_config(Arc::new(llm), &config);

    calculator
        .analyze_conversation("hi", "hello", &march_state(), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_all_zero_changes_yield_empty_delta() {
    let calculator = calculator_with(responding_with(
        r#"{"stat_changes":{"intimacy":0,"mental":0,"stamina":0,"power":0,"speed":0},"reason":"Small talk"}"#,
    ));

    let result = calculator
        .analyze_conversation("Nice weather", "Yeah", &march_state(), None)
        .await
        .unwrap();

    assert!(result.delta.is_empty());
    assert_eq!(result.reason, "Small talk");
}

#[tokio::test]
async fn test_malformed_response_is_no_op() {
    let calculator = calculator_with(responding_with("Sorry, I can't help with that."));

    let (delta, reason) = calculator
        .analyze_conversation("Nice weather", "Yeah", &march_state(), None)
        .await
        .unwrap()
        .into_parts();

    assert!(delta.is_empty());
    assert_eq!(reason, FAILURE_REASON);
}

#[tokio::test]
async fn test_fenced_response_with_analysis() {
    let calculator = calculator_with(responding_with(
        "```json\n{\"stat_changes\":{\"speed\":-3},\"reason\":\"Pushed on stealing\",\"analysis\":\"The player tensed up\"}\n```",
    ));

    let result = calculator
        .analyze_conversation("Steal second next time", "...", &march_state(), None)
        .await
        .unwrap();

    assert_eq!(result.delta.get_stat(StatKind::Speed), -3);
    assert_eq!(result.analysis.as_deref(), Some("The player tensed up"));
}

#[tokio::test]
async fn test_missing_reason_uses_default() {
    let calculator = calculator_with(responding_with(r#"{"stat_changes":{"power":1}}"#));

    let result = calculator
        .analyze_conversation("Nice swing", "Thanks", &march_state(), None)
        .await
        .unwrap();

    assert_eq!(result.reason, DEFAULT_REASON);
    assert_eq!(result.delta.get_stat(StatKind::Power), 1);
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let mut llm = MockLlmPort::new();
    llm.expect_generate()
        .times(1)
        .returning(|_| Err(LlmError::request_failed("connection refused")));

    let err = calculator_with(llm)
        .analyze_conversation("hi", "hello", &march_state(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::RequestFailed(_)));
}

#[tokio::test]
async fn test_clamp_policy_end_to_end() {
    let config = AnalysisConfig {
        delta_policy: DeltaPolicy::Clamp,
        ..AnalysisConfig::default()
    };
    let calculator = StatCalculator::from_config(
        Arc::new(responding_with(
            r#"{"stat_changes":{"intimacy":15,"stamina":-8,"charisma":4},"reason":"Intense session"}"#,
        )),
        &config,
    );

    let result = calculator
        .analyze_conversation("Run it again!", "Okay...", &march_state(), None)
        .await
        .unwrap();

    let expected: StatDelta = [("intimacy", 10), ("stamina", -5)].into_iter().collect();
    assert_eq!(result.delta, expected);
}

#[test]
fn test_rule_tables_without_oracle() {
    let calculator = calculator_with(MockLlmPort::new());

    let bonus = calculator.calculate_training_bonus("mental-training", &march_state());
    assert_eq!(bonus.get_stat(StatKind::Mental), 5);
    assert_eq!(bonus.get_stat(StatKind::Intimacy), 2);

    assert!(calculator
        .calculate_training_bonus("unknown-type", &march_state())
        .is_empty());

    assert_eq!(
        calculator.get_intimacy_level(march_state().stats.intimacy),
        dugout_domain::IntimacyTier::Low.descriptor()
    );
}

fn calculator_with(llm: MockLlmPort) -> StatCalculator {
    StatCalculator::new(Arc::new(llm))
}
