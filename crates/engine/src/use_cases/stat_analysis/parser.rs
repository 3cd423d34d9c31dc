//! Parsing and validation of the oracle's stat-analysis response.
//!
//! Parsing never fails with an error: a response that cannot be understood is
//! reported as [`ParsedAnalysis::Failed`], which callers turn into a turn with no
//! stat change.

use std::fmt;

use dugout_domain::StatDelta;
use serde_json::{Map, Value};

/// Reason used when the oracle omits one.
pub const DEFAULT_REASON: &str = "analysis complete";

/// Reason reported when the response could not be parsed.
pub const FAILURE_REASON: &str = "analysis failed";

/// What went wrong decoding a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailureKind {
    /// Not decodable as JSON at all
    InvalidJson,
    /// Valid JSON, but not an object
    NotAnObject,
    /// `stat_changes` present but not an object
    InvalidStatChanges,
    /// `reason` present but not a string
    InvalidReason,
}

impl ParseFailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::NotAnObject => "not_an_object",
            Self::InvalidStatChanges => "invalid_stat_changes",
            Self::InvalidReason => "invalid_reason",
        }
    }
}

impl fmt::Display for ParseFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Final outcome of one analysis, handed to the game loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Non-zero stat changes
    pub delta: StatDelta,
    /// One-sentence justification (never empty)
    pub reason: String,
    /// Optional extended rationale from the oracle
    pub analysis: Option<String>,
}

impl AnalysisResult {
    /// The no-op result used when a response could not be parsed.
    pub fn failed() -> Self {
        Self {
            delta: StatDelta::new(),
            reason: FAILURE_REASON.to_string(),
            analysis: None,
        }
    }

    pub fn into_parts(self) -> (StatDelta, String) {
        (self.delta, self.reason)
    }
}

/// Tagged parse outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedAnalysis {
    Parsed {
        delta: StatDelta,
        reason: String,
        analysis: Option<String>,
    },
    Failed {
        kind: ParseFailureKind,
        message: String,
    },
}

impl ParsedAnalysis {
    fn failed(kind: ParseFailureKind, message: impl Into<String>) -> Self {
        Self::Failed {
            kind,
            message: message.into(),
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed { .. })
    }

    /// Collapse into the caller-facing result, substituting the no-op result
    /// for failures.
    pub fn into_result(self) -> AnalysisResult {
        match self {
            Self::Parsed {
                delta,
                reason,
                analysis,
            } => AnalysisResult {
                delta,
                reason,
                analysis,
            },
            Self::Failed { .. } => AnalysisResult::failed(),
        }
    }

    /// Apply `f` to the delta of a successful parse.
    pub fn map_delta<F>(self, f: F) -> Self
    where
        F: FnOnce(StatDelta) -> StatDelta,
    {
        match self {
            Self::Parsed {
                delta,
                reason,
                analysis,
            } => Self::Parsed {
                delta: f(delta),
                reason,
                analysis,
            },
            failed => failed,
        }
    }
}

/// Parse raw oracle output into a stat analysis.
pub fn parse_stat_response(response: &str) -> ParsedAnalysis {
    let json_str = extract_json(response);

    let parsed: Value = match serde_json::from_str(json_str) {
        Ok(value) => value,
        Err(e) => return ParsedAnalysis::failed(ParseFailureKind::InvalidJson, e.to_string()),
    };

    let root = match parsed {
        Value::Object(root) => root,
        other => {
            return ParsedAnalysis::failed(
                ParseFailureKind::NotAnObject,
                format!("expected a JSON object, got {}", json_type(&other)),
            )
        }
    };

    let delta = match root.get("stat_changes") {
        None | Some(Value::Null) => StatDelta::new(),
        Some(Value::Object(changes)) => parse_stat_changes(changes),
        Some(other) => {
            return ParsedAnalysis::failed(
                ParseFailureKind::InvalidStatChanges,
                format!("'stat_changes' must be an object, got {}", json_type(other)),
            )
        }
    };

    let reason = match root.get("reason") {
        None | Some(Value::Null) => DEFAULT_REASON.to_string(),
        Some(Value::String(reason)) if reason.trim().is_empty() => DEFAULT_REASON.to_string(),
        Some(Value::String(reason)) => reason.clone(),
        Some(other) => {
            return ParsedAnalysis::failed(
                ParseFailureKind::InvalidReason,
                format!("'reason' must be a string, got {}", json_type(other)),
            )
        }
    };

    let analysis = root
        .get("analysis")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string);

    ParsedAnalysis::Parsed {
        delta,
        reason,
        analysis,
    }
}

/// Collect integral, non-zero entries. Anything else is dropped with a warning.
fn parse_stat_changes(changes: &Map<String, Value>) -> StatDelta {
    let mut delta = StatDelta::new();
    for (key, value) in changes {
        match integral_value(value) {
            Some(change) => delta.insert(key.as_str(), change),
            None => tracing::warn!(
                stat = %key,
                value = %value,
                "Dropping non-integer stat change from LLM response"
            ),
        }
    }
    delta
}

/// Integer JSON numbers, plus floats with no fractional part (e.g. `3.0`).
/// Saturates into `i32`.
fn integral_value(value: &Value) -> Option<i32> {
    let Value::Number(number) = value else {
        return None;
    };

    if let Some(i) = number.as_i64() {
        return Some(i.clamp(i32::MIN as i64, i32::MAX as i64) as i32);
    }
    if number.as_u64().is_some() {
        return Some(i32::MAX);
    }
    number
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f.clamp(i32::MIN as f64, i32::MAX as f64) as i32)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Extract JSON from a response that might have markdown code blocks or extra text.
fn extract_json(response: &str) -> &str {
    // Try to find JSON in markdown code block
    if let Some(start) = response.find("```json") {
        if let Some(end) = response[start + 7..].find("```") {
            return response[start + 7..start + 7 + end].trim();
        }
    }

    // Try to find JSON in plain code block
    if let Some(start) = response.find("```") {
        if let Some(end) = response[start + 3..].find("```") {
            let content = response[start + 3..start + 3 + end].trim();
            // Skip language identifier if present
            if let Some(newline_pos) = content.find('\n') {
                let first_line = &content[..newline_pos];
                if !first_line.starts_with('{') {
                    return content[newline_pos + 1..].trim();
                }
            }
            return content;
        }
    }

    // Try to find raw JSON object
    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if end > start {
            return &response[start..=end];
        }
    }

    // Return as-is if no JSON found
    response.trim()
}
