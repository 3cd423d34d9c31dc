//! Error types for port operations.

/// Failures talking to the text-generation oracle.
///
/// These are the only errors the stat engine lets escape: once a response has
/// been received, every downstream problem is absorbed into a no-op analysis.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Create a RequestFailed error.
    pub fn request_failed(message: impl ToString) -> Self {
        Self::RequestFailed(message.to_string())
    }

    /// Create an InvalidResponse error.
    pub fn invalid_response(message: impl ToString) -> Self {
        Self::InvalidResponse(message.to_string())
    }

    /// HTTP status the oracle answered with, if the failure carries one.
    ///
    /// Adapters format non-success replies as `"{status} {body}"`.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RequestFailed(msg) => msg
                .split_whitespace()
                .next()?
                .parse::<u16>()
                .ok()
                .filter(|code| (100..600).contains(code)),
            Self::InvalidResponse(_) => None,
        }
    }

    /// Whether trying the same request again could succeed.
    ///
    /// Client errors are permanent except for timeouts and rate limiting.
    /// Connection failures and garbled bodies are transient.
    pub fn is_transient(&self) -> bool {
        match self.status_code() {
            Some(408) | Some(429) => true,
            Some(400..=499) => false,
            _ => true,
        }
    }
}
