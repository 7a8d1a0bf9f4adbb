//! Text-generation outcome and error types.
//!
//! A reply is always produced: either the generated text or a configured
//! fallback. `ReplyOutcome` keeps the distinction visible so callers can log
//! degraded exchanges.

use serde::{Deserialize, Serialize};

/// Errors from a text-generation provider.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    /// The response parsed but carried no candidate text.
    #[error("response contained no candidate text")]
    EmptyResponse,
}

/// Why a reply fell back to canned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DegradedReason {
    /// Well-formed call, but no usable text in the response.
    EmptyResponse,
    /// Network, HTTP status, or decoding failure.
    ProviderFailure(String),
}

/// Result of asking the generator for a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReplyOutcome {
    Generated { text: String },
    Degraded { text: String, reason: DegradedReason },
}

impl ReplyOutcome {
    /// The text to send, generated or fallback.
    pub fn text(&self) -> &str {
        match self {
            ReplyOutcome::Generated { text } | ReplyOutcome::Degraded { text, .. } => text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ReplyOutcome::Degraded { .. })
    }
}
