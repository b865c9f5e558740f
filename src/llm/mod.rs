// src/llm/mod.rs
//! Gateway layer for external chat-completion providers. Every outcome is a
//! typed `Result`; callers pattern-match and fall back instead of catching
//! exceptions.

pub mod gemini;
pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

/// Completions shorter than this (after trimming) are treated as failures.
pub const MIN_COMPLETION_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub turns: Vec<ChatTurn>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: Option<f32>,
}

impl CompletionRequest {
    /// A single user prompt with no system instruction.
    pub fn single_turn(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            turns: vec![ChatTurn::user(prompt)],
            temperature: 0.7,
            max_output_tokens: 200,
            top_p: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("provider rejected the API credentials")]
    Auth,
    #[error("provider rate limit reached")]
    RateLimited,
    #[error("provider returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("completion was empty or too short")]
    EmptyCompletion,
    #[error("could not parse provider response: {0}")]
    MalformedResponse(String),
}

impl LlmError {
    /// Human-readable hint appended to fallback text for the error classes
    /// an operator can actually act on.
    pub fn remediation_hint(&self) -> Option<&'static str> {
        match self {
            LlmError::Auth => Some(
                "\n\n(Note: our AI service could not authenticate right now, so this reply \
                 came from me directly. The API key configuration needs attention.)",
            ),
            LlmError::RateLimited => Some(
                "\n\n(Note: our AI service is handling a lot of requests right now, so this \
                 reply came from me directly. Please try again in a moment.)",
            ),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// Maps a non-success HTTP status to the matching error class.
pub(crate) fn error_for_status(status: u16, body: String) -> LlmError {
    match status {
        401 | 403 => LlmError::Auth,
        429 => LlmError::RateLimited,
        _ => LlmError::Api { status, body },
    }
}

/// Trims the completion and rejects near-empty output.
pub(crate) fn guard_completion(text: &str) -> Result<String, LlmError> {
    let trimmed = text.trim();
    if trimmed.len() < MIN_COMPLETION_CHARS {
        Err(LlmError::EmptyCompletion)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert!(matches!(error_for_status(401, String::new()), LlmError::Auth));
        assert!(matches!(error_for_status(403, String::new()), LlmError::Auth));
        assert!(matches!(error_for_status(429, String::new()), LlmError::RateLimited));
        assert!(matches!(
            error_for_status(500, String::new()),
            LlmError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn short_completions_are_rejected() {
        assert!(guard_completion("   ok   ").is_err());
        assert!(guard_completion("").is_err());
        let text = guard_completion("  That sounds really difficult.  ").unwrap();
        assert_eq!(text, "That sounds really difficult.");
    }

    #[test]
    fn only_actionable_errors_carry_hints() {
        assert!(LlmError::Auth.remediation_hint().is_some());
        assert!(LlmError::RateLimited.remediation_hint().is_some());
        assert!(LlmError::EmptyCompletion.remediation_hint().is_none());
        assert!(LlmError::MissingApiKey.remediation_hint().is_none());
    }
}
