//! LLM client abstraction and message types.
//!
//! The agent loop talks to the model through the [`LlmClient`] trait so that
//! tests can script responses without a network. [`GroqClient`] is the
//! production implementation (OpenAI-compatible chat completions).

mod groq;

pub use groq::GroqClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single turn in the conversation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Errors raised by an LLM client.
///
/// These are not recoverable inside the agent loop: with no model output
/// there is no fallback text source, so they propagate to the caller.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned no choices")]
    EmptyResponse,
}

/// A chat-completion backend.
///
/// Implementations send the full conversation history and return the next
/// assistant turn as raw text. They must surface provider failures as
/// [`LlmError`] rather than returning empty text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate(&self, history: &[ChatMessage]) -> Result<String, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage::assistant("hi");
        let json = serde_json::to_value(&msg).expect("serialize message");
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hi");
    }
}
