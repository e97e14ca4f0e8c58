//! Groq chat-completions client (OpenAI-compatible wire format).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde::{Deserialize, Serialize};

use super::{ChatMessage, LlmClient, LlmError};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Client for the Groq API.
pub struct GroqClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    model: String,
}

impl GroqClient {
    /// Create a client with a per-request timeout.
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let http = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model,
        })
    }

    /// Override the API base URL (e.g. for a compatible local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn generate(&self, history: &[ChatMessage]) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = CompletionRequest {
            model: &self.model,
            messages: history,
        };

        tracing::debug!("Requesting completion from {} ({} messages)", self.model, history.len());

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body: CompletionResponse = response.json().await?;
                body.choices
                    .into_iter()
                    .next()
                    .and_then(|c| c.message.content)
                    .filter(|content| !content.is_empty())
                    .ok_or(LlmError::EmptyResponse)
            }
            status => {
                // Mine the error body for a useful message; fall back to the
                // status line when it isn't JSON.
                let message = response
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .as_ref()
                    .and_then(|v| v.get("error"))
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown error")
                    .to_string();

                Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_wire_format() {
        let messages = vec![
            ChatMessage::system("be brief"),
            ChatMessage::user("hello"),
        ];
        let body = CompletionRequest {
            model: "llama-3.3-70b-versatile",
            messages: &messages,
        };

        let json = serde_json::to_value(&body).expect("serialize request");
        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
    }

    #[test]
    fn response_content_deserializes() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"hi there"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).expect("parse response");
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("hi there")
        );
    }
}
