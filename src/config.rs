//! Configuration management.
//!
//! Configuration can be set via environment variables:
//! - `GROQ_API_KEY` - Required. Your Groq API key.
//! - `WEATHER_API_KEY` - Optional. weatherapi.com key; the weather tool is
//!   only registered when present.
//! - `DEFAULT_MODEL` - Optional. Defaults to `llama-3.3-70b-versatile`.
//! - `MAX_ITERATIONS` - Optional. Maximum tool-executing iterations per run.
//!   Defaults to `5`.
//! - `REQUIRE_FINAL_MARKER` - Optional. Whether the prompt teaches the
//!   explicit `<response>` marker. Defaults to `true`.
//! - `LLM_TIMEOUT_SECS` - Optional. Per-request model timeout. Defaults to `120`.
//! - `TOOL_TIMEOUT_SECS` - Optional. Per-call tool timeout. Defaults to `30`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Process-wide configuration, assembled once at startup and passed by value
/// into the model client and the tools that need credentials. The
/// orchestration loop itself never reads it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Groq API key
    pub groq_api_key: String,

    /// weatherapi.com key, when configured
    pub weather_api_key: Option<String>,

    /// Model identifier sent to the chat-completions endpoint
    pub default_model: String,

    /// Maximum tool-executing iterations per run
    pub max_iterations: usize,

    /// Marker-required vs marker-optional loop variant
    pub require_final_marker: bool,

    /// Per-request model timeout in seconds
    pub llm_timeout_secs: u64,

    /// Per-call tool timeout in seconds
    pub tool_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GROQ_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let groq_api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GROQ_API_KEY".to_string()))?;

        let weather_api_key = std::env::var("WEATHER_API_KEY").ok();

        let default_model = std::env::var("DEFAULT_MODEL")
            .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string());

        let max_iterations = std::env::var("MAX_ITERATIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), format!("{}", e)))?;

        let require_final_marker = std::env::var("REQUIRE_FINAL_MARKER")
            .ok()
            .map(|v| {
                parse_bool(&v)
                    .map_err(|e| ConfigError::InvalidValue("REQUIRE_FINAL_MARKER".to_string(), e))
            })
            .transpose()?
            .unwrap_or(true);

        let llm_timeout_secs = std::env::var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("LLM_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;

        let tool_timeout_secs = std::env::var("TOOL_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("TOOL_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            groq_api_key,
            weather_api_key,
            default_model,
            max_iterations,
            require_final_marker,
            llm_timeout_secs,
            tool_timeout_secs,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(groq_api_key: String, default_model: String) -> Self {
        Self {
            groq_api_key,
            weather_api_key: None,
            default_model,
            max_iterations: 5,
            require_final_marker: true,
            llm_timeout_secs: 120,
            tool_timeout_secs: 30,
        }
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        other => Err(format!("expected boolean-like value, got: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("Yes"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("maybe").is_err());
    }
}
