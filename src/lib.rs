//! # Reagent
//!
//! A tool-calling ReAct agent loop with a pluggable LLM backend.
//!
//! This library provides:
//! - An orchestration loop that alternates between model calls and tool
//!   execution until the model produces a final answer
//! - A text parser that extracts fenced action requests and final-answer
//!   markers from raw model output
//! - A registration-ordered tool registry with web search, news and weather
//!   tools included
//! - A generator/critic reflection loop for iterative content refinement
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Build a system prompt advertising the registered tools and the output
//!    conventions
//! 2. Call the model with the conversation history
//! 3. Parse the response; execute at most one requested tool and feed the
//!    observation back
//! 4. Repeat until the model answers directly or the iteration budget forces
//!    a final answer
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use reagent::{agent::{Agent, AgentOptions}, config::Config, llm::GroqClient, tools};
//!
//! let config = Config::from_env()?;
//! let llm = Arc::new(GroqClient::new(
//!     config.groq_api_key.clone(),
//!     config.default_model.clone(),
//!     Duration::from_secs(config.llm_timeout_secs),
//! )?);
//!
//! let mut registry = tools::ToolRegistry::new();
//! registry.register(Arc::new(tools::DuckDuckGoSearch::new()));
//!
//! let mut agent = Agent::new(llm, Arc::new(registry), AgentOptions::default());
//! let (answer, _history) = agent.run("What's new in Rust?").await?;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod reflection;
pub mod tools;

pub use config::Config;
