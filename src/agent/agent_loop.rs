//! Core agent loop implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::llm::{ChatMessage, LlmClient, LlmError};
use crate::tools::ToolRegistry;

use super::invoker::execute_tool;
use super::parser::{extract_action, extract_final_answer};
use super::prompt::{build_system_prompt, seed_history};

/// Synthetic instruction sent when the iteration budget runs out.
const BUDGET_EXHAUSTED_PROMPT: &str = "You've used up all your tool calls. \
     Please provide your final answer based on the information collected.";

/// One completed question/answer pair, replayed into later runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
}

/// Loop policy knobs.
#[derive(Debug, Clone)]
pub struct AgentOptions {
    /// Maximum number of tool-executing round trips before a final answer is
    /// forced. Bounds tool loops, not wall-clock time.
    pub max_iterations: usize,

    /// Marker-required variant: the prompt teaches the `<response>` span and
    /// the question is wrapped in `<question>` tags. In both variants the
    /// marker content, when present, is preferred over the raw text.
    pub require_final_marker: bool,

    /// Per-call timeout applied to tool execution.
    pub tool_timeout: Duration,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            require_final_marker: true,
            tool_timeout: Duration::from_secs(30),
        }
    }
}

/// Errors that end a run without an answer.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The model client failed. There is no fallback text source; the run
    /// reports failure rather than a partial answer.
    #[error("generation failed: {0}")]
    Generation(#[from] LlmError),

    #[error("run interrupted")]
    Interrupted,
}

/// The tool-calling agent.
///
/// Owns its conversation state exclusively; one value drives one run at a
/// time. The model and the registry are shared collaborators behind `Arc`.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
    options: AgentOptions,
    exchanges: Vec<Exchange>,
    interrupt: Arc<AtomicBool>,
}

impl Agent {
    pub fn new(llm: Arc<dyn LlmClient>, tools: Arc<ToolRegistry>, options: AgentOptions) -> Self {
        Self {
            llm,
            tools,
            options,
            exchanges: Vec::new(),
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag checked between iterations; set it from another task to stop the
    /// run before its next model call.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    /// Completed exchanges from earlier runs on this agent.
    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    /// Run one question to completion.
    ///
    /// Returns the final answer together with the conversation history of
    /// this run. Tool failures are fed back into the conversation and never
    /// end the run; a model-client failure does.
    pub async fn run(
        &mut self,
        question: &str,
    ) -> Result<(String, Vec<ChatMessage>), AgentError> {
        let system_prompt = build_system_prompt(&self.tools, self.options.require_final_marker);
        let mut history = seed_history(
            &system_prompt,
            &self.exchanges,
            question,
            self.options.require_final_marker,
        );

        let mut iteration = 0;
        let mut answer = None;

        while iteration < self.options.max_iterations {
            if self.interrupt.load(Ordering::SeqCst) {
                return Err(AgentError::Interrupted);
            }

            tracing::debug!("Agent iteration {}", iteration + 1);
            let response = self.llm.generate(&history).await?;

            match extract_action(&response) {
                Some(action) => {
                    history.push(ChatMessage::assistant(&response));

                    let observation = execute_tool(
                        &self.tools,
                        &action.tool,
                        action.parameters,
                        self.options.tool_timeout,
                    )
                    .await;

                    history.push(ChatMessage::user(format!(
                        "<observation>{}</observation>",
                        observation
                    )));
                    iteration += 1;
                }
                None => {
                    // No tool call this turn: the marker content, or failing
                    // that the raw text, is the final answer.
                    answer = Some(extract_final_answer(&response).unwrap_or(response));
                    break;
                }
            }
        }

        let answer = match answer {
            Some(answer) => answer,
            None => self.force_final_answer(&mut history).await?,
        };

        self.exchanges.push(Exchange {
            user: question.to_string(),
            assistant: answer.clone(),
        });

        Ok((answer, history))
    }

    /// Budget-exhaustion branch: one synthetic instruction, one last model
    /// call, marker-or-raw result.
    async fn force_final_answer(
        &self,
        history: &mut Vec<ChatMessage>,
    ) -> Result<String, AgentError> {
        tracing::debug!(
            "Iteration budget ({}) exhausted, forcing final answer",
            self.options.max_iterations
        );

        history.push(ChatMessage::user(BUDGET_EXHAUSTED_PROMPT));
        let response = self.llm.generate(history).await?;
        history.push(ChatMessage::assistant(&response));

        Ok(extract_final_answer(&response).unwrap_or(response))
    }
}
