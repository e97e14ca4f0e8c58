//! Generator/critic refinement loop.
//!
//! A second agent pattern alongside the tool loop: one model role generates
//! content, another critiques it, and the critique is fed back as the next
//! generation instruction. The loop ends when the critic replies with the
//! done sentinel or the step budget runs out; the last generation is the
//! result.

use std::sync::Arc;

use crate::agent::AgentError;
use crate::llm::{ChatMessage, LlmClient};

/// Critic reply that ends the loop.
const DONE_SENTINEL: &str = "Done";

const CRITIC_SUFFIX: &str =
    "\n\nIf you see that all the issues are fixed, please reply with 'Done' only.";

/// Configuration for one reflection run.
#[derive(Debug, Clone)]
pub struct ReflectionOptions {
    /// Maximum number of generate/critique rounds after the initial
    /// generation.
    pub max_steps: usize,
}

impl Default for ReflectionOptions {
    fn default() -> Self {
        Self { max_steps: 3 }
    }
}

/// The reflection loop: alternating generation and critique histories over
/// a shared model client.
pub struct ReflectionLoop {
    llm: Arc<dyn LlmClient>,
    options: ReflectionOptions,
    generation_history: Vec<ChatMessage>,
    critique_history: Vec<ChatMessage>,
}

impl ReflectionLoop {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        generation_prompt: impl Into<String>,
        critique_prompt: impl Into<String>,
        options: ReflectionOptions,
    ) -> Self {
        Self {
            llm,
            options,
            generation_history: vec![ChatMessage::system(generation_prompt.into())],
            critique_history: vec![ChatMessage::system(format!(
                "{}{}",
                critique_prompt.into(),
                CRITIC_SUFFIX
            ))],
        }
    }

    /// Run the loop to completion and return the last generation.
    pub async fn run(&mut self) -> Result<String, AgentError> {
        let mut output = self.generate(None).await?;

        for step in 0..self.options.max_steps {
            let critique = self.critique(&output).await?;
            if critique.trim() == DONE_SENTINEL {
                tracing::debug!("Critic satisfied after {} step(s)", step);
                break;
            }
            output = self.generate(Some(critique)).await?;
        }

        Ok(output)
    }

    async fn generate(&mut self, instruction: Option<String>) -> Result<String, AgentError> {
        if let Some(instruction) = instruction {
            self.generation_history.push(ChatMessage::user(instruction));
        }

        let output = self.llm.generate(&self.generation_history).await?;
        self.generation_history.push(ChatMessage::assistant(&output));
        Ok(output)
    }

    async fn critique(&mut self, generation: &str) -> Result<String, AgentError> {
        self.critique_history.push(ChatMessage::user(generation));

        let critique = self.llm.generate(&self.critique_history).await?;
        self.critique_history.push(ChatMessage::assistant(&critique));
        Ok(critique)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedClient {
        responses: Mutex<VecDeque<String>>,
    }

    impl ScriptedClient {
        fn new(responses: &[&str]) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.iter().map(|s| s.to_string()).collect()),
            })
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn generate(&self, _history: &[ChatMessage]) -> Result<String, LlmError> {
            self.responses
                .lock()
                .expect("script lock")
                .pop_front()
                .ok_or(LlmError::EmptyResponse)
        }
    }

    #[tokio::test]
    async fn stops_when_the_critic_is_satisfied() {
        // draft -> critique -> revision -> Done
        let llm = ScriptedClient::new(&["draft", "make it shorter", "short draft", "Done"]);
        let mut reflection = ReflectionLoop::new(
            llm,
            "Write a limerick.",
            "Critique the limerick.",
            ReflectionOptions { max_steps: 5 },
        );

        let output = reflection.run().await.expect("run");
        assert_eq!(output, "short draft");
    }

    #[tokio::test]
    async fn step_budget_bounds_the_loop() {
        // Critic never says Done; one initial generation + one round.
        let llm = ScriptedClient::new(&["draft", "still bad", "second draft"]);
        let mut reflection = ReflectionLoop::new(
            llm,
            "Write a haiku.",
            "Critique the haiku.",
            ReflectionOptions { max_steps: 1 },
        );

        let output = reflection.run().await.expect("run");
        assert_eq!(output, "second draft");
    }

    #[tokio::test]
    async fn generation_failure_propagates() {
        let llm = ScriptedClient::new(&[]);
        let mut reflection = ReflectionLoop::new(
            llm,
            "Write anything.",
            "Critique it.",
            ReflectionOptions::default(),
        );

        assert!(reflection.run().await.is_err());
    }
}
