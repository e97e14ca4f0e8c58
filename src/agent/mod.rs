//! Agent module - the core orchestration logic.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build a system prompt advertising the registered tools
//! 2. Ask the model for the next turn
//! 3. If the turn requests a tool, execute it and feed the observation back
//! 4. Repeat until the model answers directly or the iteration budget forces
//!    a final answer

mod agent_loop;
mod invoker;
mod parser;
mod prompt;

pub use agent_loop::{Agent, AgentError, AgentOptions, Exchange};
pub use invoker::execute_tool;
pub use parser::{extract_action, extract_final_answer, ActionRequest};
pub use prompt::{build_system_prompt, seed_history};
