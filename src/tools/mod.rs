//! Tool trait and registry.
//!
//! A tool is an independently implemented operation the model can invoke by
//! name with a JSON parameter mapping. The registry is an explicit value
//! built once at startup and shared by reference; registration order is
//! preserved because it determines the order tools appear in the system
//! prompt.

mod hackernews;
mod search;
mod weather;

pub use hackernews::HackerNews;
pub use search::DuckDuckGoSearch;
pub use weather::WeatherTool;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

/// An operation the model can invoke.
///
/// `execute` receives the parameter mapping from the parsed action request.
/// Implementations return `Err` only for genuine faults (bad arguments,
/// upstream I/O); "no data found" is a normal `Ok` result.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Registry name the model uses to invoke this tool.
    fn name(&self) -> &str;

    /// Human-readable description, shown verbatim in the system prompt.
    fn description(&self) -> &str;

    /// JSON schema of the accepted parameters.
    fn parameters_schema(&self) -> Value;

    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Immutable advertisement of one registered tool.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Registration-ordered collection of tools.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Register a tool. Names must be unique; on collision the earlier
    /// registration wins lookups.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.push(tool);
    }

    /// Names of all registered tools, in registration order.
    pub fn list(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// Descriptor for a single tool.
    pub fn descriptor(&self, name: &str) -> Option<ToolDescriptor> {
        self.get(name).map(|t| ToolDescriptor {
            name: t.name().to_string(),
            description: t.description().to_string(),
            parameters: t.parameters_schema(),
        })
    }

    /// Descriptors for every tool, in registration order.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|t| ToolDescriptor {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters_schema(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use serde_json::json;

    /// Echoes its `input` argument back; used by registry and loop tests.
    pub struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "EchoTool"
        }

        fn description(&self) -> &str {
            "Echoes the input string back."
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {
                    "input": { "type": "string", "description": "Text to echo" }
                },
                "required": ["input"]
            })
        }

        async fn execute(&self, args: Value) -> anyhow::Result<String> {
            let input = args["input"]
                .as_str()
                .ok_or_else(|| anyhow::anyhow!("Missing 'input' argument"))?;
            Ok(input.to_string())
        }
    }
}
