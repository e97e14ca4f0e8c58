//! Tool dispatch with failure-to-observation conversion.

use std::time::Duration;

use serde_json::Value;

use crate::tools::ToolRegistry;

/// Execute a requested tool and render the outcome as observation text.
///
/// Nothing escapes this boundary. Unknown names, tool faults and timeouts
/// all come back as formatted text the model can react to; only the textual
/// result re-enters the conversation.
pub async fn execute_tool(
    tools: &ToolRegistry,
    name: &str,
    parameters: Value,
    timeout: Duration,
) -> String {
    let tool = match tools.get(name) {
        Some(tool) => tool,
        None => {
            tracing::warn!("Model requested unknown tool '{}'", name);
            return format!("Error: Tool '{}' not found", name);
        }
    };

    tracing::info!("Executing tool '{}'", name);

    match tokio::time::timeout(timeout, tool.execute(parameters)).await {
        Ok(Ok(result)) => format!("Tool: {}\nResult: {}", name, result),
        Ok(Err(e)) => format!("Error executing tool '{}': {}", name, e),
        Err(_) => format!(
            "Error executing tool '{}': timed out after {} seconds",
            name,
            timeout.as_secs()
        ),
    }
}
