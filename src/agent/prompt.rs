//! System prompt construction and history seeding.

use crate::llm::ChatMessage;
use crate::tools::ToolRegistry;

use super::Exchange;

/// Build the system prompt advertising every registered tool.
///
/// Tools appear in registration order with their name, description and
/// parameter schema verbatim. The `<response>` final-answer convention is
/// only taught in the marker-required variant; the fenced action-block
/// convention is always present.
pub fn build_system_prompt(tools: &ToolRegistry, require_final_marker: bool) -> String {
    let mut prompt = String::from(
        "You are a helpful assistant that can use tools to answer user queries. \
         You operate by running a loop with the following steps: Thought, Act, Observation.\n\
         You have access to the following tools:\n\n",
    );

    for descriptor in tools.descriptors() {
        prompt.push_str(&format!("Tool: {}\n", descriptor.name));
        prompt.push_str(&format!("Description: {}\n", descriptor.description));
        prompt.push_str(&format!(
            "Parameters: {}\n\n",
            serde_json::to_string_pretty(&descriptor.parameters).unwrap_or_default()
        ));
    }

    prompt.push_str(
        "\nPay special attention to the type of the parameters.\n\
         To use a tool, respond with:\n\
         ```json\n\
         {\n\
           \"tool\": \"ToolName\",\n\
           \"parameters\": {\n\
             \"param1\": \"value1\",\n\
             \"param2\": \"value2\"\n\
           }\n\
         }\n\
         ```\n",
    );

    if require_final_marker {
        prompt.push_str(
            "\nExample session:\n\
             <question>Whats the weather at Bangalore?</question>\n\
             <thought>I need to use the weather tool to get the weather of Bangalore</thought>\n\
             ```json\n\
             {\n\
               \"tool\": \"WeatherTool\",\n\
               \"parameters\": {\n\
                 \"location\": \"Bangalore\"\n\
               }\n\
             }\n\
             ```\n\
             You will get a response from the tool. You will then need to observe the response \
             and think about what to do next.\n\
             <observation>40</observation>\n\n\
             You then output:\n\n\
             <response>It is 40 degrees in Bangalore</response>\n",
        );
    }

    prompt.push_str(
        "\nIf you need to use multiple tools, use them one at a time. \
         Wait for the result of one tool before using another.\n\
         If you can answer the user's query without using tools, just respond normally.\n",
    );

    prompt
}

/// Seed the conversation history for one run: system prompt, replayed past
/// exchanges, then the current question as the final message.
pub fn seed_history(
    system_prompt: &str,
    past: &[Exchange],
    question: &str,
    require_final_marker: bool,
) -> Vec<ChatMessage> {
    let mut history = Vec::with_capacity(2 + past.len() * 2);
    history.push(ChatMessage::system(system_prompt));

    for exchange in past {
        history.push(ChatMessage::user(&exchange.user));
        history.push(ChatMessage::assistant(&exchange.assistant));
    }

    if require_final_marker {
        history.push(ChatMessage::user(format!("<question>{}</question>", question)));
    } else {
        history.push(ChatMessage::user(question));
    }

    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;
    use crate::tools::test_support::EchoTool;
    use std::sync::Arc;

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        registry
    }

    #[test]
    fn system_prompt_enumerates_descriptors() {
        let prompt = build_system_prompt(&registry(), true);
        assert!(prompt.contains("Tool: EchoTool"));
        assert!(prompt.contains("Description: Echoes the input string back."));
        assert!(prompt.contains("\"required\""));
        assert!(prompt.contains("one at a time"));
    }

    #[test]
    fn marker_convention_is_gated() {
        let with_marker = build_system_prompt(&registry(), true);
        let without_marker = build_system_prompt(&registry(), false);
        assert!(with_marker.contains("<response>"));
        assert!(!without_marker.contains("<response>"));
    }

    #[test]
    fn seeded_history_shape() {
        let past = vec![Exchange {
            user: "earlier question".to_string(),
            assistant: "earlier answer".to_string(),
        }];
        let history = seed_history("sys", &past, "current question", true);

        assert_eq!(history.len(), 4);
        assert_eq!(history[0].role, Role::System);
        assert_eq!(history[1].content, "earlier question");
        assert_eq!(history[2].role, Role::Assistant);
        assert_eq!(history[3].content, "<question>current question</question>");

        let plain = seed_history("sys", &[], "q", false);
        assert_eq!(plain.len(), 2);
        assert_eq!(plain[1].content, "q");
    }
}
