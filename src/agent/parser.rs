//! Extraction of structured action requests and final-answer markers from
//! raw model text.
//!
//! Both extractions are best-effort and never fail: a model turn with no
//! recognizable action block is a normal outcome meaning "no tool call this
//! turn", not an error.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::OnceLock;

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionRequest {
    pub tool: String,
    pub parameters: Value,
}

fn response_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<response>(.*?)</response>").unwrap())
}

fn labeled_fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```json\s*\n(.*?)\n```").unwrap())
}

fn bare_fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```\s*\n(.*?)\n```").unwrap())
}

/// Extract the content of the first `<response>…</response>` span, trimmed.
///
/// First-match-or-none: later spans are ignored.
pub fn extract_final_answer(text: &str) -> Option<String> {
    response_re()
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// Extract the first valid action request from model text.
///
/// Strategies are tried in strict precedence order; within one strategy,
/// candidates are tried in document order. A candidate is valid when it
/// parses as a JSON object carrying both a `"tool"` and a `"parameters"`
/// field; candidates that fail to parse are skipped, and a strategy with no
/// valid candidate falls through to the next one.
pub fn extract_action(text: &str) -> Option<ActionRequest> {
    let strategies: [fn(&str) -> Vec<String>; 3] =
        [labeled_fence_blocks, bare_fence_blocks, brace_spans];

    for strategy in strategies {
        for candidate in strategy(text) {
            if let Some(action) = parse_candidate(&candidate) {
                return Some(action);
            }
        }
    }

    None
}

fn parse_candidate(candidate: &str) -> Option<ActionRequest> {
    serde_json::from_str(candidate).ok()
}

/// Strategy 1: content of ```json-labeled fenced blocks.
fn labeled_fence_blocks(text: &str) -> Vec<String> {
    labeled_fence_re()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Strategy 2: content of unlabeled fenced blocks.
fn bare_fence_blocks(text: &str) -> Vec<String> {
    bare_fence_re()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Strategy 3: brace-balanced spans in the raw text that mention a `"tool"`
/// key. Braces are paired with a depth counter; nested parameter objects
/// survive intact.
fn brace_spans(text: &str) -> Vec<String> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('{') {
        let start = pos + offset;
        match balanced_end(bytes, start) {
            Some(end) => {
                let span = &text[start..=end];
                if span.contains("\"tool\"") {
                    spans.push(span.to_string());
                }
                pos = end + 1;
            }
            // This brace never closes; a later one still might.
            None => pos = start + 1,
        }
    }

    spans
}

/// Index of the brace closing the one at `start`, honoring JSON strings.
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn labeled_fence_yields_action() {
        let text = "Thought: check the weather.\n```json\n{\"tool\": \"WeatherTool\", \"parameters\": {\"location\": \"Paris\"}}\n```";
        let action = extract_action(text).expect("action present");
        assert_eq!(action.tool, "WeatherTool");
        assert_eq!(action.parameters, json!({"location": "Paris"}));
    }

    #[test]
    fn labeled_fence_wins_over_unlabeled_and_brace() {
        let text = concat!(
            "{\"tool\": \"BraceTool\", \"parameters\": {}}\n",
            "```\n{\"tool\": \"BareTool\", \"parameters\": {}}\n```\n",
            "```json\n{\"tool\": \"LabeledTool\", \"parameters\": {}}\n```\n",
        );
        let action = extract_action(text).expect("action present");
        assert_eq!(action.tool, "LabeledTool");
    }

    #[test]
    fn unlabeled_fence_is_second_choice() {
        let text = "Some prose.\n```\n{\"tool\": \"BareTool\", \"parameters\": {\"q\": 1}}\n```";
        let action = extract_action(text).expect("action present");
        assert_eq!(action.tool, "BareTool");
    }

    #[test]
    fn brace_span_is_last_resort_and_handles_nesting() {
        let text = "I will call {\"tool\": \"HackerNews\", \"parameters\": {\"no_of_stories\": 3}} now.";
        let action = extract_action(text).expect("action present");
        assert_eq!(action.tool, "HackerNews");
        assert_eq!(action.parameters["no_of_stories"], 3);
    }

    #[test]
    fn invalid_candidates_are_skipped_in_document_order() {
        let text = concat!(
            "```json\n{not json at all\n```\n",
            "```json\n{\"tool\": \"SecondBlock\", \"parameters\": {}}\n```\n",
        );
        let action = extract_action(text).expect("action present");
        assert_eq!(action.tool, "SecondBlock");
    }

    #[test]
    fn strategy_with_no_valid_candidate_falls_through() {
        let text = concat!(
            "```json\n{broken\n```\n",
            "later: {\"tool\": \"BraceTool\", \"parameters\": {}}\n",
        );
        let action = extract_action(text).expect("action present");
        assert_eq!(action.tool, "BraceTool");
    }

    #[test]
    fn missing_fields_do_not_count() {
        assert!(extract_action("```json\n{\"tool\": \"X\"}\n```").is_none());
        assert!(extract_action("```json\n{\"parameters\": {}}\n```").is_none());
        assert!(extract_action("no braces, no fences").is_none());
    }

    #[test]
    fn only_first_action_is_returned() {
        let text = concat!(
            "```json\n{\"tool\": \"First\", \"parameters\": {}}\n```\n",
            "```json\n{\"tool\": \"Second\", \"parameters\": {}}\n```\n",
        );
        let action = extract_action(text).expect("action present");
        assert_eq!(action.tool, "First");
    }

    #[test]
    fn final_answer_is_first_match_trimmed() {
        let text = "<response>  It is 18°C in Paris  </response> and <response>ignored</response>";
        assert_eq!(
            extract_final_answer(text).as_deref(),
            Some("It is 18°C in Paris")
        );
        assert!(extract_final_answer("no marker here").is_none());
    }

    #[test]
    fn final_answer_spans_lines() {
        let text = "<response>line one\nline two</response>";
        assert_eq!(
            extract_final_answer(text).as_deref(),
            Some("line one\nline two")
        );
    }

    #[test]
    fn string_braces_do_not_confuse_the_scanner() {
        let text = r#"{"tool": "EchoTool", "parameters": {"input": "a } inside a string"}}"#;
        let action = extract_action(text).expect("action present");
        assert_eq!(action.parameters["input"], "a } inside a string");
    }
}
