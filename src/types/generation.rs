//! Generation settings and results.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::EnumString;

use super::message::{AgentToolCall, AgentToolResult, ModelMessage};
use super::usage::Usage;

/// Settings controlling text generation.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, Default, PartialEq)]
pub struct GenerationSettings {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub seed: Option<u64>,
}

/// Why generation finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
}

/// One model turn inside a tool loop.
#[derive(Debug, Clone)]
pub struct GenerationStep {
    pub text: String,
    pub tool_calls: Vec<AgentToolCall>,
    pub tool_results: Vec<AgentToolResult>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

/// Result of a full tool-loop run.
#[derive(Debug, Clone)]
pub struct GenerateTextResult {
    /// Final assistant text.
    pub text: String,
    pub steps: Vec<GenerationStep>,
    /// Full conversation, ending with the final assistant message.
    pub messages: Vec<ModelMessage>,
    pub usage: Usage,
    pub finish_reason: Option<FinishReason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_only_given_fields() {
        let settings = GenerationSettings::builder().temperature(0.2).build();
        assert_eq!(settings.temperature, Some(0.2));
        assert_eq!(settings.max_tokens, None);
    }

    #[test]
    fn finish_reason_parses_wire_names() {
        assert_eq!("tool_calls".parse::<FinishReason>().unwrap(), FinishReason::ToolCalls);
        assert_eq!("content_filter".parse::<FinishReason>().unwrap(), FinishReason::ContentFilter);
        assert!("function_call".parse::<FinishReason>().is_err());
    }
}
