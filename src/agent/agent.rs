//! LLM-backed agent with a tool-calling loop.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::Invoke;
use crate::error::VantageError;
use crate::provider::{ModelProvider, ProviderRequest};
use crate::tools::validation::validate_arguments;
use crate::tools::{ToolArguments, ToolRegistry};
use crate::types::*;

/// Maximum model turns per run.
pub const MAX_TOOL_ITERATIONS: usize = 20;

/// Sampling temperature used by the research agent.
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Final state of a run: the whole conversation, last message = answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub messages: Vec<ModelMessage>,
}

/// An agent bound to one model and a fixed tool registry.
///
/// Immutable after construction; every run starts from a fresh conversation.
pub struct Agent {
    provider: Arc<dyn ModelProvider>,
    tools: ToolRegistry,
    system_prompt: Option<String>,
    settings: GenerationSettings,
    max_iterations: usize,
}

impl Agent {
    pub fn new(provider: Arc<dyn ModelProvider>, tools: ToolRegistry) -> Self {
        Self {
            provider,
            tools,
            system_prompt: None,
            settings: GenerationSettings::builder()
                .temperature(DEFAULT_TEMPERATURE)
                .build(),
            max_iterations: MAX_TOOL_ITERATIONS,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    /// Run the tool loop until the model answers without tool calls.
    ///
    /// Unknown tools and malformed arguments are reported back to the model
    /// as error results. A tool that fails while executing aborts the run, as
    /// does running out of turns ([`VantageError::IterationLimit`]).
    pub async fn run(&self, input: Vec<ModelMessage>) -> Result<GenerateTextResult, VantageError> {
        let mut messages = Vec::with_capacity(input.len() + 1);
        if let Some(ref sys) = self.system_prompt {
            messages.push(ModelMessage::system(sys.clone()));
        }
        messages.extend(input);

        let tool_defs = (!self.tools.is_empty()).then(|| self.tools.definitions());
        let mut steps = Vec::new();
        let mut total_usage = Usage::default();

        for iteration in 0..self.max_iterations {
            let request = ProviderRequest {
                messages: messages.clone(),
                settings: self.settings.clone(),
                tools: tool_defs.clone(),
            };

            debug!(iteration, provider = self.provider.provider_name(), "agent: calling provider");
            let response = self.provider.generate_text(&request).await?;
            total_usage.merge(&response.usage);

            if response.tool_calls.is_empty() {
                messages.push(ModelMessage::assistant(response.text.clone()));
                steps.push(GenerationStep {
                    text: response.text.clone(),
                    tool_calls: Vec::new(),
                    tool_results: Vec::new(),
                    usage: response.usage,
                    finish_reason: response.finish_reason,
                });
                return Ok(GenerateTextResult {
                    text: response.text,
                    steps,
                    messages,
                    usage: total_usage,
                    finish_reason: response.finish_reason,
                });
            }

            messages.push(ModelMessage::assistant_tool_calls(
                response.text.clone(),
                response.tool_calls.clone(),
            ));

            let mut tool_results = Vec::with_capacity(response.tool_calls.len());
            for call in &response.tool_calls {
                let result = self.execute_tool_call(call).await?;
                messages.push(ModelMessage::tool_result(
                    result.tool_call_id.clone(),
                    result.result.clone(),
                    result.is_error,
                ));
                tool_results.push(result);
            }

            steps.push(GenerationStep {
                text: response.text,
                tool_calls: response.tool_calls,
                tool_results,
                usage: response.usage,
                finish_reason: response.finish_reason,
            });
        }

        warn!(
            max_iterations = self.max_iterations,
            total_tokens = total_usage.total_tokens,
            "agent: tool loop limit reached"
        );
        Err(VantageError::IterationLimit {
            max_iterations: self.max_iterations,
        })
    }

    async fn execute_tool_call(&self, call: &AgentToolCall) -> Result<AgentToolResult, VantageError> {
        let error_result = |message: String| AgentToolResult {
            tool_call_id: call.id.clone(),
            result: serde_json::json!({ "error": message }),
            is_error: true,
        };

        let Some(tool) = self.tools.get(&call.name) else {
            warn!(tool = %call.name, "Tool not found");
            return Ok(error_result(format!("Tool '{}' not found", call.name)));
        };

        let args = ToolArguments::new(call.arguments.clone());
        if let Err(message) = validate_arguments(args.raw(), &tool.parameters().schema) {
            warn!(tool = %call.name, %message, "Invalid tool arguments");
            return Ok(error_result(format!("Invalid arguments for '{}': {message}", call.name)));
        }

        debug!(tool = %call.name, "agent: executing tool");
        match tool.execute(&args).await {
            Ok(result) => Ok(AgentToolResult {
                tool_call_id: call.id.clone(),
                result,
                is_error: false,
            }),
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool execution failed");
                Err(VantageError::ToolExecution {
                    tool_name: call.name.clone(),
                    message: e.to_string(),
                })
            }
        }
    }
}

#[async_trait]
impl Invoke for Agent {
    async fn invoke(&self, query: &str) -> Result<serde_json::Value, VantageError> {
        let result = self.run(vec![ModelMessage::user(query)]).await?;
        Ok(serde_json::to_value(AgentState {
            messages: result.messages,
        })?)
    }
}

impl std::fmt::Debug for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Agent")
            .field("model", &self.provider.model_id())
            .field("tools", &self.tools)
            .field("max_iterations", &self.max_iterations)
            .finish()
    }
}
