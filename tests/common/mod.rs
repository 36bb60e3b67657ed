//! Shared test helpers: mock provider, mock search backend, stub agents.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use vantage::agent::{AgentFactory, Invoke};
use vantage::config::AppConfig;
use vantage::error::VantageError;
use vantage::provider::{ModelProvider, ProviderRequest, ProviderResponse};
use vantage::search::{SearchResult, WebSearch};
use vantage::types::*;

/// A provider that replays queued responses and records every request.
pub struct MockProvider {
    model_id: String,
    responses: Mutex<Vec<ProviderResponse>>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    pub fn new(model_id: &str) -> Self {
        Self {
            model_id: model_id.to_string(),
            responses: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a final text response.
    pub fn queue_response(&self, text: &str) {
        self.responses.lock().unwrap().push(ProviderResponse {
            text: text.to_string(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 20,
                total_tokens: 30,
            },
            tool_calls: vec![],
            finish_reason: Some(FinishReason::Stop),
        });
    }

    /// Queue a tool call response.
    pub fn queue_tool_call(&self, id: &str, name: &str, args: serde_json::Value) {
        self.responses.lock().unwrap().push(ProviderResponse {
            text: String::new(),
            usage: Usage {
                input_tokens: 10,
                output_tokens: 5,
                total_tokens: 15,
            },
            tool_calls: vec![AgentToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments: args,
            }],
            finish_reason: Some(FinishReason::ToolCalls),
        });
    }

    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn generate_text(
        &self,
        request: &ProviderRequest,
    ) -> Result<ProviderResponse, VantageError> {
        self.requests.lock().unwrap().push(request.clone());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Ok(ProviderResponse {
                text: "Mock response".to_string(),
                usage: Usage::default(),
                tool_calls: vec![],
                finish_reason: Some(FinishReason::Stop),
            });
        }
        Ok(responses.remove(0))
    }
}

/// A search backend returning canned results, or failing when told to.
pub struct MockSearch {
    results: Vec<SearchResult>,
    fail_with: Option<String>,
    pub calls: AtomicUsize,
    pub last_max_results: AtomicUsize,
}

impl MockSearch {
    pub fn with_results(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            fail_with: None,
            calls: AtomicUsize::new(0),
            last_max_results: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::with_results(Vec::new())
        }
    }
}

#[async_trait]
impl WebSearch for MockSearch {
    fn name(&self) -> &str {
        "mock-search"
    }

    async fn search(
        &self,
        _query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, VantageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_max_results.store(max_results, Ordering::SeqCst);
        if let Some(ref message) = self.fail_with {
            return Err(VantageError::Search(message.clone()));
        }
        Ok(self.results.iter().take(max_results).cloned().collect())
    }
}

pub fn sample_result(n: usize) -> SearchResult {
    SearchResult {
        title: format!("Headline {n}"),
        url: format!("https://news.example.com/{n}"),
        content: format!("Story {n} body."),
        score: Some(0.5),
    }
}

/// An agent stand-in that returns a fixed response or error.
pub enum StubAgent {
    Respond(serde_json::Value),
    Fail(String),
}

#[async_trait]
impl Invoke for StubAgent {
    async fn invoke(&self, _query: &str) -> Result<serde_json::Value, VantageError> {
        match self {
            Self::Respond(value) => Ok(value.clone()),
            Self::Fail(message) => Err(VantageError::api(500, message.clone())),
        }
    }
}

pub fn complete_config() -> AppConfig {
    AppConfig::new()
        .with_openai_api_key("sk-test")
        .with_tavily_api_key("tvly-test")
}

/// A factory around `agent` plus a counter of how many times it was built.
pub fn counting_factory(config: AppConfig, agent: StubAgent) -> (AgentFactory, Arc<AtomicUsize>) {
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&builds);
    let agent: Arc<dyn Invoke> = Arc::new(agent);
    let factory = AgentFactory::new(config, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::clone(&agent))
    });
    (factory, builds)
}

/// `{"messages": [user, assistant(answer)]}` as the real agent produces it.
pub fn agent_state(answer: &str) -> serde_json::Value {
    serde_json::to_value(vantage::agent::AgentState {
        messages: vec![ModelMessage::user("question"), ModelMessage::assistant(answer)],
    })
    .unwrap()
}
