//! One-time construction of the process-wide agent.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use super::{Agent, Invoke};
use crate::config::{AppConfig, OPENAI_API_KEY, TAVILY_API_KEY};
use crate::error::VantageError;
use crate::provider::OpenAiProvider;
use crate::search::TavilyClient;
use crate::tools::research_tools;

/// Builds an agent from configuration.
pub type AgentBuilder =
    dyn Fn(&AppConfig) -> Result<Arc<dyn Invoke>, VantageError> + Send + Sync;

/// Lazily builds the agent on first use and hands out the same instance afterwards.
///
/// A failed build leaves the factory empty; the next call tries again.
pub struct AgentFactory {
    config: AppConfig,
    builder: Box<AgentBuilder>,
    agent: OnceCell<Arc<dyn Invoke>>,
}

impl AgentFactory {
    pub fn new<F>(config: AppConfig, builder: F) -> Self
    where
        F: Fn(&AppConfig) -> Result<Arc<dyn Invoke>, VantageError> + Send + Sync + 'static,
    {
        Self {
            config,
            builder: Box::new(builder),
            agent: OnceCell::new(),
        }
    }

    /// Factory for the OpenAI + Tavily research agent.
    pub fn openai(config: AppConfig) -> Self {
        Self::new(config, build_research_agent)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Whether the agent has been built.
    pub fn is_initialized(&self) -> bool {
        self.agent.initialized()
    }

    /// The shared agent, building it on the first call.
    pub async fn get(&self) -> Result<Arc<dyn Invoke>, VantageError> {
        let agent = self
            .agent
            .get_or_try_init(|| async {
                info!(model = self.config.model(), "Building research agent");
                (self.builder)(&self.config)
            })
            .await?;
        Ok(Arc::clone(agent))
    }
}

impl std::fmt::Debug for AgentFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentFactory")
            .field("config", &self.config)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// OpenAI chat model + Tavily search + the three research tools.
pub fn build_research_agent(config: &AppConfig) -> Result<Arc<dyn Invoke>, VantageError> {
    let openai_key = config
        .openai_api_key()
        .ok_or_else(|| VantageError::Configuration(format!("Missing {OPENAI_API_KEY}")))?;
    let tavily_key = config
        .tavily_api_key()
        .ok_or_else(|| VantageError::Configuration(format!("Missing {TAVILY_API_KEY}")))?;

    let provider = OpenAiProvider::new(
        config.model(),
        openai_key,
        config.openai_base_url().map(str::to_string),
    )?;
    let search = TavilyClient::new(tavily_key, config.tavily_base_url().map(str::to_string))?;
    let tools = research_tools(Arc::new(search))?;

    Ok(Arc::new(Agent::new(Arc::new(provider), tools)))
}
