//! Agent system: tool-calling loop, invocation seam, memoized factory.

pub mod agent;
pub mod factory;

use async_trait::async_trait;

use crate::error::VantageError;

pub use agent::{Agent, AgentState, MAX_TOOL_ITERATIONS};
pub use factory::{build_research_agent, AgentFactory};

/// Anything that can answer a single user query.
///
/// Returns the final agent state as JSON, shaped `{"messages": [...]}` for
/// [`Agent`]. Callers must not assume that shape; see
/// [`crate::app::extract_answer`].
#[async_trait]
pub trait Invoke: Send + Sync {
    async fn invoke(&self, query: &str) -> Result<serde_json::Value, VantageError>;
}
