//! Convenience re-exports for common use.

pub use crate::agent::{Agent, AgentFactory, Invoke};
pub use crate::app::{AppState, FinalAnswer, Outcome};
pub use crate::config::AppConfig;
pub use crate::error::{Result, VantageError};
pub use crate::provider::ModelProvider;
pub use crate::search::{SearchResult, WebSearch};
pub use crate::tools::{AgentTool, AgentToolParameters, Tool, ToolArguments, ToolRegistry};
pub use crate::types::{FinishReason, GenerationSettings, ModelMessage, Role, Usage};
