//! The research agent's tools: `search`, `analyze`, `recommend`.
//!
//! `search` is the only one that does work. `analyze` and `recommend` wrap
//! their input in an instruction template and hand it back to the model,
//! which does the actual analysis on its next turn.

use std::sync::Arc;

use tracing::debug;

use super::registry::ToolRegistry;
use super::tool::{AgentTool, Tool};
use super::types::AgentToolParameters;
use crate::error::VantageError;
use crate::search::{results_to_text, WebSearch, MAX_RESULTS};

/// Wrap retrieved data in the analyst instructions.
pub fn analyze_prompt(text: &str) -> String {
    format!(
        "You are an AI industry analyst.\n\n\
         From the following data, extract:\n\
         - Key trends\n\
         - Potential risks\n\
         - Emerging opportunities\n\n\
         Data:\n{text}\n"
    )
}

/// Wrap an analysis in the startup-advisor instructions.
pub fn recommend_prompt(analysis: &str) -> String {
    format!(
        "You are advising a startup founder.\n\n\
         Based on the analysis, provide:\n\
         - Business impact\n\
         - Clear, actionable recommendations\n\n\
         Analysis:\n{analysis}\n"
    )
}

/// `search(query)`: real-time web search, capped at three results.
///
/// Search failures propagate out of the tool.
pub fn search_tool(client: Arc<dyn WebSearch>) -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "search",
        "Perform a real-time web search to retrieve the latest AI industry news.",
        AgentToolParameters::object()
            .string("query", "The search query", true)
            .build(),
        move |args| {
            let client = Arc::clone(&client);
            async move {
                let query = args.get_str("query")?;
                debug!(backend = client.name(), "search tool");
                let results = client.search(query, MAX_RESULTS).await?;
                Ok(serde_json::Value::String(results_to_text(query, &results)))
            }
        },
    ))
}

/// `analyze(text)`: returns the analyst template around `text`.
pub fn analyze_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "analyze",
        "Analyze retrieved information to identify trends, risks, and opportunities.",
        AgentToolParameters::object()
            .string("text", "The retrieved information to analyze", true)
            .build(),
        |args| async move {
            let text = args.get_str("text")?;
            Ok(serde_json::Value::String(analyze_prompt(text)))
        },
    ))
}

/// `recommend(analysis)`: returns the advisor template around `analysis`.
pub fn recommend_tool() -> Arc<dyn Tool> {
    Arc::new(AgentTool::new(
        "recommend",
        "Generate actionable business recommendations based on the analysis.",
        AgentToolParameters::object()
            .string("analysis", "The analysis to base recommendations on", true)
            .build(),
        |args| async move {
            let analysis = args.get_str("analysis")?;
            Ok(serde_json::Value::String(recommend_prompt(analysis)))
        },
    ))
}

/// Registry with `search`, `analyze`, `recommend`, in that order.
pub fn research_tools(client: Arc<dyn WebSearch>) -> Result<ToolRegistry, VantageError> {
    ToolRegistry::new()
        .with(search_tool(client))?
        .with(analyze_tool())?
        .with(recommend_tool())
}
