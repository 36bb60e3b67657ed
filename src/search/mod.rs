//! Web search clients used by the `search` tool.

pub mod tavily;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::VantageError;

pub use tavily::TavilyClient;

/// Number of results the research agent asks for.
pub const MAX_RESULTS: usize = 3;

/// One search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// A search backend.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Backend name, for logs.
    fn name(&self) -> &str;

    /// Run a query, returning at most `max_results` hits.
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<SearchResult>, VantageError>;
}

/// Render results as the text handed back to the model.
pub fn results_to_text(query: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("No results found for: {query}");
    }
    results
        .iter()
        .enumerate()
        .map(|(i, r)| format!("[{}] {}\nURL: {}\n{}", i + 1, r.title, r.url, r.content.trim()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
