//! Tavily search API client.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::error::VantageError;
use crate::provider::http::{bearer_headers, build_client, status_to_error};

use super::{SearchResult, WebSearch};

pub const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

pub struct TavilyClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Result<Self, VantageError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client()?,
        })
    }
}

#[async_trait]
impl WebSearch for TavilyClient {
    fn name(&self) -> &str {
        "tavily"
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, VantageError> {
        let url = format!("{}/search", self.base_url);
        let body = serde_json::json!({
            "query": query,
            "max_results": max_results,
        });

        debug!(max_results, "Tavily search");

        let resp = self
            .client
            .post(&url)
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| VantageError::Search(format!("Tavily request failed: {e}")))?;

        // Status errors keep the shared auth/rate-limit mapping.
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let data: TavilyResponse = resp
            .json()
            .await
            .map_err(|e| VantageError::Search(format!("Malformed Tavily response: {e}")))?;
        Ok(data
            .results
            .into_iter()
            .take(max_results)
            .map(|r| SearchResult {
                title: r.title,
                url: r.url,
                content: r.content,
                score: r.score,
            })
            .collect())
    }
}

// Tavily API response types (internal)

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Deserialize)]
struct TavilyResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
    score: Option<f64>,
}
