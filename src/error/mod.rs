//! Error types for Vantage.

use thiserror::Error;

/// Primary error type for all Vantage operations.
#[derive(Error, Debug)]
pub enum VantageError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Tool execution error: {tool_name}: {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Agent stopped after {max_iterations} model turns without a final answer")]
    IterationLimit { max_iterations: usize },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Search error: {0}")]
    Search(String),
}

impl VantageError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error came from talking to a remote service.
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            Self::Api { .. }
                | Self::Network(_)
                | Self::Authentication(_)
                | Self::RateLimited { .. }
                | Self::Search(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, VantageError>;
