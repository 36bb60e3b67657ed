//! Configuration loaded once from the environment at process start.
//!
//! Required variables:
//! - `OPENAI_API_KEY` - key for the LLM provider.
//! - `TAVILY_API_KEY` - key for the web search provider.
//!
//! Optional variables:
//! - `OPENAI_BASE_URL` - Chat Completions endpoint. Defaults to `https://api.openai.com/v1`.
//! - `TAVILY_BASE_URL` - search endpoint. Defaults to `https://api.tavily.com`.
//! - `VANTAGE_MODEL` - chat model. Defaults to `gpt-4o-mini`.
//! - `HOST` - bind host. Defaults to `127.0.0.1`.
//! - `PORT` - bind port. Defaults to `8501`.
//!
//! A missing credential is not an error here; the UI reports it through
//! [`AppConfig::missing_vars`] and refuses to run the agent until it is set.

use std::fmt;

use crate::error::VantageError;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const TAVILY_API_KEY: &str = "TAVILY_API_KEY";

/// Credentials the agent cannot run without, in reporting order.
pub const REQUIRED_VARS: [&str; 2] = [OPENAI_API_KEY, TAVILY_API_KEY];

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;

/// Immutable application configuration.
#[derive(Clone, PartialEq)]
pub struct AppConfig {
    openai_api_key: Option<String>,
    tavily_api_key: Option<String>,
    openai_base_url: Option<String>,
    tavily_base_url: Option<String>,
    model: String,
    host: String,
    port: u16,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "***");
        f.debug_struct("AppConfig")
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("tavily_api_key", &redact(&self.tavily_api_key))
            .field("openai_base_url", &self.openai_base_url)
            .field("tavily_base_url", &self.tavily_base_url)
            .field("model", &self.model)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    /// Empty config: no credentials, default model and bind address.
    pub fn new() -> Self {
        Self {
            openai_api_key: None,
            tavily_api_key: None,
            openai_base_url: None,
            tavily_base_url: None,
            model: DEFAULT_MODEL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }

    /// Load from the process environment, reading `.env` first if present.
    ///
    /// # Errors
    ///
    /// Returns `VantageError::Configuration` if `PORT` is set but not a valid port.
    pub fn from_env() -> Result<Self, VantageError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_process_env()
    }

    /// Read the process environment only; no `.env` file is consulted.
    pub fn from_process_env() -> Result<Self, VantageError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, VantageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|e| {
                VantageError::Configuration(format!("Invalid value for PORT: {raw} ({e})"))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            openai_api_key: get(OPENAI_API_KEY),
            tavily_api_key: get(TAVILY_API_KEY),
            openai_base_url: get("OPENAI_BASE_URL"),
            tavily_base_url: get("TAVILY_BASE_URL"),
            model: get("VANTAGE_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    pub fn with_openai_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }

    pub fn with_tavily_api_key(mut self, key: impl Into<String>) -> Self {
        self.tavily_api_key = Some(key.into());
        self
    }

    pub fn with_openai_base_url(mut self, url: impl Into<String>) -> Self {
        self.openai_base_url = Some(url.into());
        self
    }

    pub fn with_tavily_base_url(mut self, url: impl Into<String>) -> Self {
        self.tavily_base_url = Some(url.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_bind(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref()
    }

    pub fn tavily_api_key(&self) -> Option<&str> {
        self.tavily_api_key.as_deref()
    }

    pub fn openai_base_url(&self) -> Option<&str> {
        self.openai_base_url.as_deref()
    }

    pub fn tavily_base_url(&self) -> Option<&str> {
        self.tavily_base_url.as_deref()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// `host:port` string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Names of required variables that are absent. Empty means fully configured.
    pub fn missing_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.openai_api_key.is_none() {
            missing.push(OPENAI_API_KEY);
        }
        if self.tavily_api_key.is_none() {
            missing.push(TAVILY_API_KEY);
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_vars().is_empty()
    }
}
