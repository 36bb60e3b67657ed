//! Vantage: AI Research & Decision Assistant
//!
//! A small web form that forwards a question about the AI industry to an
//! LLM agent equipped with a web-search tool, then renders the agent's final
//! answer as a list of recommendations.
//!
//! # Quick Start
//!
//! ```no_run
//! use vantage::prelude::*;
//!
//! # async fn example() -> vantage::error::Result<()> {
//! let config = AppConfig::from_env()?;
//! let factory = AgentFactory::openai(config.clone());
//! let agent = factory.get().await?;
//! let state = agent.invoke("What changed in AI this week?").await?;
//! println!("{}", vantage::app::extract_answer(&state));
//! # Ok(())
//! # }
//! ```

pub mod agent;
pub mod app;
pub mod config;
pub mod error;
pub mod prelude;
pub mod provider;
pub mod search;
pub mod tools;
pub mod types;
