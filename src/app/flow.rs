//! One form submission: validate, invoke, extract.

use tracing::{info, warn};
use uuid::Uuid;

use super::answer::{extract_answer, FinalAnswer};
use crate::agent::AgentFactory;

/// Question pre-filled in the form.
pub const DEFAULT_QUERY: &str = "Analyze current AI industry news and recommend actions for a startup.";

pub const EMPTY_QUERY_WARNING: &str = "Please enter a question or topic first.";

pub const MISSING_CONFIG_ERROR: &str =
    "You must set `OPENAI_API_KEY` and `TAVILY_API_KEY` before running the analysis.";

/// Result of a submission, as shown in the output region.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Blank query; nothing was run.
    Warning(String),
    /// Required variables absent; nothing was run.
    ConfigurationError { missing: Vec<&'static str> },
    /// Building or invoking the agent failed.
    AgentError(String),
    Recommendations(FinalAnswer),
}

impl Outcome {
    /// Banner text for the non-result outcomes.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Warning(msg) | Self::AgentError(msg) => Some(msg.clone()),
            Self::ConfigurationError { missing } => {
                let names = missing
                    .iter()
                    .map(|name| format!("`{name}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(format!("{MISSING_CONFIG_ERROR} Missing: {names}."))
            }
            Self::Recommendations(_) => None,
        }
    }
}

/// Handle one submission.
///
/// The factory is only touched once the query is non-blank and the
/// configuration is complete. Any failure from building or running the agent
/// ends this submission with [`Outcome::AgentError`].
pub async fn submit(query: &str, factory: &AgentFactory) -> Outcome {
    if query.trim().is_empty() {
        return Outcome::Warning(EMPTY_QUERY_WARNING.to_string());
    }

    let missing = factory.config().missing_vars();
    if !missing.is_empty() {
        warn!(?missing, "Submission rejected: configuration incomplete");
        return Outcome::ConfigurationError { missing };
    }

    let request_id = Uuid::new_v4();
    info!(%request_id, query_len = query.len(), "Running analysis");

    let result = match factory.get().await {
        Ok(agent) => agent.invoke(query).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => {
            let answer = extract_answer(&response);
            if !answer.is_text() {
                warn!(%request_id, "Agent response had no final message text; showing raw response");
            }
            info!(%request_id, "Analysis finished");
            Outcome::Recommendations(answer)
        }
        Err(e) => {
            warn!(%request_id, error = %e, external = e.is_external(), "Agent run failed");
            Outcome::AgentError(format!("Error while running the agent: {e}"))
        }
    }
}
