//! HTTP surface: one page, one form, a health check.

use std::sync::Arc;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::flow::{submit, Outcome, DEFAULT_QUERY};
use super::page::{render_page, PageView};
use crate::agent::AgentFactory;
use crate::config::AppConfig;
use crate::error::VantageError;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    factory: Arc<AgentFactory>,
}

impl AppState {
    pub fn new(factory: AgentFactory) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }

    pub fn factory(&self) -> &AgentFactory {
        &self.factory
    }
}

/// Form body posted by the page.
#[derive(Debug, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub query: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(analyze))
        .route("/healthz", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&PageView {
        query: DEFAULT_QUERY,
        missing: state.factory.config().missing_vars(),
        outcome: None,
    }))
}

async fn analyze(State(state): State<AppState>, Form(form): Form<AnalyzeForm>) -> impl IntoResponse {
    let outcome = submit(&form.query, &state.factory).await;
    let status = status_for(&outcome);
    let page = render_page(&PageView {
        query: &form.query,
        missing: state.factory.config().missing_vars(),
        outcome: Some(&outcome),
    });
    (status, Html(page))
}

async fn health() -> &'static str {
    "ok"
}

fn status_for(outcome: &Outcome) -> StatusCode {
    match outcome {
        Outcome::Recommendations(_) => StatusCode::OK,
        Outcome::Warning(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Outcome::ConfigurationError { .. } => StatusCode::SERVICE_UNAVAILABLE,
        Outcome::AgentError(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Bind to the configured address and serve until Ctrl-C.
pub async fn serve(config: AppConfig) -> Result<(), VantageError> {
    let addr = config.bind_addr();
    let missing = config.missing_vars();
    if !missing.is_empty() {
        warn!(?missing, "Required environment variables are not set; analysis is disabled");
    }

    let app = router(AppState::new(AgentFactory::openai(config)));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
