//! Tests for the submission flow and the HTTP page.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

use common::*;
use vantage::agent::{Agent, AgentFactory, Invoke, MAX_TOOL_ITERATIONS};
use vantage::app::flow::{EMPTY_QUERY_WARNING, MISSING_CONFIG_ERROR};
use vantage::app::page::ALL_SET_MESSAGE;
use vantage::app::{router, submit, AppState, FinalAnswer, Outcome, DEFAULT_QUERY};
use vantage::config::AppConfig;
use vantage::provider::ModelProvider;
use vantage::tools::research_tools;

async fn get_index(state: AppState) -> (StatusCode, String) {
    let response = router(state)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_query(state: AppState, encoded_query: &str) -> (StatusCode, String) {
    let response = router(state)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(format!("query={encoded_query}")))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn blank_queries_warn_without_building_the_agent() {
    for query in ["", "   ", "\n\t "] {
        let (factory, builds) = counting_factory(complete_config(), StubAgent::Respond(json!({})));
        let outcome = submit(query, &factory).await;

        assert_eq!(outcome, Outcome::Warning(EMPTY_QUERY_WARNING.to_string()));
        assert_eq!(builds.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn incomplete_configuration_never_builds_the_agent() {
    let configs = [
        (AppConfig::new(), vec!["OPENAI_API_KEY", "TAVILY_API_KEY"]),
        (AppConfig::new().with_tavily_api_key("tv"), vec!["OPENAI_API_KEY"]),
        (AppConfig::new().with_openai_api_key("sk"), vec!["TAVILY_API_KEY"]),
    ];

    for (config, expected) in configs {
        let (factory, builds) = counting_factory(config, StubAgent::Respond(json!({})));
        let outcome = submit(DEFAULT_QUERY, &factory).await;

        assert_eq!(outcome, Outcome::ConfigurationError { missing: expected });
        assert_eq!(builds.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn agent_failure_becomes_an_error_outcome() {
    let (factory, _) = counting_factory(complete_config(), StubAgent::Fail("boom".into()));

    let outcome = submit("anything", &factory).await;

    match outcome {
        Outcome::AgentError(message) => {
            assert!(message.starts_with("Error while running the agent: "));
            assert!(message.contains("boom"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn build_failure_becomes_an_error_outcome() {
    let factory = AgentFactory::new(complete_config(), |_| {
        Err(vantage::error::VantageError::Configuration("no client".into()))
    });

    let outcome = submit("anything", &factory).await;

    assert!(matches!(outcome, Outcome::AgentError(ref m) if m.contains("no client")));
    assert!(!factory.is_initialized());
}

#[tokio::test]
async fn shape_mismatch_falls_back_to_raw_response() {
    let raw = json!({"output": "something else"});
    let (factory, _) = counting_factory(complete_config(), StubAgent::Respond(raw.clone()));

    let outcome = submit("anything", &factory).await;

    assert_eq!(outcome, Outcome::Recommendations(FinalAnswer::Unparsed(raw)));
}

#[tokio::test]
async fn index_lists_exactly_the_missing_variables() {
    let cases = [
        (AppConfig::new(), vec!["OPENAI_API_KEY", "TAVILY_API_KEY"]),
        (AppConfig::new().with_openai_api_key("sk"), vec!["TAVILY_API_KEY"]),
        (AppConfig::new().with_tavily_api_key("tv"), vec!["OPENAI_API_KEY"]),
    ];

    for (config, missing) in cases {
        let (factory, _) = counting_factory(config, StubAgent::Respond(json!({})));
        let (status, page) = get_index(AppState::new(factory)).await;

        assert_eq!(status, StatusCode::OK);
        for name in ["OPENAI_API_KEY", "TAVILY_API_KEY"] {
            let listed = page.contains(&format!("<li><code>{name}</code></li>"));
            assert_eq!(listed, missing.contains(&name), "{name}");
        }
        assert!(!page.contains(ALL_SET_MESSAGE));
    }
}

#[tokio::test]
async fn index_with_full_configuration_shows_success() {
    let (factory, builds) = counting_factory(complete_config(), StubAgent::Respond(json!({})));
    let (status, page) = get_index(AppState::new(factory)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains(ALL_SET_MESSAGE));
    assert!(page.contains(DEFAULT_QUERY));
    assert!(!page.contains("<h2>Recommendations</h2>"));
    assert_eq!(builds.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn successful_submission_renders_recommendations() {
    let (factory, builds) = counting_factory(
        complete_config(),
        StubAgent::Respond(agent_state("Trend: X. Risk: Y. Recommendation: Z.")),
    );

    let (status, page) = post_query(AppState::new(factory), "What+is+new+in+AI%3F").await;

    assert_eq!(status, StatusCode::OK);
    let heading = page.find("<h2>Recommendations</h2>").unwrap();
    let answer = page.find("Trend: X. Risk: Y. Recommendation: Z.").unwrap();
    assert!(answer > heading);
    assert!(page.contains("What is new in AI?</textarea>"));
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn blank_submission_warns() {
    let (factory, builds) = counting_factory(complete_config(), StubAgent::Respond(json!({})));

    let (status, page) = post_query(AppState::new(factory), "+++").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.contains(EMPTY_QUERY_WARNING));
    assert!(!page.contains("<h2>Recommendations</h2>"));
    assert_eq!(builds.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn submission_without_keys_is_rejected() {
    let (factory, builds) = counting_factory(
        AppConfig::new().with_openai_api_key("sk"),
        StubAgent::Respond(json!({})),
    );

    let (status, page) = post_query(AppState::new(factory), "AI+news").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(page.contains(MISSING_CONFIG_ERROR));
    assert!(page.contains("<li><code>TAVILY_API_KEY</code></li>"));
    assert!(!page.contains("<h2>Recommendations</h2>"));
    assert_eq!(builds.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_submission_shows_error_and_no_result() {
    let (factory, _) = counting_factory(complete_config(), StubAgent::Fail("boom".into()));

    let (status, page) = post_query(AppState::new(factory), "AI+news").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(page.contains("Error while running the agent:"));
    assert!(page.contains("boom"));
    assert!(!page.contains("<h2>Recommendations</h2>"));
}

#[tokio::test]
async fn unparsed_response_is_shown_raw() {
    let (factory, _) = counting_factory(
        complete_config(),
        StubAgent::Respond(json!({"unexpected": "<shape>"})),
    );

    let (status, page) = post_query(AppState::new(factory), "AI+news").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<h2>Recommendations</h2>"));
    assert!(page.contains("<pre class=\"raw\">"));
    assert!(page.contains("&lt;shape&gt;"));
}

#[tokio::test]
async fn healthz_answers_ok() {
    let (factory, _) = counting_factory(AppConfig::new(), StubAgent::Respond(json!({})));
    let response = router(AppState::new(factory))
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn endless_tool_calls_end_in_an_error_not_a_result() {
    let provider = Arc::new(MockProvider::new("mock-model"));
    for i in 0..MAX_TOOL_ITERATIONS + 5 {
        provider.queue_tool_call(&format!("c{i}"), "analyze", json!({"text": "again"}));
    }
    let tools = research_tools(Arc::new(MockSearch::with_results(vec![]))).unwrap();
    let model: Arc<dyn ModelProvider> = provider.clone();
    let agent: Arc<dyn Invoke> = Arc::new(Agent::new(model, tools));
    let factory = AgentFactory::new(complete_config(), move |_| Ok(Arc::clone(&agent)));

    let (status, page) = post_query(AppState::new(factory), "loop").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(page.contains("Error while running the agent:"));
    assert!(page.contains(&format!("after {MAX_TOOL_ITERATIONS} model turns")));
    assert!(!page.contains("<h2>Recommendations</h2>"));
    assert!(!page.contains("You are an AI industry analyst."));
    assert_eq!(provider.requests().len(), MAX_TOOL_ITERATIONS);
}
