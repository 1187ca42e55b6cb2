//! Integration tests for the web chat backend
//!
//! The router is driven directly with tower, against a local fake of the
//! model service.

use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use fossilchat::prompts::TemplateResolver;
use fossilchat::web::{router, AppState};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use ollamaclient::{ClientConfig, OllamaClient};
use serde_json::{json, Value};
use tower::ServiceExt;

fn state_for(base_url: &str) -> AppState {
    let client = OllamaClient::from_config(ClientConfig {
        base_url: base_url.to_string(),
        model: "testmodel".to_string(),
        min_request_interval: Duration::from_millis(0),
        ..ClientConfig::default()
    })
    .unwrap();

    AppState::new(client, TemplateResolver::new("fossil-advice"))
}

async fn post_chat(state: AppState, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_chat_returns_concatenated_stream_text() {
    let server = MockServer::start_async().await;
    let body = concat!(
        "{\"response\":\"Een \",\"done\":false}\n",
        "{\"response\":\"ammoniet.\",\"done\":false}\n",
        "{\"response\":\"\",\"done\":true}\n"
    );
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/generate").body_contains(r#""stream":true"#);
            then.status(200).header("content-type", "application/json").body(body);
        })
        .await;

    let (status, reply) = post_chat(
        state_for(&format!("{}/api", server.base_url())),
        json!({"message": "Wat is dit?"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["response"], "Een ammoniet.");
}

#[tokio::test]
async fn test_chat_rejects_empty_request() {
    let server = MockServer::start_async().await;

    let (status, reply) = post_chat(state_for(&format!("{}/api", server.base_url())), json!({"message": "  "})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(reply["error"].as_str().unwrap().contains("No message"));
}

#[tokio::test]
async fn test_chat_analysis_synthesizes_system_prompt() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/generate")
                .body_contains("identified as ammonite")
                .body_contains("87.5% confidence")
                .body_contains(r#""prompt":"Tell me about this fossil""#);
            then.status(200)
                .body("{\"response\":\"Een ammoniet uit het Jura.\",\"done\":true}\n");
        })
        .await;

    let (status, reply) = post_chat(
        state_for(&format!("{}/api", server.base_url())),
        json!({"message": "", "analysis": {"class": "ammonite", "confidence": 87.5}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["response"], "Een ammoniet uit het Jura.");
    // The classification travels back with the reply
    assert_eq!(reply["analysis"]["class"], "ammonite");
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn test_chat_empty_stream_yields_fixed_reply() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(200).body("{\"response\":\"\",\"done\":true}\n");
        })
        .await;

    let (status, reply) = post_chat(
        state_for(&format!("{}/api", server.base_url())),
        json!({"message": "hallo"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["response"], "I couldn't generate a response. Please try again.");
}

#[tokio::test]
async fn test_chat_maps_service_failure_to_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/generate");
            then.status(500).body("interne fout");
        })
        .await;

    let (status, reply) = post_chat(
        state_for(&format!("{}/api", server.base_url())),
        json!({"message": "hallo"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(reply["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_health_reflects_service_reachability() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/version");
            then.status(200).json_body(json!({"version": "0.5.7"}));
        })
        .await;

    let up = router(state_for(&format!("{}/api", server.base_url())))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(up.status(), StatusCode::OK);

    // Nothing listens on port 1
    let down = router(state_for("http://127.0.0.1:1/api"))
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(down.status(), StatusCode::SERVICE_UNAVAILABLE);
}
