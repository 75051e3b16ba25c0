//! Integration tests for the `/ask` endpoint against a mock
//! chat-completions upstream.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

fn ask_settings(mock: &common::MockLlm, extra: &[(&str, &str)]) -> medflow_api::Settings {
    let base_url = mock.base_url();
    let mut vars: Vec<(&str, &str)> = vec![
        ("OPENAI_API_KEY", "test-key"),
        ("OPENAI_BASE_URL", base_url.as_str()),
        ("LLM_RETRY_BASE_DELAY_MS", "10"),
        ("LLM_RETRY_MAX_DELAY_MS", "20"),
    ];
    vars.extend_from_slice(extra);
    common::test_settings(&vars)
}

#[tokio::test]
async fn test_ask_happy_path() {
    let mock = common::start_mock_llm(|_| {
        (
            StatusCode::OK,
            common::completion_body("Diabetes is a chronic condition."),
        )
    })
    .await;
    let (addr, shutdown) = common::spawn_server(ask_settings(&mock, &[])).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/ask"))
        .json(&json!({
            "prompt": "What is diabetes?",
            "system_prompt": "You are a medical expert assistant"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "result": "Diabetes is a chronic condition.",
            "success": true
        })
    );
    assert_eq!(mock.hit_count(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_ask_rejects_out_of_range_temperature() {
    let mock = common::start_mock_llm(|_| (StatusCode::OK, common::completion_body("ok"))).await;
    let (addr, shutdown) = common::spawn_server(ask_settings(&mock, &[])).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/ask"))
        .json(&json!({"prompt": "hi", "temperature": 3.0}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("temperature must be between 0.0 and 2.0"));
    // Rejected before any upstream call.
    assert_eq!(mock.hit_count(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_ask_maps_upstream_client_error_to_500() {
    let mock = common::start_mock_llm(|_| {
        (
            StatusCode::BAD_REQUEST,
            common::error_body("model not found"),
        )
    })
    .await;
    let (addr, shutdown) = common::spawn_server(ask_settings(&mock, &[])).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/ask"))
        .json(&json!({"prompt": "hi"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("Failed to get LLM response"));
    assert!(detail.contains("model not found"));
    // 4xx is deterministic, no retry.
    assert_eq!(mock.hit_count(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_ask_retries_transient_upstream_failures() {
    let mock = common::start_mock_llm(|call| {
        if call < 2 {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                common::error_body("overloaded"),
            )
        } else {
            (StatusCode::OK, common::completion_body("recovered"))
        }
    })
    .await;
    let settings = ask_settings(&mock, &[("LLM_MAX_RETRIES", "3")]);
    let (addr, shutdown) = common::spawn_server(settings).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/ask"))
        .json(&json!({"prompt": "hi"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["result"], "recovered");
    assert_eq!(mock.hit_count(), 3);

    shutdown.trigger();
}

#[tokio::test]
async fn test_ask_gives_up_after_retry_budget() {
    let mock = common::start_mock_llm(|_| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            common::error_body("still overloaded"),
        )
    })
    .await;
    let settings = ask_settings(&mock, &[("LLM_MAX_RETRIES", "2")]);
    let (addr, shutdown) = common::spawn_server(settings).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/ask"))
        .json(&json!({"prompt": "hi"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(mock.hit_count(), 2);

    shutdown.trigger();
}

#[tokio::test]
async fn test_ask_without_api_key_fails_before_upstream() {
    let mock = common::start_mock_llm(|_| (StatusCode::OK, common::completion_body("ok"))).await;
    let base_url = mock.base_url();
    let settings = common::test_settings(&[("OPENAI_BASE_URL", base_url.as_str())]);
    let (addr, shutdown) = common::spawn_server(settings).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/ask"))
        .json(&json!({"prompt": "hi"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("OPENAI_API_KEY is not configured"));
    assert_eq!(mock.hit_count(), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_ask_with_empty_completion_content() {
    let mock = common::start_mock_llm(|_| {
        (
            StatusCode::OK,
            serde_json::json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })
            .to_string(),
        )
    })
    .await;
    let (addr, shutdown) = common::spawn_server(ask_settings(&mock, &[])).await;

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/ask"))
        .json(&json!({"prompt": "hi"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"result": "", "success": true}));

    shutdown.trigger();
}
