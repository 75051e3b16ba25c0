//! Shared utilities for integration testing.

#![allow(dead_code)]

use axum::{
    http::{header, StatusCode},
    routing::post,
    Router,
};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use medflow_api::config::{loader::load_settings_from, Settings};
use medflow_api::{HttpServer, Shutdown};

/// Build settings from an explicit variable list, on top of the defaults.
pub fn test_settings(vars: &[(&str, &str)]) -> Settings {
    load_settings_from(
        vars.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>(),
    )
    .unwrap()
}

/// Spawn the real server on an ephemeral port.
///
/// The listener is bound before the task is spawned, so requests can be sent
/// immediately; they queue until the accept loop runs.
pub async fn spawn_server(settings: Settings) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(settings).unwrap();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// A programmable chat-completions upstream.
pub struct MockLlm {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicU32>,
}

impl MockLlm {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hit_count(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a mock `POST /chat/completions` endpoint. The responder receives
/// the zero-based call number, so tests can fail the first calls and then
/// recover.
pub async fn start_mock_llm<F>(respond: F) -> MockLlm
where
    F: Fn(u32) -> (StatusCode, String) + Clone + Send + Sync + 'static,
{
    let hits = Arc::new(AtomicU32::new(0));
    let handler_hits = hits.clone();

    let app = Router::new().route(
        "/chat/completions",
        post(move || {
            let respond = respond.clone();
            let hits = handler_hits.clone();
            async move {
                let call = hits.fetch_add(1, Ordering::SeqCst);
                let (status, body) = respond(call);
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockLlm { addr, hits }
}

/// A minimal successful completion body with the given content.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

/// An OpenAI-style error envelope.
pub fn error_body(message: &str) -> String {
    serde_json::json!({"error": {"message": message}}).to_string()
}
