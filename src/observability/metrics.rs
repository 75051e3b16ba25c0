//! Metrics collection and exposition.
//!
//! # Metrics
//! - `medflow_requests_total` (counter): requests by method, path, status
//! - `medflow_request_duration_seconds` (histogram): latency distribution
//! - `medflow_llm_requests_total` (counter): LLM calls by outcome
//!
//! The Prometheus exporter serves these on its own listener, separate from
//! the API port.

use axum::{extract::Request, middleware::Next, response::Response};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_counter!(
                "medflow_requests_total",
                "Total HTTP requests by method, path and status"
            );
            describe_histogram!(
                "medflow_request_duration_seconds",
                "HTTP request latency in seconds"
            );
            describe_counter!(
                "medflow_llm_requests_total",
                "Chat-completion calls by outcome"
            );
            tracing::info!(address = %addr, "Prometheus exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install Prometheus exporter");
        }
    }
}

/// Record one handled HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, started: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("medflow_requests_total", &labels).increment(1);
    histogram!("medflow_request_duration_seconds", &labels)
        .record(started.elapsed().as_secs_f64());
}

/// Record one LLM call outcome ("ok" or "error").
pub fn record_llm_request(outcome: &'static str) {
    counter!("medflow_llm_requests_total", "outcome" => outcome).increment(1);
}

/// Axum middleware recording method/path/status/latency for every request.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    record_request(&method, &path, response.status().as_u16(), started);
    response
}
