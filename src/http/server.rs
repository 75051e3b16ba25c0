//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, tracing, limits, request ID, metrics)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Settings;
use crate::http::handlers;
use crate::http::request::MakeRequestUuid;
use crate::llm::{LlmClient, LlmError};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub llm: Arc<LlmClient>,
}

/// HTTP server for the MedFlow API.
pub struct HttpServer {
    router: Router,
    settings: Arc<Settings>,
}

impl HttpServer {
    /// Create a new HTTP server with the given settings.
    pub fn new(settings: Settings) -> Result<Self, LlmError> {
        let settings = Arc::new(settings);
        let llm = Arc::new(LlmClient::from_settings(&settings)?);

        let state = AppState {
            settings: settings.clone(),
            llm,
        };

        let router = Self::build_router(&settings, state);
        Ok(Self { router, settings })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(settings: &Settings, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health_check))
            .route("/api/v1/status", get(handlers::api_status))
            .route("/api/v1/debug", get(handlers::debug_info))
            .route("/ask", post(handlers::ask_llm))
            .with_state(state)
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(cors_layer(settings))
            .layer(TimeoutLayer::new(Duration::from_secs(
                settings.request_timeout_secs,
            )))
            .layer(RequestBodyLimitLayer::new(settings.max_body_bytes))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server until the shutdown signal fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Build the CORS layer from the configured origins.
///
/// Wildcard origins cannot carry credentials, so `*` maps to a plain
/// any-origin policy. An explicit list gets credentials plus mirrored
/// methods/headers, matching the permissive behavior browsers expect from
/// the previous deployment.
fn cors_layer(settings: &Settings) -> CorsLayer {
    if settings.allows_any_origin() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
