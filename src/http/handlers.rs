//! Route handlers.
//!
//! The informational handlers are stateless and infallible; `/ask` is the
//! only handler that performs I/O. Payload field names are part of the API
//! contract and must not change.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::Environment;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Error response in the `{"detail": ...}` shape clients already consume.
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

#[derive(Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

/// `GET /` — fixed welcome payload.
pub async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to MedFlowAI",
        version: env!("CARGO_PKG_VERSION"),
        status: "running",
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// `GET /health` — liveness probe, always succeeds.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "MedFlowAI",
    })
}

#[derive(Serialize)]
pub struct ApiStatusResponse {
    pub api_version: &'static str,
    pub status: &'static str,
    pub environment: Environment,
}

/// `GET /api/v1/status` — environment as captured at startup.
pub async fn api_status(State(state): State<AppState>) -> Json<ApiStatusResponse> {
    Json(ApiStatusResponse {
        api_version: "v1",
        status: "operational",
        environment: state.settings.environment,
    })
}

#[derive(Serialize)]
pub struct DebugResponse {
    pub project_name: String,
    pub debug_mode: bool,
    pub environment: Environment,
    pub host: String,
    pub port: u16,
}

/// `GET /api/v1/debug` — settings snapshot for operators.
pub async fn debug_info(State(state): State<AppState>) -> Json<DebugResponse> {
    Json(DebugResponse {
        project_name: state.settings.app_name.clone(),
        debug_mode: state.settings.debug,
        environment: state.settings.environment,
        host: state.settings.host.clone(),
        port: state.settings.port,
    })
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The question or prompt to forward to the model.
    pub prompt: String,
    /// Optional system message to set context or behavior.
    pub system_prompt: Option<String>,
    /// Sampling temperature, 0.0..=2.0.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Optional cap on response tokens.
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

#[derive(Serialize)]
pub struct AskResponse {
    pub result: String,
    pub success: bool,
}

/// `POST /ask` — forward a prompt to the chat-completions API.
pub async fn ask_llm(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    if !(0.0..=2.0).contains(&request.temperature) {
        return Err(ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!(
                "temperature must be between 0.0 and 2.0, got {}",
                request.temperature
            ),
        ));
    }

    match state
        .llm
        .chat(
            &request.prompt,
            request.system_prompt.as_deref(),
            request.temperature,
            request.max_tokens,
        )
        .await
    {
        Ok(result) => {
            metrics::record_llm_request("ok");
            Ok(Json(AskResponse {
                result,
                success: true,
            }))
        }
        Err(e) => {
            metrics::record_llm_request("error");
            tracing::error!(error = %e, "LLM request failed");
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get LLM response: {e}"),
            ))
        }
    }
}
