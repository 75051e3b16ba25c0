//! Settings schema definitions.
//!
//! The settings object is deserialized straight from process environment
//! variables: field `app_name` maps to `APP_NAME`, `allowed_origins` to the
//! comma-separated `ALLOWED_ORIGINS`, and so on. All fields have defaults so
//! the service starts with an empty environment.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deployment environment the service runs in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, loaded once at startup and immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Application display name (`APP_NAME`).
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Deployment environment (`ENVIRONMENT`).
    #[serde(default)]
    pub environment: Environment,

    /// Debug mode (`DEBUG`). Widens the default log filter.
    #[serde(default)]
    pub debug: bool,

    /// Bind host (`HOST`).
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port (`PORT`).
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS origins (`ALLOWED_ORIGINS`, comma-separated). `*` allows any
    /// origin without credentials.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Database connection string (`DATABASE_URL`). Loaded for parity with
    /// deployment manifests; no operation reads it yet.
    #[serde(default)]
    pub database_url: String,

    /// API key for the chat-completions API (`OPENAI_API_KEY`).
    #[serde(default)]
    pub openai_api_key: String,

    /// Per-request timeout in seconds (`REQUEST_TIMEOUT_SECS`).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum accepted request body size in bytes (`MAX_BODY_BYTES`).
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Enable the Prometheus exporter (`METRICS_ENABLED`).
    #[serde(default)]
    pub metrics_enabled: bool,

    /// Prometheus exporter bind address (`METRICS_ADDRESS`).
    #[serde(default = "default_metrics_address")]
    pub metrics_address: String,

    /// Base URL of the chat-completions API (`OPENAI_BASE_URL`).
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Model requested for completions (`LLM_MODEL`).
    #[serde(default = "default_llm_model")]
    pub llm_model: String,

    /// Timeout for a single LLM API call in seconds (`LLM_TIMEOUT_SECS`).
    #[serde(default = "default_llm_timeout_secs")]
    pub llm_timeout_secs: u64,

    /// Maximum attempts per LLM request, first try included
    /// (`LLM_MAX_RETRIES`).
    #[serde(default = "default_llm_max_retries")]
    pub llm_max_retries: u32,

    /// Base delay for LLM retry backoff in milliseconds
    /// (`LLM_RETRY_BASE_DELAY_MS`).
    #[serde(default = "default_llm_retry_base_delay_ms")]
    pub llm_retry_base_delay_ms: u64,

    /// Delay cap for LLM retry backoff in milliseconds
    /// (`LLM_RETRY_MAX_DELAY_MS`).
    #[serde(default = "default_llm_retry_max_delay_ms")]
    pub llm_retry_max_delay_ms: u64,
}

fn default_app_name() -> String {
    "MedFlowAI".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_body_bytes() -> usize {
    2 * 1024 * 1024
}

fn default_metrics_address() -> String {
    "0.0.0.0:9090".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_llm_timeout_secs() -> u64 {
    60
}

fn default_llm_max_retries() -> u32 {
    3
}

fn default_llm_retry_base_delay_ms() -> u64 {
    100
}

fn default_llm_retry_max_delay_ms() -> u64 {
    2000
}

impl Settings {
    /// True when any configured origin is the wildcard `*`.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}
