//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (envy/serde handles syntactic)
//! - Validate value ranges (timeouts > 0, port non-zero)
//! - Check origins and URLs actually parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Settings → Result<(), Vec<ValidationError>>
//! - Runs before settings are accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::Settings;

/// A single semantic problem with the loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("HOST must not be empty")]
    EmptyHost,

    #[error("PORT must not be 0")]
    ZeroPort,

    #[error("ALLOWED_ORIGINS must not be empty")]
    NoOrigins,

    #[error("ALLOWED_ORIGINS entry {0:?} is neither `*` nor a valid origin (scheme://host[:port])")]
    InvalidOrigin(String),

    #[error("REQUEST_TIMEOUT_SECS must be greater than 0")]
    ZeroRequestTimeout,

    #[error("MAX_BODY_BYTES must be greater than 0")]
    ZeroBodyLimit,

    #[error("METRICS_ADDRESS {0:?} is not a valid socket address")]
    InvalidMetricsAddress(String),

    #[error("OPENAI_BASE_URL {0:?} is not a valid URL")]
    InvalidLlmBaseUrl(String),

    #[error("LLM_TIMEOUT_SECS must be greater than 0")]
    ZeroLlmTimeout,

    #[error("LLM_MAX_RETRIES must be at least 1")]
    ZeroLlmRetries,

    #[error("LLM_RETRY_BASE_DELAY_MS must not exceed LLM_RETRY_MAX_DELAY_MS")]
    RetryDelayOrder,
}

/// Validate settings, collecting every problem instead of stopping at the
/// first one.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if settings.port == 0 {
        errors.push(ValidationError::ZeroPort);
    }

    if settings.allowed_origins.is_empty() {
        errors.push(ValidationError::NoOrigins);
    }
    for origin in &settings.allowed_origins {
        if origin != "*" && !is_valid_origin(origin) {
            errors.push(ValidationError::InvalidOrigin(origin.clone()));
        }
    }

    if settings.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if settings.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if settings.metrics_enabled && settings.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            settings.metrics_address.clone(),
        ));
    }

    if Url::parse(&settings.openai_base_url).is_err() {
        errors.push(ValidationError::InvalidLlmBaseUrl(
            settings.openai_base_url.clone(),
        ));
    }

    if settings.llm_timeout_secs == 0 {
        errors.push(ValidationError::ZeroLlmTimeout);
    }

    if settings.llm_max_retries == 0 {
        errors.push(ValidationError::ZeroLlmRetries);
    }

    if settings.llm_retry_base_delay_ms > settings.llm_retry_max_delay_ms {
        errors.push(ValidationError::RetryDelayOrder);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// An origin is a bare `scheme://host[:port]`, no path, query or fragment.
fn is_valid_origin(origin: &str) -> bool {
    match Url::parse(origin) {
        Ok(url) => {
            url.host_str().is_some()
                && (url.path() == "/" || url.path().is_empty())
                && url.query().is_none()
                && url.fragment().is_none()
        }
        Err(_) => false,
    }
}
