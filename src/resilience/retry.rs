//! Retry policy for outbound requests.

use axum::http::StatusCode;
use std::time::Duration;

use crate::resilience::backoff::backoff_delay;

/// How many times and how fast an outbound request may be retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, first try included.
    pub max_attempts: u32,
    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,
    /// Delay cap in milliseconds.
    pub max_delay_ms: u64,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_attempts,
            base_delay_ms,
            max_delay_ms,
        }
    }

    /// Whether another attempt is allowed after `attempts` tries.
    pub fn allows_retry(&self, attempts: u32) -> bool {
        attempts < self.max_attempts
    }

    /// Delay to wait before the attempt following `attempts` tries.
    pub fn delay_after(&self, attempts: u32) -> Duration {
        backoff_delay(attempts, self.base_delay_ms, self.max_delay_ms)
    }
}

/// Statuses worth retrying: rate limiting and server-side failures.
/// Other client errors are deterministic and retried never.
pub fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}
