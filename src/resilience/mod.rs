//! Resilience utilities for outbound calls: retry policy and backoff.

pub mod backoff;
pub mod retry;

pub use retry::{is_retryable_status, RetryPolicy};
