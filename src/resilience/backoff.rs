//! Exponential backoff with jitter.

use rand::Rng;
use std::time::Duration;

/// Compute the delay before the given retry attempt (1-based).
///
/// Doubles from `base_ms` per attempt, capped at `max_ms`, with up to 10%
/// jitter added on top to avoid synchronized retries.
pub fn backoff_delay(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    // Shift capped at 2^16 so large attempt counts cannot overflow.
    let exponent = (attempt - 1).min(16);
    let delay_ms = base_ms.saturating_mul(1u64 << exponent).min(max_ms);

    let jitter_range = delay_ms / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(delay_ms + jitter)
}
