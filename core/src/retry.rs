//! Bounded retry for transient store failures.

use std::time::Duration;

/// Retries after the first attempt; four attempts in total.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// How often and how patiently a request is repeated.
///
/// Every store operation is a GET, a PATCH of fixed values, or a DELETE, so
/// repeating one leaves the store in the same state. No jitter is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            delay: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

/// Rate limiting and server-side failures are worth another attempt.
/// `501 Not Implemented` will not change on retry.
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || ((500..=599).contains(&status) && status != 501)
}
