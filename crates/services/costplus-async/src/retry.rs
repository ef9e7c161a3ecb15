use std::time::Duration;

use crate::error::ClassifiedError;

/// Retry policy for one logical request.
///
/// `max_attempts` bounds the total number of dispatch attempts (first attempt
/// included). Backoff is linear, not exponential: the delay before attempt
/// *n* is `base_delay × (n − 1)`. Preserved for compatibility with the
/// upstream client behavior.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempt bound, including the first attempt
    pub max_attempts: u32,
    /// Linear backoff unit
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// Delay to sleep before the given 1-based attempt number.
    ///
    /// Attempt 1 has no preceding delay.
    #[must_use]
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            Duration::ZERO
        } else {
            self.base_delay * (attempt - 1)
        }
    }

    /// Whether a failed attempt should be retried.
    ///
    /// Requires both a retry-eligible error kind and remaining attempt budget.
    #[must_use]
    pub fn should_retry(&self, err: &ClassifiedError, attempt: u32) -> bool {
        attempt < self.max_attempts && err.is_retryable()
    }
}
