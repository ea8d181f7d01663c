use std::time::Duration;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Stop and surface the last failure.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Bounded retry with linear backoff.
///
/// The delay before the next attempt is `base_delay * failed_attempts`, so the
/// waits grow 1x, 2x, 3x... until `max_retries` attempts have failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of invocations (including the first). Always >= 1.
    pub max_retries: u32,
    /// Base delay for backoff.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// Create a policy; `max_retries` of 0 is treated as 1 (a single attempt).
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            base_delay,
        }
    }

    /// Decide what to do after a failure.
    ///
    /// `attempt` is the number of failed invocations so far (1 after the first
    /// failure). Returns `RetryDecision::NoRetry` once the bound is reached.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_retries.max(1) {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.base_delay.saturating_mul(attempt))
    }
}
