//! Terminal failure of a retried operation.

use thiserror::Error;

/// Every permitted attempt failed.
///
/// Carries the reason reported by the last attempt and how many attempts were
/// made. Earlier failures are not kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("gave up after {attempts} attempt(s): {reason}")]
pub struct RetryExhausted<E> {
    /// Number of invocations made (equals the policy's `max_retries`).
    pub attempts: u32,
    /// Failure reported by the final attempt.
    pub reason: E,
}
