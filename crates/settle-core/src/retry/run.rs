//! Retry loop: invoke an async operation until success or the policy says stop.

use std::fmt;
use std::future::Future;

use super::error::RetryExhausted;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs `op` until it succeeds or `policy.max_retries` invocations have failed.
///
/// Attempts are strictly sequential: the next invocation only starts after the
/// previous future resolved and the backoff sleep elapsed. The sleep yields to
/// the runtime, so unrelated tasks keep running.
pub async fn run_with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut op: F,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(reason) => {
                attempt += 1;
                match policy.decide(attempt) {
                    RetryDecision::NoRetry => {
                        tracing::warn!(attempts = attempt, "retries exhausted: {}", reason);
                        return Err(RetryExhausted {
                            attempts: attempt,
                            reason,
                        });
                    }
                    RetryDecision::RetryAfter(d) => {
                        tracing::debug!(
                            attempt,
                            delay_ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX),
                            "attempt failed, retrying: {}",
                            reason
                        );
                        tokio::time::sleep(d).await;
                    }
                }
            }
        }
    }
}
