//! Primary/fallback execution: try one operation, fall back to another once.

use std::fmt;
use std::future::Future;

use super::error::BothFailed;

/// Which path produced the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackOutcome<T, E> {
    /// Primary succeeded; fallback was never invoked.
    Primary(T),
    /// Primary failed with `primary_reason`; fallback produced `value`.
    Fallback { value: T, primary_reason: E },
}

impl<T, E> FallbackOutcome<T, E> {
    /// Drop the path information and keep the value.
    pub fn into_value(self) -> T {
        match self {
            FallbackOutcome::Primary(v) => v,
            FallbackOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn used_fallback(&self) -> bool {
        matches!(self, FallbackOutcome::Fallback { .. })
    }
}

/// Runs `primary`; if it fails, runs `fallback`. Neither is retried.
///
/// `fallback` is invoked only after `primary` resolved with an error. When the
/// fallback succeeds the primary reason is returned alongside the value.
pub async fn run_fallback<T, E, P, PF, F, FF>(
    primary: P,
    fallback: F,
) -> Result<FallbackOutcome<T, E>, BothFailed<E>>
where
    P: FnOnce() -> PF,
    PF: Future<Output = Result<T, E>>,
    F: FnOnce() -> FF,
    FF: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let primary_reason = match primary().await {
        Ok(value) => return Ok(FallbackOutcome::Primary(value)),
        Err(e) => e,
    };
    tracing::warn!("primary failed, trying fallback: {}", primary_reason);

    match fallback().await {
        Ok(value) => Ok(FallbackOutcome::Fallback {
            value,
            primary_reason,
        }),
        Err(fallback_reason) => {
            tracing::warn!("fallback failed: {}", fallback_reason);
            Err(BothFailed {
                primary: primary_reason,
                fallback: fallback_reason,
            })
        }
    }
}

/// Like [`run_fallback`], but returns only the value. A primary failure that
/// the fallback recovered from is logged and otherwise discarded.
pub async fn with_fallback<T, E, P, PF, F, FF>(primary: P, fallback: F) -> Result<T, BothFailed<E>>
where
    P: FnOnce() -> PF,
    PF: Future<Output = Result<T, E>>,
    F: FnOnce() -> FF,
    FF: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    run_fallback(primary, fallback)
        .await
        .map(FallbackOutcome::into_value)
}
