//! Bounded retry with linear backoff.
//!
//! An operation is a factory returning a fresh future per attempt. Failures are
//! opaque to the executor; only the last one is surfaced, wrapped in
//! [`RetryExhausted`] together with the attempt count.

mod error;
mod policy;
mod run;

pub use error::RetryExhausted;
pub use policy::{RetryDecision, RetryPolicy};
pub use run::run_with_retry;
