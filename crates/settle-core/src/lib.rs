//! Async control-flow helpers: bounded retry, primary/fallback execution and
//! pending-operation tracking.

pub mod config;
pub mod logging;

pub mod fallback;
pub mod retry;
pub mod tracker;

pub use fallback::{run_fallback, with_fallback, BothFailed, FallbackOutcome};
pub use retry::{run_with_retry, RetryExhausted, RetryPolicy};
pub use tracker::{OperationRecord, OperationStatus, Tracker};
