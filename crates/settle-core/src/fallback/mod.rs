//! Primary/fallback executor.
//!
//! [`with_fallback`] is the plain form returning the first value obtained;
//! [`run_fallback`] also reports which path produced it.

mod error;
mod run;

pub use error::BothFailed;
pub use run::{run_fallback, with_fallback, FallbackOutcome};
