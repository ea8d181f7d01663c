//! Named async operation tracking.
//!
//! A [`Tracker`] records which registered operations are still pending and, in
//! settlement order, how each finished. It never alters the wrapped result.

mod record;
mod session;

pub use record::{OperationRecord, OperationStatus};
pub use session::Tracker;
