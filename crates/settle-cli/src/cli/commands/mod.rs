//! CLI command handlers, one per file.

mod config;
mod fallback;
mod retry;
mod track;

pub use config::run_config;
pub use fallback::run_fallback;
pub use retry::run_retry;
pub use track::{run_track, OpSpec};
