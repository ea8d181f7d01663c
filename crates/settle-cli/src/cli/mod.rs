//! CLI for the settle helpers: drives retry, fallback and tracking with
//! simulated operations.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use settle_core::config;

use commands::{run_config, run_fallback, run_retry, run_track, OpSpec};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "settle")]
#[command(about = "settle: retry, fallback and pending-operation tracking", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Retry an operation that fails its first N invocations.
    Retry {
        /// Number of invocations that fail before one succeeds.
        #[arg(long, default_value = "0", value_name = "N")]
        fail_times: u32,
        /// Maximum attempts (defaults to the config file value).
        #[arg(long, value_name = "N")]
        max_retries: Option<u32>,
        /// Base backoff delay in milliseconds (defaults to the config file value).
        #[arg(long, value_name = "MS")]
        base_delay_ms: Option<u64>,
    },

    /// Run a primary operation with a fallback.
    Fallback {
        /// Make the primary operation fail.
        #[arg(long)]
        primary_fails: bool,
        /// Make the fallback operation fail.
        #[arg(long)]
        fallback_fails: bool,
    },

    /// Track named operations running concurrently.
    Track {
        /// Operations as NAME:DELAY_MS or NAME:DELAY_MS:fail.
        #[arg(required = true, value_name = "NAME:DELAY_MS[:fail]")]
        ops: Vec<OpSpec>,
    },

    /// Show the config file path and loaded values.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Retry {
                fail_times,
                max_retries,
                base_delay_ms,
            } => run_retry(&cfg, fail_times, max_retries, base_delay_ms).await?,
            CliCommand::Fallback {
                primary_fails,
                fallback_fails,
            } => run_fallback(primary_fails, fallback_fails).await?,
            CliCommand::Track { ops } => run_track(&cfg, ops).await?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
