//! Logging init: append to a file under the XDG state dir, or stderr.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,settle=debug,settle_core=debug";

/// `RUST_LOG` if set, otherwise [`DEFAULT_FILTER`].
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Hands out a clone of the log file per event; falls back to stderr when the
/// handle cannot be duplicated.
struct LogFile(File);

enum LogSink {
    File(File),
    Stderr,
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(LogSink::File)
            .unwrap_or(LogSink::Stderr)
    }
}

/// Path of the log file: `~/.local/state/settle/settle.log`.
/// Creates the parent directory.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("settle")?;
    xdg_dirs
        .place_state_file("settle.log")
        .context("create settle state directory")
}

/// Initialize structured logging to the state-dir log file.
///
/// Returns Err when the file cannot be opened so the caller can use
/// [`init_logging_stderr`] instead.
pub fn init_logging() -> Result<PathBuf> {
    let path = log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(LogFile(file)))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {e}"))?;

    tracing::info!("settle logging initialized at {}", path.display());
    Ok(path)
}

/// Initialize logging to stderr only. Ignored if a subscriber is already set.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
