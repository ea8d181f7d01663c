use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Retry parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first).
    pub max_retries: u32,
    /// Base delay in milliseconds; the n-th retry waits `n * base_delay_ms`.
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let p = RetryPolicy::default();
        Self {
            max_retries: p.max_retries,
            base_delay_ms: p.base_delay.as_millis() as u64,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_millis(self.base_delay_ms))
    }
}

fn default_monitor_interval_ms() -> u64 {
    50
}

/// Global configuration loaded from `~/.config/settle/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleConfig {
    /// How often `Tracker::wait_idle` polls the pending set, in milliseconds.
    #[serde(default = "default_monitor_interval_ms")]
    pub monitor_interval_ms: u64,
    /// Retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self {
            retry: None,
            monitor_interval_ms: default_monitor_interval_ms(),
        }
    }
}

impl SettleConfig {
    /// Effective retry policy (configured section or defaults).
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().policy()
    }

    pub fn monitor_interval(&self) -> Duration {
        Duration::from_millis(self.monitor_interval_ms.max(1))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("settle")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SettleConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SettleConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SettleConfig = toml::from_str(&data)?;
    Ok(cfg)
}
