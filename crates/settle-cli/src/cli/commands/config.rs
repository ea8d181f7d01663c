//! `settle config` – show where the config lives and what was loaded.

use anyhow::Result;
use settle_core::config::{self, SettleConfig};

pub fn run_config(cfg: &SettleConfig) -> Result<()> {
    let path = config::config_path()?;
    let policy = cfg.retry_policy();
    println!("config: {}", path.display());
    println!("  max_retries         {}", policy.max_retries);
    println!("  base_delay_ms       {}", policy.base_delay.as_millis());
    println!("  monitor_interval_ms {}", cfg.monitor_interval().as_millis());
    Ok(())
}
