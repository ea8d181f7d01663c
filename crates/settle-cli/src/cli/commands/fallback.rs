//! `settle fallback` – primary/fallback with simulated outcomes.

use anyhow::Result;
use settle_core::FallbackOutcome;

async fn simulated(label: &'static str, fails: bool) -> Result<&'static str, String> {
    if fails {
        Err(format!("{label} unavailable"))
    } else {
        Ok(label)
    }
}

pub async fn run_fallback(primary_fails: bool, fallback_fails: bool) -> Result<()> {
    let outcome = settle_core::run_fallback(
        || simulated("primary", primary_fails),
        || simulated("fallback", fallback_fails),
    )
    .await?;

    match outcome {
        FallbackOutcome::Primary(v) => println!("value from {v}"),
        FallbackOutcome::Fallback {
            value,
            primary_reason,
        } => println!("value from {value} (primary: {primary_reason})"),
    }
    Ok(())
}
