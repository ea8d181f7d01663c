//! `settle retry` – run a flaky simulated operation under the retry policy.

use anyhow::Result;
use settle_core::config::SettleConfig;
use settle_core::{run_with_retry, RetryPolicy};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Policy from the config file, with command-line overrides applied.
pub(crate) fn effective_policy(
    cfg: &SettleConfig,
    max_retries: Option<u32>,
    base_delay_ms: Option<u64>,
) -> RetryPolicy {
    let base = cfg.retry_policy();
    RetryPolicy::new(
        max_retries.unwrap_or(base.max_retries),
        base_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(base.base_delay),
    )
}

pub async fn run_retry(
    cfg: &SettleConfig,
    fail_times: u32,
    max_retries: Option<u32>,
    base_delay_ms: Option<u64>,
) -> Result<()> {
    let policy = effective_policy(cfg, max_retries, base_delay_ms);
    let calls = AtomicU32::new(0);

    let outcome = run_with_retry(&policy, || {
        let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
        async move {
            if n <= fail_times {
                Err(format!("simulated failure on call {n}"))
            } else {
                Ok(n)
            }
        }
    })
    .await;

    let calls = calls.load(Ordering::SeqCst);
    match outcome {
        Ok(n) => println!("succeeded on call {n} of at most {}", policy.max_retries),
        Err(e) => anyhow::bail!("{e} ({calls} call(s) made)"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use settle_core::config::RetryConfig;

    #[test]
    fn overrides_replace_config_values() {
        let cfg = SettleConfig {
            retry: Some(RetryConfig {
                max_retries: 7,
                base_delay_ms: 300,
            }),
            ..SettleConfig::default()
        };
        let p = effective_policy(&cfg, None, None);
        assert_eq!(p.max_retries, 7);
        assert_eq!(p.base_delay, Duration::from_millis(300));

        let p = effective_policy(&cfg, Some(2), Some(5));
        assert_eq!(p.max_retries, 2);
        assert_eq!(p.base_delay, Duration::from_millis(5));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retry_is_reported_as_error() {
        let cfg = SettleConfig::default();
        let err = run_retry(&cfg, 10, Some(2), Some(1)).await.unwrap_err();
        assert!(err.to_string().contains("2 call(s) made"), "{err}");
        run_retry(&cfg, 1, Some(2), Some(1)).await.unwrap();
    }
}
