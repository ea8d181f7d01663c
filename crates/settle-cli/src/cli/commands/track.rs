//! `settle track` – run named simulated operations under one tracker.

use anyhow::Result;
use settle_core::config::SettleConfig;
use settle_core::{OperationStatus, Tracker};
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

/// One simulated operation: settles after `delay`, failing if `fails`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpSpec {
    pub name: String,
    pub delay: Duration,
    pub fails: bool,
}

impl FromStr for OpSpec {
    type Err = String;

    /// Parses `NAME:DELAY_MS` or `NAME:DELAY_MS:fail`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(format!("missing operation name in {s:?}"));
        }
        let delay_ms: u64 = parts
            .next()
            .ok_or_else(|| format!("missing delay in {s:?} (expected NAME:DELAY_MS)"))?
            .parse()
            .map_err(|e| format!("invalid delay in {s:?}: {e}"))?;
        let fails = match parts.next() {
            None => false,
            Some("fail") => true,
            Some(other) => return Err(format!("unknown flag {other:?} in {s:?} (expected \"fail\")")),
        };
        if parts.next().is_some() {
            return Err(format!("too many fields in {s:?}"));
        }
        Ok(OpSpec {
            name: name.to_string(),
            delay: Duration::from_millis(delay_ms),
            fails,
        })
    }
}

async fn simulate(op: OpSpec) -> Result<u64, String> {
    tokio::time::sleep(op.delay).await;
    let ms = op.delay.as_millis() as u64;
    if op.fails {
        Err(format!("{} failed after {ms}ms", op.name))
    } else {
        Ok(ms)
    }
}

/// Register every op with `tracker` without starting any of them.
fn register_all(
    tracker: &Tracker<u64, String>,
    ops: Vec<OpSpec>,
) -> Vec<impl Future<Output = Result<u64, String>> + Send + 'static> {
    ops.into_iter()
        .map(|op| {
            let name = op.name.clone();
            tracker.track(&name, simulate(op))
        })
        .collect()
}

pub async fn run_track(cfg: &SettleConfig, ops: Vec<OpSpec>) -> Result<()> {
    let tracker: Tracker<u64, String> = Tracker::new();
    let tracked = register_all(&tracker, ops);
    println!("pending: {}", tracker.pending_names().len());

    let handles: Vec<_> = tracked.into_iter().map(tokio::spawn).collect();
    // Panicked or cancelled tasks leave the pending set too, so this returns.
    let done = tracker.wait_idle(cfg.monitor_interval()).await;

    let mut join_failures = 0usize;
    for handle in handles {
        if let Err(e) = handle.await {
            tracing::warn!("tracked task did not complete: {}", e);
            join_failures += 1;
        }
    }

    println!("{:<16} {:<10} {}", "NAME", "STATUS", "RESULT");
    for r in &done {
        let status = match r.status() {
            OperationStatus::Fulfilled => "fulfilled",
            OperationStatus::Rejected => "rejected",
        };
        let result = match &r.outcome {
            Ok(ms) => format!("{ms}ms"),
            Err(reason) => reason.clone(),
        };
        println!("{:<16} {:<10} {}", r.name, status, result);
    }
    for name in tracker.abandoned_names() {
        println!("{:<16} {:<10} -", name, "abandoned");
    }

    if join_failures > 0 {
        anyhow::bail!("{join_failures} tracked operation(s) did not settle");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_name_and_delay() {
        let op: OpSpec = "fetch:20".parse().unwrap();
        assert_eq!(op.name, "fetch");
        assert_eq!(op.delay, Duration::from_millis(20));
        assert!(!op.fails);
    }

    #[test]
    fn parse_fail_flag() {
        let op: OpSpec = "db:30:fail".parse().unwrap();
        assert_eq!(op.name, "db");
        assert!(op.fails);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!("".parse::<OpSpec>().is_err());
        assert!(":10".parse::<OpSpec>().is_err());
        assert!("x".parse::<OpSpec>().is_err());
        assert!("x:abc".parse::<OpSpec>().is_err());
        assert!("x:10:oops".parse::<OpSpec>().is_err());
        assert!("x:10:fail:extra".parse::<OpSpec>().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn track_runs_all_ops() {
        let cfg = SettleConfig::default();
        let ops = vec![
            "a:30".parse().unwrap(),
            "b:10:fail".parse().unwrap(),
        ];
        run_track(&cfg, ops).await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn pending_count_is_taken_before_any_op_runs() {
        let tracker: Tracker<u64, String> = Tracker::new();
        let ops = vec!["a:0".parse().unwrap(), "b:0".parse().unwrap()];
        let tracked = register_all(&tracker, ops);
        assert_eq!(tracker.pending_names().len(), 2);
        let handles: Vec<_> = tracked.into_iter().map(tokio::spawn).collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap(), Ok(0));
        }
        assert!(tracker.is_idle());
        assert_eq!(tracker.completed().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_delay_ops_all_complete() {
        let cfg = SettleConfig::default();
        let ops = vec!["a:0".parse().unwrap(), "b:0".parse().unwrap()];
        run_track(&cfg, ops).await.unwrap();
    }
}
