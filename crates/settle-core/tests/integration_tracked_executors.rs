//! Integration test: tracker wrapping retry and fallback executors.
//!
//! Runs several executors concurrently under one tracking session and checks
//! that results pass through untouched while the session records settlement
//! order and status.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use settle_core::{
    run_with_retry, with_fallback, BothFailed, OperationStatus, RetryExhausted, RetryPolicy,
    Tracker,
};

#[derive(Debug, Clone, PartialEq)]
enum Failure {
    Retry(RetryExhausted<String>),
    Fallback(BothFailed<String>),
}

async fn flaky(calls: Arc<AtomicU32>, fail_times: u32) -> Result<u32, String> {
    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
    tokio::time::sleep(Duration::from_millis(5)).await;
    if n <= fail_times {
        Err(format!("call {n} failed"))
    } else {
        Ok(n)
    }
}

#[tokio::test(start_paused = true)]
async fn tracker_records_executor_outcomes() {
    let tracker: Tracker<u32, Failure> = Tracker::new();
    let policy = RetryPolicy::new(3, Duration::from_millis(10));
    let short_policy = RetryPolicy::new(2, Duration::from_millis(10));

    let recovering_calls = Arc::new(AtomicU32::new(0));
    let recovering = tracker.track("recovering", {
        let calls = Arc::clone(&recovering_calls);
        async move {
            run_with_retry(&policy, || flaky(Arc::clone(&calls), 2))
                .await
                .map_err(Failure::Retry)
        }
    });

    let hopeless_calls = Arc::new(AtomicU32::new(0));
    let hopeless = tracker.track("hopeless", {
        let calls = Arc::clone(&hopeless_calls);
        async move {
            run_with_retry(&short_policy, || flaky(Arc::clone(&calls), u32::MAX))
                .await
                .map_err(Failure::Retry)
        }
    });

    let rescued = tracker.track(
        "rescued",
        async {
            with_fallback(
                || async { Err::<u32, _>("primary down".to_string()) },
                || async { Ok(99) },
            )
            .await
            .map_err(Failure::Fallback)
        },
    );

    assert_eq!(tracker.pending_names().len(), 3);

    let (recovering, hopeless, rescued) = tokio::join!(recovering, hopeless, rescued);

    assert_eq!(recovering, Ok(3));
    assert_eq!(recovering_calls.load(Ordering::SeqCst), 3);
    assert_eq!(
        hopeless,
        Err(Failure::Retry(RetryExhausted {
            attempts: 2,
            reason: "call 2 failed".to_string(),
        }))
    );
    assert_eq!(hopeless_calls.load(Ordering::SeqCst), 2);
    assert_eq!(rescued, Ok(99));

    assert!(tracker.is_idle());
    let done = tracker.completed();
    let order: Vec<(&str, OperationStatus)> = done
        .iter()
        .map(|r| (r.name.as_str(), r.status()))
        .collect();
    // rescued settles at 0ms, hopeless at 20ms, recovering at 45ms.
    assert_eq!(
        order,
        [
            ("rescued", OperationStatus::Fulfilled),
            ("hopeless", OperationStatus::Rejected),
            ("recovering", OperationStatus::Fulfilled),
        ]
    );
}

#[tokio::test]
async fn both_failed_surfaces_through_tracker() {
    let tracker: Tracker<(), BothFailed<String>> = Tracker::new();
    let err = tracker
        .track(
            "doomed",
            with_fallback(
                || async { Err::<(), _>("A".to_string()) },
                || async { Err::<(), _>("B".to_string()) },
            ),
        )
        .await
        .unwrap_err();
    assert_eq!(err.primary, "A");
    assert_eq!(err.fallback, "B");

    let done = tracker.completed();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].status(), OperationStatus::Rejected);
    assert_eq!(done[0].outcome, Err(err));
}
