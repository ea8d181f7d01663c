//! Tracking session: pending-name set plus completed records in settlement order.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::record::OperationRecord;

struct TrackerState<T, E> {
    pending: BTreeSet<String>,
    completed: Vec<OperationRecord<T, E>>,
    abandoned: BTreeSet<String>,
}

/// Handle to one tracking session.
///
/// Clones share the same session. Registration happens when [`Tracker::track`]
/// is called; settlement is recorded when the returned future resolves. All
/// bookkeeping is updated under one lock, so a registered name leaves the
/// pending set in the same step it lands in `completed` or `abandoned`.
///
/// A tracked future that is dropped before it resolves (cancelled, or unwound
/// by a panic) has no outcome to record; its name moves to the abandoned set.
///
/// Registering a name that is still pending is not deduplicated: the first
/// settlement clears it from the pending set and each settlement appends its
/// own record.
pub struct Tracker<T, E> {
    state: Arc<Mutex<TrackerState<T, E>>>,
}

impl<T, E> Clone for Tracker<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T, E> Default for Tracker<T, E> {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(TrackerState {
                pending: BTreeSet::new(),
                completed: Vec::new(),
                abandoned: BTreeSet::new(),
            })),
        }
    }
}

impl<T, E> std::fmt::Debug for Tracker<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("Tracker")
            .field("pending", &state.pending)
            .field("completed", &state.completed.len())
            .field("abandoned", &state.abandoned)
            .finish()
    }
}

/// Bookkeeping must not fail, so a poisoned lock is recovered.
fn lock<T, E>(state: &Mutex<TrackerState<T, E>>) -> MutexGuard<'_, TrackerState<T, E>> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Owned by a tracked future from registration on. Records the outcome via
/// `settle`; if dropped unsettled, marks the name abandoned.
struct Settlement<T, E> {
    state: Arc<Mutex<TrackerState<T, E>>>,
    name: Option<String>,
}

impl<T: Clone, E: Clone> Settlement<T, E> {
    fn settle(mut self, outcome: &Result<T, E>) {
        let Some(name) = self.name.take() else {
            return;
        };
        let mut state = lock(&self.state);
        state.pending.remove(&name);
        tracing::debug!(
            operation = %name,
            ok = outcome.is_ok(),
            still_pending = state.pending.len(),
            "operation settled"
        );
        state.completed.push(OperationRecord {
            name,
            outcome: outcome.clone(),
        });
    }
}

impl<T, E> Drop for Settlement<T, E> {
    fn drop(&mut self) {
        if let Some(name) = self.name.take() {
            let mut state = lock(&self.state);
            state.pending.remove(&name);
            tracing::warn!(operation = %name, "tracked operation dropped before settling");
            state.abandoned.insert(name);
        }
    }
}

impl<T, E> Tracker<T, E>
where
    T: Clone,
    E: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` as pending now and wrap `op`.
    ///
    /// The returned future resolves to exactly what `op` resolves to. Before
    /// handing the result back it moves `name` from the pending set to the end
    /// of the completed list. Dropping the returned future early moves `name`
    /// to the abandoned set instead.
    pub fn track<Fut>(&self, name: &str, op: Fut) -> impl Future<Output = Result<T, E>>
    where
        Fut: Future<Output = Result<T, E>>,
    {
        let name = name.to_string();
        lock(&self.state).pending.insert(name.clone());
        tracing::debug!(operation = %name, "tracking operation");

        let settlement = Settlement {
            state: Arc::clone(&self.state),
            name: Some(name),
        };
        async move {
            let outcome = op.await;
            settlement.settle(&outcome);
            outcome
        }
    }

    /// Names registered but not yet settled.
    pub fn pending_names(&self) -> BTreeSet<String> {
        lock(&self.state).pending.clone()
    }

    /// Settled records, in the order they settled.
    pub fn completed(&self) -> Vec<OperationRecord<T, E>> {
        lock(&self.state).completed.clone()
    }

    /// Names whose tracked future was dropped without resolving.
    pub fn abandoned_names(&self) -> BTreeSet<String> {
        lock(&self.state).abandoned.clone()
    }

    pub fn is_idle(&self) -> bool {
        lock(&self.state).pending.is_empty()
    }

    /// Poll every `poll` until nothing is pending, then return the completed
    /// records. The wrapped futures must be driven elsewhere (spawned or
    /// joined); this only observes.
    pub async fn wait_idle(&self, poll: Duration) -> Vec<OperationRecord<T, E>> {
        loop {
            let pending = self.pending_names();
            if pending.is_empty() {
                return self.completed();
            }
            tracing::debug!(?pending, "waiting on pending operations");
            tokio::time::sleep(poll).await;
        }
    }
}
