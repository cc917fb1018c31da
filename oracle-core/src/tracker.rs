//! Scoped query tracking.
//!
//! A [`QueryContext`] owns a stack of tracked scopes for one logical thread of
//! execution. [`QueryContext::track_queries`] pushes a fresh scope and returns a
//! [`TrackedScope`] guard; the scope stays active until the guard is dropped,
//! whichever way the enclosing code exits. Scopes nest strictly: the innermost
//! active scope receives all accounting, and closing it makes the previous one
//! active again.
//!
//! Statistics stay readable through the [`Tracker`] handle after the scope has
//! closed.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::oracle::OracleKey;
use crate::stats::QueryStats;

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

/// Errors raised by strict statistics lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("no queries were recorded for oracle '{0}'")]
    UnknownOracle(OracleKey),
}

/// Every update leaves the record map consistent, so a poisoned lock is safe to reuse.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        log::warn!("recovering poisoned query-tracker lock");
        poisoned.into_inner()
    })
}

/// Handle to the statistics of one tracked scope.
///
/// Cheap to clone; all clones observe the same records.
#[derive(Debug, Clone)]
pub struct Tracker {
    id: u64,
    records: Arc<Mutex<BTreeMap<OracleKey, QueryStats>>>,
}

impl Tracker {
    fn new() -> Self {
        Tracker {
            id: NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed),
            records: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Unique id of the scope this tracker belongs to.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Add `delta` to the record for `key`, creating an all-zero record first.
    /// The whole delta is applied under one exclusive lock.
    pub fn record(&self, key: &OracleKey, delta: QueryStats) {
        let mut records = lock(&self.records);
        *records.entry(key.clone()).or_default() += delta;
    }

    /// Accumulated statistics for `key`.
    ///
    /// A key that was never invoked in this scope reads as all-zero stats.
    /// Use [`Tracker::try_get_stats`] to treat that case as an error instead.
    pub fn get_stats(&self, key: impl Into<OracleKey>) -> QueryStats {
        let key = key.into();
        lock(&self.records).get(&key).copied().unwrap_or_default()
    }

    /// Strict lookup: fails when nothing was ever attributed to `key`.
    pub fn try_get_stats(&self, key: impl Into<OracleKey>) -> Result<QueryStats, TrackerError> {
        let key = key.into();
        lock(&self.records)
            .get(&key)
            .copied()
            .ok_or(TrackerError::UnknownOracle(key))
    }

    /// Copy of every record in this scope, ordered by key.
    pub fn snapshot(&self) -> BTreeMap<OracleKey, QueryStats> {
        lock(&self.records).clone()
    }

    /// True when no oracle has been attributed any query.
    pub fn is_empty(&self) -> bool {
        lock(&self.records).is_empty()
    }
}

/// The stack of tracked scopes for one execution context.
///
/// Pass a clone to every oracle that should be accounted against it. Clones
/// share the same stack.
#[derive(Debug, Clone, Default)]
pub struct QueryContext {
    scopes: Arc<Mutex<Vec<Tracker>>>,
}

impl QueryContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a new tracked scope. It becomes the active scope until the
    /// returned guard is dropped.
    pub fn track_queries(&self) -> TrackedScope {
        let tracker = Tracker::new();
        let depth = {
            let mut scopes = lock(&self.scopes);
            scopes.push(tracker.clone());
            scopes.len()
        };
        log::debug!("entered tracked scope #{} (depth {})", tracker.id, depth);
        TrackedScope {
            context: self.clone(),
            tracker,
        }
    }

    /// Run `body` inside a fresh tracked scope and hand back its tracker once
    /// the scope has closed.
    pub fn track<R>(&self, body: impl FnOnce(&Tracker) -> R) -> (R, Tracker) {
        let scope = self.track_queries();
        let tracker = scope.tracker();
        let result = body(&tracker);
        drop(scope);
        (result, tracker)
    }

    /// The innermost active scope, if any.
    pub fn active(&self) -> Option<Tracker> {
        lock(&self.scopes).last().cloned()
    }

    /// Number of scopes currently open.
    pub fn depth(&self) -> usize {
        lock(&self.scopes).len()
    }

    pub fn is_tracking(&self) -> bool {
        self.depth() > 0
    }

    /// Add `delta` to the active scope's record for `key`.
    ///
    /// The scope stack stays locked for the whole update, so once a scope has
    /// been closed no later update can land in it.
    /// Returns `false` when no scope is active and nothing was recorded.
    pub fn record(&self, key: &OracleKey, delta: QueryStats) -> bool {
        let scopes = lock(&self.scopes);
        match scopes.last() {
            Some(tracker) => {
                log::trace!("scope #{}: {} += {:?}", tracker.id, key, delta);
                tracker.record(key, delta);
                true
            }
            None => false,
        }
    }

    fn close(&self, id: u64) {
        let mut scopes = lock(&self.scopes);
        // Removal by identity: a guard dropped out of order only closes its own scope.
        if let Some(pos) = scopes.iter().rposition(|t| t.id == id) {
            scopes.remove(pos);
        }
        log::debug!("closed tracked scope #{} (depth {})", id, scopes.len());
    }
}

/// Guard for an active tracked scope. Dropping it closes the scope.
#[derive(Debug)]
pub struct TrackedScope {
    context: QueryContext,
    tracker: Tracker,
}

impl TrackedScope {
    /// Handle to this scope's statistics, valid after the scope closes.
    pub fn tracker(&self) -> Tracker {
        self.tracker.clone()
    }

    /// Shorthand for `self.tracker().get_stats(key)`.
    pub fn get_stats(&self, key: impl Into<OracleKey>) -> QueryStats {
        self.tracker.get_stats(key)
    }
}

impl Drop for TrackedScope {
    fn drop(&mut self) {
        self.context.close(self.tracker.id);
    }
}
