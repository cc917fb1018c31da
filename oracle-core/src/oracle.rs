//! Oracle wrapping: a plain function composed with query accounting.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::stats::QueryStats;
use crate::tracker::QueryContext;

static NEXT_ORACLE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity under which oracle queries are grouped.
///
/// All oracles sharing a key accumulate into one record per scope.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OracleKey {
    /// An explicit, caller-chosen name.
    Named(String),
    /// The identity of an unnamed oracle, allocated when it was built.
    Anonymous(u64),
}

impl OracleKey {
    /// A fresh process-unique anonymous key.
    pub fn unique() -> Self {
        OracleKey::Anonymous(NEXT_ORACLE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for OracleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleKey::Named(name) => write!(f, "{}", name),
            OracleKey::Anonymous(id) => write!(f, "oracle#{}", id),
        }
    }
}

// Serialized as its display form so keys can be JSON object keys.
impl Serialize for OracleKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<&str> for OracleKey {
    fn from(name: &str) -> Self {
        OracleKey::Named(name.to_string())
    }
}

impl From<String> for OracleKey {
    fn from(name: String) -> Self {
        OracleKey::Named(name)
    }
}

impl From<&OracleKey> for OracleKey {
    fn from(key: &OracleKey) -> Self {
        key.clone()
    }
}

impl<F> From<&Oracle<F>> for OracleKey {
    fn from(oracle: &Oracle<F>) -> Self {
        oracle.key.clone()
    }
}

/// A trackable black-box function.
///
/// Every [`Oracle::query`] forwards to the wrapped function and reports one
/// classical query to the active scope of the oracle's [`QueryContext`].
/// Without a context, or with no scope open, the call is simply not counted.
/// Clones share the key and therefore the accounting.
#[derive(Clone)]
pub struct Oracle<F> {
    key: OracleKey,
    func: F,
    context: Option<QueryContext>,
}

impl<F> Oracle<F> {
    /// Wrap `func` under its own anonymous identity.
    pub fn new(func: F, context: Option<QueryContext>) -> Self {
        Self::with_key(OracleKey::unique(), func, context)
    }

    /// Wrap `func` under an explicit name. Distinct functions may share a name
    /// on purpose to pool their accounting.
    pub fn named(name: impl Into<String>, func: F, context: Option<QueryContext>) -> Self {
        Self::with_key(OracleKey::Named(name.into()), func, context)
    }

    pub fn with_key(key: OracleKey, func: F, context: Option<QueryContext>) -> Self {
        Oracle { key, func, context }
    }

    pub fn key(&self) -> &OracleKey {
        &self.key
    }

    pub fn context(&self) -> Option<&QueryContext> {
        self.context.as_ref()
    }

    /// Call the oracle and count one classical query.
    ///
    /// The query is counted once the wrapped function returns; a panicking
    /// call propagates unchanged and is not counted.
    pub fn query<T: ?Sized, R>(&self, input: &T) -> R
    where
        F: Fn(&T) -> R,
    {
        let output = (self.func)(input);
        self.record(QueryStats::classical(1));
        output
    }

    /// Call the wrapped function without any accounting.
    ///
    /// For algorithms that commit their statistics in a single
    /// [`Oracle::record`] once they have succeeded.
    pub fn evaluate<T: ?Sized, R>(&self, input: &T) -> R
    where
        F: Fn(&T) -> R,
    {
        (self.func)(input)
    }

    /// Add `delta` to the active scope's record for this oracle's key.
    /// Returns `false` if nothing was recorded.
    pub fn record(&self, delta: QueryStats) -> bool {
        match &self.context {
            Some(context) => context.record(&self.key, delta),
            None => false,
        }
    }
}

impl<F> fmt::Debug for Oracle<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Oracle")
            .field("key", &self.key)
            .field("tracked", &self.context.is_some())
            .finish()
    }
}

/// Wrap `func` as an oracle keyed by `key`, or by its own identity when `key`
/// is `None`.
pub fn wrap<F>(func: F, key: Option<OracleKey>, context: Option<QueryContext>) -> Oracle<F> {
    match key {
        Some(key) => Oracle::with_key(key, func, context),
        None => Oracle::new(func, context),
    }
}
