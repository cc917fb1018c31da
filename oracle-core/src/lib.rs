//! Shared types for query-complexity benchmarks: oracle wrapping, scoped
//! query tracking, and the per-oracle statistics they accumulate.
//!
//! ```
//! use oracle_core::{Oracle, QueryContext};
//!
//! let ctx = QueryContext::new();
//! let f = Oracle::named("square", |x: &i32| x * x, Some(ctx.clone()));
//!
//! let (total, tracker) = ctx.track(|_| (1..=3).map(|x| f.query(&x)).sum::<i32>());
//! assert_eq!(total, 14);
//! assert_eq!(tracker.get_stats("square").classical_actual_queries, 3);
//! ```

pub mod oracle;
pub mod stats;
pub mod tracker;

pub use oracle::{wrap, Oracle, OracleKey};
pub use stats::QueryStats;
pub use tracker::{QueryContext, TrackedScope, Tracker, TrackerError};
