//! Bounded-error maximum finding with analytic quantum query estimates.
//!
//! [`max`] computes the exact classical maximum of a sequence under a key
//! oracle and credits the oracle's tracked scope with both the classical scan
//! and the expected cost of the quantum maximum-finding algorithm of Cade et
//! al. (see [`cost`]) at the requested failure probability.

pub mod cost;
pub mod max;

pub use cost::expected_quantum_queries;
pub use max::{max, max_by_fn};

/// Errors that can occur during maximum finding.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MaxError {
    #[error("failure probability must lie strictly between 0 and 1, got {0}")]
    InvalidFailureProbability(f64),

    #[error("cannot take the maximum of an empty sequence")]
    EmptyInput,

    #[error("key value {value} of element {element} (index {index}) is not comparable")]
    IncomparableValue {
        index: usize,
        element: String,
        value: f64,
    },
}
