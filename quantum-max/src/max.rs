//! Bounded-error maximum finding.
//!
//! The classical answer is always exact: a linear scan evaluating the key
//! oracle once per element. What gets recorded alongside it is the cost a
//! quantum maximum-finding procedure would need to return the same answer
//! with failure probability at most `error`.

use std::fmt::Debug;

use oracle_core::{wrap, Oracle, OracleKey, QueryContext, QueryStats};

use crate::cost::{expected_quantum_queries, validate_error_probability};
use crate::MaxError;

/// Return the element of `sequence` whose `key` value is largest.
///
/// Ties go to the first occurrence. The key oracle is evaluated exactly once
/// per element, in order. On success the oracle's active scope (if any) is
/// credited, in one update, with `n` classical queries (actual and expected),
/// zero expected classical queries for the quantum algorithm, and
/// [`expected_quantum_queries`]`(n, error)` expected quantum queries.
///
/// On failure nothing is recorded.
///
/// # Errors
///
/// - [`MaxError::InvalidFailureProbability`] unless `0 < error < 1`
/// - [`MaxError::EmptyInput`] for an empty sequence
/// - [`MaxError::IncomparableValue`] when the key yields NaN or an infinity
pub fn max<'a, T, F>(sequence: &'a [T], key: &Oracle<F>, error: f64) -> Result<&'a T, MaxError>
where
    T: Debug,
    F: Fn(&T) -> f64,
{
    validate_error_probability(error)?;

    let mut best: Option<(usize, f64)> = None;
    for (index, item) in sequence.iter().enumerate() {
        let value = key.evaluate(item);
        if !value.is_finite() {
            return Err(MaxError::IncomparableValue {
                index,
                element: format!("{:?}", item),
                value,
            });
        }
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((index, value)),
        }
    }
    let (index, value) = best.ok_or(MaxError::EmptyInput)?;

    let n = sequence.len();
    let stats = QueryStats {
        quantum_expected_quantum_queries: expected_quantum_queries(n, error)?,
        ..QueryStats::classical(n as u64)
    };
    let recorded = key.record(stats);

    log::debug!(
        "max over {} items via {}: index {} (key {}), {:.4} expected quantum queries at error {:e}{}",
        n,
        key.key(),
        index,
        value,
        stats.quantum_expected_quantum_queries,
        error,
        if recorded { "" } else { " (untracked)" }
    );

    Ok(&sequence[index])
}

/// [`max`] with the key given as a bare function, wrapped into an oracle
/// bound to `context`. Without a name the oracle gets a fresh anonymous key.
pub fn max_by_fn<'a, T, F>(
    sequence: &'a [T],
    name: Option<&str>,
    key: F,
    error: f64,
    context: Option<QueryContext>,
) -> Result<&'a T, MaxError>
where
    T: Debug,
    F: Fn(&T) -> f64,
{
    let oracle = wrap(key, name.map(OracleKey::from), context);
    max(sequence, &oracle, error)
}
