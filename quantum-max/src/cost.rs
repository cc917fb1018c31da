//! Analytic query-cost model for quantum search and maximum finding.
//!
//! Bounds from Cade, Folkertsma, Niesen, Weggemans, "Grover beyond
//! asymptotics: Finite-sized search and its application to constraint
//! satisfaction" (arXiv:2203.04975). Nothing here runs a circuit; every
//! figure is a closed-form expectation.

use crate::MaxError;

/// Expected queries of quantum search when at least a quarter of the items are marked.
pub const DENSE_SEARCH_QUERIES: f64 = 2.0344;

/// Each independent maximum-finding run fails with probability at most 1/3.
const RUN_FAILURE_BASE: f64 = 3.0;

/// Markov factor turning an expected query count into a per-run budget.
const RUN_BUDGET_FACTOR: f64 = 3.0;

/// Reject failure probabilities outside the open interval (0, 1), NaN included.
pub fn validate_error_probability(error: f64) -> Result<f64, MaxError> {
    if error > 0.0 && error < 1.0 {
        Ok(error)
    } else {
        Err(MaxError::InvalidFailureProbability(error))
    }
}

/// Expected quantum queries of Cade et al.'s search over `n` items of which
/// `marked` are solutions.
///
/// For `1 <= marked < n/4`:
/// `9/4 * n/sqrt((n-marked)*marked) + ceil(log_{6/5}(n / (2*sqrt((n-marked)*marked)))) - 3`,
/// otherwise the constant [`DENSE_SEARCH_QUERIES`].
pub fn cade_et_al_f(n: usize, marked: usize) -> f64 {
    if marked >= 1 && 4 * marked < n {
        let (n, k) = (n as f64, marked as f64);
        let root = ((n - k) * k).sqrt();
        let term = n / (2.0 * root);
        2.25 * n / root + (term.ln() / 1.2f64.ln()).ceil() - 3.0
    } else {
        DENSE_SEARCH_QUERIES
    }
}

/// Independent runs needed to push the failure probability below `error`:
/// `ceil(log_3(1/error))`.
pub fn repetitions_for(error: f64) -> Result<u32, MaxError> {
    let error = validate_error_probability(error)?;
    // -ln(error) stays finite for subnormal errors where 1/error would overflow.
    Ok((-error.ln() / RUN_FAILURE_BASE.ln()).ceil() as u32)
}

/// Expected quantum queries of one maximum-finding run over `n` items.
///
/// The threshold climbs through the ranks; reaching rank `i + 1` costs one
/// search with `i` marked items and happens with probability `1/(i + 1)`.
pub fn expected_single_run_queries(n: usize) -> f64 {
    (1..n)
        .map(|i| cade_et_al_f(n, i) / (i + 1) as f64)
        .sum()
}

/// Expected quantum queries for bounded-error maximum finding over `n` items
/// with failure probability at most `error`.
///
/// Monotonically non-decreasing in `n` and in `1/error`; zero for `n <= 1`.
pub fn expected_quantum_queries(n: usize, error: f64) -> Result<f64, MaxError> {
    let runs = repetitions_for(error)?;
    Ok(runs as f64 * RUN_BUDGET_FACTOR * expected_single_run_queries(n))
}
