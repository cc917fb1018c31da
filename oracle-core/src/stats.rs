//! Per-oracle query statistics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Query counts accumulated for one oracle key inside one tracked scope.
///
/// `classical_actual_queries` is an exact count. The three expected fields are
/// estimates and may be non-integral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryStats {
    /// Queries actually executed during this run.
    pub classical_actual_queries: u64,
    /// Expected queries of the reference classical algorithm.
    pub classical_expected_queries: f64,
    /// Expected classical-oracle queries a hybrid quantum algorithm still makes.
    pub quantum_expected_classical_queries: f64,
    /// Expected quantum-oracle queries, derived analytically.
    pub quantum_expected_quantum_queries: f64,
}

impl QueryStats {
    /// Stats for `n` classical queries made by a deterministic algorithm,
    /// so the expected count equals the actual count.
    pub fn classical(n: u64) -> Self {
        QueryStats {
            classical_actual_queries: n,
            classical_expected_queries: n as f64,
            ..Self::default()
        }
    }

    /// True when nothing was ever recorded.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Compare with a relative tolerance on the real-valued fields.
    /// The exact count must match.
    pub fn approx_eq(&self, other: &QueryStats, rel_tol: f64) -> bool {
        fn close(a: f64, b: f64, rel_tol: f64) -> bool {
            let scale = a.abs().max(b.abs()).max(1.0);
            (a - b).abs() <= rel_tol * scale
        }
        self.classical_actual_queries == other.classical_actual_queries
            && close(self.classical_expected_queries, other.classical_expected_queries, rel_tol)
            && close(
                self.quantum_expected_classical_queries,
                other.quantum_expected_classical_queries,
                rel_tol,
            )
            && close(
                self.quantum_expected_quantum_queries,
                other.quantum_expected_quantum_queries,
                rel_tol,
            )
    }
}

impl Add for QueryStats {
    type Output = QueryStats;

    fn add(mut self, rhs: QueryStats) -> QueryStats {
        self += rhs;
        self
    }
}

impl AddAssign for QueryStats {
    fn add_assign(&mut self, rhs: QueryStats) {
        self.classical_actual_queries += rhs.classical_actual_queries;
        self.classical_expected_queries += rhs.classical_expected_queries;
        self.quantum_expected_classical_queries += rhs.quantum_expected_classical_queries;
        self.quantum_expected_quantum_queries += rhs.quantum_expected_quantum_queries;
    }
}

impl fmt::Display for QueryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "classical: {} actual / {:.4} expected, quantum: {:.4} classical + {:.4} quantum expected",
            self.classical_actual_queries,
            self.classical_expected_queries,
            self.quantum_expected_classical_queries,
            self.quantum_expected_quantum_queries
        )
    }
}
