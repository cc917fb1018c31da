//! Use cases and input generation for max-finding query benchmarks.

pub mod config;

use serde::Serialize;
use std::fmt::Debug;

use oracle_core::{Oracle, QueryContext, QueryStats};
use quantum_max::{max, MaxError};

pub use config::{BenchConfig, ConfigError};

/// Oracle name used by [`max_value_of_function`].
pub const MAX_KEY: &str = "max_key";

/// `points` evenly spaced values over `[lower, upper]`, both ends included.
pub fn linspace(lower: f64, upper: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![lower],
        _ => {
            let step = (upper - lower) / (points - 1) as f64;
            let mut grid: Vec<f64> = (0..points).map(|i| lower + step * i as f64).collect();
            grid[points - 1] = upper;
            grid
        }
    }
}

/// The reference workload: a downward parabola peaking at `x = 2`.
pub fn reference_parabola(x: &f64) -> f64 {
    4.0 * x - x * x
}

/// Maximize `f` over `points` inside a fresh tracked scope and return the
/// maximizing point with the stats recorded under [`MAX_KEY`].
pub fn max_value_of_function<T, F>(
    points: &[T],
    f: F,
    error: f64,
    context: &QueryContext,
) -> Result<(T, QueryStats), MaxError>
where
    T: Debug + Clone,
    F: Fn(&T) -> f64,
{
    let oracle = Oracle::named(MAX_KEY, f, Some(context.clone()));
    let (result, tracker) = context.track(|_| max(points, &oracle, error).cloned());
    Ok((result?, tracker.get_stats(MAX_KEY)))
}

/// Run the reference workload once on a grid of `config.points` values.
pub fn reference_run(config: &BenchConfig) -> Result<(f64, QueryStats), MaxError> {
    let grid = linspace(config.lower, config.upper, config.points);
    let context = QueryContext::new();
    let (argmax, stats) = max_value_of_function(&grid, reference_parabola, config.error, &context)?;
    log::info!("reference run over {} points: argmax {}, {}", config.points, argmax, stats);
    Ok((argmax, stats))
}

/// One row of the scaling report.
#[derive(Debug, Clone, Serialize)]
pub struct ScalingRow {
    pub size: usize,
    pub argmax: f64,
    pub stats: QueryStats,
    /// Classical queries divided by expected quantum queries.
    pub speedup: f64,
}

/// Run the reference workload for every size in `config.sizes`.
pub fn scaling_report(config: &BenchConfig) -> Result<Vec<ScalingRow>, MaxError> {
    let context = QueryContext::new();
    config
        .sizes
        .iter()
        .map(|&size| -> Result<ScalingRow, MaxError> {
            let grid = linspace(config.lower, config.upper, size);
            let (argmax, stats) =
                max_value_of_function(&grid, reference_parabola, config.error, &context)?;
            let speedup = if stats.quantum_expected_quantum_queries > 0.0 {
                stats.classical_actual_queries as f64 / stats.quantum_expected_quantum_queries
            } else {
                f64::INFINITY
            };
            log::info!("size {}: {}", size, stats);
            Ok(ScalingRow {
                size,
                argmax,
                stats,
                speedup,
            })
        })
        .collect()
}
