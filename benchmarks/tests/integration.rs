//! Integration tests driving oracles, tracked scopes and max finding together.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use benchmarks::{linspace, max_value_of_function, reference_parabola, MAX_KEY};
use oracle_core::{wrap, Oracle, OracleKey, QueryContext, QueryStats, TrackerError};
use quantum_max::{cost, max, max_by_fn, MaxError};

/// Reference statistics for a max run over `n` items.
fn expected_stats(n: usize, error: f64) -> QueryStats {
    QueryStats {
        quantum_expected_quantum_queries: cost::expected_quantum_queries(n, error).unwrap(),
        ..QueryStats::classical(n as u64)
    }
}

// ---------------------------------------------------------------------------
// Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_reference_usage() {
    let ctx = QueryContext::new();
    let grid = linspace(-10.0, 10.0, 10_000);

    let scope = ctx.track_queries();
    let key = Oracle::named("max_key", reference_parabola, Some(ctx.clone()));
    let result = *max(&grid, &key, 1e-5).unwrap();
    let tracker = scope.tracker();
    drop(scope);

    let stats = tracker.get_stats("max_key");
    assert!((result - 2.0).abs() <= 2.0 * 1e-3, "result = {}", result);
    assert_eq!(stats.classical_actual_queries, 10_000);
    assert_eq!(stats.classical_expected_queries, 10_000.0);
    assert_eq!(stats.quantum_expected_classical_queries, 0.0);
    assert!((stats.quantum_expected_quantum_queries - 15610.0172).abs() < 1e-4);
    assert!(stats.approx_eq(&expected_stats(10_000, 1e-5), 1e-12));
}

#[test]
fn test_single_element_any_error() {
    for error in [1e-12, 1e-3, 0.5, 0.999] {
        let ctx = QueryContext::new();
        let (result, stats) = max_value_of_function(&[1], |x: &i32| *x as f64, error, &ctx).unwrap();
        assert_eq!(result, 1);
        assert_eq!(stats.classical_actual_queries, 1);
        assert_eq!(stats.quantum_expected_quantum_queries, cost::expected_quantum_queries(1, error).unwrap());
    }
}

// ---------------------------------------------------------------------------
// Scope semantics
// ---------------------------------------------------------------------------

#[test]
fn test_nested_scopes_isolate_counts() {
    let ctx = QueryContext::new();
    let key = Oracle::named("k", |x: &f64| -x.abs(), Some(ctx.clone()));
    let small = linspace(-1.0, 1.0, 11);
    let large = linspace(-1.0, 1.0, 101);

    let outer = ctx.track_queries();
    max(&small, &key, 0.01).unwrap();
    let before = outer.get_stats("k");

    let inner = ctx.track_queries();
    max(&large, &key, 0.01).unwrap();
    key.query(&0.5);
    let inner_stats = inner.get_stats("k");
    drop(inner);

    assert_eq!(outer.get_stats("k"), before);
    assert_eq!(inner_stats.classical_actual_queries, 102);

    // accounting resumes at the outer scope
    key.query(&0.5);
    assert_eq!(outer.get_stats("k").classical_actual_queries, 12);
}

#[test]
fn test_fresh_scopes_are_reproducible() {
    let ctx = QueryContext::new();
    let grid = linspace(0.0, 3.0, 2_500);
    let runs: Vec<(f64, QueryStats)> = (0..3)
        .map(|_| max_value_of_function(&grid, |x: &f64| x.sin(), 1e-6, &ctx).unwrap())
        .collect();
    assert!(runs.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(runs[0].1, expected_stats(2_500, 1e-6));
}

#[test]
fn test_lookup_policy_is_consistent() {
    let ctx = QueryContext::new();
    let f = wrap(|x: &u8| *x as f64, None, Some(ctx.clone()));
    let (_, tracker) = ctx.track(|_| max(&[1u8, 2, 3], &f, 0.1).map(|x| *x));

    assert_eq!(tracker.try_get_stats(&f).unwrap(), tracker.get_stats(&f));
    assert!(tracker.get_stats(MAX_KEY).is_zero());
    assert_eq!(
        tracker.try_get_stats(MAX_KEY),
        Err(TrackerError::UnknownOracle(OracleKey::from(MAX_KEY)))
    );
}

// ---------------------------------------------------------------------------
// Failure handling
// ---------------------------------------------------------------------------

#[test]
fn test_failures_leave_no_trace() {
    let ctx = QueryContext::new();
    let key = Oracle::named("k", |x: &f64| x.ln(), Some(ctx.clone()));

    let (results, tracker) = ctx.track(|_| {
        vec![
            max(&[] as &[f64], &key, 0.1),
            max(&[1.0, 2.0], &key, 0.0),
            max(&[1.0, 2.0], &key, 1.0),
            max(&[1.0, 0.0, 2.0], &key, 0.1),
        ]
    });

    assert_eq!(results[0], Err(MaxError::EmptyInput));
    assert_eq!(results[1], Err(MaxError::InvalidFailureProbability(0.0)));
    assert_eq!(results[2], Err(MaxError::InvalidFailureProbability(1.0)));
    assert!(matches!(
        results[3],
        Err(MaxError::IncomparableValue { index: 1, .. })
    ));
    assert!(tracker.is_empty());
    assert!(!ctx.is_tracking());
}

// ---------------------------------------------------------------------------
// Randomized agreement with a plain scan
// ---------------------------------------------------------------------------

#[test]
fn test_random_sequences_match_naive_scan() {
    let mut rng = StdRng::seed_from_u64(12345);
    let ctx = QueryContext::new();

    for _ in 0..50 {
        let len = rng.gen_range(1..500);
        let values: Vec<i64> = (0..len).map(|_| rng.gen_range(-1_000..1_000)).collect();
        let error = rng.gen_range(1e-9..0.99);

        let scope = ctx.track_queries();
        let best = max_by_fn(&values, Some("value"), |x: &i64| *x as f64, error, Some(ctx.clone())).unwrap();
        let stats = scope.get_stats("value");
        drop(scope);

        let naive = values.iter().copied().max().unwrap();
        let first = values.iter().position(|&v| v == naive).unwrap();
        assert_eq!(*best, naive);
        assert!(std::ptr::eq(best, &values[first]));
        assert_eq!(stats, expected_stats(len, error));
    }
}

#[test]
fn test_snapshot_serializes_all_oracles() {
    let ctx = QueryContext::new();
    let grid = linspace(-2.0, 2.0, 40);
    let a = Oracle::named("a", |x: &f64| *x, Some(ctx.clone()));
    let b = Oracle::named("b", |x: &f64| -x, Some(ctx.clone()));

    let (_, tracker) = ctx.track(|_| {
        max(&grid, &a, 0.25).unwrap();
        max(&grid, &b, 0.25).unwrap();
    });

    let json = serde_json::to_value(tracker.snapshot()).unwrap();
    assert_eq!(json["a"]["classical_actual_queries"], 40);
    assert_eq!(json["b"]["classical_actual_queries"], 40);
    assert_eq!(json["a"], json["b"]);
}
