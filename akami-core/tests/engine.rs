#![expect(clippy::expect_used, reason = "tests require contextual panics")]
//! Integration tests covering the distance-matrix engine end to end.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use akami_core::{
    AkamiBuilder, AkamiError, AkamiErrorCode, CallbackError, MetricParams, MetricSpec,
    metric_names,
};
use akami_test_support::{fixtures, tracing::init_tracing};
use rstest::rstest;

fn engine() -> akami_core::Akami {
    init_tracing();
    AkamiBuilder::new().build().expect("builder must succeed")
}

#[test]
fn symmetric_levenshtein_matches_the_worked_example() {
    let matrix = engine()
        .symmetric(&["cat", "cot", "dog"], &MetricSpec::new("levenshtein"))
        .expect("computation must succeed");
    assert_eq!(matrix.shape(), (3, 3));
    assert_eq!(matrix.row(0), Some([0.0, 1.0, 3.0].as_slice()));
    assert_eq!(matrix.row(1), Some([1.0, 0.0, 3.0].as_slice()));
    assert_eq!(matrix.row(2), Some([3.0, 3.0, 0.0].as_slice()));
}

#[test]
fn cross_levenshtein_matches_the_worked_example() {
    let matrix = engine()
        .cross(&["ab"], &["ab", "ba"], &MetricSpec::new("levenshtein"))
        .expect("computation must succeed");
    assert_eq!(matrix.shape(), (1, 2));
    assert_eq!(matrix.as_slice(), &[0.0, 2.0]);
}

#[rstest]
#[case("levenshtein")]
#[case("osa")]
#[case("damerau_levenshtein")]
#[case("hamming")]
#[case("jaro")]
#[case("jaro_winkler")]
fn symmetric_matrices_have_zero_diagonal_and_mirror(#[case] name: &str) {
    let words = fixtures::equal_length_words();
    let matrix = engine()
        .symmetric(&words, &MetricSpec::new(name))
        .expect("computation must succeed");
    for i in 0..words.len() {
        assert_eq!(matrix.get(i, i), Some(0.0), "{name} diagonal at {i}");
        for j in 0..words.len() {
            assert_eq!(matrix.get(i, j), matrix.get(j, i), "{name} mirror at ({i}, {j})");
        }
    }
}

#[test]
fn every_registered_metric_is_reachable_through_the_engine() {
    let words = fixtures::equal_length_words();
    for name in metric_names() {
        engine()
            .symmetric(&words, &MetricSpec::new(*name))
            .expect("registered metric must compute");
    }
}

#[test]
fn unknown_metric_fails_without_a_matrix() {
    let err = engine()
        .symmetric(&["a", "b"], &MetricSpec::new("euclidean"))
        .expect_err("unknown metric must fail");
    assert_eq!(err.code(), AkamiErrorCode::UnknownMetric);
}

#[test]
fn invalid_parameters_fail_before_evaluation() {
    let spec = MetricSpec::with_params(
        "levenshtein",
        MetricParams::new().with_number("delete", f64::NAN),
    );
    let err = engine()
        .symmetric(&["a", "b"], &spec)
        .expect_err("NaN cost must fail");
    assert_eq!(err.code(), AkamiErrorCode::InvalidParameter);
}

#[test]
fn weighted_levenshtein_flows_through_the_registry() {
    let spec = MetricSpec::with_params(
        "levenshtein",
        MetricParams::new().with_number("substitute", 3.0),
    );
    let matrix = engine()
        .cross(&["a"], &["b"], &spec)
        .expect("computation must succeed");
    // Substitution at cost 3 loses to delete-then-insert at cost 2.
    assert_eq!(matrix.as_slice(), &[2.0]);
}

#[test]
fn symmetric_callback_runs_once_per_unordered_pair() {
    let calls = Arc::new(AtomicUsize::new(0));
    let recorder = Arc::clone(&calls);
    let words = fixtures::mixed_length_words();
    let matrix = engine()
        .symmetric_with(&words, |left: &String, right: &String| {
            recorder.fetch_add(1, Ordering::Relaxed);
            Ok(left.chars().count().abs_diff(right.chars().count()) as f64)
        })
        .expect("callback run must succeed");

    let n = words.len();
    assert_eq!(calls.load(Ordering::Relaxed), n * (n - 1) / 2);
    assert_eq!(matrix.get(0, 4), Some(4.0));
    assert_eq!(matrix.get(4, 0), Some(4.0));
}

#[test]
fn cross_callback_runs_once_per_ordered_pair() {
    let calls = Arc::new(AtomicUsize::new(0));
    let recorder = Arc::clone(&calls);
    let left = ["a", "bb", "ccc"];
    let right = ["dddd", "ee"];
    engine()
        .cross_with(&left, &right, |_, _| {
            recorder.fetch_add(1, Ordering::Relaxed);
            Ok(0.0)
        })
        .expect("callback run must succeed");
    assert_eq!(calls.load(Ordering::Relaxed), left.len() * right.len());
}

#[test]
fn failing_callbacks_abort_the_whole_computation() {
    let result = engine().symmetric_with(&["a", "b", "c"], |_: &&str, _: &&str| {
        Err(CallbackError::from("host raised"))
    });
    let err = result.expect_err("failure must propagate");
    assert_eq!(err.code(), AkamiErrorCode::CallbackFailure);
    let source = std::error::Error::source(&err).expect("payload must be preserved");
    assert_eq!(source.to_string(), "host raised");
}

#[test]
fn non_finite_callback_results_are_rejected() {
    let err = engine()
        .cross_with(&["a"], &["b"], |_, _| Ok(f64::INFINITY))
        .expect_err("infinite distance must fail");
    assert!(matches!(
        err,
        AkamiError::NonFiniteCallback { row: 0, col: 0, .. }
    ));
}

#[test]
fn identical_inputs_yield_bit_identical_matrices() {
    let words = fixtures::mixed_length_words();
    let spec = MetricSpec::new("levenshtein");
    let first = engine()
        .symmetric(&words, &spec)
        .expect("first run must succeed");
    let second = engine()
        .symmetric(&words, &spec)
        .expect("second run must succeed");
    assert_eq!(first.as_slice(), second.as_slice());
}

#[cfg(feature = "parallel")]
mod parallel {
    use super::*;
    use akami_core::ExecutionStrategy;

    fn engine_with(strategy: ExecutionStrategy) -> akami_core::Akami {
        init_tracing();
        AkamiBuilder::new()
            .with_execution_strategy(strategy)
            .build()
            .expect("builder must succeed")
    }

    #[test]
    fn parallel_output_matches_sequential_output() {
        let words = fixtures::mixed_length_words();
        let spec = MetricSpec::new("damerau_levenshtein");
        let sequential = engine_with(ExecutionStrategy::Sequential)
            .symmetric(&words, &spec)
            .expect("sequential run must succeed");
        let parallel = engine_with(ExecutionStrategy::Parallel)
            .symmetric(&words, &spec)
            .expect("parallel run must succeed");
        assert_eq!(sequential.as_slice(), parallel.as_slice());
    }

    #[test]
    fn parallel_cross_matches_sequential_cross() {
        let left = fixtures::mixed_length_words();
        let right = fixtures::equal_length_words();
        let spec = MetricSpec::new("levenshtein");
        let sequential = engine_with(ExecutionStrategy::Sequential)
            .cross(&left, &right, &spec)
            .expect("sequential run must succeed");
        let parallel = engine_with(ExecutionStrategy::Parallel)
            .cross(&left, &right, &spec)
            .expect("parallel run must succeed");
        assert_eq!(sequential.as_slice(), parallel.as_slice());
    }

    #[test]
    fn dedicated_worker_pools_change_nothing_observable() {
        let words = fixtures::equal_length_words();
        let spec = MetricSpec::new("hamming");
        let pooled = AkamiBuilder::new()
            .with_threads(2)
            .build()
            .expect("builder must succeed")
            .symmetric(&words, &spec)
            .expect("pooled run must succeed");
        let default = engine()
            .symmetric(&words, &spec)
            .expect("default run must succeed");
        assert_eq!(pooled.as_slice(), default.as_slice());
    }

    #[test]
    fn parallel_metric_failures_still_abort() {
        let err = engine_with(ExecutionStrategy::Parallel)
            .symmetric(&["aa", "a"], &MetricSpec::new("hamming"))
            .expect_err("length mismatch must abort");
        assert_eq!(err.code(), AkamiErrorCode::MetricFailure);
    }
}
