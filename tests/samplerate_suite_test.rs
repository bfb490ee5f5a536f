//! Integration tests for the sample-rate validation suite.
//!
//! These run the full suite against the mock backend: every pass over both
//! directions, with and without injected failures. Iteration counts are kept
//! small; the production defaults (2500 random cases per pass) only matter
//! against real hardware.

use rust_sdr::hardware::capabilities::{Direction, SampleRateControl};
use rust_sdr::hardware::MockRadio;
use rust_sdr::rate::SampleRateRange;
use rust_sdr::validate::{SampleRateSuite, SuiteParams};

fn small_params(seed: u64) -> SuiteParams {
    SuiteParams {
        sweep_step: 250_000,
        iterations: 25,
        seed: Some(seed),
        progress_interval: 50,
    }
}

fn small_range() -> SampleRateRange {
    SampleRateRange::new(1_000_000, 2_000_000)
}

#[tokio::test]
async fn clean_device_passes_full_suite() {
    let radio = MockRadio::with_range(small_range());
    let mut suite = SampleRateSuite::new(small_params(42));

    let report = suite.run(&radio).await;
    assert!(report.passed(), "failures: {}", report.failures);
}

#[tokio::test]
async fn full_suite_leaves_both_directions_configured() {
    let radio = MockRadio::with_range(small_range());
    let mut suite = SampleRateSuite::new(small_params(7));

    suite.run(&radio).await;

    // Whatever the last case was, both directions hold an in-range rate.
    let range = small_range();
    for direction in Direction::ALL {
        let rate = radio.rational_sample_rate(direction).await.unwrap();
        assert!(
            range.contains_rational(&rate),
            "{direction} left at {rate}"
        );
    }
}

#[tokio::test]
async fn every_command_failure_is_counted() {
    // Failure rate 1.0 fails each case at the set call, so the failure
    // count equals the case count: sweep (5 rates at this step) plus the
    // two random passes, per direction.
    let radio = MockRadio::with_range(small_range()).with_failure_rate(1.0, Some(0));
    let params = small_params(42);
    let sweep_cases = 5;
    let expected = 2 * (sweep_cases + params.iterations + params.iterations);

    let mut suite = SampleRateSuite::new(params);
    let report = suite.run(&radio).await;

    assert_eq!(report.failures, expected);
}

#[tokio::test]
async fn partial_failures_do_not_abort_the_run() {
    let radio = MockRadio::with_range(small_range()).with_failure_rate(0.3, Some(9));
    let mut suite = SampleRateSuite::new(small_params(42));

    let report = suite.run(&radio).await;

    // Some cases failed, but far from all: the suite kept going.
    let total = 2 * (5 + 25 + 25);
    assert!(report.failures > 0);
    assert!(report.failures < total, "failures: {}", report.failures);
}

#[tokio::test]
async fn seeded_runs_are_reproducible() {
    let run = |seed| async move {
        let radio = MockRadio::with_range(small_range()).with_failure_rate(0.3, Some(17));
        let mut suite = SampleRateSuite::new(small_params(seed));
        suite.run(&radio).await
    };

    let first = run(42).await;
    let second = run(42).await;
    assert_eq!(first, second);
}
