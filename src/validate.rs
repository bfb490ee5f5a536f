//! Sample-rate validation suite.
//!
//! Hardware-in-the-loop checks for the sample clock control path: every case
//! sets a rate, reads it back, and compares what the device reported against
//! what it returns. Three passes run per direction:
//!
//! 1. A sweep across the full rate range in fixed steps
//! 2. Random integer rates
//! 3. Random rational rates
//!
//! A failing case is logged and counted; the suite never aborts early, so a
//! single run reports every misbehaving rate rather than the first one.
//! Random cases are drawn from a seeded RNG so a failing run can be
//! reproduced exactly.

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::error::RadioError;
use crate::hardware::capabilities::{Direction, SampleRateControl};
use crate::rate::RationalRate;

/// Tunable parameters for a suite run.
#[derive(Debug, Clone)]
pub struct SuiteParams {
    /// Step between rates in the sweep pass, in Hz.
    pub sweep_step: u32,
    /// Number of cases in each random pass.
    pub iterations: u32,
    /// RNG seed for the random passes. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Emit a progress event every this many passing cases.
    pub progress_interval: u32,
}

impl Default for SuiteParams {
    fn default() -> Self {
        Self {
            sweep_step: 10_000,
            iterations: 2_500,
            seed: None,
            progress_interval: 50,
        }
    }
}

/// Outcome of a suite run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteReport {
    /// Total failed cases across all passes and directions.
    pub failures: u32,
}

impl SuiteReport {
    /// True when no case failed.
    pub fn passed(&self) -> bool {
        self.failures == 0
    }
}

/// Set an integer sample rate and verify the readback matches what the
/// device reported as applied.
pub async fn set_and_check<D>(dev: &D, direction: Direction, rate_hz: u32) -> Result<()>
where
    D: SampleRateControl + ?Sized,
{
    let actual = dev
        .set_sample_rate(direction, rate_hz)
        .await
        .context("failed to set sample rate")?;

    let readback = dev
        .sample_rate(direction)
        .await
        .context("failed to read back sample rate")?;

    if readback != actual {
        return Err(RadioError::ReadbackMismatch {
            actual: format!("{actual} Hz"),
            readback: format!("{readback} Hz"),
        }
        .into());
    }

    Ok(())
}

/// Set a rational sample rate and verify the readback matches the applied
/// rate field-for-field.
pub async fn set_and_check_rational<D>(
    dev: &D,
    direction: Direction,
    rate: RationalRate,
) -> Result<()>
where
    D: SampleRateControl + ?Sized,
{
    let actual = dev
        .set_rational_sample_rate(direction, rate)
        .await
        .context("failed to set rational sample rate")?;

    let readback = dev
        .rational_sample_rate(direction)
        .await
        .context("failed to read back rational sample rate")?;

    if actual != readback {
        return Err(RadioError::ReadbackMismatch {
            actual: actual.to_string(),
            readback: readback.to_string(),
        }
        .into());
    }

    Ok(())
}

/// Runs the three validation passes and accumulates failures.
pub struct SampleRateSuite {
    params: SuiteParams,
    rng: ChaCha8Rng,
}

impl SampleRateSuite {
    /// Build a suite from parameters. The RNG is seeded once here, so the
    /// sequence of random cases is fixed for the whole run.
    pub fn new(params: SuiteParams) -> Self {
        let rng = match params.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { params, rng }
    }

    /// Run all passes for both directions and return the combined report.
    pub async fn run<D>(&mut self, dev: &D) -> SuiteReport
    where
        D: SampleRateControl + ?Sized,
    {
        let mut failures = 0;

        for direction in Direction::ALL {
            info!(%direction, "sweeping sample rates");
            failures += self.sweep_sample_rates(dev, direction).await;

            info!(%direction, "applying random sample rates");
            failures += self.random_sample_rates(dev, direction).await;

            info!(%direction, "applying random rational sample rates");
            failures += self.random_rational_sample_rates(dev, direction).await;
        }

        SuiteReport { failures }
    }

    /// Sweep from the minimum to the recommended maximum rate in fixed
    /// steps. Returns the number of failed cases.
    pub async fn sweep_sample_rates<D>(&mut self, dev: &D, direction: Direction) -> u32
    where
        D: SampleRateControl + ?Sized,
    {
        let range = dev.sample_rate_range();
        let step = self.params.sweep_step.max(1) as usize;
        let mut failures = 0;

        for (n, rate_hz) in (range.min..=range.rec_max).step_by(step).enumerate() {
            match set_and_check(dev, direction, rate_hz).await {
                Ok(()) => {
                    if n as u32 % self.progress_interval() == 0 {
                        info!(%direction, rate_hz, "sample rate applied");
                    }
                }
                Err(err) => {
                    warn!(%direction, rate_hz, "sweep case failed: {err:#}");
                    failures += 1;
                }
            }
        }

        failures
    }

    /// Apply random integer rates drawn uniformly from the device range.
    /// Returns the number of failed cases.
    pub async fn random_sample_rates<D>(&mut self, dev: &D, direction: Direction) -> u32
    where
        D: SampleRateControl + ?Sized,
    {
        let range = dev.sample_rate_range();
        let mut failures = 0;

        for n in 0..self.params.iterations {
            let rate_hz = self.rng.gen_range(range.min..=range.rec_max);

            match set_and_check(dev, direction, rate_hz).await {
                Ok(()) => {
                    if n % self.progress_interval() == 0 {
                        info!(%direction, rate_hz, "sample rate applied");
                    }
                }
                Err(err) => {
                    warn!(%direction, rate_hz, "random case failed: {err:#}");
                    failures += 1;
                }
            }
        }

        failures
    }

    /// Apply random rational rates. The fractional part stays below 1 Hz
    /// (`num < den`), and at exactly the recommended maximum it is zeroed so
    /// no case lands above the range. Returns the number of failed cases.
    pub async fn random_rational_sample_rates<D>(&mut self, dev: &D, direction: Direction) -> u32
    where
        D: SampleRateControl + ?Sized,
    {
        let range = dev.sample_rate_range();
        let mut failures = 0;

        for n in 0..self.params.iterations {
            let integer = u64::from(self.rng.gen_range(range.min..=range.rec_max));
            let (num, den) = if integer == u64::from(range.rec_max) {
                (0, 1)
            } else {
                let den = self.rng.gen_range(1..=u64::from(u32::MAX));
                (self.rng.gen_range(0..den), den)
            };
            let rate = RationalRate::new(integer, num, den);

            match set_and_check_rational(dev, direction, rate).await {
                Ok(()) => {
                    if n % self.progress_interval() == 0 {
                        info!(%direction, rate = %rate, "rational sample rate applied");
                    }
                }
                Err(err) => {
                    warn!(%direction, rate = %rate, "rational case failed: {err:#}");
                    failures += 1;
                }
            }
        }

        failures
    }

    fn progress_interval(&self) -> u32 {
        self.params.progress_interval.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::mock::MockRadio;
    use crate::rate::SampleRateRange;
    use anyhow::Result;
    use async_trait::async_trait;
    use tokio::sync::RwLock;

    // Backend that applies rates correctly but reads back a skewed value,
    // to exercise mismatch detection.
    struct SkewedRadio {
        rate: RwLock<RationalRate>,
    }

    impl SkewedRadio {
        fn new() -> Self {
            Self {
                rate: RwLock::new(RationalRate::from_hz(0)),
            }
        }
    }

    #[async_trait]
    impl SampleRateControl for SkewedRadio {
        async fn set_sample_rate(&self, _d: Direction, rate_hz: u32) -> Result<u32> {
            *self.rate.write().await = RationalRate::from_hz(rate_hz);
            Ok(rate_hz)
        }

        async fn sample_rate(&self, _d: Direction) -> Result<u32> {
            let rate = *self.rate.read().await;
            Ok(rate.approx_hz().round() as u32 + 1)
        }

        async fn set_rational_sample_rate(
            &self,
            _d: Direction,
            rate: RationalRate,
        ) -> Result<RationalRate> {
            let norm = rate.normalized();
            *self.rate.write().await = norm;
            Ok(norm)
        }

        async fn rational_sample_rate(&self, _d: Direction) -> Result<RationalRate> {
            let rate = *self.rate.read().await;
            Ok(RationalRate::new(rate.integer + 1, rate.num, rate.den))
        }
    }

    #[tokio::test]
    async fn set_and_check_passes_on_faithful_device() {
        let radio = MockRadio::new();
        set_and_check(&radio, Direction::Rx, 1_000_000)
            .await
            .unwrap();
        set_and_check_rational(&radio, Direction::Rx, RationalRate::new(1_000_000, 1, 3))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn set_and_check_detects_integer_mismatch() {
        let radio = SkewedRadio::new();
        let err = set_and_check(&radio, Direction::Rx, 1_000_000)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RadioError>(),
            Some(RadioError::ReadbackMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn set_and_check_detects_rational_mismatch() {
        let radio = SkewedRadio::new();
        let err =
            set_and_check_rational(&radio, Direction::Rx, RationalRate::new(1_000_000, 1, 2))
                .await
                .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RadioError>(),
            Some(RadioError::ReadbackMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn sweep_runs_at_least_the_minimum_rate() {
        // Step far larger than the range: the sweep still visits `min`.
        let radio = MockRadio::with_range(SampleRateRange::new(1_000_000, 1_100_000));
        let mut suite = SampleRateSuite::new(SuiteParams {
            sweep_step: 10_000_000,
            iterations: 0,
            seed: Some(1),
            progress_interval: 50,
        });

        let failures = suite.sweep_sample_rates(&radio, Direction::Rx).await;
        assert_eq!(failures, 0);
        assert_eq!(radio.sample_rate(Direction::Rx).await.unwrap(), 1_000_000);
    }

    #[tokio::test]
    async fn mismatches_are_counted_not_fatal() {
        let radio = SkewedRadio::new();
        let mut suite = SampleRateSuite::new(SuiteParams {
            sweep_step: 10_000_000,
            iterations: 10,
            seed: Some(2),
            progress_interval: 50,
        });

        // Every case mismatches; the pass still completes and counts all.
        let failures = suite.random_sample_rates(&radio, Direction::Tx).await;
        assert_eq!(failures, 10);
    }

    #[tokio::test]
    async fn random_rational_cases_stay_in_range() {
        let radio = MockRadio::with_range(SampleRateRange::new(100_000, 200_000));
        let mut suite = SampleRateSuite::new(SuiteParams {
            sweep_step: 10_000,
            iterations: 500,
            seed: Some(3),
            progress_interval: 100,
        });

        // The generator never produces out-of-range rates, so a faithful
        // device fails no case.
        let failures = suite
            .random_rational_sample_rates(&radio, Direction::Rx)
            .await;
        assert_eq!(failures, 0);
    }
}
