//! Mock radio backend.
//!
//! Provides a simulated radio for exercising the validation harness without
//! physical hardware. The mock models only what the control path observes:
//! it validates requests against the device range, normalizes rational
//! rates the way the clock synthesizer would, and stores the result per
//! direction for readback.
//!
//! Error injection uses a seeded RNG so failure scenarios are reproducible
//! in tests.

use anyhow::Result;
use async_trait::async_trait;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::RadioError;
use crate::hardware::capabilities::{Direction, SampleRateControl};
use crate::rate::{RationalRate, SampleRateRange};

/// Seeded RNG wrapper for reproducible random behavior.
pub struct MockRng {
    inner: Mutex<ChaCha8Rng>,
}

impl MockRng {
    /// Create a new RNG. With `Some(seed)` the sequence is deterministic;
    /// with `None` it is seeded from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            inner: Mutex::new(rng),
        }
    }

    /// Decide whether an operation should fail, given a failure probability
    /// from 0.0 (never) to 1.0 (always).
    pub fn should_fail(&self, rate: f64) -> bool {
        if rate <= 0.0 {
            return false;
        }
        if rate >= 1.0 {
            return true;
        }
        let mut rng = self.inner.lock().unwrap();
        rng.gen::<f64>() < rate
    }
}

impl Default for MockRng {
    fn default() -> Self {
        Self::new(None)
    }
}

impl std::fmt::Debug for MockRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockRng")
            .field("inner", &"<Mutex<ChaCha8Rng>>")
            .finish()
    }
}

/// Simulated radio implementing [`SampleRateControl`].
///
/// The mock applies the same bookkeeping a real driver performs on the host
/// side: range validation, rational normalization, per-direction state. It
/// does not model the USB/FPGA transport.
///
/// # Example
///
/// ```rust,ignore
/// let radio = MockRadio::new();
/// let actual = radio.set_sample_rate(Direction::Rx, 2_000_000).await?;
/// assert_eq!(radio.sample_rate(Direction::Rx).await?, actual);
/// ```
pub struct MockRadio {
    rx: RwLock<RationalRate>,
    tx: RwLock<RationalRate>,
    range: SampleRateRange,
    failure_rate: f64,
    rng: MockRng,
}

impl MockRadio {
    /// Create a mock radio at the device default rate with no injected
    /// failures.
    pub fn new() -> Self {
        Self::with_range(SampleRateRange::default())
    }

    /// Create a mock radio with a custom rate range.
    pub fn with_range(range: SampleRateRange) -> Self {
        let initial = RationalRate::from_hz(range.min);
        Self {
            rx: RwLock::new(initial),
            tx: RwLock::new(initial),
            range,
            failure_rate: 0.0,
            rng: MockRng::new(None),
        }
    }

    /// Inject command failures at the given probability (0.0 to 1.0),
    /// drawn from a seeded RNG when `seed` is provided.
    pub fn with_failure_rate(mut self, failure_rate: f64, seed: Option<u64>) -> Self {
        self.failure_rate = failure_rate;
        self.rng = MockRng::new(seed);
        self
    }

    fn slot(&self, direction: Direction) -> &RwLock<RationalRate> {
        match direction {
            Direction::Rx => &self.rx,
            Direction::Tx => &self.tx,
        }
    }

    fn maybe_fail(&self, op: &str) -> Result<()> {
        if self.rng.should_fail(self.failure_rate) {
            return Err(RadioError::Command(format!("injected failure in {op}")).into());
        }
        Ok(())
    }
}

impl Default for MockRadio {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SampleRateControl for MockRadio {
    async fn set_sample_rate(&self, direction: Direction, rate_hz: u32) -> Result<u32> {
        self.maybe_fail("set_sample_rate")?;
        if !self.range.contains(rate_hz) {
            return Err(RadioError::RateOutOfRange {
                requested: u64::from(rate_hz),
                min: self.range.min,
                rec_max: self.range.rec_max,
            }
            .into());
        }

        *self.slot(direction).write().await = RationalRate::from_hz(rate_hz);
        debug!(%direction, rate_hz, "sample rate set");
        Ok(rate_hz)
    }

    async fn sample_rate(&self, direction: Direction) -> Result<u32> {
        self.maybe_fail("sample_rate")?;
        let rate = *self.slot(direction).read().await;
        Ok(rate.approx_hz().round() as u32)
    }

    async fn set_rational_sample_rate(
        &self,
        direction: Direction,
        rate: RationalRate,
    ) -> Result<RationalRate> {
        self.maybe_fail("set_rational_sample_rate")?;
        if rate.den == 0 {
            return Err(
                RadioError::InvalidRate(format!("zero denominator: {rate:?}")).into(),
            );
        }

        let norm = rate.normalized();
        if !self.range.contains_rational(&norm) {
            return Err(RadioError::RateOutOfRange {
                requested: norm.integer,
                min: self.range.min,
                rec_max: self.range.rec_max,
            }
            .into());
        }

        *self.slot(direction).write().await = norm;
        debug!(%direction, rate = %norm, "rational sample rate set");
        Ok(norm)
    }

    async fn rational_sample_rate(&self, direction: Direction) -> Result<RationalRate> {
        self.maybe_fail("rational_sample_rate")?;
        Ok(*self.slot(direction).read().await)
    }

    fn sample_rate_range(&self) -> SampleRateRange {
        self.range
    }
}
