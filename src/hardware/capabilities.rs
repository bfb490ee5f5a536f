//! Atomic hardware capabilities.
//!
//! Radio backends implement fine-grained capability traits instead of one
//! monolithic device trait. This crate exercises a single capability, sample
//! clock configuration, so only [`SampleRateControl`] is defined here; a
//! full driver would add siblings (frequency tuning, gain, streaming).
//!
//! Each capability trait:
//! - Is async (uses `#[async_trait]`)
//! - Is thread-safe (requires `Send + Sync`)
//! - Uses `anyhow::Result` for errors
//! - Focuses on ONE thing

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

use crate::rate::{RationalRate, SampleRateRange};

/// Direction of a radio data path.
///
/// Each direction owns an independent sample clock configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Receive path (ADC).
    Rx,
    /// Transmit path (DAC).
    Tx,
}

impl Direction {
    /// Both directions, in the order the validation suite visits them.
    pub const ALL: [Direction; 2] = [Direction::Rx, Direction::Tx];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Rx => write!(f, "RX"),
            Direction::Tx => write!(f, "TX"),
        }
    }
}

/// Capability: Sample Clock Configuration
///
/// Devices whose per-direction sample rate can be set and read back, in
/// integer or rational form.
///
/// # Contract
/// - Setters return the rate the hardware will *actually* run at, which may
///   differ from the request (the clock is synthesized from a fixed
///   reference oscillator).
/// - A getter after a successful set returns the same value the setter
///   reported, in the corresponding form.
/// - Rational values handed back by the device are normalized (`num < den`,
///   `den != 0`, gcd-reduced).
/// - Requests outside [`sample_rate_range`](Self::sample_rate_range) are
///   rejected with an error and leave the configured rate unchanged.
#[async_trait]
pub trait SampleRateControl: Send + Sync {
    /// Set the sample rate in Hz and return the rate actually achieved.
    async fn set_sample_rate(&self, direction: Direction, rate_hz: u32) -> Result<u32>;

    /// Read back the current sample rate in Hz (rounded if the configured
    /// rate has a fractional part).
    async fn sample_rate(&self, direction: Direction) -> Result<u32>;

    /// Set a rational sample rate and return the normalized rate actually
    /// achieved.
    async fn set_rational_sample_rate(
        &self,
        direction: Direction,
        rate: RationalRate,
    ) -> Result<RationalRate>;

    /// Read back the current sample rate in rational form.
    async fn rational_sample_rate(&self, direction: Direction) -> Result<RationalRate>;

    /// The range of rates this device accepts.
    fn sample_rate_range(&self) -> SampleRateRange {
        SampleRateRange::default()
    }
}
