//! Sample rate types for radio control.
//!
//! A radio derives its sample clock from a fixed reference oscillator, so the
//! rates it can actually produce are rarely the exact integer a caller asks
//! for. The rational form ([`RationalRate`]) expresses a rate as
//! `integer + num/den` Hz, which is how drivers report the rate the hardware
//! will really run at. The integer accessors are a convenience on top of
//! this.

use std::fmt;

/// Lowest sample rate the sample clock can be tuned to, in Hz.
pub const SAMPLE_RATE_MIN: u32 = 80_000;

/// Highest recommended sample rate, in Hz. Rates above this exceed the
/// sustainable USB throughput of the device.
pub const SAMPLE_RATE_REC_MAX: u32 = 40_000_000;

/// Inclusive range of sample rates a device accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRateRange {
    /// Minimum settable rate in Hz.
    pub min: u32,
    /// Maximum recommended rate in Hz.
    pub rec_max: u32,
}

impl SampleRateRange {
    /// Construct a range. `min` must not exceed `rec_max`.
    pub fn new(min: u32, rec_max: u32) -> Self {
        debug_assert!(min <= rec_max);
        Self { min, rec_max }
    }

    /// Whether an integer rate falls inside the range.
    pub fn contains(&self, rate_hz: u32) -> bool {
        rate_hz >= self.min && rate_hz <= self.rec_max
    }

    /// Whether a rational rate falls inside the range.
    ///
    /// The fractional part of a normalized rate is below 1 Hz, so only the
    /// integer part decides; a fraction on top of `rec_max` is rejected.
    pub fn contains_rational(&self, rate: &RationalRate) -> bool {
        let r = rate.normalized();
        if r.integer < u64::from(self.min) || r.integer > u64::from(self.rec_max) {
            return false;
        }
        !(r.integer == u64::from(self.rec_max) && r.num != 0)
    }
}

impl Default for SampleRateRange {
    fn default() -> Self {
        Self {
            min: SAMPLE_RATE_MIN,
            rec_max: SAMPLE_RATE_REC_MAX,
        }
    }
}

/// A sample rate expressed as `integer + num/den` Hz.
///
/// Normalized form has `num < den`, `den != 0`, and the fraction reduced by
/// the gcd. Two rates compare equal field-for-field, so compare normalized
/// values when the provenance of the fields differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RationalRate {
    /// Integer portion in Hz.
    pub integer: u64,
    /// Numerator of the fractional portion.
    pub num: u64,
    /// Denominator of the fractional portion.
    pub den: u64,
}

impl RationalRate {
    /// Construct a rational rate from raw fields.
    pub fn new(integer: u64, num: u64, den: u64) -> Self {
        Self { integer, num, den }
    }

    /// An exact integer rate (`num = 0`, `den = 1`).
    pub fn from_hz(rate_hz: u32) -> Self {
        Self {
            integer: u64::from(rate_hz),
            num: 0,
            den: 1,
        }
    }

    /// True if the rate has no fractional part.
    pub fn is_integer(&self) -> bool {
        let r = self.normalized();
        r.num == 0
    }

    /// Return the normalized form: fraction carried into the integer part,
    /// reduced by the gcd. A zero denominator is coerced to 1, discarding
    /// the (meaningless) fraction.
    pub fn normalized(&self) -> Self {
        if self.den == 0 {
            return Self {
                integer: self.integer,
                num: 0,
                den: 1,
            };
        }
        let integer = self.integer + self.num / self.den;
        let num = self.num % self.den;
        if num == 0 {
            return Self {
                integer,
                num: 0,
                den: 1,
            };
        }
        let g = gcd(num, self.den);
        Self {
            integer,
            num: num / g,
            den: self.den / g,
        }
    }

    /// Approximate value in Hz as a float. Exact for integer rates.
    pub fn approx_hz(&self) -> f64 {
        if self.den == 0 {
            return self.integer as f64;
        }
        self.integer as f64 + self.num as f64 / self.den as f64
    }
}

impl From<u32> for RationalRate {
    fn from(rate_hz: u32) -> Self {
        Self::from_hz(rate_hz)
    }
}

impl fmt::Display for RationalRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.num == 0 {
            write!(f, "{} Hz", self.integer)
        } else {
            write!(f, "{} + {}/{} Hz", self.integer, self.num, self.den)
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_rate_is_already_normalized() {
        let rate = RationalRate::from_hz(1_000_000);
        assert_eq!(rate.normalized(), rate);
        assert!(rate.is_integer());
        assert_eq!(rate.approx_hz(), 1_000_000.0);
    }

    #[test]
    fn normalization_carries_fraction_into_integer() {
        let rate = RationalRate::new(1_000_000, 7, 2);
        let norm = rate.normalized();
        assert_eq!(norm, RationalRate::new(1_000_003, 1, 2));
    }

    #[test]
    fn normalization_reduces_by_gcd() {
        let rate = RationalRate::new(500, 4, 6);
        let norm = rate.normalized();
        assert_eq!(norm, RationalRate::new(500, 2, 3));
    }

    #[test]
    fn whole_fraction_collapses_to_integer() {
        let rate = RationalRate::new(100, 6, 3);
        let norm = rate.normalized();
        assert_eq!(norm, RationalRate::new(102, 0, 1));
        assert!(norm.is_integer());
    }

    #[test]
    fn zero_denominator_is_coerced() {
        let rate = RationalRate::new(200, 5, 0);
        let norm = rate.normalized();
        assert_eq!(norm, RationalRate::new(200, 0, 1));
        assert_eq!(rate.approx_hz(), 200.0);
    }

    #[test]
    fn approx_hz_includes_fraction() {
        let rate = RationalRate::new(1000, 1, 2);
        assert_eq!(rate.approx_hz(), 1000.5);
    }

    #[test]
    fn display_formats() {
        assert_eq!(RationalRate::from_hz(48_000).to_string(), "48000 Hz");
        assert_eq!(
            RationalRate::new(48_000, 1, 3).to_string(),
            "48000 + 1/3 Hz"
        );
    }

    #[test]
    fn range_contains_integer() {
        let range = SampleRateRange::default();
        assert!(range.contains(SAMPLE_RATE_MIN));
        assert!(range.contains(SAMPLE_RATE_REC_MAX));
        assert!(!range.contains(SAMPLE_RATE_MIN - 1));
        assert!(!range.contains(SAMPLE_RATE_REC_MAX + 1));
    }

    #[test]
    fn range_rejects_fraction_above_rec_max() {
        let range = SampleRateRange::default();
        let at_max = RationalRate::from_hz(SAMPLE_RATE_REC_MAX);
        assert!(range.contains_rational(&at_max));

        let above = RationalRate::new(u64::from(SAMPLE_RATE_REC_MAX), 1, 2);
        assert!(!range.contains_rational(&above));
    }

    #[test]
    fn range_checks_the_normalized_integer() {
        let range = SampleRateRange::new(1_000_000, 2_000_000);
        // 999_999 + 3/2 normalizes to 1_000_000 + 1/2, which is in range.
        let rate = RationalRate::new(999_999, 3, 2);
        assert!(range.contains_rational(&rate));
    }
}
