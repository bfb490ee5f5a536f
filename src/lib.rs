//! # rust_sdr
//!
//! Control-path validation harness for software-defined radio hardware. The
//! crate defines the sample clock configuration surface a radio driver
//! exposes and a hardware-in-the-loop suite that exercises it: set a rate,
//! read it back, compare, count failures.
//!
//! ## Crate Structure
//!
//! - **`config`**: Figment-based configuration (TOML file + `RUST_SDR_` env
//!   overrides) for harness and backend parameters.
//! - **`error`**: The `RadioError` enum for centralized error handling.
//! - **`hardware`**: The `SampleRateControl` capability trait and the
//!   `MockRadio` backend used when no physical device is attached.
//! - **`rate`**: `RationalRate` and the device sample-rate range.
//! - **`trace`**: tracing-subscriber initialization.
//! - **`validate`**: The sweep/random validation passes and the
//!   `SampleRateSuite` runner.

pub mod config;
pub mod error;
pub mod hardware;
pub mod rate;
pub mod trace;
pub mod validate;
