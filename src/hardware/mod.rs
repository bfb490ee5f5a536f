//! Hardware capability traits and backends.
//!
//! Real transports (USB, FPGA command path) live in the device driver and
//! are out of scope here; this module defines the control surface the
//! validation harness exercises and a mock backend implementing it.

pub mod capabilities;
pub mod mock;

pub use capabilities::{Direction, SampleRateControl};
pub use mock::MockRadio;
