//! Configuration loading.
//!
//! Strongly-typed configuration via Figment, merged from:
//! 1. `rust_sdr.toml` (or an explicit path)
//! 2. Environment variables prefixed with `RUST_SDR_`
//!
//! Every field has a default, so an absent file is not an error; the harness
//! runs out of the box against the mock backend.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{AppResult, RadioError};
use crate::validate::SuiteParams;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "rust_sdr.toml";

/// Environment variable prefix for overrides (e.g.
/// `RUST_SDR_HARNESS__ITERATIONS=100`).
pub const ENV_PREFIX: &str = "RUST_SDR_";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Validation harness parameters.
    #[serde(default)]
    pub harness: HarnessConfig,
    /// Mock backend parameters.
    #[serde(default)]
    pub mock: MockConfig,
}

/// Parameters of the validation harness.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Cases per random pass.
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Sweep step in Hz.
    #[serde(default = "default_sweep_step")]
    pub sweep_step: u32,
    /// RNG seed for reproducible runs. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Progress event interval, in passing cases.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u32,
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Parameters of the mock radio backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    /// Injected command failure probability, 0.0 to 1.0.
    #[serde(default)]
    pub failure_rate: f64,
}

fn default_iterations() -> u32 {
    2_500
}

fn default_sweep_step() -> u32 {
    10_000
}

fn default_progress_interval() -> u32 {
    50
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            sweep_step: default_sweep_step(),
            seed: None,
            progress_interval: default_progress_interval(),
            log_level: default_log_level(),
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self { failure_rate: 0.0 }
    }
}

impl Config {
    /// Load from the default file location and environment.
    pub fn load() -> AppResult<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Load from an explicit file path merged with environment overrides.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|err| RadioError::Config(err.to_string()))
    }

    /// Validate semantic constraints that pass parsing.
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=1.0).contains(&self.mock.failure_rate) {
            return Err(RadioError::Config(format!(
                "mock.failure_rate must be within 0.0..=1.0, got {}",
                self.mock.failure_rate
            )));
        }
        if self.harness.sweep_step == 0 {
            return Err(RadioError::Config(
                "harness.sweep_step must be nonzero".to_string(),
            ));
        }
        Ok(())
    }

    /// Suite parameters derived from the harness section.
    pub fn suite_params(&self) -> SuiteParams {
        SuiteParams {
            sweep_step: self.harness.sweep_step,
            iterations: self.harness.iterations,
            seed: self.harness.seed,
            progress_interval: self.harness.progress_interval,
        }
    }
}
