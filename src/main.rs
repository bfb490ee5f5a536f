//! CLI entry point for the validation harness.
//!
//! Runs the sample-rate suite against a radio backend and reports the
//! accumulated failure count. With no physical device support compiled in,
//! the mock backend stands in; its failure injection knob lets the harness
//! itself be exercised end to end.
//!
//! # Usage
//!
//! ```bash
//! rust_sdr samplerate
//! rust_sdr samplerate --iterations 100 --seed 42
//! rust_sdr --config bench.toml samplerate --failure-rate 0.1
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use rust_sdr::config::Config;
use rust_sdr::hardware::MockRadio;
use rust_sdr::trace;
use rust_sdr::validate::SampleRateSuite;

#[derive(Parser)]
#[command(name = "rust_sdr")]
#[command(about = "Control-path validation harness for SDR hardware", long_about = None)]
struct Cli {
    /// Path to a TOML config file (defaults to rust_sdr.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the sample-rate configuration path
    Samplerate {
        /// Cases per random pass
        #[arg(long)]
        iterations: Option<u32>,

        /// Sweep step in Hz
        #[arg(long)]
        sweep_step: Option<u32>,

        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,

        /// Injected mock failure probability (0.0 to 1.0)
        #[arg(long)]
        failure_rate: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Samplerate {
            iterations,
            sweep_step,
            seed,
            failure_rate,
        } => {
            if let Some(iterations) = iterations {
                config.harness.iterations = iterations;
            }
            if let Some(sweep_step) = sweep_step {
                config.harness.sweep_step = sweep_step;
            }
            if let Some(seed) = seed {
                config.harness.seed = Some(seed);
            }
            if let Some(failure_rate) = failure_rate {
                config.mock.failure_rate = failure_rate;
            }
            config.validate()?;
            trace::init(&config.harness.log_level)?;

            run_samplerate(&config).await
        }
    }
}

async fn run_samplerate(config: &Config) -> Result<ExitCode> {
    let radio =
        MockRadio::new().with_failure_rate(config.mock.failure_rate, config.harness.seed);

    info!(
        iterations = config.harness.iterations,
        sweep_step = config.harness.sweep_step,
        seed = ?config.harness.seed,
        "running sample-rate validation suite"
    );

    let mut suite = SampleRateSuite::new(config.suite_params());
    let report = suite.run(&radio).await;

    if report.passed() {
        info!("sample-rate suite passed");
        Ok(ExitCode::SUCCESS)
    } else {
        error!(failures = report.failures, "sample-rate suite failed");
        Ok(ExitCode::FAILURE)
    }
}
