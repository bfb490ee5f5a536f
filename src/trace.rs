//! Tracing initialization.
//!
//! Structured logging via `tracing` and `tracing-subscriber`:
//! - Environment-based filtering (`RUST_LOG` wins over the configured level)
//! - Compact single-line output suited to a CLI harness

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global subscriber with the given default level.
///
/// `RUST_LOG` overrides `level` when set. Returns an error if a subscriber
/// was already installed or the filter directive does not parse (a bare
/// string is accepted as a target directive, so only malformed directives
/// like `foo=notalevel` are rejected).
pub fn init(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| anyhow!("invalid log level '{level}': {err}"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false))
        .try_init()
        .map_err(|err| anyhow!("failed to initialize tracing: {err}"))
}
