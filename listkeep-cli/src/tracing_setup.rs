//! Tracing setup for the listkeep binary
//!
//! Environment variables:
//!   RUST_LOG    Log filter (default: info, or debug with --debug)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Initialize console tracing. `RUST_LOG` always wins over `debug`.
pub fn init(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
