//! Tracing setup for the musiclib CLI
//!
//! Usage:
//!   musiclib --debug serve                  # Debug logging to console
//!   RUST_LOG=musiclib_server=debug musiclib # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                                # Log filter (highest priority)
//!   LOG_LEVEL                               # Plain level: error, warn, info, debug, trace

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (used when neither RUST_LOG nor LOG_LEVEL is set)
    pub debug: bool,
}

/// Filter from RUST_LOG, else LOG_LEVEL, else info/debug.
fn env_filter(config: &TracingConfig) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    if let Some(filter) = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|level| EnvFilter::try_new(level.trim().to_ascii_lowercase()).ok())
    {
        return filter;
    }

    EnvFilter::new(if config.debug { "debug" } else { "info" })
}

/// Initialize tracing with console output
pub fn init(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
