//! Tracing subscriber initialization.

use mosaic_error::ConfigError;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `default_directive`
/// (for example `"info"` or `"mosaic_orchestrator=debug"`). With `json` set,
/// events are written as one JSON object per line.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(default_directive: &str, json: bool) -> Result<(), ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let installed = if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    };
    installed.map_err(|e| ConfigError::new(format!("Failed to install tracing subscriber: {}", e)))?;

    info!(json, "Tracing initialized");
    Ok(())
}
