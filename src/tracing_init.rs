//! Route `tracing` events through the default logger.
//!
//! Events are formatted by `tracing-subscriber` and handed to the default
//! logger's rotating writer as raw records, so they share its lock, size
//! accounting and rotation with records emitted through this crate's own API.

use crate::{Error, Level, LogConfig, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Configure the default logger and install a global `tracing` subscriber
/// that writes through it, with an optional CLI verbosity override.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened, the filter spec is
/// invalid, or a global subscriber is already installed.
pub fn init_tracing(config: &LogConfig, cli_verbose: Option<u8>) -> Result<()> {
    crate::init(config)?;

    let log_spec = effective_log_spec(config, cli_verbose);
    let env_filter = EnvFilter::try_new(&log_spec).map_err(|e| Error::Init(e.to_string()))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(crate::logger)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| Error::Init(e.to_string()))?;

    Ok(())
}

fn tracing_level(level: Level) -> &'static str {
    match level {
        Level::Debug => "debug",
        Level::Info => "info",
        Level::Warn => "warn",
        Level::Error | Level::Panic => "error",
    }
}

/// Determine the effective filter specification, considering config and CLI overrides.
fn effective_log_spec(config: &LogConfig, cli_verbose: Option<u8>) -> String {
    // RUST_LOG takes precedence over everything
    if let Ok(rust_log) = std::env::var("RUST_LOG")
        && !rust_log.is_empty()
    {
        return rust_log;
    }

    let level = tracing_level(config.level);
    match cli_verbose {
        None | Some(0) => level.to_string(),
        Some(1) => "debug".to_string(),
        Some(_) => "trace".to_string(),
    }
}
