//! Structured logging setup
//!
//! Provides JSON-formatted and human-readable logging with optional file output.
//! Log lines go to stderr so command output on stdout stays clean.

use crate::config::LoggingConfig;
use anyhow::Result;
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter: `RUST_LOG` wins, otherwise the configured level
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;
    Ok(filter)
}

/// Initialize logging based on configuration.
///
/// # Arguments
///
/// * `config` - Logging configuration
///
/// # Errors
///
/// Returns error if the level does not parse, the log file cannot be opened,
/// or a global subscriber is already installed
///
/// # Examples
///
/// ```no_run
/// use timetabler::config::LoggingConfig;
/// use timetabler::logging::init_logging;
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     json_format: false,
///     file_path: None,
/// };
///
/// init_logging(&config).unwrap();
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(build_filter(config)?);

    if config.json_format {
        let stderr_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr);

        if let Some(file_path) = &config.file_path {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(file_path)?;

            let file_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(Arc::new(file));

            registry.with(stderr_layer).with(file_layer).try_init()?;
        } else {
            registry.with(stderr_layer).try_init()?;
        }
    } else {
        let stderr_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr);

        if let Some(file_path) = &config.file_path {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(file_path)?;

            let file_layer = fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_writer(Arc::new(file));

            registry.with(stderr_layer).with(file_layer).try_init()?;
        } else {
            registry.with(stderr_layer).try_init()?;
        }
    }

    Ok(())
}
