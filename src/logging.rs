//! Centralized structured logging configuration.
//!
//! Analysis results go to stdout via `println!`. Operational telemetry
//! (what was scored, how long it took, diagnostics) goes to stderr via tracing.

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable colored output
    Pretty,
    /// Structured JSON lines
    Json,
}

/// Errors from logging initialization.
#[derive(Error, Debug)]
pub enum LogInitError {
    #[error("Failed to parse log filter: {0}")]
    FilterError(String),

    #[error("Failed to set global subscriber: {0}")]
    SetGlobalError(String),
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides the provided level when set. Everything is written to
/// stderr so JSON results on stdout stay parseable.
pub fn init(level: Level, format: LogFormat) -> Result<(), LogInitError> {
    let filter = build_env_filter(level)?;

    match format {
        LogFormat::Pretty => {
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            );
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| LogInitError::SetGlobalError(e.to_string()))?;
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true),
            );
            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| LogInitError::SetGlobalError(e.to_string()))?;
        }
    }

    Ok(())
}

fn build_env_filter(level: Level) -> Result<EnvFilter, LogInitError> {
    filter_from(std::env::var("RUST_LOG").ok(), level)
}

/// `directive` (from `RUST_LOG`) wins over the CLI level when present.
fn filter_from(directive: Option<String>, level: Level) -> Result<EnvFilter, LogInitError> {
    let filter_str = directive.unwrap_or_else(|| level.to_string());
    EnvFilter::try_new(&filter_str).map_err(|e| LogInitError::FilterError(e.to_string()))
}
