//! Structured logging setup.
//!
//! Installs a global `tracing` subscriber writing to stderr, either as
//! human-readable lines or as JSON lines. `RUST_LOG` takes precedence over the
//! configured level.
//!
//! Field names used by the server:
//! - `method`, `path`, `status`, `elapsed_us`: one event per request
//! - `kind`, `fields`, `reason`: rejected color input

use crate::error::ServerError;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt as tfmt, EnvFilter};

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        })
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or
    /// `hexrgb_server=debug`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

fn build_filter(level: &str) -> Result<EnvFilter, ServerError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| ServerError::Logging(format!("invalid log level '{level}': {e}")))
}

/// Installs the global subscriber. Subsequent calls are no-ops.
pub fn init_logging(config: &LogConfig) -> Result<(), ServerError> {
    if LOGGING_INITIALIZED.get().is_some() {
        return Ok(());
    }
    let env_filter = build_filter(&config.level)?;

    let result = match config.format {
        LogFormat::Pretty => {
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                tfmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_ansi(true),
            );
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                tfmt::layer()
                    .json()
                    .with_timer(SystemTime)
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .flatten_event(true),
            );
            tracing::subscriber::set_global_default(subscriber)
        }
    };
    result.map_err(|e| ServerError::Logging(e.to_string()))?;

    let _ = LOGGING_INITIALIZED.set(());
    Ok(())
}
