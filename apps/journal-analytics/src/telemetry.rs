//! Structured logging setup.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and either
//! JSON or human-readable output. `RUST_LOG` takes precedence over the
//! configured level.
//!
//! # Example
//!
//! ```ignore
//! use journal_analytics::{config::load_config, telemetry::init_logging};
//!
//! let config = load_config(None)?;
//! init_logging(&config.observability.logging)?;
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LoggingConfig;

/// Error type for logging initialization.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The configured level is not a valid filter directive.
    #[error("invalid log filter '{directive}': {message}")]
    InvalidFilter {
        /// Directive that failed to parse.
        directive: String,
        /// Parser message.
        message: String,
    },
    /// A global subscriber is already installed.
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Build the filter: `RUST_LOG` when set, otherwise the configured level.
///
/// # Errors
///
/// Returns an error if `RUST_LOG` is unset and `level` does not parse.
pub fn build_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| TelemetryError::InvalidFilter {
        directive: level.to_string(),
        message: e.to_string(),
    })
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Returns an error if the level is invalid or a subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(&config.level)?;

    let result = if config.format == "pretty" {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_target(true))
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(config.include_spans)
                    .with_span_list(config.include_spans),
            )
            .try_init()
    };
    result.map_err(|e| TelemetryError::SubscriberError(e.to_string()))?;

    tracing::info!(
        level = %config.level,
        format = %config.format,
        "logging initialized"
    );
    Ok(())
}
