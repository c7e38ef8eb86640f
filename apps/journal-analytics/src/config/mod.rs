//! Configuration module for the analytics engine.
//!
//! Loads pricing, metric policy and logging settings from YAML with
//! environment variable interpolation. Every section has defaults, so an
//! empty document is a valid configuration.
//!
//! # Usage
//!
//! ```rust,ignore
//! use journal_analytics::config::load_config;
//!
//! // Load from default path (analytics.yaml)
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/analytics.yaml"))?;
//!
//! println!("account currency: {}", config.pricing.account_currency);
//! ```

mod metrics;
mod observability;
mod pricing;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use metrics::{HoldTimePolicy, MetricsConfig};
pub use observability::{LoggingConfig, ObservabilityConfig};
pub use pricing::PricingConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Currency conversion and instrument pricing.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Metric calculation policies.
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "analytics.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<AnalyticsConfig, ConfigError> {
    let path = path.unwrap_or("analytics.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<AnalyticsConfig, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: AnalyticsConfig = if interpolated.trim().is_empty() {
        AnalyticsConfig::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;
    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &AnalyticsConfig) -> Result<(), ConfigError> {
    let currency = &config.pricing.account_currency;
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ConfigError::ValidationError(format!(
            "pricing.account_currency must be a 3-letter uppercase code, got '{currency}'"
        )));
    }

    for (section, rates) in [
        ("equity_currency_rates", &config.pricing.equity_currency_rates),
        ("forex_quote_rates", &config.pricing.forex_quote_rates),
    ] {
        if let Some((code, rate)) = rates.iter().find(|(_, rate)| **rate <= rust_decimal::Decimal::ZERO) {
            return Err(ConfigError::ValidationError(format!(
                "pricing.{section}.{code} must be positive, got {rate}"
            )));
        }
    }

    let valid_formats = ["json", "pretty"];
    if !valid_formats.contains(&config.observability.logging.format.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "observability.logging.format must be one of: {valid_formats:?}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.pricing.account_currency, "USD");
        assert_eq!(config.pricing.equity_currency_rates.get("INR"), Some(&dec!(83)));
        assert_eq!(config.pricing.forex_quote_rates.get("GBP"), Some(&dec!(1.27)));
        assert_eq!(config.metrics.hold_time_policy, HoldTimePolicy::ZeroDuration);
        assert_eq!(config.observability.logging.level, "info");
        assert_eq!(config.observability.logging.format, "json");
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = match load_config_from_string("") {
            Ok(c) => c,
            Err(e) => panic!("should load empty config: {e}"),
        };
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        let yaml = r"
pricing:
  account_currency: EUR
  forex_quote_rates:
    USD: 0.92
metrics:
  hold_time_policy: EXCLUDE
";
        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load partial config: {e}"),
        };
        assert_eq!(config.pricing.account_currency, "EUR");
        assert_eq!(config.pricing.forex_quote_rates.get("USD"), Some(&dec!(0.92)));
        // Sections and fields not given keep their defaults.
        assert_eq!(config.pricing.equity_currency_rates.get("INR"), Some(&dec!(83)));
        assert_eq!(config.metrics.hold_time_policy, HoldTimePolicy::Exclude);
        assert_eq!(config.observability.logging.format, "json");
    }

    #[test]
    fn test_env_var_with_default_when_missing() {
        let input = "level: ${JOURNAL_ANALYTICS_TEST_NONEXISTENT_VAR:-debug}";
        assert_eq!(interpolate_env_vars(input), "level: debug");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn test_env_var_with_default_uses_existing() {
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);
        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn test_env_var_without_default_becomes_empty() {
        let input = "currency: ${JOURNAL_ANALYTICS_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "currency: ");
    }

    #[test]
    fn test_interpolation_feeds_parser() {
        let yaml = "pricing:\n  account_currency: ${JOURNAL_ANALYTICS_TEST_MISSING_CCY:-GBP}\n";
        let config = match load_config_from_string(yaml) {
            Ok(c) => c,
            Err(e) => panic!("should load interpolated config: {e}"),
        };
        assert_eq!(config.pricing.account_currency, "GBP");
    }

    #[test]
    fn test_validation_invalid_account_currency() {
        let yaml = "pricing:\n  account_currency: dollars\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for invalid currency");
        };
        assert!(err.to_string().contains("account_currency"));
    }

    #[test]
    fn test_validation_non_positive_rate() {
        let yaml = "pricing:\n  equity_currency_rates:\n    INR: 0\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for zero rate");
        };
        assert!(err.to_string().contains("equity_currency_rates.INR"));
    }

    #[test]
    fn test_validation_invalid_log_format() {
        let yaml = "observability:\n  logging:\n    format: xml\n";
        let Err(err) = load_config_from_string(yaml) else {
            panic!("expected error for log format");
        };
        assert!(err.to_string().contains("logging.format"));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let result = load_config_from_string("pricing: [unclosed");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "metrics:\n  hold_time_policy: EXCLUDE").unwrap();

        let path = file.path().to_str().unwrap();
        let config = load_config(Some(path)).unwrap();
        assert_eq!(config.metrics.hold_time_policy, HoldTimePolicy::Exclude);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let result = load_config(path.to_str());
        let Err(ConfigError::ReadError { path: reported, .. }) = result else {
            panic!("expected read error");
        };
        assert!(reported.ends_with("missing.yaml"));
    }
}
