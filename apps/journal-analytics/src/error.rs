//! Error types for the analytics input boundary.
//!
//! The computation engine itself never fails: degenerate ratios resolve to
//! sentinels and undefined arithmetic resolves to zero (see
//! [`crate::numeric`]). Errors exist only where loosely-typed records from
//! the surrounding application are converted into validated [`crate::Trade`]
//! values.
//!
//! | Reason | Usage |
//! |--------|-------|
//! | `INVALID_DATE` | Calendar date is not `YYYY-MM-DD` |
//! | `INVALID_TIME` | Time of day is not `HH:MM:SS` |
//! | `INVALID_SIDE` | Side is neither buy nor sell |
//! | `EMPTY_SYMBOL` | Instrument symbol is blank |

use thiserror::Error;

/// Errors raised while validating a trade record.
#[derive(Debug, Error)]
pub enum TradeError {
    /// The authoritative calendar date could not be parsed.
    #[error("Invalid trade date '{value}': {source}")]
    InvalidDate {
        /// The raw date string.
        value: String,
        /// The underlying parse error.
        source: chrono::ParseError,
    },

    /// The time-of-day field could not be parsed.
    #[error("Invalid trade time '{value}': {source}")]
    InvalidTime {
        /// The raw time string.
        value: String,
        /// The underlying parse error.
        source: chrono::ParseError,
    },

    /// The side is not one of buy/sell (long/short accepted as aliases).
    #[error("Invalid trade side: {0}")]
    InvalidSide(String),

    /// The instrument symbol is empty after normalisation.
    #[error("Instrument symbol is empty")]
    EmptySymbol,
}

impl TradeError {
    /// Stable machine-readable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidDate { .. } => "INVALID_DATE",
            Self::InvalidTime { .. } => "INVALID_TIME",
            Self::InvalidSide(_) => "INVALID_SIDE",
            Self::EmptySymbol => "EMPTY_SYMBOL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_strings() {
        assert_eq!(TradeError::EmptySymbol.reason(), "EMPTY_SYMBOL");
        assert_eq!(
            TradeError::InvalidSide("hold".to_string()).reason(),
            "INVALID_SIDE"
        );
    }

    #[test]
    fn test_display_includes_value() {
        let err = TradeError::InvalidSide("hold".to_string());
        assert_eq!(err.to_string(), "Invalid trade side: hold");
    }
}
