//! Pricing configuration for profit calculation and currency conversion.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pricing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Currency all profits are reported in.
    #[serde(default = "default_account_currency")]
    pub account_currency: String,
    /// Units of a listing currency per one unit of account currency
    /// (e.g. `INR: 83`). Equity profits are divided by this rate.
    #[serde(default = "default_equity_currency_rates")]
    pub equity_currency_rates: BTreeMap<String, Decimal>,
    /// Account currency per one unit of a forex quote currency
    /// (e.g. `GBP: 1.27`). Cross-pair profits are multiplied by this rate.
    #[serde(default = "default_forex_quote_rates")]
    pub forex_quote_rates: BTreeMap<String, Decimal>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            account_currency: default_account_currency(),
            equity_currency_rates: default_equity_currency_rates(),
            forex_quote_rates: default_forex_quote_rates(),
        }
    }
}

fn default_account_currency() -> String {
    "USD".to_string()
}

fn default_equity_currency_rates() -> BTreeMap<String, Decimal> {
    BTreeMap::from([("INR".to_string(), Decimal::new(83, 0))])
}

fn default_forex_quote_rates() -> BTreeMap<String, Decimal> {
    BTreeMap::from([
        ("AUD".to_string(), Decimal::new(66, 2)),  // 0.66
        ("CAD".to_string(), Decimal::new(74, 2)),  // 0.74
        ("CHF".to_string(), Decimal::new(112, 2)), // 1.12
        ("EUR".to_string(), Decimal::new(108, 2)), // 1.08
        ("GBP".to_string(), Decimal::new(127, 2)), // 1.27
        ("JPY".to_string(), Decimal::new(67, 4)),  // 0.0067
        ("NZD".to_string(), Decimal::new(61, 2)),  // 0.61
    ])
}
