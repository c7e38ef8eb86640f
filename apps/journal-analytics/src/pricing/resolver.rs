//! Instrument pricing parameter resolution.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::constants::{
    JPY_PIP_MULTIPLIER, METAL_CONTRACT_MULTIPLIER, METAL_PREFIXES, STANDARD_LOT,
    STANDARD_PIP_MULTIPLIER,
};
use crate::config::PricingConfig;
use crate::trade::InstrumentClass;

/// How a forex pair relates to the account currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteClass {
    /// Quote currency is the account currency (e.g. EURUSD for a USD account).
    QuotedInAccount,
    /// Base currency is the account currency (e.g. USDJPY).
    BasedInAccount,
    /// Neither leg is the account currency (e.g. EURGBP).
    Cross,
    /// Not a currency pair.
    NotApplicable,
}

/// Resolved pricing parameters for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingParams {
    /// Pips per unit of price.
    pub pip_multiplier: Decimal,
    /// Units per lot.
    pub contract_multiplier: Decimal,
    /// Forex quote classification.
    pub quote: QuoteClass,
    /// Static conversion rate into the account currency, if one applies.
    ///
    /// Forex crosses multiply by it; foreign equities divide by it.
    pub conversion_rate: Option<Decimal>,
    /// Whether any class-specific handling was resolved.
    pub special: bool,
}

impl PricingParams {
    /// Parameters meaning "no special handling": unit multipliers, no
    /// conversion. Callers use the generic formula.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            pip_multiplier: Decimal::ONE,
            contract_multiplier: Decimal::ONE,
            quote: QuoteClass::NotApplicable,
            conversion_rate: None,
            special: false,
        }
    }

    /// Whether these are the neutral parameters.
    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        !self.special
    }
}

/// Normalise a symbol: uppercase ASCII alphanumerics only.
///
/// `eur/usd`, `EUR-USD` and `EURUSD` all normalise to `EURUSD`.
#[must_use]
pub fn normalize_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Resolves pricing parameters from a symbol and its declared class.
#[derive(Debug, Clone)]
pub struct InstrumentPricingResolver {
    account_currency: String,
    equity_currency_rates: BTreeMap<String, Decimal>,
    forex_quote_rates: BTreeMap<String, Decimal>,
}

impl Default for InstrumentPricingResolver {
    fn default() -> Self {
        Self::new(&PricingConfig::default())
    }
}

impl InstrumentPricingResolver {
    /// Create a resolver from pricing configuration.
    #[must_use]
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            account_currency: config.account_currency.to_ascii_uppercase(),
            equity_currency_rates: config.equity_currency_rates.clone(),
            forex_quote_rates: config.forex_quote_rates.clone(),
        }
    }

    /// The account currency profits are reported in.
    #[must_use]
    pub fn account_currency(&self) -> &str {
        &self.account_currency
    }

    /// Resolve pricing parameters. Never fails: anything unrecognised is
    /// [`PricingParams::neutral`].
    #[must_use]
    pub fn resolve(&self, symbol: &str, class: InstrumentClass) -> PricingParams {
        match class {
            InstrumentClass::Forex => self.resolve_forex(&normalize_symbol(symbol)),
            InstrumentClass::UsStock | InstrumentClass::IndianStock => self.resolve_equity(class),
            InstrumentClass::Crypto | InstrumentClass::Other => PricingParams::neutral(),
        }
    }

    fn resolve_forex(&self, symbol: &str) -> PricingParams {
        // Broker suffixes (EURUSDm, EURUSD.PRO) follow the six-letter pair.
        let (Some(base), Some(quote)) = (symbol.get(0..3), symbol.get(3..6)) else {
            return PricingParams::neutral();
        };

        let pip_multiplier = if quote == "JPY" {
            JPY_PIP_MULTIPLIER
        } else {
            STANDARD_PIP_MULTIPLIER
        };

        let contract_multiplier = if METAL_PREFIXES.contains(&base) {
            METAL_CONTRACT_MULTIPLIER
        } else {
            STANDARD_LOT
        };

        let (quote_class, conversion_rate) = if quote == self.account_currency {
            (QuoteClass::QuotedInAccount, None)
        } else if base == self.account_currency {
            (QuoteClass::BasedInAccount, None)
        } else {
            (QuoteClass::Cross, self.forex_quote_rates.get(quote).copied())
        };

        PricingParams {
            pip_multiplier,
            contract_multiplier,
            quote: quote_class,
            conversion_rate,
            special: true,
        }
    }

    fn resolve_equity(&self, class: InstrumentClass) -> PricingParams {
        let conversion_rate = class
            .listing_currency()
            .filter(|currency| *currency != self.account_currency)
            .map(|currency| self.equity_currency_rates.get(currency).copied());

        match conversion_rate {
            // Listed in the account currency: nothing to convert.
            None => PricingParams::neutral(),
            Some(rate) => PricingParams {
                conversion_rate: rate,
                special: true,
                ..PricingParams::neutral()
            },
        }
    }
}
