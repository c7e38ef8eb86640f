//! Validated trade types.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trade direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Long position.
    Buy,
    /// Short position.
    Sell,
}

impl Side {
    /// Sign applied to a raw `exit - entry` price delta.
    #[must_use]
    pub const fn direction(self) -> Decimal {
        match self {
            Self::Buy => Decimal::ONE,
            Self::Sell => Decimal::NEGATIVE_ONE,
        }
    }

    /// Parse a side string, accepting `long`/`short` as aliases.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "buy" | "long" => Some(Self::Buy),
            "sell" | "short" => Some(Self::Sell),
            _ => None,
        }
    }
}

/// Declared instrument class of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentClass {
    /// Spot forex and metals quoted as currency pairs.
    Forex,
    /// US-listed equity, priced in USD.
    UsStock,
    /// Indian-listed equity, priced in INR.
    IndianStock,
    /// Crypto asset.
    Crypto,
    /// Anything unclassified; uses the generic formula.
    Other,
}

impl InstrumentClass {
    /// Parse a class string. Unknown values fall back to [`Self::Other`].
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        let normalized = value.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "FOREX" | "FX" => Self::Forex,
            "US_STOCK" | "STOCK" | "EQUITY" => Self::UsStock,
            "INDIAN_STOCK" => Self::IndianStock,
            "CRYPTO" => Self::Crypto,
            _ => Self::Other,
        }
    }

    /// Listing currency for equity classes.
    #[must_use]
    pub const fn listing_currency(self) -> Option<&'static str> {
        match self {
            Self::UsStock => Some("USD"),
            Self::IndianStock => Some("INR"),
            Self::Forex | Self::Crypto | Self::Other => None,
        }
    }
}

/// A validated trade.
///
/// Built from a [`super::TradeRecord`] at the input boundary or directly by
/// in-process callers through the builder methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Trade identifier, if the journal assigned one.
    pub id: Option<String>,
    /// Owning account identifier.
    pub account: Option<String>,
    /// Authoritative local calendar date.
    pub date: NaiveDate,
    /// Local time of entry.
    pub time: Option<NaiveTime>,
    /// Instrument symbol, uppercase.
    pub symbol: String,
    /// Declared instrument class.
    pub instrument_class: InstrumentClass,
    /// Trade direction.
    pub side: Side,
    /// Entry price.
    pub entry_price: Decimal,
    /// Exit price; `None` while the position is open.
    pub exit_price: Option<Decimal>,
    /// Lots for forex, quantity otherwise.
    pub size: Decimal,
    /// Commission charged. Sign is ignored when netting.
    pub commission: Decimal,
    /// Swap or financing fee, signed.
    pub swap: Decimal,
    /// Initial stop-loss price.
    pub stop_loss: Option<Decimal>,
    /// Position open timestamp.
    pub open_time: Option<DateTime<Utc>>,
    /// Position close timestamp.
    pub close_time: Option<DateTime<Utc>>,
    /// False when the journal supplied an unrepresentable entry, exit, size
    /// or stop. Such a trade realizes zero profit.
    #[serde(default = "default_true")]
    pub prices_valid: bool,
}

const fn default_true() -> bool {
    true
}

impl Trade {
    /// Create an open trade with no costs or timestamps.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        symbol: impl Into<String>,
        instrument_class: InstrumentClass,
        side: Side,
        entry_price: Decimal,
        size: Decimal,
    ) -> Self {
        Self {
            id: None,
            account: None,
            date,
            time: None,
            symbol: symbol.into().trim().to_ascii_uppercase(),
            instrument_class,
            side,
            entry_price,
            exit_price: None,
            size,
            commission: Decimal::ZERO,
            swap: Decimal::ZERO,
            stop_loss: None,
            open_time: None,
            close_time: None,
            prices_valid: true,
        }
    }

    /// Set the exit price, closing the trade.
    #[must_use]
    pub fn closed_at(mut self, exit_price: Decimal) -> Self {
        self.exit_price = Some(exit_price);
        self
    }

    /// Set commission and swap.
    #[must_use]
    pub fn with_costs(mut self, commission: Decimal, swap: Decimal) -> Self {
        self.commission = commission;
        self.swap = swap;
        self
    }

    /// Set open and close timestamps.
    #[must_use]
    pub fn held(mut self, open: DateTime<Utc>, close: DateTime<Utc>) -> Self {
        self.open_time = Some(open);
        self.close_time = Some(close);
        self
    }

    /// Set the initial stop-loss price.
    #[must_use]
    pub fn with_stop(mut self, stop_loss: Decimal) -> Self {
        self.stop_loss = Some(stop_loss);
        self
    }

    /// Assign the trade to an account.
    #[must_use]
    pub fn for_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Whether the position is still open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.exit_price.is_none()
    }

    /// Day of week of the authoritative calendar date.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// Holding duration, when both timestamps are known.
    ///
    /// A close before the open is treated as zero duration.
    #[must_use]
    pub fn hold_time(&self) -> Option<TimeDelta> {
        let (open, close) = (self.open_time?, self.close_time?);
        Some((close - open).max(TimeDelta::zero()))
    }
}
