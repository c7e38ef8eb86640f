//! Raw trade records from the journal application and their validation.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::types::{InstrumentClass, Side, Trade};
use crate::error::TradeError;
use crate::numeric::{finite_decimal, finite_or_zero};
use crate::pricing::normalize_symbol;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// A trade record as stored by the journal application.
///
/// Field names follow the application's camelCase JSON. Numeric fields are
/// plain `f64` and may carry NaN when the producer failed to parse a value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    /// Trade identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Owning account identifier.
    #[serde(default)]
    pub account: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Time of day, `HH:MM:SS`.
    #[serde(default)]
    pub time: Option<String>,
    /// Instrument symbol.
    pub instrument_symbol: String,
    /// Instrument class (`FOREX`, `US_STOCK`, `INDIAN_STOCK`, `CRYPTO`, `OTHER`).
    #[serde(default)]
    pub instrument_class: String,
    /// `buy` or `sell`.
    pub side: String,
    /// Entry price.
    pub entry_price: f64,
    /// Exit price; absent for open positions.
    #[serde(default)]
    pub exit_price: Option<f64>,
    /// Lots or quantity.
    pub size: f64,
    /// Commission.
    #[serde(default)]
    pub commission: f64,
    /// Swap or fee.
    #[serde(default)]
    pub swap: f64,
    /// Initial stop-loss price.
    #[serde(default)]
    pub stop_loss: Option<f64>,
    /// Open timestamp (RFC 3339).
    #[serde(default)]
    pub open_timestamp: Option<DateTime<Utc>>,
    /// Close timestamp (RFC 3339); absent for open positions.
    #[serde(default)]
    pub close_timestamp: Option<DateTime<Utc>>,
}

impl TryFrom<TradeRecord> for Trade {
    type Error = TradeError;

    fn try_from(record: TradeRecord) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(record.date.trim(), DATE_FORMAT).map_err(|e| {
            TradeError::InvalidDate {
                value: record.date.clone(),
                source: e,
            }
        })?;

        let time = match record.time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(NaiveTime::parse_from_str(raw, TIME_FORMAT).map_err(|e| {
                TradeError::InvalidTime {
                    value: raw.to_string(),
                    source: e,
                }
            })?),
        };

        let side =
            Side::parse(&record.side).ok_or_else(|| TradeError::InvalidSide(record.side.clone()))?;

        if normalize_symbol(&record.instrument_symbol).is_empty() {
            return Err(TradeError::EmptySymbol);
        }

        let instrument_class = InstrumentClass::parse_lenient(&record.instrument_class);
        if instrument_class == InstrumentClass::Other && !record.instrument_class.is_empty() {
            debug!(
                class = %record.instrument_class,
                symbol = %record.instrument_symbol,
                "unrecognised instrument class, using generic formula"
            );
        }

        let entry_price = finite_decimal(record.entry_price);
        let size = finite_decimal(record.size);
        let exit_price = record.exit_price.map(finite_decimal);
        let stop_loss = record.stop_loss.map(finite_decimal);
        let prices_valid = entry_price.is_some()
            && size.is_some()
            && exit_price.is_none_or(|p| p.is_some())
            && stop_loss.is_none_or(|p| p.is_some());
        if !prices_valid {
            warn!(
                symbol = %record.instrument_symbol,
                entry_price = record.entry_price,
                exit_price = ?record.exit_price,
                size = record.size,
                stop_loss = ?record.stop_loss,
                "unrepresentable price or size, trade will realize zero profit"
            );
        }

        let close_time = record.close_timestamp;
        let exit_price = exit_price.map(Option::unwrap_or_default);
        if exit_price.is_none() && close_time.is_some() {
            warn!(
                symbol = %record.instrument_symbol,
                "close timestamp without exit price, treating trade as open"
            );
        }

        Ok(Self {
            id: record.id,
            account: record.account,
            date,
            time,
            symbol: record.instrument_symbol.trim().to_ascii_uppercase(),
            instrument_class,
            side,
            entry_price: entry_price.unwrap_or_default(),
            exit_price,
            size: size.unwrap_or_default(),
            // Costs are zeroed in place; the rest of the trade stays usable.
            commission: finite_or_zero(record.commission, "commission"),
            swap: finite_or_zero(record.swap, "swap"),
            stop_loss: stop_loss.flatten(),
            open_time: record.open_timestamp,
            close_time,
            prices_valid,
        })
    }
}

/// A record that failed validation.
#[derive(Debug)]
pub struct RejectedRecord {
    /// Position of the record in the input.
    pub index: usize,
    /// Record identifier, if present.
    pub id: Option<String>,
    /// Why the record was rejected.
    pub error: TradeError,
}

/// Validate a batch of records, keeping the valid trades and collecting the
/// rejects so a single malformed record does not blank a dashboard.
pub fn partition_records(
    records: impl IntoIterator<Item = TradeRecord>,
) -> (Vec<Trade>, Vec<RejectedRecord>) {
    let mut trades = Vec::new();
    let mut rejected = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        let id = record.id.clone();
        match Trade::try_from(record) {
            Ok(trade) => trades.push(trade),
            Err(error) => {
                warn!(index, reason = error.reason(), %error, "rejected trade record");
                rejected.push(RejectedRecord { index, id, error });
            }
        }
    }

    (trades, rejected)
}
