//! Core types for journal performance metrics.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::constants::{PROFIT_FACTOR_CAP, PROFIT_FACTOR_CAP_LABEL, PROFIT_FACTOR_UNDEFINED_LABEL};
use super::format::{format_decimal, format_hold_time, round_display};
use crate::aggregate::{DailyBucket, WEEKS_PER_MONTH_GRID, WeekBucket};

/// Gross profit over gross loss, with sentinels for the degenerate cases.
///
/// Serializes as a string: `"-"`, `"2+"` or the ratio to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfitFactor {
    /// No wins and no losses.
    #[default]
    Undefined,
    /// Wins but no losses. Displays as `"2+"`.
    NoLosses,
    /// Finite ratio. Zero when there are losses but no wins.
    Ratio(Decimal),
}

impl ProfitFactor {
    /// Classify gross totals. Both arguments are non-negative magnitudes.
    #[must_use]
    pub fn from_totals(gross_profit: Decimal, gross_loss: Decimal) -> Self {
        match (gross_profit.is_zero(), gross_loss.is_zero()) {
            (true, true) => Self::Undefined,
            (false, true) => Self::NoLosses,
            _ => gross_profit
                .checked_div(gross_loss)
                .map_or(Self::Ratio(Decimal::ZERO), Self::Ratio),
        }
    }

    /// Numeric value used by the composite score. The capped sentinel
    /// stands for its cap and the undefined one for zero.
    #[must_use]
    pub const fn score_value(self) -> Decimal {
        match self {
            Self::Undefined => Decimal::ZERO,
            Self::NoLosses => PROFIT_FACTOR_CAP,
            Self::Ratio(value) => value,
        }
    }

    #[must_use]
    fn rounded(self) -> Self {
        match self {
            Self::Ratio(value) => Self::Ratio(round_display(value)),
            other => other,
        }
    }
}

impl fmt::Display for ProfitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str(PROFIT_FACTOR_UNDEFINED_LABEL),
            Self::NoLosses => f.write_str(PROFIT_FACTOR_CAP_LABEL),
            Self::Ratio(value) => f.write_str(&format_decimal(*value)),
        }
    }
}

impl FromStr for ProfitFactor {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            PROFIT_FACTOR_UNDEFINED_LABEL => Ok(Self::Undefined),
            PROFIT_FACTOR_CAP_LABEL => Ok(Self::NoLosses),
            other => Decimal::from_str(other).map(Self::Ratio),
        }
    }
}

impl Serialize for ProfitFactor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProfitFactor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Performance snapshot over an arbitrary subset of trades.
///
/// Values are full precision. Use [`PerformanceSnapshot::rounded`] or
/// [`PerformanceSnapshot::to_json`] at the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceSnapshot {
    // P&L totals
    /// Sum of net P&L over closed trades.
    pub net_pnl: Decimal,
    /// Sum of winning trades' net P&L.
    pub gross_profit: Decimal,
    /// Sum of losing trades' net P&L (positive value).
    pub gross_loss: Decimal,
    /// Total commission of closed trades (positive value).
    pub total_commission: Decimal,
    /// Total swap of closed trades.
    pub total_swap: Decimal,
    /// Summed size of all trades, open ones included.
    pub total_volume: Decimal,

    // Trade counts
    /// Closed trades.
    pub total_trades: u64,
    /// Closed trades with positive net P&L.
    pub winning_trades: u64,
    /// Closed trades with negative net P&L.
    pub losing_trades: u64,
    /// Closed trades with zero net P&L.
    pub scratch_trades: u64,
    /// Trades without an exit.
    pub open_trades: u64,
    /// Days with at least one closed trade.
    pub trading_days: u64,

    // Win rates
    /// Winning over closed trades, 0-100.
    pub win_percentage: Decimal,
    /// Mean of per-day win percentages, 0-100.
    pub avg_daily_win_percentage: Decimal,
    /// Win percentage of buy trades, 0-100.
    pub longs_win_percentage: Decimal,
    /// Win percentage of sell trades, 0-100.
    pub shorts_win_percentage: Decimal,

    // Per-trade economics
    /// Gross profit over gross loss.
    pub profit_factor: ProfitFactor,
    /// Average winning trade.
    pub avg_win: Decimal,
    /// Average losing trade (negative value).
    pub avg_loss: Decimal,
    /// `avg_win * win_rate + avg_loss * loss_rate`.
    pub trade_expectancy: Decimal,
    /// Best single trade.
    pub max_trade_profit: Decimal,
    /// Worst single trade.
    pub max_trade_loss: Decimal,

    // Daily extremes
    /// Worst single-day net P&L.
    pub max_daily_net_drawdown: Decimal,
    /// Mean daily net P&L.
    pub avg_daily_net_drawdown: Decimal,
    /// Best single-day net P&L.
    pub max_daily_profit: Decimal,
    /// Worst single-day net P&L.
    pub max_daily_loss: Decimal,
    /// Peak-to-trough decline of cumulative daily P&L (positive value).
    pub max_cumulative_drawdown: Decimal,

    // Hold time
    /// Average hold time as `"{h}h {m}m"`.
    pub avg_hold_time: String,
    /// Average hold time in seconds.
    pub avg_hold_time_secs: i64,
    /// Longest hold time as `"{h}h {m}m"`.
    pub longest_trade_duration: String,
    /// Longest hold time in seconds.
    pub longest_trade_duration_secs: i64,

    // Streaks
    /// Longest run of winning trades.
    pub max_consecutive_wins: u64,
    /// Longest run of losing trades.
    pub max_consecutive_losses: u64,

    // Risk multiples
    /// Mean R-multiple of trades with a stop.
    pub avg_r_multiple: Decimal,
    /// Sum of R-multiples of trades with a stop.
    pub total_r_multiple: Decimal,
    /// Closed trades with a usable stop.
    pub r_multiple_trades: u64,

    /// Composite score, 0-100.
    pub score: Decimal,
}

impl Default for PerformanceSnapshot {
    fn default() -> Self {
        Self {
            net_pnl: Decimal::ZERO,
            gross_profit: Decimal::ZERO,
            gross_loss: Decimal::ZERO,
            total_commission: Decimal::ZERO,
            total_swap: Decimal::ZERO,
            total_volume: Decimal::ZERO,
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            scratch_trades: 0,
            open_trades: 0,
            trading_days: 0,
            win_percentage: Decimal::ZERO,
            avg_daily_win_percentage: Decimal::ZERO,
            longs_win_percentage: Decimal::ZERO,
            shorts_win_percentage: Decimal::ZERO,
            profit_factor: ProfitFactor::Undefined,
            avg_win: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
            trade_expectancy: Decimal::ZERO,
            max_trade_profit: Decimal::ZERO,
            max_trade_loss: Decimal::ZERO,
            max_daily_net_drawdown: Decimal::ZERO,
            avg_daily_net_drawdown: Decimal::ZERO,
            max_daily_profit: Decimal::ZERO,
            max_daily_loss: Decimal::ZERO,
            max_cumulative_drawdown: Decimal::ZERO,
            avg_hold_time: format_hold_time(0),
            avg_hold_time_secs: 0,
            longest_trade_duration: format_hold_time(0),
            longest_trade_duration_secs: 0,
            max_consecutive_wins: 0,
            max_consecutive_losses: 0,
            avg_r_multiple: Decimal::ZERO,
            total_r_multiple: Decimal::ZERO,
            r_multiple_trades: 0,
            score: Decimal::ZERO,
        }
    }
}

impl PerformanceSnapshot {
    /// Copy with every decimal rounded to 2 places, half away from zero.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            net_pnl: round_display(self.net_pnl),
            gross_profit: round_display(self.gross_profit),
            gross_loss: round_display(self.gross_loss),
            total_commission: round_display(self.total_commission),
            total_swap: round_display(self.total_swap),
            total_volume: round_display(self.total_volume),
            win_percentage: round_display(self.win_percentage),
            avg_daily_win_percentage: round_display(self.avg_daily_win_percentage),
            longs_win_percentage: round_display(self.longs_win_percentage),
            shorts_win_percentage: round_display(self.shorts_win_percentage),
            profit_factor: self.profit_factor.rounded(),
            avg_win: round_display(self.avg_win),
            avg_loss: round_display(self.avg_loss),
            trade_expectancy: round_display(self.trade_expectancy),
            max_trade_profit: round_display(self.max_trade_profit),
            max_trade_loss: round_display(self.max_trade_loss),
            max_daily_net_drawdown: round_display(self.max_daily_net_drawdown),
            avg_daily_net_drawdown: round_display(self.avg_daily_net_drawdown),
            max_daily_profit: round_display(self.max_daily_profit),
            max_daily_loss: round_display(self.max_daily_loss),
            max_cumulative_drawdown: round_display(self.max_cumulative_drawdown),
            avg_r_multiple: round_display(self.avg_r_multiple),
            total_r_multiple: round_display(self.total_r_multiple),
            score: round_display(self.score),
            ..self.clone()
        }
    }

    /// Rounded snapshot as pretty-printed JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.rounded()).unwrap_or_default()
    }
}

/// Snapshot plus the day and week breakdowns behind a dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Metrics over all trades.
    pub snapshot: PerformanceSnapshot,
    /// Per-day buckets, date ascending.
    pub daily: Vec<DailyBucket>,
    /// Six-row grid of the requested month.
    pub weeks: [WeekBucket; WEEKS_PER_MONTH_GRID],
}
