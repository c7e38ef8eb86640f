//! Per-day trade aggregation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::HoldTimePolicy;
use crate::numeric::{ratio_or_zero, saturating_add};
use crate::pricing::ProfitCalculator;
use crate::trade::Trade;

/// Aggregated activity for one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBucket {
    /// Calendar date.
    pub date: NaiveDate,
    /// Net P&L of the day's closed trades.
    pub net_pnl: Decimal,
    /// Closed trades.
    pub trade_count: u64,
    /// Closed trades with positive net P&L.
    pub win_count: u64,
    /// Closed trades with negative net P&L.
    pub loss_count: u64,
    /// Closed trades with exactly zero net P&L.
    pub scratch_count: u64,
    /// Trades still open.
    pub open_count: u64,
    /// Summed size of all trades, open ones included.
    pub volume: Decimal,
    /// Total hold time of closed trades, in seconds.
    pub hold_time_secs: i64,
    /// Closed trades counted in `hold_time_secs`.
    pub timed_trade_count: u64,
}

impl DailyBucket {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            net_pnl: Decimal::ZERO,
            trade_count: 0,
            win_count: 0,
            loss_count: 0,
            scratch_count: 0,
            open_count: 0,
            volume: Decimal::ZERO,
            hold_time_secs: 0,
            timed_trade_count: 0,
        }
    }

    /// Win percentage (0-100) of the day's closed trades, or `None` when the
    /// day has none.
    #[must_use]
    pub fn win_percentage(&self) -> Option<Decimal> {
        (self.trade_count > 0).then(|| {
            ratio_or_zero(Decimal::from(self.win_count), Decimal::from(self.trade_count))
                * Decimal::ONE_HUNDRED
        })
    }
}

/// Groups trades by their authoritative calendar date.
#[derive(Debug, Clone, Copy)]
pub struct DailyAggregator<'a> {
    calculator: &'a ProfitCalculator,
    hold_time_policy: HoldTimePolicy,
}

impl<'a> DailyAggregator<'a> {
    /// Create an aggregator over the given profit calculator.
    #[must_use]
    pub const fn new(calculator: &'a ProfitCalculator, hold_time_policy: HoldTimePolicy) -> Self {
        Self {
            calculator,
            hold_time_policy,
        }
    }

    /// Bucket trades by date, ordered by date ascending.
    #[must_use]
    pub fn aggregate(&self, trades: &[Trade]) -> Vec<DailyBucket> {
        let mut buckets: BTreeMap<NaiveDate, DailyBucket> = BTreeMap::new();

        for trade in trades {
            let bucket = buckets
                .entry(trade.date)
                .or_insert_with(|| DailyBucket::empty(trade.date));
            bucket.volume = saturating_add(bucket.volume, trade.size, "daily_volume");

            let Some(net) = self.calculator.net_pnl(trade) else {
                bucket.open_count += 1;
                continue;
            };

            bucket.net_pnl = saturating_add(bucket.net_pnl, net, "daily_net_pnl");
            bucket.trade_count += 1;
            match net.cmp(&Decimal::ZERO) {
                std::cmp::Ordering::Greater => bucket.win_count += 1,
                std::cmp::Ordering::Less => bucket.loss_count += 1,
                std::cmp::Ordering::Equal => bucket.scratch_count += 1,
            }

            match (trade.hold_time(), self.hold_time_policy) {
                (Some(held), _) => {
                    bucket.hold_time_secs = bucket.hold_time_secs.saturating_add(held.num_seconds());
                    bucket.timed_trade_count += 1;
                }
                (None, HoldTimePolicy::ZeroDuration) => bucket.timed_trade_count += 1,
                (None, HoldTimePolicy::Exclude) => {}
            }
        }

        debug!(trades = trades.len(), days = buckets.len(), "aggregated daily buckets");
        buckets.into_values().collect()
    }
}
