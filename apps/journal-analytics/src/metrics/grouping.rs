//! Trade filtering and grouped snapshots.
//!
//! Each group is an independent snapshot computation, so groups are
//! evaluated in parallel on the global rayon pool.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Weekday};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::calculator::PerformanceMetricsEngine;
use super::types::PerformanceSnapshot;
use crate::pricing::normalize_symbol;
use crate::trade::{InstrumentClass, Trade};

const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Selects a subset of trades. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeFilter {
    /// First date included.
    pub from: Option<NaiveDate>,
    /// Last date included.
    pub to: Option<NaiveDate>,
    /// Account identifier.
    pub account: Option<String>,
    /// Days of the week included.
    pub weekdays: Option<Vec<Weekday>>,
    /// Instrument class.
    pub instrument_class: Option<InstrumentClass>,
}

impl TradeFilter {
    /// Whether `trade` passes every set criterion.
    #[must_use]
    pub fn matches(&self, trade: &Trade) -> bool {
        self.from.is_none_or(|from| trade.date >= from)
            && self.to.is_none_or(|to| trade.date <= to)
            && self
                .account
                .as_deref()
                .is_none_or(|account| trade.account.as_deref() == Some(account))
            && self
                .weekdays
                .as_ref()
                .is_none_or(|days| days.contains(&trade.weekday()))
            && self
                .instrument_class
                .is_none_or(|class| trade.instrument_class == class)
    }

    /// Matching trades, in input order.
    #[must_use]
    pub fn apply(&self, trades: &[Trade]) -> Vec<Trade> {
        trades.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

impl PerformanceMetricsEngine {
    /// Snapshot of the trades matching `filter`.
    #[must_use]
    pub fn filtered_snapshot(&self, trades: &[Trade], filter: &TradeFilter) -> PerformanceSnapshot {
        self.snapshot(&filter.apply(trades))
    }

    /// One snapshot per account. Trades without an account share the
    /// `None` group, which sorts first.
    #[must_use]
    pub fn snapshots_by_account(
        &self,
        trades: &[Trade],
    ) -> BTreeMap<Option<String>, PerformanceSnapshot> {
        self.grouped(trades, |t| t.account.clone())
    }

    /// One snapshot per normalized symbol, so `EUR/USD` and `EURUSD` share
    /// a group.
    #[must_use]
    pub fn snapshots_by_symbol(&self, trades: &[Trade]) -> BTreeMap<String, PerformanceSnapshot> {
        self.grouped(trades, |t| normalize_symbol(&t.symbol))
    }

    /// One snapshot per day of the week that has trades, Sunday first.
    #[must_use]
    pub fn snapshots_by_weekday(&self, trades: &[Trade]) -> Vec<(Weekday, PerformanceSnapshot)> {
        self.grouped(trades, |t| t.weekday().num_days_from_sunday())
            .into_iter()
            .filter_map(|(n, snapshot)| {
                let day = usize::try_from(n).ok().and_then(|i| SUNDAY_FIRST.get(i))?;
                Some((*day, snapshot))
            })
            .collect()
    }

    fn grouped<K, F>(&self, trades: &[Trade], key: F) -> BTreeMap<K, PerformanceSnapshot>
    where
        K: Ord + Send,
        F: Fn(&Trade) -> K,
    {
        let mut groups: BTreeMap<K, Vec<Trade>> = BTreeMap::new();
        for trade in trades {
            groups.entry(key(trade)).or_default().push(trade.clone());
        }

        debug!(trades = trades.len(), groups = groups.len(), "computing grouped snapshots");

        groups
            .into_par_iter()
            .map(|(k, group)| (k, self.snapshot(&group)))
            .collect()
    }
}
