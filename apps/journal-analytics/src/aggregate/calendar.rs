//! Month grid bucketing for calendar views.
//!
//! Weeks are rows of a Sunday-start grid, not ISO weeks:
//!
//! ```text
//! week = floor((day_of_month + first_weekday_of_month - day_of_week - 1) / 7) + 1
//! ```
//!
//! with weekdays numbered from Sunday = 0 and the result clamped to 6. The
//! grid always has six rows so the renderer can use a fixed layout.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::daily::DailyBucket;
use crate::numeric::saturating_add;

/// Number of rows in a month grid.
pub const WEEKS_PER_MONTH_GRID: usize = 6;

/// Aggregate of one grid row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBucket {
    /// Row number, 1 to 6.
    pub week: u8,
    /// Net P&L of the row's days.
    pub net_pnl: Decimal,
    /// Closed trades in the row.
    pub trade_count: u64,
    /// Days in the row with at least one trade.
    pub trading_days: u64,
}

impl WeekBucket {
    const fn empty(week: u8) -> Self {
        Self {
            week,
            net_pnl: Decimal::ZERO,
            trade_count: 0,
            trading_days: 0,
        }
    }
}

/// Placement of one day in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    /// Calendar date.
    pub date: NaiveDate,
    /// Grid row, 1 to 6.
    pub week: u8,
    /// Grid column.
    pub weekday: Weekday,
}

/// Maps days of a month onto the fixed 6-row grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarBucketMapper;

impl CalendarBucketMapper {
    /// Grid row (1-6) of a date within its own month.
    #[must_use]
    pub fn week_number(date: NaiveDate) -> u8 {
        let day_of_month = i64::from(date.day());
        let day_of_week = i64::from(date.weekday().num_days_from_sunday());
        let first_weekday = i64::from(
            date.with_day(1)
                .unwrap_or(date)
                .weekday()
                .num_days_from_sunday(),
        );

        let week = (day_of_month + first_weekday - day_of_week - 1).div_euclid(7) + 1;
        week.clamp(1, WEEKS_PER_MONTH_GRID as i64) as u8
    }

    /// Grid placement of every day of `(year, month)`. Empty for an invalid
    /// month.
    #[must_use]
    pub fn day_cells(year: i32, month: u32) -> Vec<DayCell> {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            warn!(year, month, "invalid calendar month");
            return Vec::new();
        };

        first
            .iter_days()
            .take_while(|date| date.month() == month)
            .map(|date| DayCell {
                date,
                week: Self::week_number(date),
                weekday: date.weekday(),
            })
            .collect()
    }

    /// Sum daily buckets of `(year, month)` into exactly six week rows.
    ///
    /// Buckets outside the month are ignored. Rows the month does not reach
    /// stay zero. An invalid month yields six zero rows.
    #[must_use]
    pub fn map_month(
        year: i32,
        month: u32,
        daily: &[DailyBucket],
    ) -> [WeekBucket; WEEKS_PER_MONTH_GRID] {
        let mut weeks: [WeekBucket; WEEKS_PER_MONTH_GRID] =
            std::array::from_fn(|i| WeekBucket::empty(i as u8 + 1));

        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            warn!(year, month, "invalid calendar month, returning empty grid");
            return weeks;
        }

        for bucket in daily
            .iter()
            .filter(|b| b.date.year() == year && b.date.month() == month)
        {
            let row = &mut weeks[usize::from(Self::week_number(bucket.date)) - 1];
            row.net_pnl = saturating_add(row.net_pnl, bucket.net_pnl, "week_net_pnl");
            row.trade_count += bucket.trade_count;
            if bucket.trade_count > 0 {
                row.trading_days += 1;
            }
        }

        weeks
    }
}
