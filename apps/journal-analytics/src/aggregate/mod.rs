//! Calendar aggregation of trades.
//!
//! - [`DailyAggregator`]: per-date buckets of net P&L, outcome counts,
//!   volume and hold time.
//! - [`CalendarBucketMapper`]: fixed 6-row, Sunday-start month grid built
//!   from daily buckets.

mod calendar;
mod daily;

pub use calendar::{CalendarBucketMapper, DayCell, WEEKS_PER_MONTH_GRID, WeekBucket};
pub use daily::{DailyAggregator, DailyBucket};
