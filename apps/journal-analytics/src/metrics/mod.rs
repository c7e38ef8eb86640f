//! Performance metrics over journal trades.
//!
//! Implements the dashboard metric set:
//! - Net P&L, gross profit and gross loss
//! - Win percentage overall, per day and per side
//! - Profit factor with `"-"` / `"2+"` sentinels
//! - Expectancy, hold time, streaks and R-multiples
//! - Daily extremes and cumulative drawdown
//! - Composite score

mod calculator;
mod constants;
mod format;
mod grouping;
mod math;
mod types;

pub use calculator::{PerformanceMetricsEngine, composite_score};
pub use format::{format_decimal, format_hold_time, format_pct};
pub use grouping::TradeFilter;
pub use types::{AnalyticsReport, PerformanceSnapshot, ProfitFactor};
