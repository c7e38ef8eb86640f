// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::or_fun_call
    )
)]

//! Journal Analytics - Trade Performance Analytics Engine
//!
//! Pure computation over a trading journal: turns a collection of trades
//! into realized P&L, daily buckets, a six-row calendar grid and a
//! performance snapshot for dashboard widgets.
//!
//! # Pipeline
//!
//! - **Input**: `TradeRecord` (serde, camelCase) validated into `Trade`
//! - **Pricing**: `InstrumentPricingResolver` picks pip and contract
//!   multipliers and the conversion path; `ProfitCalculator` applies them
//! - **Aggregation**: `DailyAggregator` groups by date,
//!   `CalendarBucketMapper` folds days into week rows
//! - **Metrics**: `PerformanceMetricsEngine` computes win rates, profit
//!   factor, expectancy, drawdowns, streaks, R-multiples and the score
//!
//! No I/O happens inside the engine. Configuration loading and logging
//! setup live in `config` and `telemetry` for host applications.
//!
//! # Example
//!
//! ```ignore
//! use journal_analytics::{PerformanceMetricsEngine, partition_records};
//!
//! let (trades, rejected) = partition_records(records);
//! let snapshot = PerformanceMetricsEngine::default().snapshot(&trades);
//! println!("{}", snapshot.to_json());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Daily and calendar-week aggregation.
pub mod aggregate;

/// YAML configuration loading and validation.
pub mod config;

/// Input validation errors.
pub mod error;

/// Performance snapshot computation.
pub mod metrics;

/// Numeric fallback guards.
pub mod numeric;

/// Instrument pricing and realized profit.
pub mod pricing;

/// Structured logging setup.
pub mod telemetry;

/// Trade domain model and input records.
pub mod trade;

// =============================================================================
// Re-exports
// =============================================================================

pub use aggregate::{CalendarBucketMapper, DailyAggregator, DailyBucket, WeekBucket};
pub use config::{AnalyticsConfig, ConfigError, HoldTimePolicy, load_config};
pub use error::TradeError;
pub use metrics::{
    AnalyticsReport, PerformanceMetricsEngine, PerformanceSnapshot, ProfitFactor, TradeFilter,
};
pub use pricing::{InstrumentPricingResolver, PricingParams, ProfitCalculator};
pub use trade::{InstrumentClass, RejectedRecord, Side, Trade, TradeRecord, partition_records};
