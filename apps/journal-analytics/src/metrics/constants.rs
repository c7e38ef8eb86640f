//! Decimal constants for performance metric calculations.

use rust_decimal::Decimal;

pub const HUNDRED: Decimal = Decimal::ONE_HUNDRED;
pub const SECONDS_PER_HOUR: i64 = 3600;
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Value the "no losses" profit factor stands for, and its display label.
pub const PROFIT_FACTOR_CAP: Decimal = Decimal::TWO;
pub const PROFIT_FACTOR_CAP_LABEL: &str = "2+";
pub const PROFIT_FACTOR_UNDEFINED_LABEL: &str = "-";

// Composite score coefficients. Heuristic product values, kept verbatim.
pub const SCORE_WIN_RATE_WEIGHT: Decimal = Decimal::from_parts(4, 0, 0, false, 1); // 0.4
pub const SCORE_PROFIT_FACTOR_WEIGHT: Decimal = Decimal::TEN;
pub const SCORE_POSITIVE_EXPECTANCY_BONUS: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
pub const SCORE_MIN: Decimal = Decimal::ZERO;
pub const SCORE_MAX: Decimal = Decimal::ONE_HUNDRED;
