//! Formatting utilities for performance metrics display.

use rust_decimal::{Decimal, RoundingStrategy};

use super::constants::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Round to 2 decimal places, half away from zero.
#[must_use]
pub fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a percentage value (already scaled to 0-100).
#[must_use]
pub fn format_pct(value: Decimal) -> String {
    format!("{:.2}%", round_display(value))
}

/// Format a decimal with 2 decimal places.
#[must_use]
pub fn format_decimal(value: Decimal) -> String {
    format!("{:.2}", round_display(value))
}

/// Format a duration in seconds as `"{hours}h {minutes}m"`.
///
/// Negative durations format as zero.
#[must_use]
pub fn format_hold_time(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    format!("{hours}h {minutes}m")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_pct(Decimal::new(6000, 2)), "60.00%");
        assert_eq!(format_decimal(Decimal::new(123_456, 3)), "123.46");
        assert_eq!(format_decimal(Decimal::new(-5, 1)), "-0.50");
        assert_eq!(format_decimal(Decimal::new(100, 0)), "100.00");
    }

    #[test]
    fn test_round_display_half_away_from_zero() {
        assert_eq!(round_display(Decimal::new(1005, 3)), Decimal::new(101, 2));
        assert_eq!(round_display(Decimal::new(-1005, 3)), Decimal::new(-101, 2));
    }

    #[test]
    fn test_format_hold_time() {
        assert_eq!(format_hold_time(0), "0h 0m");
        assert_eq!(format_hold_time(59), "0h 0m");
        assert_eq!(format_hold_time(5_400), "1h 30m");
        assert_eq!(format_hold_time(90_061), "25h 1m");
        assert_eq!(format_hold_time(-30), "0h 0m");
    }
}
