//! Numeric fallback policies.
//!
//! The analytics engine must always return a number. Two places can produce
//! a value that is not one:
//!
//! - **Input boundary**: an `f64` handed over by the surrounding application
//!   may be NaN or infinite. [`finite_or_zero`] converts it to `Decimal`,
//!   substituting zero for anything non-finite.
//! - **Arithmetic**: checked `Decimal` operations return `None` on division
//!   by zero or overflow (the fixed-point analogue of a NaN result).
//!   [`guard`] collapses that to zero.
//! - **Accumulation**: running totals over many trades can exceed the
//!   `Decimal` range even when every term is finite. [`saturating_add`]
//!   clamps at the range limit instead of panicking.
//!
//! Every fallback logs at `warn` so a suppressed value is never silent.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tracing::warn;

/// Convert an `f64` to `Decimal`, or `None` for NaN, infinities and values
/// outside the decimal range.
#[must_use]
pub fn finite_decimal(value: f64) -> Option<Decimal> {
    if value.is_finite() {
        Decimal::from_f64(value)
    } else {
        None
    }
}

/// Convert an `f64` to `Decimal`, mapping NaN, infinities and out-of-range
/// values to zero.
#[must_use]
pub fn finite_or_zero(value: f64, field: &'static str) -> Decimal {
    finite_decimal(value).unwrap_or_else(|| {
        warn!(field, value, "unrepresentable input replaced with zero");
        Decimal::ZERO
    })
}

/// Resolve a checked arithmetic result, substituting zero when the
/// computation was undefined.
#[must_use]
pub fn guard(result: Option<Decimal>, context: &'static str) -> Decimal {
    result.unwrap_or_else(|| {
        warn!(context, "undefined arithmetic result replaced with zero");
        Decimal::ZERO
    })
}

/// `total + value`, clamped to `Decimal::MAX` or `Decimal::MIN` on overflow.
#[must_use]
pub fn saturating_add(total: Decimal, value: Decimal, context: &'static str) -> Decimal {
    total.checked_add(value).unwrap_or_else(|| {
        warn!(context, "running total overflowed, clamped to decimal range");
        if value.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        }
    })
}

/// Sum of `values` with [`saturating_add`] at every step.
#[must_use]
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>, context: &'static str) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, |total, value| saturating_add(total, value, context))
}

/// `numerator / denominator`, or zero when the denominator is zero.
///
/// Used for ratios whose zero-denominator case is a documented baseline
/// rather than a fault (e.g. win rate of an empty set), so it does not log.
#[must_use]
pub fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}
