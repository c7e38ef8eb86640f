//! Statistical helpers for performance metric calculations.

use rust_decimal::Decimal;

use crate::numeric::{saturating_add, saturating_sum};

/// Calculate mean of a slice of decimals.
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum = saturating_sum(values.iter().copied(), "mean");
    Some(sum / Decimal::from(values.len() as u64))
}

/// Largest peak-to-trough decline of the running sum of `changes`, as a
/// positive amount. The running sum starts at zero.
pub fn max_cumulative_drawdown(changes: &[Decimal]) -> Decimal {
    let mut equity = Decimal::ZERO;
    let mut peak = Decimal::ZERO;
    let mut max_drawdown = Decimal::ZERO;

    for change in changes {
        equity = saturating_add(equity, *change, "cumulative_equity");
        peak = peak.max(equity);
        max_drawdown = max_drawdown.max(saturating_add(peak, -equity, "cumulative_drawdown"));
    }

    max_drawdown
}

/// Longest runs of consecutive positive and negative values. Zeros break
/// neither run.
pub fn consecutive_streaks(values: impl IntoIterator<Item = Decimal>) -> (u64, u64) {
    let mut max_wins = 0u64;
    let mut max_losses = 0u64;
    let mut current_wins = 0u64;
    let mut current_losses = 0u64;

    for value in values {
        if value > Decimal::ZERO {
            current_wins += 1;
            current_losses = 0;
            max_wins = max_wins.max(current_wins);
        } else if value < Decimal::ZERO {
            current_losses += 1;
            current_wins = 0;
            max_losses = max_losses.max(current_losses);
        }
    }

    (max_wins, max_losses)
}
