//! Performance metrics engine over trade subsets.

use rust_decimal::Decimal;
use tracing::debug;

use super::constants::{
    HUNDRED, SCORE_MAX, SCORE_MIN, SCORE_POSITIVE_EXPECTANCY_BONUS, SCORE_PROFIT_FACTOR_WEIGHT,
    SCORE_WIN_RATE_WEIGHT,
};
use super::format::format_hold_time;
use super::math::{consecutive_streaks, max_cumulative_drawdown, mean};
use super::types::{AnalyticsReport, PerformanceSnapshot, ProfitFactor};
use crate::aggregate::{CalendarBucketMapper, DailyAggregator, DailyBucket, WEEKS_PER_MONTH_GRID, WeekBucket};
use crate::config::{AnalyticsConfig, HoldTimePolicy};
use crate::numeric::{ratio_or_zero, saturating_add, saturating_sum};
use crate::pricing::ProfitCalculator;
use crate::trade::{Side, Trade};

/// Computes performance snapshots, daily buckets and month grids.
///
/// Stateless between calls: every entry point takes the trade subset
/// explicitly, and identical input always yields identical output.
#[derive(Debug, Clone, Default)]
pub struct PerformanceMetricsEngine {
    calculator: ProfitCalculator,
    hold_time_policy: HoldTimePolicy,
}

/// Running totals over closed trades.
#[derive(Debug, Default)]
struct TradeTotals {
    net_pnl: Decimal,
    gross_profit: Decimal,
    gross_loss: Decimal,
    commission: Decimal,
    swap: Decimal,
    volume: Decimal,
    closed: u64,
    wins: u64,
    losses: u64,
    scratches: u64,
    open: u64,
    long_closed: u64,
    long_wins: u64,
    short_closed: u64,
    short_wins: u64,
    max_trade_profit: Option<Decimal>,
    max_trade_loss: Option<Decimal>,
    longest_hold_secs: i64,
    r_multiples: Vec<Decimal>,
}

impl PerformanceMetricsEngine {
    /// Create an engine from analytics configuration.
    #[must_use]
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            calculator: ProfitCalculator::new(&config.pricing),
            hold_time_policy: config.metrics.hold_time_policy,
        }
    }

    /// The profit calculator used for per-trade P&L.
    #[must_use]
    pub const fn calculator(&self) -> &ProfitCalculator {
        &self.calculator
    }

    /// Bucket trades by date, ordered by date ascending.
    #[must_use]
    pub fn daily_buckets(&self, trades: &[Trade]) -> Vec<DailyBucket> {
        DailyAggregator::new(&self.calculator, self.hold_time_policy).aggregate(trades)
    }

    /// Six-row week grid of `(year, month)`.
    #[must_use]
    pub fn month_grid(&self, year: i32, month: u32, trades: &[Trade]) -> [WeekBucket; WEEKS_PER_MONTH_GRID] {
        CalendarBucketMapper::map_month(year, month, &self.daily_buckets(trades))
    }

    /// Snapshot, daily buckets and the month grid in one pass over the days.
    #[must_use]
    pub fn report(&self, year: i32, month: u32, trades: &[Trade]) -> AnalyticsReport {
        let daily = self.daily_buckets(trades);
        let weeks = CalendarBucketMapper::map_month(year, month, &daily);
        let snapshot = self.snapshot_with_daily(trades, &daily);
        AnalyticsReport {
            snapshot,
            daily,
            weeks,
        }
    }

    /// Calculate all performance metrics for a trade subset.
    #[must_use]
    pub fn snapshot(&self, trades: &[Trade]) -> PerformanceSnapshot {
        if trades.is_empty() {
            return PerformanceSnapshot::default();
        }
        let daily = self.daily_buckets(trades);
        self.snapshot_with_daily(trades, &daily)
    }

    fn snapshot_with_daily(&self, trades: &[Trade], daily: &[DailyBucket]) -> PerformanceSnapshot {
        if trades.is_empty() {
            return PerformanceSnapshot::default();
        }

        let totals = self.calculate_trade_totals(trades);
        let closed = Decimal::from(totals.closed);

        let win_rate = ratio_or_zero(Decimal::from(totals.wins), closed);
        let loss_rate = ratio_or_zero(Decimal::from(totals.losses), closed);
        let win_percentage = win_rate * HUNDRED;

        let avg_win = ratio_or_zero(totals.gross_profit, Decimal::from(totals.wins));
        let avg_loss = -ratio_or_zero(totals.gross_loss, Decimal::from(totals.losses));
        let trade_expectancy = avg_win * win_rate + avg_loss * loss_rate;
        let profit_factor = ProfitFactor::from_totals(totals.gross_profit, totals.gross_loss);

        let (max_consecutive_wins, max_consecutive_losses) = self.calculate_streaks(trades);

        let trading_days: Vec<&DailyBucket> = daily.iter().filter(|d| d.trade_count > 0).collect();
        let daily_pnl: Vec<Decimal> = trading_days.iter().map(|d| d.net_pnl).collect();
        let daily_win_pcts: Vec<Decimal> = trading_days
            .iter()
            .filter_map(|d| d.win_percentage())
            .collect();
        let max_daily_profit = daily_pnl.iter().copied().max().unwrap_or_default();
        let max_daily_loss = daily_pnl.iter().copied().min().unwrap_or_default();

        let avg_hold_time_secs = Self::average_hold_secs(daily);

        let r_count = totals.r_multiples.len() as u64;
        let total_r_multiple = saturating_sum(totals.r_multiples.iter().copied(), "total_r_multiple");

        let score = composite_score(win_percentage, profit_factor, trade_expectancy);

        debug!(
            trades = trades.len(),
            closed = totals.closed,
            open = totals.open,
            days = trading_days.len(),
            "computed performance snapshot"
        );

        PerformanceSnapshot {
            net_pnl: totals.net_pnl,
            gross_profit: totals.gross_profit,
            gross_loss: totals.gross_loss,
            total_commission: totals.commission,
            total_swap: totals.swap,
            total_volume: totals.volume,
            total_trades: totals.closed,
            winning_trades: totals.wins,
            losing_trades: totals.losses,
            scratch_trades: totals.scratches,
            open_trades: totals.open,
            trading_days: trading_days.len() as u64,
            win_percentage,
            avg_daily_win_percentage: mean(&daily_win_pcts).unwrap_or_default(),
            longs_win_percentage: ratio_or_zero(
                Decimal::from(totals.long_wins),
                Decimal::from(totals.long_closed),
            ) * HUNDRED,
            shorts_win_percentage: ratio_or_zero(
                Decimal::from(totals.short_wins),
                Decimal::from(totals.short_closed),
            ) * HUNDRED,
            profit_factor,
            avg_win,
            avg_loss,
            trade_expectancy,
            max_trade_profit: totals.max_trade_profit.unwrap_or_default(),
            max_trade_loss: totals.max_trade_loss.unwrap_or_default(),
            max_daily_net_drawdown: max_daily_loss,
            avg_daily_net_drawdown: mean(&daily_pnl).unwrap_or_default(),
            max_daily_profit,
            max_daily_loss,
            max_cumulative_drawdown: max_cumulative_drawdown(&daily_pnl),
            avg_hold_time: format_hold_time(avg_hold_time_secs),
            avg_hold_time_secs,
            longest_trade_duration: format_hold_time(totals.longest_hold_secs),
            longest_trade_duration_secs: totals.longest_hold_secs,
            max_consecutive_wins,
            max_consecutive_losses,
            avg_r_multiple: mean(&totals.r_multiples).unwrap_or_default(),
            total_r_multiple,
            r_multiple_trades: r_count,
            score,
        }
    }

    fn calculate_trade_totals(&self, trades: &[Trade]) -> TradeTotals {
        let mut totals = TradeTotals::default();

        for trade in trades {
            totals.volume = saturating_add(totals.volume, trade.size, "total_volume");

            let Some(net) = self.calculator.net_pnl(trade) else {
                totals.open += 1;
                continue;
            };

            totals.closed += 1;
            totals.net_pnl = saturating_add(totals.net_pnl, net, "net_pnl");
            totals.commission = saturating_add(totals.commission, trade.commission.abs(), "total_commission");
            totals.swap = saturating_add(totals.swap, trade.swap, "total_swap");

            let won = net > Decimal::ZERO;
            if won {
                totals.wins += 1;
                totals.gross_profit = saturating_add(totals.gross_profit, net, "gross_profit");
            } else if net < Decimal::ZERO {
                totals.losses += 1;
                totals.gross_loss = saturating_add(totals.gross_loss, net.abs(), "gross_loss");
            } else {
                totals.scratches += 1;
            }

            match trade.side {
                Side::Buy => {
                    totals.long_closed += 1;
                    totals.long_wins += u64::from(won);
                }
                Side::Sell => {
                    totals.short_closed += 1;
                    totals.short_wins += u64::from(won);
                }
            }

            totals.max_trade_profit = Some(totals.max_trade_profit.map_or(net, |m| m.max(net)));
            totals.max_trade_loss = Some(totals.max_trade_loss.map_or(net, |m| m.min(net)));

            if let Some(held) = trade.hold_time() {
                totals.longest_hold_secs = totals.longest_hold_secs.max(held.num_seconds());
            }
            if let Some(r) = self.calculator.r_multiple(trade) {
                totals.r_multiples.push(r);
            }
        }

        totals
    }

    /// Longest win and loss runs over closed trades in chronological order.
    fn calculate_streaks(&self, trades: &[Trade]) -> (u64, u64) {
        let mut ordered: Vec<&Trade> = trades.iter().collect();
        ordered.sort_by_key(|t| (t.date, t.time, t.close_time));
        consecutive_streaks(ordered.into_iter().filter_map(|t| self.calculator.net_pnl(t)))
    }

    fn average_hold_secs(daily: &[DailyBucket]) -> i64 {
        let total_secs = daily
            .iter()
            .fold(0i64, |total, d| total.saturating_add(d.hold_time_secs));
        let timed: u64 = daily.iter().map(|d| d.timed_trade_count).sum();
        i64::try_from(timed)
            .ok()
            .filter(|&n| n > 0)
            .map_or(0, |n| total_secs / n)
    }
}

/// Composite score: `win% * 0.4 + profit_factor * 10 + (expectancy > 0 ? 20 : 0)`,
/// clamped to 0-100.
#[must_use]
pub fn composite_score(
    win_percentage: Decimal,
    profit_factor: ProfitFactor,
    expectancy: Decimal,
) -> Decimal {
    let bonus = if expectancy > Decimal::ZERO {
        SCORE_POSITIVE_EXPECTANCY_BONUS
    } else {
        Decimal::ZERO
    };
    let raw = win_percentage
        .checked_mul(SCORE_WIN_RATE_WEIGHT)
        .zip(profit_factor.score_value().checked_mul(SCORE_PROFIT_FACTOR_WEIGHT))
        .and_then(|(a, b)| a.checked_add(b))
        .and_then(|s| s.checked_add(bonus))
        .unwrap_or(SCORE_MAX);
    raw.clamp(SCORE_MIN, SCORE_MAX)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::trade::InstrumentClass;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn stock(date: NaiveDate, side: Side, net: Decimal) -> Trade {
        let entry = dec!(100);
        let exit = match side {
            Side::Buy => entry + net,
            Side::Sell => entry - net,
        };
        Trade::new(date, "AAPL", InstrumentClass::UsStock, side, entry, dec!(1)).closed_at(exit)
    }

    fn mixed_day() -> Vec<Trade> {
        vec![
            stock(day(4), Side::Buy, dec!(50)),
            stock(day(4), Side::Buy, dec!(30)),
            stock(day(4), Side::Sell, dec!(20)),
            stock(day(4), Side::Sell, dec!(-40)),
            stock(day(4), Side::Buy, dec!(-10)),
        ]
    }

    #[test]
    fn test_empty_trades_baseline() {
        let snapshot = PerformanceMetricsEngine::default().snapshot(&[]);
        assert_eq!(snapshot, PerformanceSnapshot::default());
        assert_eq!(snapshot.profit_factor.to_string(), "-");
        assert_eq!(snapshot.avg_hold_time, "0h 0m");
    }

    #[test]
    fn test_mixed_day_headline_metrics() {
        let snapshot = PerformanceMetricsEngine::default().snapshot(&mixed_day());

        assert_eq!(snapshot.total_trades, 5);
        assert_eq!(snapshot.winning_trades, 3);
        assert_eq!(snapshot.losing_trades, 2);
        assert_eq!(snapshot.win_percentage, dec!(60));
        assert_eq!(snapshot.profit_factor, ProfitFactor::Ratio(dec!(2)));
        assert_eq!(snapshot.profit_factor.to_string(), "2.00");
        assert_eq!(snapshot.net_pnl, dec!(50));
        assert_eq!(snapshot.gross_profit, dec!(100));
        assert_eq!(snapshot.gross_loss, dec!(50));
        assert_eq!(snapshot.avg_loss, dec!(-25));
        assert_eq!(snapshot.max_trade_profit, dec!(50));
        assert_eq!(snapshot.max_trade_loss, dec!(-40));
        assert_eq!(snapshot.trading_days, 1);
        assert_eq!(snapshot.max_daily_profit, dec!(50));
        assert_eq!(snapshot.avg_daily_win_percentage, dec!(60));
    }

    #[test]
    fn test_expectancy_and_score() {
        let snapshot = PerformanceMetricsEngine::default().snapshot(&mixed_day());

        // 33.33 * 0.6 - 25 * 0.4 = 10
        assert!((snapshot.trade_expectancy - dec!(10)).abs() < dec!(0.0000001));
        // 60 * 0.4 + 2 * 10 + 20
        assert_eq!(snapshot.score, dec!(64));
    }

    #[test]
    fn test_side_win_percentages() {
        let snapshot = PerformanceMetricsEngine::default().snapshot(&mixed_day());
        // Longs: +50, +30, -10. Shorts: +20, -40.
        assert!((snapshot.longs_win_percentage - dec!(66.666666)).abs() < dec!(0.0001));
        assert_eq!(snapshot.shorts_win_percentage, dec!(50));
    }

    #[test]
    fn test_only_wins_uses_capped_sentinel() {
        let trades = vec![
            stock(day(4), Side::Buy, dec!(10)),
            stock(day(5), Side::Buy, dec!(15)),
        ];
        let snapshot = PerformanceMetricsEngine::default().snapshot(&trades);

        assert_eq!(snapshot.profit_factor, ProfitFactor::NoLosses);
        assert_eq!(snapshot.profit_factor.to_string(), "2+");
        assert_eq!(snapshot.avg_loss, Decimal::ZERO);
        // 100 * 0.4 + 2 * 10 + 20
        assert_eq!(snapshot.score, dec!(80));
    }

    #[test]
    fn test_only_losses_profit_factor_zero() {
        let trades = vec![stock(day(4), Side::Buy, dec!(-10))];
        let snapshot = PerformanceMetricsEngine::default().snapshot(&trades);

        assert_eq!(snapshot.profit_factor, ProfitFactor::Ratio(Decimal::ZERO));
        assert_eq!(snapshot.win_percentage, Decimal::ZERO);
        assert_eq!(snapshot.score, Decimal::ZERO);
    }

    #[test]
    fn test_only_open_trades() {
        let open = Trade::new(day(4), "AAPL", InstrumentClass::UsStock, Side::Buy, dec!(100), dec!(5));
        let snapshot = PerformanceMetricsEngine::default().snapshot(&[open]);

        assert_eq!(snapshot.open_trades, 1);
        assert_eq!(snapshot.total_trades, 0);
        assert_eq!(snapshot.total_volume, dec!(5));
        assert_eq!(snapshot.profit_factor, ProfitFactor::Undefined);
        assert_eq!(snapshot.trading_days, 0);
    }

    #[test]
    fn test_daily_extremes_and_cumulative_drawdown() {
        let trades = vec![
            stock(day(4), Side::Buy, dec!(100)),
            stock(day(5), Side::Buy, dec!(-60)),
            stock(day(6), Side::Buy, dec!(-30)),
            stock(day(7), Side::Buy, dec!(50)),
        ];
        let snapshot = PerformanceMetricsEngine::default().snapshot(&trades);

        assert_eq!(snapshot.max_daily_profit, dec!(100));
        assert_eq!(snapshot.max_daily_loss, dec!(-60));
        assert_eq!(snapshot.max_daily_net_drawdown, dec!(-60));
        assert_eq!(snapshot.avg_daily_net_drawdown, dec!(15));
        assert_eq!(snapshot.max_cumulative_drawdown, dec!(90));
        assert_eq!(snapshot.trading_days, 4);
    }

    #[test]
    fn test_streaks_follow_chronological_order() {
        // Input order is shuffled; by date it reads W W L L L W.
        let trades = vec![
            stock(day(9), Side::Buy, dec!(5)),
            stock(day(4), Side::Buy, dec!(5)),
            stock(day(6), Side::Buy, dec!(-5)),
            stock(day(5), Side::Buy, dec!(5)),
            stock(day(8), Side::Buy, dec!(-5)),
            stock(day(7), Side::Buy, dec!(-5)),
        ];
        let snapshot = PerformanceMetricsEngine::default().snapshot(&trades);
        assert_eq!(snapshot.max_consecutive_wins, 2);
        assert_eq!(snapshot.max_consecutive_losses, 3);
    }

    #[test]
    fn test_hold_time_average_and_longest() {
        let at = |h: u32, m: u32| Utc.with_ymd_and_hms(2024, 3, 4, h, m, 0).unwrap();
        let trades = vec![
            stock(day(4), Side::Buy, dec!(5)).held(at(9, 0), at(11, 0)),
            stock(day(4), Side::Buy, dec!(5)).held(at(9, 0), at(10, 0)),
        ];
        let snapshot = PerformanceMetricsEngine::default().snapshot(&trades);

        assert_eq!(snapshot.avg_hold_time, "1h 30m");
        assert_eq!(snapshot.avg_hold_time_secs, 5400);
        assert_eq!(snapshot.longest_trade_duration, "2h 0m");
    }

    #[test]
    fn test_hold_time_policy_exclude() {
        let at = |h: u32| Utc.with_ymd_and_hms(2024, 3, 4, h, 0, 0).unwrap();
        let trades = vec![
            stock(day(4), Side::Buy, dec!(5)).held(at(9), at(11)),
            stock(day(4), Side::Buy, dec!(5)),
        ];

        let zero = PerformanceMetricsEngine::default().snapshot(&trades);
        assert_eq!(zero.avg_hold_time, "1h 0m");

        let mut config = AnalyticsConfig::default();
        config.metrics.hold_time_policy = HoldTimePolicy::Exclude;
        let excluded = PerformanceMetricsEngine::new(&config).snapshot(&trades);
        assert_eq!(excluded.avg_hold_time, "2h 0m");
    }

    #[test]
    fn test_r_multiples() {
        let trades = vec![
            stock(day(4), Side::Buy, dec!(20)).with_stop(dec!(90)),
            stock(day(4), Side::Buy, dec!(-10)).with_stop(dec!(90)),
            stock(day(4), Side::Buy, dec!(5)),
        ];
        let snapshot = PerformanceMetricsEngine::default().snapshot(&trades);

        assert_eq!(snapshot.r_multiple_trades, 2);
        assert_eq!(snapshot.total_r_multiple, dec!(1));
        assert_eq!(snapshot.avg_r_multiple, dec!(0.5));
    }

    #[test]
    fn test_costs_totals() {
        let trades = vec![stock(day(4), Side::Buy, dec!(10)).with_costs(dec!(-2), dec!(1))];
        let snapshot = PerformanceMetricsEngine::default().snapshot(&trades);

        assert_eq!(snapshot.net_pnl, dec!(9));
        assert_eq!(snapshot.total_commission, dec!(2));
        assert_eq!(snapshot.total_swap, dec!(1));
    }

    #[test]
    fn test_totals_beyond_decimal_range_saturate() {
        let huge = Trade::new(day(4), "WIDGET", InstrumentClass::Other, Side::Buy, Decimal::ZERO, dec!(1))
            .closed_at(dec!(40000000000000000000000000000));
        let snapshot = PerformanceMetricsEngine::default().snapshot(&[huge.clone(), huge]);

        assert_eq!(snapshot.total_trades, 2);
        assert_eq!(snapshot.net_pnl, Decimal::MAX);
        assert_eq!(snapshot.gross_profit, Decimal::MAX);
        assert_eq!(snapshot.max_daily_profit, Decimal::MAX);
        assert_eq!(snapshot.profit_factor, ProfitFactor::NoLosses);
        assert_eq!(snapshot.score, dec!(80));
    }

    #[test]
    fn test_report_matches_individual_entry_points() {
        let engine = PerformanceMetricsEngine::default();
        let trades = mixed_day();
        let report = engine.report(2024, 3, &trades);

        assert_eq!(report.snapshot, engine.snapshot(&trades));
        assert_eq!(report.daily, engine.daily_buckets(&trades));
        assert_eq!(report.weeks, engine.month_grid(2024, 3, &trades));
        assert_eq!(report.weeks[1].net_pnl, dec!(50));
    }

    #[test]
    fn test_composite_score_clamps() {
        assert_eq!(
            composite_score(dec!(100), ProfitFactor::Ratio(dec!(50)), dec!(1)),
            SCORE_MAX
        );
        assert_eq!(
            composite_score(dec!(0), ProfitFactor::Undefined, dec!(-5)),
            SCORE_MIN
        );
    }
}
