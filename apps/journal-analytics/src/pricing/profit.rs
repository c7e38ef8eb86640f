//! Realized profit calculation per instrument class.

use rust_decimal::Decimal;
use tracing::warn;

use super::resolver::{InstrumentPricingResolver, PricingParams, QuoteClass};
use crate::config::PricingConfig;
use crate::numeric::guard;
use crate::trade::{InstrumentClass, Trade};

/// Computes realized profit for individual trades.
///
/// All arithmetic is checked; an undefined intermediate result (division by
/// a zero exit price, overflow) yields zero profit instead of propagating.
/// Results are full precision. Rounding is left to the presentation
/// boundary.
#[derive(Debug, Clone, Default)]
pub struct ProfitCalculator {
    resolver: InstrumentPricingResolver,
}

impl ProfitCalculator {
    /// Create a calculator from pricing configuration.
    #[must_use]
    pub fn new(config: &PricingConfig) -> Self {
        Self {
            resolver: InstrumentPricingResolver::new(config),
        }
    }

    /// The underlying pricing resolver.
    #[must_use]
    pub const fn resolver(&self) -> &InstrumentPricingResolver {
        &self.resolver
    }

    /// Realized profit before commission and swap, or `None` while the
    /// trade is open.
    #[must_use]
    pub fn realized_profit(&self, trade: &Trade) -> Option<Decimal> {
        trade.exit_price.map(|exit| self.profit_at(trade, exit))
    }

    /// Net P&L: `profit + swap - |commission|`, or `None` while open.
    #[must_use]
    pub fn net_pnl(&self, trade: &Trade) -> Option<Decimal> {
        let profit = self.realized_profit(trade)?;
        Some(guard(
            profit
                .checked_add(trade.swap)
                .and_then(|p| p.checked_sub(trade.commission.abs())),
            "net_pnl",
        ))
    }

    /// Amount at risk: the loss the trade would realise at its initial
    /// stop, as a positive value. `None` without a stop or when the stop
    /// implies no risk.
    #[must_use]
    pub fn risk_amount(&self, trade: &Trade) -> Option<Decimal> {
        let stop = trade.stop_loss?;
        let risk = self.profit_at(trade, stop).abs();
        (risk > Decimal::ZERO).then_some(risk)
    }

    /// R-multiple: net P&L divided by the amount at risk.
    #[must_use]
    pub fn r_multiple(&self, trade: &Trade) -> Option<Decimal> {
        let net = self.net_pnl(trade)?;
        let risk = self.risk_amount(trade)?;
        net.checked_div(risk)
    }

    /// Profit if the trade were closed at `exit`.
    ///
    /// Zero for a trade whose recorded prices were unrepresentable.
    #[must_use]
    pub fn profit_at(&self, trade: &Trade, exit: Decimal) -> Decimal {
        if !trade.prices_valid {
            warn!(symbol = %trade.symbol, id = ?trade.id, "invalid recorded prices, profit treated as zero");
            return Decimal::ZERO;
        }

        let params = self.resolver.resolve(&trade.symbol, trade.instrument_class);
        if params.is_neutral() {
            return linear_profit(trade, exit);
        }

        match trade.instrument_class {
            InstrumentClass::Forex => forex_profit(trade, exit, &params),
            InstrumentClass::UsStock | InstrumentClass::IndianStock => {
                equity_profit(trade, exit, &params)
            }
            InstrumentClass::Crypto | InstrumentClass::Other => linear_profit(trade, exit),
        }
    }
}

/// `(exit - entry) * size`, sign-inverted for sells.
///
/// Serves crypto, unclassified instruments and anything the resolver left
/// neutral.
fn linear_profit(trade: &Trade, exit: Decimal) -> Decimal {
    guard(
        exit.checked_sub(trade.entry_price)
            .and_then(|delta| delta.checked_mul(trade.size))
            .and_then(|raw| raw.checked_mul(trade.side.direction())),
        "linear_profit",
    )
}

fn forex_profit(trade: &Trade, exit: Decimal, params: &PricingParams) -> Decimal {
    let directional_pips = exit
        .checked_sub(trade.entry_price)
        .and_then(|delta| delta.checked_mul(params.pip_multiplier))
        .and_then(|pips| pips.checked_mul(trade.side.direction()));
    let contract_size = trade.size.checked_mul(params.contract_multiplier);

    let quote_profit = guard(
        directional_pips
            .zip(contract_size)
            .and_then(|(pips, contract)| pips.checked_mul(contract))
            .and_then(|value| value.checked_div(params.pip_multiplier)),
        "forex_profit",
    );

    match params.quote {
        QuoteClass::QuotedInAccount | QuoteClass::NotApplicable => quote_profit,
        QuoteClass::BasedInAccount => guard(quote_profit.checked_div(exit), "forex_base_conversion"),
        QuoteClass::Cross => match params.conversion_rate {
            Some(rate) => guard(quote_profit.checked_mul(rate), "forex_cross_conversion"),
            None => {
                warn!(symbol = %trade.symbol, "no conversion rate for cross pair, profit treated as zero");
                Decimal::ZERO
            }
        },
    }
}

fn equity_profit(trade: &Trade, exit: Decimal, params: &PricingParams) -> Decimal {
    let local = linear_profit(trade, exit);
    match params.conversion_rate {
        Some(rate) => guard(local.checked_div(rate), "equity_conversion"),
        None => {
            warn!(symbol = %trade.symbol, "no conversion rate for listing currency, profit treated as zero");
            Decimal::ZERO
        }
    }
}
