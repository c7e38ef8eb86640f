//! Per-trade pricing: instrument parameter resolution and realized P&L.
//!
//! [`InstrumentPricingResolver`] turns a symbol and declared class into
//! [`PricingParams`]; [`ProfitCalculator`] applies the class formula on top.
//! Unrecognised instruments resolve to [`PricingParams::neutral`] and use
//! the generic `(exit - entry) * size` formula.

mod constants;
mod profit;
mod resolver;

pub use constants::{
    JPY_PIP_MULTIPLIER, METAL_CONTRACT_MULTIPLIER, METAL_PREFIXES, STANDARD_LOT,
    STANDARD_PIP_MULTIPLIER,
};
pub use profit::ProfitCalculator;
pub use resolver::{InstrumentPricingResolver, PricingParams, QuoteClass, normalize_symbol};
