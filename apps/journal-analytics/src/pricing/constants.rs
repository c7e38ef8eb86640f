//! Decimal constants for instrument pricing.

use rust_decimal::Decimal;

/// Pips per unit of price for JPY-quoted pairs.
pub const JPY_PIP_MULTIPLIER: Decimal = Decimal::ONE_HUNDRED;
/// Pips per unit of price for every other pair.
pub const STANDARD_PIP_MULTIPLIER: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);
/// Units per lot for metals (troy ounces).
pub const METAL_CONTRACT_MULTIPLIER: Decimal = Decimal::ONE_HUNDRED;
/// Units per standard forex lot.
pub const STANDARD_LOT: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
/// Symbol prefixes that identify metals.
pub const METAL_PREFIXES: [&str; 2] = ["XAU", "XAG"];
