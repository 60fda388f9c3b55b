//! Mock market data generation for tests and demo runs
//!
//! Randomness here is a convenience; the contractual part is the shape of
//! the batches and the numeric consistency of derived fields (spreads,
//! profit, paired order pnl).

pub mod opportunities;
pub mod orders;
pub mod strategies;

pub use opportunities::*;
pub use orders::*;
pub use strategies::*;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Lossy f64 -> Decimal conversion for generated values. Raw randomness
/// carries far more digits than any venue quotes, so round to 8 places.
pub(crate) fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default().round_dp(8)
}
