//! Screening criteria and persisted UI preferences

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ArbitrageType, Exchange};
use crate::config::{Config, MIN_PROFIT_DEFAULT, MIN_SPREAD_DEFAULT, OPEN_SPREAD_THRESHOLD_DEFAULT};

/// Value object describing which opportunities to keep.
///
/// Deserialization fills any missing field from the documented defaults, so a
/// partially-specified criteria payload never yields partially-applied
/// constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub arbitrage_type: ArbitrageType,
    pub min_spread: Decimal,
    pub min_profit: Decimal,
    /// Exact-match symbol constraint; empty means unconstrained.
    pub symbol_filter: String,
    /// Exact-match constraint on the buy leg venue.
    pub exchange_a: Option<Exchange>,
    /// Exact-match constraint on the sell leg venue.
    pub exchange_b: Option<Exchange>,
    /// Funding settlement cycle constraint; empty means unconstrained.
    pub funding_period: String,
    pub open_spread_threshold: Decimal,
}

impl FilterCriteria {
    /// Criteria with the screening floors taken from configuration, used on
    /// first runs before any criteria have been persisted.
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_spread: config.min_spread,
            min_profit: config.min_profit,
            ..Self::default()
        }
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            arbitrage_type: ArbitrageType::FuturesFutures,
            min_spread: MIN_SPREAD_DEFAULT,
            min_profit: MIN_PROFIT_DEFAULT,
            symbol_filter: String::new(),
            exchange_a: None,
            exchange_b: None,
            funding_period: String::new(),
            open_spread_threshold: OPEN_SPREAD_THRESHOLD_DEFAULT,
        }
    }
}

/// Persisted UI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub auto_refresh: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { auto_refresh: true }
    }
}
