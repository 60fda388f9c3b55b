//! Market data types: exchanges, opportunities, system status

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::FilterCriteria;

/// The fixed set of venues opportunities are quoted across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Binance,
    Okx,
    Bybit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeSchedule {
    pub maker: Decimal,
    pub taker: Decimal,
}

impl Exchange {
    pub const ALL: [Exchange; 3] = [Exchange::Binance, Exchange::Okx, Exchange::Bybit];

    pub fn fees(&self) -> FeeSchedule {
        match self {
            Exchange::Binance => FeeSchedule { maker: dec!(0.0002), taker: dec!(0.0004) },
            Exchange::Okx => FeeSchedule { maker: dec!(0.0002), taker: dec!(0.0005) },
            Exchange::Bybit => FeeSchedule { maker: dec!(0.0001), taker: dec!(0.0006) },
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Exchange::Binance => "Binance",
            Exchange::Okx => "OKX",
            Exchange::Bybit => "Bybit",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Exchange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "binance" => Ok(Exchange::Binance),
            "okx" => Ok(Exchange::Okx),
            "bybit" => Ok(Exchange::Bybit),
            other => Err(format!("unknown exchange: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArbitrageType {
    #[serde(rename = "futures-futures")]
    FuturesFutures,
    #[serde(rename = "futures-spot")]
    FuturesSpot,
    #[serde(rename = "spot-spot")]
    SpotSpot,
}

/// A detected price discrepancy between two venues for one trading pair.
///
/// `spot_spread` and `estimated_profit` are derived fields; see
/// `generator::opportunities` for the construction arithmetic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: String,
    pub symbol: String,
    pub buy_exchange: Exchange,
    pub sell_exchange: Exchange,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub spot_spread: Decimal,
    pub buy_bid: Decimal,
    pub buy_ask: Decimal,
    pub buy_spread_percent: Decimal,
    pub sell_bid: Decimal,
    pub sell_ask: Decimal,
    pub sell_spread_percent: Decimal,
    pub estimated_profit: Decimal,
    pub amplitude_24h: Decimal,
    pub volume_24h: Decimal,
    pub buy_funding_rate: Decimal,
    pub sell_funding_rate: Decimal,
    pub funding_end_time: DateTime<Utc>,
    pub funding_cycle: String,
    pub position_size: Decimal,
    #[serde(rename = "type")]
    pub arbitrage_type: ArbitrageType,
    pub confidence: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityBatch {
    pub opportunities: Vec<Opportunity>,
    pub total_count: usize,
    pub filters_applied: FilterCriteria,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    pub status: String,
    pub active_strategies: u32,
    pub total_opportunities: u32,
    pub today_profit: Decimal,
    pub total_balance: Decimal,
    pub success_rate: Decimal,
    pub timestamp: DateTime<Utc>,
}
