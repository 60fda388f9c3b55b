//! Order and execution request types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ArbitrageType, Exchange, FilterCriteria};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Filled,
    Partial,
    Pending,
    Cancelled,
    Closing,
}

/// One leg of an arbitrage pair. Legs sharing an `arbitrage_id` were opened
/// together: one buy, one sell, on different venues.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub arbitrage_id: String,
    pub symbol: String,
    pub exchange: Exchange,
    pub side: Side,
    pub arbitrage_type: ArbitrageType,
    pub price: Decimal,
    pub status: OrderStatus,
    pub amount: Decimal,
    pub quantity: Decimal,
    pub fee_open: Decimal,
    pub fee_close: Decimal,
    pub funding_rate: Decimal,
    pub pnl: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBatch {
    pub orders: Vec<Order>,
    pub total_count: usize,
    pub filters_applied: FilterCriteria,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub opportunity_id: String,
    pub symbol: String,
    pub buy_exchange: Exchange,
    pub sell_exchange: Exchange,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub success: bool,
    pub order_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseRequest {
    /// Close at market if true, otherwise wait for the spread to converge.
    pub at_market: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseResponse {
    pub success: bool,
    pub message: String,
}
