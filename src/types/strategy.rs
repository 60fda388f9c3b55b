//! Active strategy types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Exchange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategySide {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyStatus {
    Running,
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Strategy {
    pub id: String,
    pub symbol: String,
    pub exchange: Exchange,
    #[serde(rename = "type")]
    pub side: StrategySide,
    /// Elapsed running time as display text, e.g. "3h 24m".
    pub duration: String,
    pub pnl: Decimal,
    pub pnl_percent: Decimal,
    pub status: StrategyStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyBatch {
    pub strategies: Vec<Strategy>,
    pub total_count: usize,
}
