//! User-authored arbitrage rule types
//!
//! Rules are exported/imported as JSON files, so the serialized field names
//! stay camelCase to match the interchange format.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Exchange;

/// Entry/exit thresholds for a semi-automated arbitrage strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub name: String,
    /// Trading pair the rule applies to, or "ALL".
    pub symbol: String,
    pub long_exchange: Exchange,
    pub short_exchange: Exchange,
    pub min_profit: Decimal,
    pub max_order_amount: Decimal,
    pub take_profit_percentage: Decimal,
    pub stop_loss_percentage: Decimal,
    pub max_floating_loss: Decimal,
    pub max_holding_time_hours: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user-editable fields of a rule; ids and timestamps are generated by
/// the store at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDraft {
    pub name: String,
    pub symbol: String,
    pub long_exchange: Exchange,
    pub short_exchange: Exchange,
    pub min_profit: Decimal,
    pub max_order_amount: Decimal,
    pub take_profit_percentage: Decimal,
    pub stop_loss_percentage: Decimal,
    pub max_floating_loss: Decimal,
    pub max_holding_time_hours: Decimal,
}

impl Rule {
    /// Re-derive the draft view, used when an edit re-saves a rule.
    pub fn draft(&self) -> RuleDraft {
        RuleDraft {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            long_exchange: self.long_exchange,
            short_exchange: self.short_exchange,
            min_profit: self.min_profit,
            max_order_amount: self.max_order_amount,
            take_profit_percentage: self.take_profit_percentage,
            stop_loss_percentage: self.stop_loss_percentage,
            max_floating_loss: self.max_floating_loss,
            max_holding_time_hours: self.max_holding_time_hours,
        }
    }
}
