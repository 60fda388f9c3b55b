//! Mock order record generation

use chrono::{Duration, Utc};
use rand::Rng;
use rand::prelude::IndexedRandom;
use uuid::Uuid;

use crate::config::SUPPORTED_SYMBOLS;
use crate::types::{
    ArbitrageType, Exchange, FilterCriteria, Order, OrderBatch, OrderStatus, Side,
};

use super::to_decimal;

const FILL_STATUSES: [OrderStatus; 3] =
    [OrderStatus::Filled, OrderStatus::Partial, OrderStatus::Cancelled];

/// Generate order records in long/short pairs. Every `arbitrage_id` carries
/// exactly one buy and one sell leg on different venues, sharing symbol,
/// amount and open time, with mirrored pnl.
pub fn generate_orders(criteria: &FilterCriteria) -> OrderBatch {
    let mut rng = rand::rng();
    let pair_count = rng.random_range(5..10);

    let mut orders = Vec::with_capacity(pair_count * 2);
    for i in 0..pair_count {
        let symbol = SUPPORTED_SYMBOLS[i % SUPPORTED_SYMBOLS.len()];
        let arbitrage_id = format!("ARB-{:03}", i + 1);
        let amount = to_decimal(rng.random_range(500.0..2500.0)).round_dp(2);
        let pnl = to_decimal(rng.random_range(-5.0..15.0)).round_dp(4);
        let created_at = Utc::now() - Duration::seconds(rng.random_range(0..7 * 86400));

        let long_exchange = Exchange::ALL[i % Exchange::ALL.len()];
        let short_exchange = Exchange::ALL[(i + 1) % Exchange::ALL.len()];

        let base_price = rng.random_range(40000.0..50000.0);
        let long_price = to_decimal(base_price * (1.0 - rng.random_range(0.0..0.001)));
        let short_price = to_decimal(base_price * (1.0 + rng.random_range(0.0..0.001)));

        let long_fee = (amount * long_exchange.fees().taker).round_dp(4);
        let short_fee = (amount * short_exchange.fees().taker).round_dp(4);

        orders.push(Order {
            id: format!("ORDER_L_{}", Uuid::new_v4()),
            arbitrage_id: arbitrage_id.clone(),
            symbol: symbol.to_string(),
            exchange: long_exchange,
            side: Side::Buy,
            arbitrage_type: ArbitrageType::FuturesFutures,
            price: long_price,
            status: *FILL_STATUSES.choose(&mut rng).unwrap_or(&OrderStatus::Filled),
            amount,
            quantity: (amount / long_price).round_dp(8),
            fee_open: long_fee,
            fee_close: long_fee,
            funding_rate: to_decimal(rng.random_range(-0.0005..0.0005)),
            pnl,
            created_at,
        });

        orders.push(Order {
            id: format!("ORDER_S_{}", Uuid::new_v4()),
            arbitrage_id,
            symbol: symbol.to_string(),
            exchange: short_exchange,
            side: Side::Sell,
            arbitrage_type: ArbitrageType::FuturesFutures,
            price: short_price,
            status: *FILL_STATUSES.choose(&mut rng).unwrap_or(&OrderStatus::Filled),
            amount,
            quantity: (amount / short_price).round_dp(8),
            fee_open: short_fee,
            fee_close: short_fee,
            funding_rate: to_decimal(rng.random_range(-0.0005..0.0005)),
            pnl: -pnl,
            created_at,
        });
    }

    OrderBatch {
        total_count: orders.len(),
        orders,
        filters_applied: criteria.clone(),
    }
}
