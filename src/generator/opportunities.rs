//! Mock opportunity generation

use chrono::{Duration, Utc};
use rand::Rng;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::config::{FUNDING_CYCLE_HOURS, FUNDING_CYCLE_LABEL, ROUND_TRIP_FEE_PCT, SUPPORTED_SYMBOLS};
use crate::types::{ArbitrageType, Exchange, FilterCriteria, Opportunity, OpportunityBatch};

use super::to_decimal;

/// Generate a randomized batch of opportunities, pre-sorted by descending
/// estimated profit.
///
/// Buy and sell prices are perturbed independently from a shared base price,
/// so the spot spread can come out negative. All derived fields
/// (`spot_spread`, leg spread percentages, `estimated_profit`) are computed
/// from the generated prices, never drawn independently.
pub fn generate_opportunities(criteria: &FilterCriteria) -> OpportunityBatch {
    let mut rng = rand::rng();
    let count = rng.random_range(12..20);
    let now = Utc::now();

    let mut opportunities: Vec<Opportunity> = (0..count)
        .map(|i| {
            let symbol = SUPPORTED_SYMBOLS[i % SUPPORTED_SYMBOLS.len()];
            let buy_exchange = Exchange::ALL[i % Exchange::ALL.len()];
            let sell_exchange = Exchange::ALL[(i + 1) % Exchange::ALL.len()];

            let base_price = rng.random_range(20000.0..70000.0);
            let buy_price = to_decimal(base_price * (1.0 + rng.random_range(-0.00175..0.00175)));
            let sell_price = to_decimal(base_price * (1.0 + rng.random_range(-0.00175..0.00175)));

            let buy_bid = buy_price * (dec!(1) - to_decimal(rng.random_range(0.00001..0.0002)));
            let buy_ask = buy_price * (dec!(1) + to_decimal(rng.random_range(0.00001..0.0002)));
            let sell_bid = sell_price * (dec!(1) - to_decimal(rng.random_range(0.00001..0.0002)));
            let sell_ask = sell_price * (dec!(1) + to_decimal(rng.random_range(0.00001..0.0002)));

            let spot_spread = (sell_price - buy_price) / buy_price * dec!(100);
            let buy_spread_percent = (buy_ask - buy_bid) / buy_bid * dec!(100);
            let sell_spread_percent = (sell_ask - sell_bid) / sell_bid * dec!(100);
            let estimated_profit =
                spot_spread - (buy_spread_percent + sell_spread_percent) / dec!(2) - ROUND_TRIP_FEE_PCT;

            let settlement_offset = rng.random_range(0..FUNDING_CYCLE_HOURS * 3600);

            Opportunity {
                id: format!("OPP_{}", Uuid::new_v4()),
                symbol: symbol.to_string(),
                buy_exchange,
                sell_exchange,
                buy_price,
                sell_price,
                spot_spread,
                buy_bid,
                buy_ask,
                buy_spread_percent,
                sell_bid,
                sell_ask,
                sell_spread_percent,
                estimated_profit,
                amplitude_24h: to_decimal(rng.random_range(2.0..10.0)),
                volume_24h: to_decimal(rng.random_range(500_000.0..10_500_000.0)).round_dp(0),
                buy_funding_rate: to_decimal(rng.random_range(-0.0002..0.0002)),
                sell_funding_rate: to_decimal(rng.random_range(-0.0002..0.0002)),
                funding_end_time: now + Duration::seconds(settlement_offset),
                funding_cycle: FUNDING_CYCLE_LABEL.to_string(),
                position_size: to_decimal(rng.random_range(2.0..10.0)),
                arbitrage_type: ArbitrageType::FuturesFutures,
                confidence: to_decimal(rng.random_range(60.0..100.0)),
                created_at: now,
            }
        })
        .collect();

    opportunities.sort_by(|a, b| b.estimated_profit.cmp(&a.estimated_profit));

    OpportunityBatch {
        total_count: opportunities.len(),
        opportunities,
        filters_applied: criteria.clone(),
    }
}
