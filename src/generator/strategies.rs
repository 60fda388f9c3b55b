//! Mock active strategy generation

use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::config::SUPPORTED_SYMBOLS;
use crate::types::{Exchange, Strategy, StrategyBatch, StrategySide, StrategyStatus};
use crate::utils::format_elapsed;

use super::to_decimal;

/// Generate a batch of currently-running strategies. The duration text is
/// derived from the generated open time so the two never disagree.
pub fn generate_strategies() -> StrategyBatch {
    let mut rng = rand::rng();
    let count = rng.random_range(2..10);
    let now = Utc::now();

    let strategies: Vec<Strategy> = (0..count)
        .map(|i| {
            let opened_at = now - Duration::seconds(rng.random_range(60..86400));
            Strategy {
                id: format!("STRAT_{}", Uuid::new_v4()),
                symbol: SUPPORTED_SYMBOLS[i % SUPPORTED_SYMBOLS.len()].to_string(),
                exchange: Exchange::ALL[i % Exchange::ALL.len()],
                side: if rng.random_bool(0.5) { StrategySide::Long } else { StrategySide::Short },
                duration: format_elapsed(now - opened_at),
                pnl: to_decimal(rng.random_range(-100.0..500.0)).round_dp(2),
                pnl_percent: to_decimal(rng.random_range(-2.0..8.0)).round_dp(2),
                status: if rng.random_bool(0.8) {
                    StrategyStatus::Running
                } else {
                    StrategyStatus::Pending
                },
                created_at: opened_at,
            }
        })
        .collect();

    StrategyBatch {
        total_count: strategies.len(),
        strategies,
    }
}
