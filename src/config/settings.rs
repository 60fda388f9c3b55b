//! Monitor configuration settings and environment variable handling

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use std::env;
use std::str::FromStr;

// Screening constants
pub const MIN_SPREAD_DEFAULT: Decimal = dec!(0.05);
pub const MIN_PROFIT_DEFAULT: Decimal = dec!(0.02);
pub const OPEN_SPREAD_THRESHOLD_DEFAULT: Decimal = dec!(0.06);

// Fee charged across both legs of a round trip, in percent. Subtracted from
// the spot spread when estimating profit.
pub const ROUND_TRIP_FEE_PCT: Decimal = dec!(0.04);

// Funding settlement cycle for perpetual legs
pub const FUNDING_CYCLE_HOURS: i64 = 8;
pub const FUNDING_CYCLE_LABEL: &str = "8H";

// Polling Constants
pub const DEFAULT_UPDATE_INTERVAL_SECS: u64 = 30;
pub const MIN_UPDATE_INTERVAL_SECS: u64 = 2;
pub const MAX_UPDATE_INTERVAL_SECS: u64 = 300;

// Stream Client Constants
pub const DEFAULT_RECONNECT_DELAY_MS: u64 = 5000;
pub const DEFAULT_MAX_RECONNECT_ATTEMPTS: u32 = 10;

// API Client Constants
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_API_RETRIES: u32 = 3;

pub const SUPPORTED_SYMBOLS: [&str; 4] = ["BTC-USDT", "ETH-USDT", "ADA-USDT", "SOL-USDT"];

#[derive(Debug, Clone)]
pub struct Config {
    pub update_interval_secs: u64,
    pub min_spread: Decimal,
    pub min_profit: Decimal,
    // API Configuration
    pub api_base_url: String,
    pub api_timeout_secs: u64,
    pub api_max_retries: u32,
    // Stream Configuration
    pub stream_url: String,
    pub reconnect_delay_ms: u64,
    pub max_reconnect_attempts: u32,
    // Persistence Configuration
    pub state_dir: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            update_interval_secs: env::var("UPDATE_INTERVAL_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_UPDATE_INTERVAL_SECS)
                .max(MIN_UPDATE_INTERVAL_SECS)
                .min(MAX_UPDATE_INTERVAL_SECS),
            min_spread: env::var("MIN_SPREAD")
                .ok()
                .and_then(|s| Decimal::from_str(&s).ok())
                .unwrap_or(MIN_SPREAD_DEFAULT),
            min_profit: env::var("MIN_PROFIT")
                .ok()
                .and_then(|s| Decimal::from_str(&s).ok())
                .unwrap_or(MIN_PROFIT_DEFAULT),
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/api/v1".to_string()),
            api_timeout_secs: env::var("API_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_API_TIMEOUT_SECS),
            api_max_retries: env::var("API_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_API_RETRIES),
            stream_url: env::var("STREAM_URL")
                .unwrap_or_else(|_| "ws://localhost:8080/ws".to_string()),
            reconnect_delay_ms: env::var("RECONNECT_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_RECONNECT_DELAY_MS),
            max_reconnect_attempts: env::var("MAX_RECONNECT_ATTEMPTS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_RECONNECT_ATTEMPTS),
            state_dir: env::var("STATE_DIR")
                .unwrap_or_else(|_| "output/state".to_string()),
        }
    }
}
