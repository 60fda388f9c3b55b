//! Arb Sentinel - Main Entry Point
//!
//! Periodically regenerates the simulated opportunity set, screens it
//! against the persisted criteria, and reports what a trader would see.

use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time;
use tracing::{error, info};

use arb_sentinel::*;
use arb_sentinel::storage::JsonFileStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let _logging_guard = utils::setup_logging("output/logs")?;

    // Load configuration
    let config = Config::load();

    info!("📡 Arb Sentinel v0.3.0 - Simulated Arbitrage Monitor");
    info!("📋 Configuration:");
    info!("   Update Interval: {}s", config.update_interval_secs);
    info!("   Min Spread: {}%", config.min_spread);
    info!("   Min Profit: {}%", config.min_profit);
    info!("   State Directory: {}", config.state_dir);
    info!("   API Base URL: {}", config.api_base_url);
    info!("   Stream URL: {} (reconnects: {})", config.stream_url, config.max_reconnect_attempts);

    // Construct the application context on file-backed persistence
    let backend = Arc::new(JsonFileStore::new(&config.state_dir)?);
    let mut context = AppContext::new(config.clone(), backend)?;

    info!(
        "✅ Context ready: {} saved rule(s), auto refresh {}",
        context.rules.list().len(),
        if context.settings().auto_refresh { "on" } else { "off" }
    );

    // Setup monitoring state
    let start_time = Instant::now();
    let mut state = MonitoringState::new();

    // Setup shutdown handler
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();
    let shutdown_tx = Arc::new(tokio::sync::Mutex::new(Some(shutdown_tx)));

    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        info!("\n📛 Received shutdown signal (Ctrl+C)...");
        if let Some(tx) = shutdown_tx.lock().await.take() {
            let _ = tx.send(());
        }
    });

    info!("\n🚀 Starting monitoring loop...\n");

    let mut interval = time::interval(Duration::from_secs(config.update_interval_secs));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Err(e) = run_refresh_cycle(&mut context, &mut state, start_time) {
                    error!("Refresh cycle error: {}", e);
                }
            }
            _ = &mut shutdown_rx => {
                info!("Shutdown signal received, exiting main loop...");
                break;
            }
        }
    }

    print_final_statistics(start_time, &state, &context);

    Ok(())
}

/// Monitoring state to track statistics
struct MonitoringState {
    total_cycles: u64,
    total_opportunities: u64,
    screened_opportunities: u64,
}

impl MonitoringState {
    fn new() -> Self {
        Self {
            total_cycles: 0,
            total_opportunities: 0,
            screened_opportunities: 0,
        }
    }
}

/// Run a single refresh cycle
fn run_refresh_cycle(
    context: &mut AppContext,
    state: &mut MonitoringState,
    start_time: Instant,
) -> MonitorResult<()> {
    if !context.settings().auto_refresh {
        info!("⏸  Auto refresh disabled, idling");
        return Ok(());
    }

    let generated = context.refresh();
    let screened = context.screened();

    state.total_cycles += 1;
    state.total_opportunities += generated as u64;
    state.screened_opportunities += screened.len() as u64;

    info!(
        "🔍 Cycle {}: {} generated, {} passed screening (min profit {}%)",
        state.total_cycles,
        generated,
        screened.len(),
        context.criteria().min_profit
    );

    for opp in screened.iter().take(5) {
        utils::print_opportunity(opp);
    }

    if state.total_cycles % 10 == 0 {
        utils::print_session_stats(
            start_time,
            state.total_cycles,
            state.total_opportunities,
            state.screened_opportunities,
            context.rules.list().len(),
        );
    }

    Ok(())
}

/// Print final statistics on shutdown
fn print_final_statistics(start_time: Instant, state: &MonitoringState, context: &AppContext) {
    info!("\n🛑 Shutting down gracefully...");
    info!("Final statistics:");
    info!("   Total runtime: {:?}", start_time.elapsed());
    info!("   Refresh cycles: {}", state.total_cycles);
    info!("   Opportunities generated: {}", state.total_opportunities);
    info!("   Passed screening: {}", state.screened_opportunities);
    info!("   Saved rules: {}", context.rules.list().len());
}
