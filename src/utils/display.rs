//! Display and printing utilities

use std::time::Instant;
use tracing::info;

use crate::types::Opportunity;

pub fn print_opportunity(opp: &Opportunity) {
    info!(
        "💹 {} | {} -> {} | Spread: {:.3}% | Est. Profit: {:.3}% | Conf: {:.0}",
        opp.symbol,
        opp.buy_exchange,
        opp.sell_exchange,
        opp.spot_spread,
        opp.estimated_profit,
        opp.confidence
    );
}

pub fn print_session_stats(
    start_time: Instant,
    total_cycles: u64,
    total_opportunities: u64,
    screened_opportunities: u64,
    rule_count: usize,
) {
    let runtime = start_time.elapsed().as_secs() / 60;

    info!("\n📊 Session Statistics ({} minutes)", runtime);
    info!("   Refresh cycles: {}", total_cycles);
    info!("   Opportunities generated: {}", total_opportunities);
    info!("   Passed screening: {}", screened_opportunities);
    info!("   Screening pass rate: {:.1}%",
        if total_opportunities > 0 {
            (screened_opportunities as f64 / total_opportunities as f64) * 100.0
        } else {
            0.0
        }
    );
    info!("   Active rules: {}", rule_count);
    info!("");
}
