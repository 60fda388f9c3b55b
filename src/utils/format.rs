//! Text formatting helpers

use chrono::Duration;

/// Elapsed span as display text: "3h 24m", or "24m" under an hour.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_minutes = elapsed.num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_and_minutes() {
        assert_eq!(format_elapsed(Duration::minutes(204)), "3h 24m");
        assert_eq!(format_elapsed(Duration::minutes(60)), "1h 0m");
        assert_eq!(format_elapsed(Duration::minutes(24)), "24m");
        assert_eq!(format_elapsed(Duration::seconds(59)), "0m");
        assert_eq!(format_elapsed(Duration::seconds(-5)), "0m");
    }
}
