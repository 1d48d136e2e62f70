pub mod counters;
pub mod hero_stats;
pub mod leaderboard;
pub mod meta_shift;
pub mod pipeline;
pub mod profile;
pub mod record;
pub mod synergy;

/// Round to the two decimals every rate is stored with.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100`, rounded to two decimals. Zero when `whole` is zero.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round2(part as f64 / whole as f64 * 100.0)
    }
}

/// Share of all pick (or ban) slots: each match has two teams' worth.
pub fn slot_rate(count: u32, total_matches: usize) -> f64 {
    let slots = u32::try_from(total_matches.saturating_mul(2)).unwrap_or(u32::MAX);
    percentage(count, slots)
}
