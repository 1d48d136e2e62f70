use super::hero_stats::HeroStats;
use super::record::Lane;
use serde::Serialize;
use std::cmp::Ordering;

pub const DEFAULT_LIMIT: usize = 10;
pub const MIN_WIN_RATE_PICKS: u32 = 5;
/// Picks in a lane before a hero is listed for it.
pub const MIN_LANE_PICKS: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderEntry {
    pub hero: String,
    /// Picks, or bans for the ban board.
    pub count: u32,
    pub rate: f64,
}

impl LeaderEntry {
    pub fn new(hero: &str, count: u32, rate: f64) -> Self {
        LeaderEntry {
            hero: hero.to_string(),
            count,
            rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneRanking {
    WinRate,
    PickCount,
}

fn by_rate_desc(a: &LeaderEntry, b: &LeaderEntry) -> Ordering {
    b.rate.partial_cmp(&a.rate).unwrap_or(Ordering::Equal)
}

fn by_count_desc(a: &LeaderEntry, b: &LeaderEntry) -> Ordering {
    b.count.cmp(&a.count)
}

/// Top-N boards that feed the overview charts.
pub struct Leaderboard;

impl Leaderboard {
    /// Most picked heroes, with pick rate.
    pub fn top_by_pick_rate(stats: &HeroStats, limit: usize) -> Vec<LeaderEntry> {
        let total = stats.total_matches();
        let mut entries: Vec<LeaderEntry> = stats
            .heroes()
            .map(|(hero, agg)| LeaderEntry::new(hero, agg.pick_count, agg.pick_rate(total)))
            .collect();

        entries.sort_by(by_count_desc);
        entries.truncate(limit);
        entries
    }

    /// Best win rates among heroes with at least `min_games` picks.
    pub fn top_by_win_rate(stats: &HeroStats, min_games: u32, limit: usize) -> Vec<LeaderEntry> {
        let mut entries: Vec<LeaderEntry> = stats
            .heroes()
            .filter(|(_, agg)| agg.pick_count >= min_games)
            .map(|(hero, agg)| LeaderEntry::new(hero, agg.pick_count, agg.win_rate()))
            .collect();

        entries.sort_by(by_rate_desc);
        entries.truncate(limit);
        entries
    }

    /// Most banned heroes, with ban rate.
    pub fn top_by_ban_rate(stats: &HeroStats, limit: usize) -> Vec<LeaderEntry> {
        let total = stats.total_matches();
        let mut entries: Vec<LeaderEntry> = stats
            .heroes()
            .map(|(hero, agg)| LeaderEntry::new(hero, agg.ban_count, agg.ban_rate(total)))
            .collect();

        entries.sort_by(by_count_desc);
        entries.truncate(limit);
        entries
    }

    /// Best heroes in one lane, by lane win rate or lane pick count.
    pub fn top_in_lane(
        stats: &HeroStats,
        lane: Lane,
        ranking: LaneRanking,
        min_games: u32,
        limit: usize,
    ) -> Vec<LeaderEntry> {
        let mut entries: Vec<LeaderEntry> = stats
            .lane(lane)
            .filter(|(_, agg)| agg.pick_count >= min_games)
            .map(|(hero, agg)| LeaderEntry::new(hero, agg.pick_count, agg.win_rate()))
            .collect();

        match ranking {
            LaneRanking::WinRate => entries.sort_by(by_rate_desc),
            LaneRanking::PickCount => entries.sort_by(by_count_desc),
        }
        entries.truncate(limit);
        entries
    }
}
