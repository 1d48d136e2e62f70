//! Meta-shift comparison between two independently aggregated subsets,
//! typically one tournament against another.
//!
//! Only heroes and pairs present in both subsets are compared; nothing is
//! reported for entries that appear on one side alone.

use super::hero_stats::HeroStats;
use super::round2;
use super::synergy::SynergyTable;
use serde::Serialize;
use std::cmp::Ordering;

pub const MIN_PICKS_PER_SUBSET: u32 = 3;
pub const MIN_SYNERGY_GAMES_PER_SUBSET: u32 = 2;
pub const STAR_LIMIT: usize = 8;
pub const EMERGING_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinRateChange {
    pub hero: String,
    pub current_win_rate: f64,
    pub comparison_win_rate: f64,
    pub change: f64,
    pub current_picks: u32,
    pub comparison_picks: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickRateChange {
    pub hero: String,
    pub current_pick_rate: f64,
    pub comparison_pick_rate: f64,
    pub change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynergyChange {
    pub key: String,
    pub members: Vec<String>,
    pub current_win_rate: f64,
    pub comparison_win_rate: f64,
    pub change: f64,
    pub current_games: u32,
    pub comparison_games: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetaShift {
    /// Largest absolute win-rate movement first.
    pub win_rate_changes: Vec<WinRateChange>,
    /// Pick rate went up, biggest rise first.
    pub rising: Vec<PickRateChange>,
    /// Pick rate went down, biggest fall first.
    pub falling: Vec<PickRateChange>,
    /// Pairs whose win rate improved, biggest improvement first.
    pub emerging_synergies: Vec<SynergyChange>,
}

fn by_value_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

impl MetaShift {
    pub fn compare(
        current: &HeroStats,
        comparison: &HeroStats,
        current_pairs: &SynergyTable,
        comparison_pairs: &SynergyTable,
    ) -> Self {
        let shared: Vec<&str> = current
            .heroes()
            .map(|(hero, _)| hero)
            .filter(|hero| comparison.contains(hero))
            .collect();

        let mut win_rate_changes: Vec<WinRateChange> = shared
            .iter()
            .filter_map(|hero| {
                let now = current.hero(hero);
                let then = comparison.hero(hero);
                if now.pick_count < MIN_PICKS_PER_SUBSET || then.pick_count < MIN_PICKS_PER_SUBSET {
                    return None;
                }
                Some(WinRateChange {
                    hero: hero.to_string(),
                    current_win_rate: now.win_rate(),
                    comparison_win_rate: then.win_rate(),
                    change: round2(now.win_rate() - then.win_rate()),
                    current_picks: now.pick_count,
                    comparison_picks: then.pick_count,
                })
            })
            .collect();
        win_rate_changes.sort_by(|a, b| by_value_desc(a.change.abs(), b.change.abs()));

        // A hero only banned on one side has no pick rate there to compare.
        let pick_rate_changes: Vec<PickRateChange> = shared
            .iter()
            .filter(|hero| current.hero(hero).pick_count > 0 && comparison.hero(hero).pick_count > 0)
            .map(|hero| {
                let now = current.hero(hero).pick_rate(current.total_matches());
                let then = comparison.hero(hero).pick_rate(comparison.total_matches());
                PickRateChange {
                    hero: hero.to_string(),
                    current_pick_rate: now,
                    comparison_pick_rate: then,
                    change: round2(now - then),
                }
            })
            .collect();

        let mut rising: Vec<PickRateChange> = pick_rate_changes
            .iter()
            .filter(|c| c.change > 0.0)
            .cloned()
            .collect();
        rising.sort_by(|a, b| by_value_desc(a.change, b.change));
        rising.truncate(STAR_LIMIT);

        let mut falling: Vec<PickRateChange> = pick_rate_changes
            .into_iter()
            .filter(|c| c.change < 0.0)
            .collect();
        falling.sort_by(|a, b| by_value_desc(b.change, a.change));
        falling.truncate(STAR_LIMIT);

        let mut emerging_synergies: Vec<SynergyChange> = current_pairs
            .entries()
            .filter_map(|(key, now)| {
                let then = comparison_pairs.get(key)?;
                if now.games < MIN_SYNERGY_GAMES_PER_SUBSET || then.games < MIN_SYNERGY_GAMES_PER_SUBSET {
                    return None;
                }
                let change = round2(now.win_rate() - then.win_rate());
                (change > 0.0).then(|| SynergyChange {
                    key: key.to_string(),
                    members: now.members.clone(),
                    current_win_rate: now.win_rate(),
                    comparison_win_rate: then.win_rate(),
                    change,
                    current_games: now.games,
                    comparison_games: then.games,
                })
            })
            .collect();
        emerging_synergies.sort_by(|a, b| by_value_desc(a.change, b.change));
        emerging_synergies.truncate(EMERGING_LIMIT);

        tracing::debug!(
            shared_heroes = shared.len(),
            win_rate_changes = win_rate_changes.len(),
            rising = rising.len(),
            falling = falling.len(),
            emerging = emerging_synergies.len(),
            "meta shift computed"
        );

        MetaShift {
            win_rate_changes,
            rising,
            falling,
            emerging_synergies,
        }
    }

    /// Win-rate changes ordered by signed value, biggest gain first.
    pub fn biggest_gains(&self) -> Vec<&WinRateChange> {
        let mut gains: Vec<&WinRateChange> = self.win_rate_changes.iter().collect();
        gains.sort_by(|a, b| by_value_desc(a.change, b.change));
        gains
    }

    /// Win-rate changes ordered by signed value, biggest drop first.
    pub fn biggest_drops(&self) -> Vec<&WinRateChange> {
        let mut drops: Vec<&WinRateChange> = self.win_rate_changes.iter().collect();
        drops.sort_by(|a, b| by_value_desc(b.change, a.change));
        drops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::record::MatchRecord;
    use crate::analysis::synergy::ComboSize;
    use pretty_assertions::assert_eq;

    /// `picks` games with `hero` on team1, the first `wins` of them won.
    fn subset(hero: &str, picks: usize, wins: usize, filler: &str) -> Vec<MatchRecord> {
        (0..picks)
            .map(|i| {
                let winner = if i < wins { "T1" } else { "T2" };
                let team1 = format!("{},{}", hero, filler);
                MatchRecord::from_columns("T1", "T2", winner, &team1, "F,G,H,I,J", "", "", None)
            })
            .collect()
    }

    fn shift(current: &[MatchRecord], comparison: &[MatchRecord]) -> MetaShift {
        MetaShift::compare(
            &HeroStats::aggregate(current),
            &HeroStats::aggregate(comparison),
            &SynergyTable::analyze(current, ComboSize::Pair),
            &SynergyTable::analyze(comparison, ComboSize::Pair),
        )
    }

    #[test]
    fn test_win_rate_change() {
        let current = subset("X", 10, 6, "B,C,D,E");
        let comparison = subset("X", 8, 2, "B,C,D,E");
        let result = shift(&current, &comparison);

        let x = result.win_rate_changes.iter().find(|c| c.hero == "X").unwrap();
        assert_eq!(x.current_win_rate, 60.0);
        assert_eq!(x.comparison_win_rate, 25.0);
        assert_eq!(x.change, 35.0);
        assert_eq!(result.win_rate_changes[0].change.abs(), 35.0);
    }

    #[test]
    fn test_hero_in_one_subset_excluded() {
        let current = subset("New", 5, 5, "B,C,D,E");
        let comparison = subset("Old", 5, 0, "B,C,D,E");
        let result = shift(&current, &comparison);

        let mentioned = |hero: &str| {
            result.win_rate_changes.iter().any(|c| c.hero == hero)
                || result.rising.iter().any(|c| c.hero == hero)
                || result.falling.iter().any(|c| c.hero == hero)
        };
        assert!(!mentioned("New"));
        assert!(!mentioned("Old"));
        assert!(mentioned("B"));
    }

    #[test]
    fn test_banned_only_hero_is_not_a_riser() {
        let current = subset("X", 4, 2, "B,C,D,E");
        let comparison: Vec<MatchRecord> = (0..4)
            .map(|_| MatchRecord::from_columns("T1", "T2", "T1", "A,B,C,D,E", "F,G,H,I,J", "X", "", None))
            .collect();
        let result = shift(&current, &comparison);

        assert!(result.rising.iter().all(|c| c.hero != "X"));
        assert!(result.falling.iter().all(|c| c.hero != "X"));
        assert!(result.win_rate_changes.iter().all(|c| c.hero != "X"));
        assert!(result.rising.is_empty());
    }

    #[test]
    fn test_min_picks_per_subset() {
        let current = subset("X", 2, 2, "B,C,D,E");
        let comparison = subset("X", 5, 0, "B,C,D,E");
        let result = shift(&current, &comparison);
        assert!(result.win_rate_changes.iter().all(|c| c.hero != "X"));
    }

    #[test]
    fn test_rising_and_falling_use_own_denominators() {
        // X: 4 picks over 5 current games vs 2 picks over 8 earlier games.
        let mut current = subset("X", 4, 2, "B,C,D,E");
        let mut comparison = subset("X", 2, 1, "B,C,D,E");
        comparison.extend(subset("Y", 6, 3, "B,C,D,E"));
        current.push(MatchRecord::from_columns("T1", "T2", "T1", "Y,B,C,D,E", "F,G,H,I,J", "", "", None));

        let result = shift(&current, &comparison);

        let x = result.rising.iter().find(|c| c.hero == "X").unwrap();
        assert_eq!(x.current_pick_rate, 40.0);
        assert_eq!(x.comparison_pick_rate, 12.5);
        assert_eq!(x.change, 27.5);

        let y = result.falling.iter().find(|c| c.hero == "Y").unwrap();
        assert!(y.change < 0.0);
        assert!(result.rising.windows(2).all(|w| w[0].change >= w[1].change));
        assert!(result.falling.windows(2).all(|w| w[0].change <= w[1].change));
    }

    #[test]
    fn test_emerging_synergies_positive_only() {
        let current = subset("X", 4, 4, "B,C,D,E");
        let comparison = subset("X", 4, 1, "B,C,D,E");
        let result = shift(&current, &comparison);

        assert!(!result.emerging_synergies.is_empty());
        assert!(result.emerging_synergies.len() <= EMERGING_LIMIT);
        assert!(result.emerging_synergies.iter().all(|s| s.change > 0.0));
        assert_eq!(result.emerging_synergies[0].change, 75.0);
    }

    #[test]
    fn test_signed_orderings() {
        let result = MetaShift {
            win_rate_changes: vec![
                WinRateChange {
                    hero: "A".into(),
                    current_win_rate: 40.0,
                    comparison_win_rate: 60.0,
                    change: -20.0,
                    current_picks: 5,
                    comparison_picks: 5,
                },
                WinRateChange {
                    hero: "B".into(),
                    current_win_rate: 55.0,
                    comparison_win_rate: 50.0,
                    change: 5.0,
                    current_picks: 5,
                    comparison_picks: 5,
                },
            ],
            ..MetaShift::default()
        };
        assert_eq!(result.biggest_gains()[0].hero, "B");
        assert_eq!(result.biggest_drops()[0].hero, "A");
    }
}
