//! Everything known about a single hero, gathered from the aggregated tables.

use super::counters::MatchupAggregate;
use super::hero_stats::HeroAggregate;
use super::leaderboard::MIN_WIN_RATE_PICKS;
use super::percentage;
use super::pipeline::AllTables;
use super::record::Lane;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneBreakdown {
    pub lane: Lane,
    pub pick_count: u32,
    pub win_count: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynergyPartner {
    pub partner: String,
    pub hero_lane: Option<Lane>,
    pub partner_lane: Option<Lane>,
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroProfile {
    pub hero: String,
    pub totals: HeroAggregate,
    pub win_rate: f64,
    /// All five lanes, zeroed where the hero was never picked.
    pub lanes: Vec<LaneBreakdown>,
    /// Ranked pairs that include the hero, best first.
    pub synergies: Vec<SynergyPartner>,
    /// Matchups where the hero, as the pick, wins more than half.
    pub good_against: Vec<MatchupAggregate>,
    /// Matchups where an opponent picked into the hero wins more than half.
    pub bad_against: Vec<MatchupAggregate>,
    /// 1-based position by pick count, `None` if the hero never appeared.
    pub popularity_rank: Option<usize>,
    /// 1-based position by win rate among heroes with enough picks.
    pub win_rate_rank: Option<usize>,
}

fn winning_desc(mut matchups: Vec<&MatchupAggregate>) -> Vec<MatchupAggregate> {
    matchups.retain(|m| m.win_rate() > 50.0);
    matchups.sort_by(|a, b| {
        b.win_rate()
            .partial_cmp(&a.win_rate())
            .unwrap_or(Ordering::Equal)
    });
    matchups.into_iter().cloned().collect()
}

impl HeroProfile {
    pub fn build(tables: &AllTables, hero: &str) -> Self {
        let totals = tables.heroes.hero(hero);

        let lanes = tables
            .heroes
            .lanes_for_hero(hero)
            .iter()
            .map(|(lane, agg)| LaneBreakdown {
                lane: *lane,
                pick_count: agg.pick_count,
                win_count: agg.win_count,
                win_rate: agg.win_rate(),
            })
            .collect();

        let synergies = tables
            .pairs
            .ranked()
            .into_iter()
            .filter_map(|pair| {
                let at = pair.members.iter().position(|m| m == hero)?;
                let other = 1 - at;
                Some(SynergyPartner {
                    partner: pair.members.get(other)?.clone(),
                    hero_lane: pair.lanes.get(at).copied().flatten(),
                    partner_lane: pair.lanes.get(other).copied().flatten(),
                    games: pair.games,
                    wins: pair.wins,
                    win_rate: pair.win_rate(),
                })
            })
            .collect();

        let ranked_counters = tables.counters.ranked();
        let good_against = winning_desc(
            ranked_counters.iter().copied().filter(|m| m.pick == hero).collect(),
        );
        let bad_against = winning_desc(
            ranked_counters.iter().copied().filter(|m| m.against == hero).collect(),
        );

        let mut by_picks: Vec<(&str, &HeroAggregate)> = tables.heroes.heroes().collect();
        by_picks.sort_by(|a, b| b.1.pick_count.cmp(&a.1.pick_count));
        let popularity_rank = by_picks.iter().position(|(name, _)| *name == hero).map(|i| i + 1);

        let mut by_win_rate: Vec<(&str, f64)> = tables
            .heroes
            .heroes()
            .filter(|(_, agg)| agg.pick_count >= MIN_WIN_RATE_PICKS)
            .map(|(name, agg)| (name, agg.win_rate()))
            .collect();
        by_win_rate.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        let win_rate_rank = by_win_rate.iter().position(|(name, _)| *name == hero).map(|i| i + 1);

        HeroProfile {
            hero: hero.to_string(),
            totals,
            win_rate: percentage(totals.win_count, totals.pick_count),
            lanes,
            synergies,
            good_against,
            bad_against,
            popularity_rank,
            win_rate_rank,
        }
    }

    /// Picks that did not end in a win.
    pub fn losses(&self) -> u32 {
        self.totals.pick_count - self.totals.win_count
    }
}
