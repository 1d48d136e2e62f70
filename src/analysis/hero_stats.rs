use super::record::{Lane, MatchRecord, LANES, TEAM_SIZE};
use super::{percentage, slot_rate};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeroAggregate {
    pub pick_count: u32,
    pub win_count: u32,
    pub ban_count: u32,
}

impl HeroAggregate {
    fn record_pick(&mut self, won: bool) {
        self.pick_count += 1;
        if won {
            self.win_count += 1;
        }
    }

    pub fn win_rate(&self) -> f64 {
        percentage(self.win_count, self.pick_count)
    }

    pub fn pick_rate(&self, total_matches: usize) -> f64 {
        slot_rate(self.pick_count, total_matches)
    }

    pub fn ban_rate(&self, total_matches: usize) -> f64 {
        slot_rate(self.ban_count, total_matches)
    }
}

/// Pick/win counts for one hero in one lane. Bans are not lane-indexed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LaneHeroAggregate {
    pub pick_count: u32,
    pub win_count: u32,
}

impl LaneHeroAggregate {
    fn record_pick(&mut self, won: bool) {
        self.pick_count += 1;
        if won {
            self.win_count += 1;
        }
    }

    pub fn win_rate(&self) -> f64 {
        percentage(self.win_count, self.pick_count)
    }
}

/// Per-hero and per-(lane, hero) totals over one set of matches.
#[derive(Debug, Clone)]
pub struct HeroStats {
    total_matches: usize,
    heroes: BTreeMap<String, HeroAggregate>,
    lanes: BTreeMap<Lane, BTreeMap<String, LaneHeroAggregate>>,
}

impl Default for HeroStats {
    fn default() -> Self {
        HeroStats {
            total_matches: 0,
            heroes: BTreeMap::new(),
            lanes: LANES.iter().map(|lane| (*lane, BTreeMap::new())).collect(),
        }
    }
}

impl HeroStats {
    /// Fold every match into hero and lane totals.
    ///
    /// A team contributes picks only when it has exactly five of them; any
    /// other length is skipped whole. Bans are counted regardless.
    pub fn aggregate(records: &[MatchRecord]) -> Self {
        let mut stats = HeroStats {
            total_matches: records.len(),
            ..HeroStats::default()
        };
        let mut gated = 0usize;

        for record in records {
            for (picks, won) in record.sides() {
                if picks.len() != TEAM_SIZE {
                    gated += 1;
                    continue;
                }
                for (hero, lane) in picks.iter().zip(LANES) {
                    stats.entry(hero).record_pick(won);
                    stats
                        .lanes
                        .entry(lane)
                        .or_default()
                        .entry(hero.clone())
                        .or_default()
                        .record_pick(won);
                }
            }

            for hero in record.bans() {
                stats.entry(hero).ban_count += 1;
            }
        }

        if gated > 0 {
            tracing::debug!(gated, "pick lists without exactly {} heroes skipped", TEAM_SIZE);
        }
        tracing::debug!(
            matches = stats.total_matches,
            heroes = stats.heroes.len(),
            "hero stats aggregated"
        );

        stats
    }

    fn entry(&mut self, hero: &str) -> &mut HeroAggregate {
        self.heroes.entry(hero.to_string()).or_default()
    }

    pub fn total_matches(&self) -> usize {
        self.total_matches
    }

    /// Totals for a hero, zeroed if it never appeared.
    pub fn hero(&self, name: &str) -> HeroAggregate {
        self.heroes.get(name).copied().unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.heroes.contains_key(name)
    }

    /// Lane totals for a hero, zeroed if it was never picked there.
    pub fn lane_hero(&self, lane: Lane, name: &str) -> LaneHeroAggregate {
        self.lanes
            .get(&lane)
            .and_then(|bucket| bucket.get(name))
            .copied()
            .unwrap_or_default()
    }

    /// A hero's totals in each of the five lanes, in lane order.
    pub fn lanes_for_hero(&self, name: &str) -> [(Lane, LaneHeroAggregate); 5] {
        LANES.map(|lane| (lane, self.lane_hero(lane, name)))
    }

    pub fn heroes(&self) -> impl Iterator<Item = (&str, &HeroAggregate)> {
        self.heroes.iter().map(|(name, agg)| (name.as_str(), agg))
    }

    pub fn lane(&self, lane: Lane) -> impl Iterator<Item = (&str, &LaneHeroAggregate)> {
        self.lanes
            .get(&lane)
            .into_iter()
            .flat_map(|bucket| bucket.iter().map(|(name, agg)| (name.as_str(), agg)))
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}
