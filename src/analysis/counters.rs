use super::percentage;
use super::record::{Lane, MatchRecord};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

pub const MATCHUP_SEPARATOR: &str = " vs ";
pub const MIN_MATCHUP_GAMES: u32 = 3;

pub fn matchup_key(pick: &str, against: &str) -> String {
    format!("{}{}{}", pick, MATCHUP_SEPARATOR, against)
}

/// Record of one hero drafted against one opposing hero.
///
/// Directional: "A vs B" counts wins for A's side, "B vs A" for B's side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupAggregate {
    pub pick: String,
    pub against: String,
    /// Lanes as seen the first time this key was recorded.
    pub pick_lane: Option<Lane>,
    pub against_lane: Option<Lane>,
    pub games: u32,
    pub wins: u32,
}

impl MatchupAggregate {
    pub fn key(&self) -> String {
        matchup_key(&self.pick, &self.against)
    }

    pub fn win_rate(&self) -> f64 {
        percentage(self.wins, self.games)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CounterTable {
    entries: BTreeMap<String, MatchupAggregate>,
}

impl CounterTable {
    /// Cross every team1 pick with every team2 pick, in both directions.
    pub fn analyze(records: &[MatchRecord]) -> Self {
        let mut table = CounterTable::default();

        for record in records {
            let team1_won = record.team1_won();

            for (i, hero) in record.team1_picks.iter().enumerate() {
                for (j, opponent) in record.team2_picks.iter().enumerate() {
                    table.record(hero, i, opponent, j, team1_won);
                }
            }
            // A malformed winner counts as a team2 win here.
            for (j, hero) in record.team2_picks.iter().enumerate() {
                for (i, opponent) in record.team1_picks.iter().enumerate() {
                    table.record(hero, j, opponent, i, !team1_won);
                }
            }
        }

        tracing::debug!(entries = table.entries.len(), "counter table built");

        table
    }

    fn record(&mut self, pick: &str, pick_index: usize, against: &str, against_index: usize, won: bool) {
        let entry = self
            .entries
            .entry(matchup_key(pick, against))
            .or_insert_with(|| MatchupAggregate {
                pick: pick.to_string(),
                against: against.to_string(),
                pick_lane: Lane::from_index(pick_index),
                against_lane: Lane::from_index(against_index),
                games: 0,
                wins: 0,
            });
        entry.games += 1;
        if won {
            entry.wins += 1;
        }
    }

    pub fn get(&self, pick: &str, against: &str) -> Option<&MatchupAggregate> {
        self.entries.get(&matchup_key(pick, against))
    }

    pub fn entries(&self) -> impl Iterator<Item = &MatchupAggregate> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Matchups with at least three games, best win rate first.
    pub fn ranked(&self) -> Vec<&MatchupAggregate> {
        let mut ranked: Vec<&MatchupAggregate> = self
            .entries
            .values()
            .filter(|m| m.games >= MIN_MATCHUP_GAMES)
            .collect();
        ranked.sort_by(|a, b| {
            b.win_rate()
                .partial_cmp(&a.win_rate())
                .unwrap_or(Ordering::Equal)
        });
        ranked
    }
}
