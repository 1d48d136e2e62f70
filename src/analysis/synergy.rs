//! Multi-hero synergy: how often a set of teammates drafted together wins.
//!
//! Pairs, triples and quads share one enumerator. Every k-subset of a team's
//! pick positions is canonicalized by sorting the heroes alphabetically, and
//! each hero keeps the lane it was drafted into.

use super::percentage;
use super::record::{Lane, MatchRecord};
use crate::error::AppError;
use itertools::{Combinations, Itertools};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

pub const COMBO_SEPARATOR: &str = " + ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ComboSize {
    Pair,
    Triple,
    Quad,
}

impl ComboSize {
    pub const ALL: [ComboSize; 3] = [ComboSize::Pair, ComboSize::Triple, ComboSize::Quad];

    pub fn k(self) -> usize {
        match self {
            ComboSize::Pair => 2,
            ComboSize::Triple => 3,
            ComboSize::Quad => 4,
        }
    }

    /// Fewest games an entry needs before it is ranked.
    pub fn min_sample(self) -> u32 {
        match self {
            ComboSize::Pair => 3,
            ComboSize::Triple | ComboSize::Quad => 2,
        }
    }
}

impl fmt::Display for ComboSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ComboSize::Pair => "pairs",
            ComboSize::Triple => "triples",
            ComboSize::Quad => "quads",
        };
        write!(f, "{}", label)
    }
}

impl TryFrom<usize> for ComboSize {
    type Error = AppError;

    fn try_from(k: usize) -> Result<Self, Self::Error> {
        match k {
            2 => Ok(ComboSize::Pair),
            3 => Ok(ComboSize::Triple),
            4 => Ok(ComboSize::Quad),
            other => Err(AppError::InvalidCombinationSize(other)),
        }
    }
}

/// Every `k`-subset of `0..n`, as strictly increasing index lists in
/// lexicographic order. Yields nothing when `k > n`.
pub fn index_combinations(n: usize, k: usize) -> Combinations<Range<usize>> {
    (0..n).combinations(k)
}

pub fn combination_key(members: &[String]) -> String {
    members.join(COMBO_SEPARATOR)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinationAggregate {
    /// Heroes in alphabetical order.
    pub members: Vec<String>,
    /// `lanes[i]` is the lane `members[i]` held when the key was first seen.
    pub lanes: Vec<Option<Lane>>,
    pub games: u32,
    pub wins: u32,
}

impl CombinationAggregate {
    pub fn key(&self) -> String {
        combination_key(&self.members)
    }

    pub fn win_rate(&self) -> f64 {
        percentage(self.wins, self.games)
    }

    pub fn contains(&self, hero: &str) -> bool {
        self.members.iter().any(|m| m == hero)
    }
}

/// Sort the chosen picks by hero name, carrying each hero's lane along.
fn canonicalize(picks: &[String], positions: &[usize]) -> (Vec<String>, Vec<Option<Lane>>) {
    let mut chosen: Vec<(&String, Option<Lane>)> = positions
        .iter()
        .map(|&i| (&picks[i], Lane::from_index(i)))
        .collect();
    chosen.sort_by(|a, b| a.0.cmp(b.0));

    chosen
        .into_iter()
        .map(|(hero, lane)| (hero.clone(), lane))
        .unzip()
}

#[derive(Debug, Clone)]
pub struct SynergyTable {
    size: ComboSize,
    entries: BTreeMap<String, CombinationAggregate>,
}

impl SynergyTable {
    /// Count games and wins for every k-hero combination drafted together.
    ///
    /// A team takes part when it has at least k picks, so a four-pick team
    /// still feeds pairs and triples.
    pub fn analyze(records: &[MatchRecord], size: ComboSize) -> Self {
        let k = size.k();
        let mut entries: BTreeMap<String, CombinationAggregate> = BTreeMap::new();

        for record in records {
            for (picks, won) in record.sides() {
                if picks.len() < k {
                    continue;
                }
                for positions in index_combinations(picks.len(), k) {
                    let (members, lanes) = canonicalize(picks, &positions);
                    let entry = entries
                        .entry(combination_key(&members))
                        .or_insert_with(|| CombinationAggregate {
                            members,
                            lanes,
                            games: 0,
                            wins: 0,
                        });
                    entry.games += 1;
                    if won {
                        entry.wins += 1;
                    }
                }
            }
        }

        tracing::debug!(size = %size, entries = entries.len(), "synergy table built");

        SynergyTable { size, entries }
    }

    pub fn size(&self) -> ComboSize {
        self.size
    }

    pub fn get(&self, key: &str) -> Option<&CombinationAggregate> {
        self.entries.get(key)
    }

    /// Every entry, including those below the ranking threshold.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CombinationAggregate)> {
        self.entries.iter().map(|(key, agg)| (key.as_str(), agg))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries with enough games, best win rate first.
    pub fn ranked(&self) -> Vec<&CombinationAggregate> {
        let min_games = self.size.min_sample();
        let mut ranked: Vec<&CombinationAggregate> = self
            .entries
            .values()
            .filter(|agg| agg.games >= min_games)
            .collect();
        ranked.sort_by(|a, b| {
            b.win_rate()
                .partial_cmp(&a.win_rate())
                .unwrap_or(Ordering::Equal)
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn game(picks1: &str, picks2: &str, winner: &str) -> MatchRecord {
        MatchRecord::from_columns("T1", "T2", winner, picks1, picks2, "", "", None)
    }

    #[test]
    fn test_index_combinations_order() {
        let combos: Vec<Vec<usize>> = index_combinations(4, 2).collect();
        assert_eq!(
            combos,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3],
            ]
        );
    }

    #[test]
    fn test_index_combinations_counts() {
        assert_eq!(index_combinations(5, 2).count(), 10);
        assert_eq!(index_combinations(5, 3).count(), 10);
        assert_eq!(index_combinations(5, 4).count(), 5);
        assert_eq!(index_combinations(3, 4).count(), 0);
        assert_eq!(index_combinations(4, 4).collect::<Vec<_>>(), vec![vec![0, 1, 2, 3]]);
    }

    #[test]
    fn test_combo_size_from_k() {
        assert_eq!(ComboSize::try_from(3).unwrap(), ComboSize::Triple);
        assert!(matches!(
            ComboSize::try_from(5),
            Err(AppError::InvalidCombinationSize(5))
        ));
    }

    #[test]
    fn test_lanes_follow_sorted_members() {
        let records = vec![game("Zed,Ava,Kim,Bo,Lu", "F,G,H,I,J", "T1")];
        let pairs = SynergyTable::analyze(&records, ComboSize::Pair);

        let entry = pairs.get("Ava + Zed").unwrap();
        assert_eq!(entry.members, vec!["Ava", "Zed"]);
        assert_eq!(entry.lanes, vec![Some(Lane::Farm), Some(Lane::Dark)]);
        assert_eq!(entry.games, 1);
        assert_eq!(entry.wins, 1);

        let quads = SynergyTable::analyze(&records, ComboSize::Quad);
        let quad = quads.get("Ava + Bo + Kim + Zed").unwrap();
        assert_eq!(
            quad.lanes,
            vec![Some(Lane::Farm), Some(Lane::Abyssal), Some(Lane::Mid), Some(Lane::Dark)]
        );
    }

    #[test]
    fn test_four_pick_team_feeds_pairs_and_triples_not_quads() {
        let records = vec![game("A,B,C,D", "", "T1")];
        assert_eq!(SynergyTable::analyze(&records, ComboSize::Pair).len(), 6);
        assert_eq!(SynergyTable::analyze(&records, ComboSize::Triple).len(), 4);
        assert_eq!(SynergyTable::analyze(&records, ComboSize::Quad).len(), 1);

        let three = vec![game("A,B,C", "", "T1")];
        assert!(SynergyTable::analyze(&three, ComboSize::Quad).is_empty());
    }

    #[test]
    fn test_wins_follow_team_result() {
        let records = vec![
            game("A,B,C,D,E", "F,G,H,I,J", "T1"),
            game("A,B,C,D,E", "F,G,H,I,J", "T2"),
        ];
        let pairs = SynergyTable::analyze(&records, ComboSize::Pair);
        let ab = pairs.get("A + B").unwrap();
        assert_eq!((ab.games, ab.wins), (2, 1));
        assert_eq!(ab.win_rate(), 50.0);
        let fg = pairs.get("F + G").unwrap();
        assert_eq!((fg.games, fg.wins), (2, 1));
    }

    #[test]
    fn test_min_sample_thresholds() {
        let records = vec![
            game("A,B,C,D,E", "F,G,H,I,J", "T1"),
            game("A,B,C,D,E", "F,G,H,I,J", "T2"),
        ];
        let pairs = SynergyTable::analyze(&records, ComboSize::Pair);
        assert!(pairs.get("A + B").is_some());
        assert!(pairs.ranked().is_empty());

        let triples = SynergyTable::analyze(&records, ComboSize::Triple);
        assert!(triples.ranked().iter().any(|t| t.key() == "A + B + C"));
    }

    #[test]
    fn test_ranked_descending_by_win_rate() {
        let records = vec![
            game("A,B,C,D,E", "F,G,H,I,J", "T1"),
            game("A,B,C,D,E", "F,G,H,I,J", "T1"),
            game("A,B,X,Y,Z", "F,G,H,I,J", "T2"),
        ];
        let triples = SynergyTable::analyze(&records, ComboSize::Triple);
        let ranked = triples.ranked();
        assert!(ranked.windows(2).all(|w| w[0].win_rate() >= w[1].win_rate()));
        assert!(ranked.iter().all(|c| c.wins <= c.games && c.members.len() == 3));
        assert!(ranked
            .iter()
            .all(|c| c.members.windows(2).all(|m| m[0] <= m[1])));
    }
}
