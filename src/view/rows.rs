//! Flattened rows for each ranked table.

use super::{FieldValue, TableRow};
use crate::analysis::counters::{CounterTable, MatchupAggregate};
use crate::analysis::hero_stats::HeroStats;
use crate::analysis::leaderboard::MIN_LANE_PICKS;
use crate::analysis::record::Lane;
use crate::analysis::synergy::{CombinationAggregate, SynergyTable};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroRow {
    pub hero: String,
    pub pick_count: u32,
    pub win_count: u32,
    pub win_rate: f64,
    pub pick_rate: f64,
    pub ban_count: u32,
    pub ban_rate: f64,
}

impl HeroRow {
    pub fn from_stats(stats: &HeroStats) -> Vec<HeroRow> {
        let total = stats.total_matches();
        stats
            .heroes()
            .map(|(hero, agg)| HeroRow {
                hero: hero.to_string(),
                pick_count: agg.pick_count,
                win_count: agg.win_count,
                win_rate: agg.win_rate(),
                pick_rate: agg.pick_rate(total),
                ban_count: agg.ban_count,
                ban_rate: agg.ban_rate(total),
            })
            .collect()
    }

    /// Heroes banned at least once.
    pub fn banned(stats: &HeroStats) -> Vec<HeroRow> {
        Self::from_stats(stats)
            .into_iter()
            .filter(|row| row.ban_count > 0)
            .collect()
    }
}

impl TableRow for HeroRow {
    fn field(&self, key: &str) -> Option<FieldValue> {
        Some(match key {
            "hero" => self.hero.as_str().into(),
            "pick_count" => self.pick_count.into(),
            "win_count" => self.win_count.into(),
            "win_rate" => self.win_rate.into(),
            "pick_rate" => self.pick_rate.into(),
            "ban_count" => self.ban_count.into(),
            "ban_rate" => self.ban_rate.into(),
            _ => return None,
        })
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.hero.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneRow {
    pub lane: Lane,
    pub hero: String,
    pub pick_count: u32,
    pub win_count: u32,
    pub win_rate: f64,
}

impl LaneRow {
    /// Heroes picked at least [`MIN_LANE_PICKS`] times in `lane`.
    pub fn from_lane(stats: &HeroStats, lane: Lane) -> Vec<LaneRow> {
        stats
            .lane(lane)
            .filter(|(_, agg)| agg.pick_count >= MIN_LANE_PICKS)
            .map(|(hero, agg)| LaneRow {
                lane,
                hero: hero.to_string(),
                pick_count: agg.pick_count,
                win_count: agg.win_count,
                win_rate: agg.win_rate(),
            })
            .collect()
    }
}

impl TableRow for LaneRow {
    fn field(&self, key: &str) -> Option<FieldValue> {
        Some(match key {
            "lane" => Some(self.lane).into(),
            "hero" => self.hero.as_str().into(),
            "pick_count" => self.pick_count.into(),
            "win_count" => self.win_count.into(),
            "win_rate" => self.win_rate.into(),
            _ => return None,
        })
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.hero.as_str()]
    }

    fn lane_fields(&self) -> Vec<Option<Lane>> {
        vec![Some(self.lane)]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComboRow {
    pub key: String,
    pub members: Vec<String>,
    pub lanes: Vec<Option<Lane>>,
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

impl From<&CombinationAggregate> for ComboRow {
    fn from(agg: &CombinationAggregate) -> Self {
        ComboRow {
            key: agg.key(),
            members: agg.members.clone(),
            lanes: agg.lanes.clone(),
            games: agg.games,
            wins: agg.wins,
            win_rate: agg.win_rate(),
        }
    }
}

impl ComboRow {
    /// Ranked entries of a synergy table (minimum sample applied).
    pub fn from_table(table: &SynergyTable) -> Vec<ComboRow> {
        table.ranked().into_iter().map(ComboRow::from).collect()
    }
}

impl TableRow for ComboRow {
    fn field(&self, key: &str) -> Option<FieldValue> {
        // "hero1".."hero4" and "lane1".."lane4" address members by position.
        if let Some(n) = key.strip_prefix("hero").and_then(|n| n.parse::<usize>().ok()) {
            return self.members.get(n.checked_sub(1)?).map(|m| m.as_str().into());
        }
        if let Some(n) = key.strip_prefix("lane").and_then(|n| n.parse::<usize>().ok()) {
            return self.lanes.get(n.checked_sub(1)?).map(|l| (*l).into());
        }
        Some(match key {
            "key" | "combination" => self.key.as_str().into(),
            "games" => self.games.into(),
            "wins" => self.wins.into(),
            "win_rate" => self.win_rate.into(),
            _ => return None,
        })
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.key.as_str()]
    }

    fn lane_fields(&self) -> Vec<Option<Lane>> {
        self.lanes.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchupRow {
    pub pick: String,
    pub against: String,
    pub pick_lane: Option<Lane>,
    pub against_lane: Option<Lane>,
    pub games: u32,
    pub wins: u32,
    pub win_rate: f64,
}

impl From<&MatchupAggregate> for MatchupRow {
    fn from(agg: &MatchupAggregate) -> Self {
        MatchupRow {
            pick: agg.pick.clone(),
            against: agg.against.clone(),
            pick_lane: agg.pick_lane,
            against_lane: agg.against_lane,
            games: agg.games,
            wins: agg.wins,
            win_rate: agg.win_rate(),
        }
    }
}

impl MatchupRow {
    /// Ranked matchups (three games or more).
    pub fn from_table(table: &CounterTable) -> Vec<MatchupRow> {
        table.ranked().into_iter().map(MatchupRow::from).collect()
    }
}

impl TableRow for MatchupRow {
    fn field(&self, key: &str) -> Option<FieldValue> {
        Some(match key {
            "pick" => self.pick.as_str().into(),
            "against" => self.against.as_str().into(),
            "pick_lane" => self.pick_lane.into(),
            "against_lane" => self.against_lane.into(),
            "games" => self.games.into(),
            "wins" => self.wins.into(),
            "win_rate" => self.win_rate.into(),
            _ => return None,
        })
    }

    /// Pick first, opponent second.
    fn search_fields(&self) -> Vec<&str> {
        vec![self.pick.as_str(), self.against.as_str()]
    }

    fn lane_fields(&self) -> Vec<Option<Lane>> {
        vec![self.pick_lane, self.against_lane]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::record::MatchRecord;
    use crate::analysis::synergy::ComboSize;
    use crate::view::{apply_view, FieldMatch, SortSpec, ViewState};
    use pretty_assertions::assert_eq;

    fn records() -> Vec<MatchRecord> {
        vec![
            MatchRecord::from_columns("T1", "T2", "T1", "A,B,C,D,E", "F,G,H,I,J", "K", "L", None),
            MatchRecord::from_columns("T1", "T2", "T2", "A,B,C,D,E", "F,G,H,I,J", "K", "", None),
            MatchRecord::from_columns("T1", "T2", "T1", "A,B,C,D,E", "F,G,H,I,J", "", "", None),
        ]
    }

    #[test]
    fn test_hero_rows() {
        let stats = HeroStats::aggregate(&records());
        let rows = HeroRow::from_stats(&stats);
        let a = rows.iter().find(|r| r.hero == "A").unwrap();
        assert_eq!(a.pick_count, 3);
        assert_eq!(a.win_rate, 66.67);
        assert_eq!(a.pick_rate, 50.0);

        let bans = HeroRow::banned(&stats);
        assert_eq!(bans.len(), 2);
        let k = bans.iter().find(|r| r.hero == "K").unwrap();
        assert_eq!(k.ban_rate, 33.33);
    }

    #[test]
    fn test_lane_rows_min_picks() {
        let stats = HeroStats::aggregate(&records());
        let dark = LaneRow::from_lane(&stats, Lane::Dark);
        assert_eq!(dark.iter().map(|r| r.hero.as_str()).collect::<Vec<_>>(), vec!["A", "F"]);

        let short = HeroStats::aggregate(&records()[..2]);
        assert!(LaneRow::from_lane(&short, Lane::Dark).is_empty());
    }

    #[test]
    fn test_combo_row_positional_fields() {
        let table = SynergyTable::analyze(&records(), ComboSize::Pair);
        let rows = ComboRow::from_table(&table);
        let ab = rows.iter().find(|r| r.key == "A + B").unwrap();
        assert_eq!(ab.field("hero2"), Some(FieldValue::Text("B".into())));
        assert_eq!(ab.field("lane1"), Some(FieldValue::Text("dark".into())));
        assert_eq!(ab.field("lane9"), None);
        assert_eq!(ab.field("hero0"), None);
    }

    #[test]
    fn test_counter_search_scopes() {
        let table = CounterTable::analyze(&records());
        let rows = MatchupRow::from_table(&table);

        let pick_only = ViewState::sorted_by(SortSpec::asc("against")).with_search("a", FieldMatch::First);
        let found = apply_view(rows.clone(), &pick_only);
        assert_eq!(found.len(), 5);
        assert!(found.iter().all(|r| r.pick == "A"));

        let against_only = ViewState::sorted_by(SortSpec::asc("pick")).with_search("a", FieldMatch::Second);
        let found = apply_view(rows.clone(), &against_only);
        assert!(found.iter().all(|r| r.against == "A"));

        let either = ViewState::sorted_by(SortSpec::asc("pick")).with_search("a", FieldMatch::Either);
        assert_eq!(apply_view(rows, &either).len(), 10);
    }

    #[test]
    fn test_counter_search_both_columns() {
        let records: Vec<MatchRecord> = (0..3)
            .map(|_| MatchRecord::from_columns("T1", "T2", "T1", "Ana,B,C,D,E", "F,G,H,I,J", "", "", None))
            .collect();
        let rows = MatchupRow::from_table(&CounterTable::analyze(&records));

        let scope = FieldMatch::counter_search("both").unwrap();
        let state = ViewState::sorted_by(SortSpec::asc("pick")).with_search("ana", scope);
        let found = apply_view(rows, &state);

        assert_eq!(found.len(), 10);
        assert!(found.iter().all(|r| r.pick == "Ana" || r.against == "Ana"));
        assert!(found.iter().any(|r| r.against == "Ana"));
    }

    #[test]
    fn test_counter_lane_filter() {
        let table = CounterTable::analyze(&records());
        let rows = MatchupRow::from_table(&table);
        let state = ViewState::sorted_by(SortSpec::desc("win_rate")).with_lane_filter(Lane::Mid, FieldMatch::Both);
        let found = apply_view(rows, &state);
        let keys: Vec<_> = found.iter().map(|r| format!("{} vs {}", r.pick, r.against)).collect();
        assert_eq!(keys, vec!["C vs H", "H vs C"]);
    }
}
