use super::counters::CounterTable;
use super::hero_stats::HeroStats;
use super::meta_shift::MetaShift;
use super::record::MatchRecord;
use super::synergy::{ComboSize, SynergyTable};
use itertools::Itertools;

/// Every derived table for one set of matches.
#[derive(Debug, Clone)]
pub struct AllTables {
    pub total_matches: usize,
    pub heroes: HeroStats,
    pub pairs: SynergyTable,
    pub triples: SynergyTable,
    pub quads: SynergyTable,
    pub counters: CounterTable,
}

impl AllTables {
    pub fn synergies(&self, size: ComboSize) -> &SynergyTable {
        match size {
            ComboSize::Pair => &self.pairs,
            ComboSize::Triple => &self.triples,
            ComboSize::Quad => &self.quads,
        }
    }
}

/// Recompute all tables from scratch. Call again whenever the subset changes.
pub fn aggregate(records: &[MatchRecord]) -> AllTables {
    tracing::debug!(matches = records.len(), "aggregating match records");

    AllTables {
        total_matches: records.len(),
        heroes: HeroStats::aggregate(records),
        pairs: SynergyTable::analyze(records, ComboSize::Pair),
        triples: SynergyTable::analyze(records, ComboSize::Triple),
        quads: SynergyTable::analyze(records, ComboSize::Quad),
        counters: CounterTable::analyze(records),
    }
}

/// Meta shift of `current` relative to `comparison`, each aggregated on its own.
pub fn compare_subsets(current: &[MatchRecord], comparison: &[MatchRecord]) -> MetaShift {
    MetaShift::compare(
        &HeroStats::aggregate(current),
        &HeroStats::aggregate(comparison),
        &SynergyTable::analyze(current, ComboSize::Pair),
        &SynergyTable::analyze(comparison, ComboSize::Pair),
    )
}

/// Distinct tournament labels in the order they first appear.
pub fn tournaments(records: &[MatchRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.tournament.as_deref())
        .unique()
        .map(str::to_string)
        .collect()
}

pub fn filter_by_tournament(records: &[MatchRecord], label: &str) -> Vec<MatchRecord> {
    records
        .iter()
        .filter(|r| r.tournament.as_deref() == Some(label))
        .cloned()
        .collect()
}

pub fn exclude_tournament(records: &[MatchRecord], label: &str) -> Vec<MatchRecord> {
    records
        .iter()
        .filter(|r| r.tournament.as_deref() != Some(label))
        .cloned()
        .collect()
}
