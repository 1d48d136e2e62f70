use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lanes in pick order: the hero at pick index `i` plays `LANES[i]`.
pub const LANES: [Lane; 5] = [Lane::Dark, Lane::Farm, Lane::Mid, Lane::Abyssal, Lane::Support];

/// Number of picks a team must have for lane-indexed aggregation.
pub const TEAM_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lane {
    Dark,
    Farm,
    Mid,
    Abyssal,
    Support,
}

impl Lane {
    /// Lane for a pick position, `None` past the fifth pick.
    pub fn from_index(index: usize) -> Option<Lane> {
        LANES.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Lane::Dark => "dark",
            Lane::Farm => "farm",
            Lane::Mid => "mid",
            Lane::Abyssal => "abyssal",
            Lane::Support => "support",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Lane::Dark => "Dark Lane",
            Lane::Farm => "Farm Lane",
            Lane::Mid => "Mid Lane",
            Lane::Abyssal => "Abyssal Lane",
            Lane::Support => "Support Lane",
        }
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Lane {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        LANES
            .iter()
            .copied()
            .find(|lane| lane.as_str() == wanted)
            .ok_or_else(|| AppError::InvalidLane(s.to_string()))
    }
}

/// Split a comma-joined hero list.
///
/// Segments are trimmed but kept even when empty, so pick positions (and
/// therefore lanes) stay aligned with the source column. A blank string is
/// an empty list.
pub fn split_heroes(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',').map(|item| item.trim().to_string()).collect()
}

/// One drafted match, already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub team1_name: String,
    pub team2_name: String,
    pub winner_name: String,
    pub team1_picks: Vec<String>,
    pub team2_picks: Vec<String>,
    pub team1_bans: Vec<String>,
    pub team2_bans: Vec<String>,
    pub tournament: Option<String>,
}

impl MatchRecord {
    /// Build a record from the raw comma-joined columns.
    #[allow(clippy::too_many_arguments)]
    pub fn from_columns(
        team1: &str,
        team2: &str,
        winner: &str,
        picks1: &str,
        picks2: &str,
        bans1: &str,
        bans2: &str,
        tournament: Option<&str>,
    ) -> Self {
        MatchRecord {
            team1_name: team1.trim().to_string(),
            team2_name: team2.trim().to_string(),
            winner_name: winner.trim().to_string(),
            team1_picks: split_heroes(picks1),
            team2_picks: split_heroes(picks2),
            team1_bans: split_heroes(bans1),
            team2_bans: split_heroes(bans2),
            tournament: tournament
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        }
    }

    pub fn team1_won(&self) -> bool {
        self.winner_name == self.team1_name
    }

    pub fn team2_won(&self) -> bool {
        self.winner_name == self.team2_name
    }

    /// Both teams' picks, each paired with whether that team won.
    pub fn sides(&self) -> [(&[String], bool); 2] {
        [
            (&self.team1_picks, self.team1_won()),
            (&self.team2_picks, self.team2_won()),
        ]
    }

    /// Non-empty bans from both teams.
    pub fn bans(&self) -> impl Iterator<Item = &str> {
        self.team1_bans
            .iter()
            .chain(self.team2_bans.iter())
            .map(String::as_str)
            .filter(|hero| !hero.is_empty())
    }
}
