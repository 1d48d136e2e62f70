//! Search, lane filtering and sorting shared by every ranked table.
//!
//! Each logical table keeps its own [`ViewState`]; nothing here is global.
//! Rows describe themselves through [`TableRow`], so the same
//! [`apply_view`] drives heroes, lanes, synergies and counters.

pub mod rows;

use crate::analysis::record::Lane;
use crate::error::AppError;
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Int(u64),
    Float(f64),
    Text(String),
}

enum SortKey<'a> {
    Number(f64),
    Text(&'a str),
}

/// Numeric reading of a text cell: "80.52%", "9.00" and " 3 " all qualify.
fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

impl FieldValue {
    fn sort_key(&self) -> SortKey<'_> {
        match self {
            FieldValue::Int(v) => SortKey::Number(*v as f64),
            FieldValue::Float(v) => SortKey::Number(*v),
            FieldValue::Text(s) => match parse_numeric(s) {
                Some(v) => SortKey::Number(v),
                None => SortKey::Text(s),
            },
        }
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Int(u64::from(v))
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<Option<Lane>> for FieldValue {
    fn from(v: Option<Lane>) -> Self {
        FieldValue::Text(v.map(|lane| lane.as_str()).unwrap_or_default().to_string())
    }
}

/// Ascending comparison of two cells. Missing or incomparable cells are equal.
///
/// This is not a total order when a column mixes numbers with non-numeric
/// text or missing cells; the order of such a column is unspecified, but
/// every row is kept.
pub fn compare_values(a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    let (Some(a), Some(b)) = (a, b) else {
        return Ordering::Equal;
    };
    match (a.sort_key(), b.sort_key()) {
        (SortKey::Number(x), SortKey::Number(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(AppError::InvalidSortDirection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: &str, direction: SortDirection) -> Self {
        SortSpec {
            key: key.to_string(),
            direction,
        }
    }

    pub fn asc(key: &str) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    pub fn desc(key: &str) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    /// Clicking a column: same key flips ascending to descending, anything
    /// else starts ascending.
    pub fn toggled(&self, key: &str) -> Self {
        if self.key == key && self.direction == SortDirection::Ascending {
            Self::desc(key)
        } else {
            Self::asc(key)
        }
    }
}

/// Which of a row's designated fields a predicate has to hold for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMatch {
    First,
    Second,
    #[default]
    Either,
    /// Every designated field.
    Both,
}

impl FieldMatch {
    pub fn matches<T>(self, values: &[T], pred: impl Fn(&T) -> bool) -> bool {
        match self {
            FieldMatch::First => values.first().is_some_and(&pred),
            FieldMatch::Second => values.get(1).is_some_and(&pred),
            FieldMatch::Either => values.iter().any(&pred),
            FieldMatch::Both => !values.is_empty() && values.iter().all(&pred),
        }
    }

    /// Search scope of the counter view: `pick`, `against`, or `both` for
    /// a query found in either column.
    pub fn counter_search(s: &str) -> Result<Self, AppError> {
        match s.trim().to_lowercase().as_str() {
            "pick" => Ok(FieldMatch::First),
            "against" => Ok(FieldMatch::Second),
            "both" | "either" => Ok(FieldMatch::Either),
            _ => Err(AppError::InvalidFieldMatch(s.to_string())),
        }
    }
}

impl FromStr for FieldMatch {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" | "pick" => Ok(FieldMatch::First),
            "second" | "against" => Ok(FieldMatch::Second),
            "either" | "any" => Ok(FieldMatch::Either),
            "both" | "all" => Ok(FieldMatch::Both),
            _ => Err(AppError::InvalidFieldMatch(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaneFilter {
    pub lane: Lane,
    pub mode: FieldMatch,
}

/// A row that can be searched, lane-filtered and sorted.
pub trait TableRow {
    /// Value of a sortable column, `None` if the row has no such column.
    fn field(&self, key: &str) -> Option<FieldValue>;

    /// Text columns the search box looks at, in display order.
    fn search_fields(&self) -> Vec<&str>;

    /// Lane columns, in display order. Tables without lanes ignore lane filters.
    fn lane_fields(&self) -> Vec<Option<Lane>> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub search: String,
    pub search_scope: FieldMatch,
    pub lane_filter: Option<LaneFilter>,
    pub sort: SortSpec,
}

impl ViewState {
    pub fn sorted_by(sort: SortSpec) -> Self {
        ViewState {
            search: String::new(),
            search_scope: FieldMatch::Either,
            lane_filter: None,
            sort,
        }
    }

    pub fn with_search(mut self, search: &str, scope: FieldMatch) -> Self {
        self.search = search.to_string();
        self.search_scope = scope;
        self
    }

    pub fn with_lane_filter(mut self, lane: Lane, mode: FieldMatch) -> Self {
        self.lane_filter = Some(LaneFilter { lane, mode });
        self
    }

    pub fn request_sort(&mut self, key: &str) {
        self.sort = self.sort.toggled(key);
    }

    fn search_matches<R: TableRow>(&self, row: &R, query: &str) -> bool {
        self.search_scope
            .matches(&row.search_fields(), |text| text.to_lowercase().contains(query))
    }

    fn lane_matches<R: TableRow>(&self, row: &R) -> bool {
        let Some(filter) = self.lane_filter else {
            return true;
        };
        let lanes = row.lane_fields();
        lanes.is_empty() || filter.mode.matches(&lanes, |lane| *lane == Some(filter.lane))
    }
}

/// Independent view state for each logical table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewStates {
    pub overview: ViewState,
    pub lanes: ViewState,
    pub synergies: ViewState,
    pub counters: ViewState,
    pub bans: ViewState,
}

impl Default for ViewStates {
    fn default() -> Self {
        ViewStates {
            overview: ViewState::sorted_by(SortSpec::desc("pick_count")),
            lanes: ViewState::sorted_by(SortSpec::desc("win_rate")),
            synergies: ViewState::sorted_by(SortSpec::desc("win_rate")),
            counters: ViewState::sorted_by(SortSpec::desc("win_rate")).with_search("", FieldMatch::First),
            bans: ViewState::sorted_by(SortSpec::desc("ban_count")),
        }
    }
}

/// Search, then lane-filter, then stable-sort `rows` according to `state`.
pub fn apply_view<R: TableRow>(rows: Vec<R>, state: &ViewState) -> Vec<R> {
    let query = state.search.trim().to_lowercase();

    let mut kept: Vec<R> = rows
        .into_iter()
        .filter(|row| query.is_empty() || state.search_matches(row, &query))
        .filter(|row| state.lane_matches(row))
        .collect();

    let key = state.sort.key.as_str();
    let direction = state.sort.direction;
    kept.sort_by(|a, b| {
        let ord = compare_values(a.field(key).as_ref(), b.field(key).as_ref());
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Cell {
        name: &'static str,
        rate: Option<&'static str>,
        lanes: Vec<Option<Lane>>,
    }

    impl TableRow for Cell {
        fn field(&self, key: &str) -> Option<FieldValue> {
            match key {
                "name" => Some(self.name.into()),
                "rate" => self.rate.map(FieldValue::from),
                _ => None,
            }
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![self.name]
        }

        fn lane_fields(&self) -> Vec<Option<Lane>> {
            self.lanes.clone()
        }
    }

    fn cell(name: &'static str, rate: Option<&'static str>) -> Cell {
        Cell {
            name,
            rate,
            lanes: Vec::new(),
        }
    }

    fn names(rows: &[Cell]) -> Vec<&'static str> {
        rows.iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_percentage_strings_sort_numerically() {
        let rows = vec![
            cell("a", Some("9.00%")),
            cell("b", Some("80.52%")),
            cell("c", Some("15.00%")),
        ];
        let sorted = apply_view(rows, &ViewState::sorted_by(SortSpec::asc("rate")));
        let rates: Vec<_> = sorted.iter().map(|r| r.rate.unwrap()).collect();
        assert_eq!(rates, vec!["9.00%", "15.00%", "80.52%"]);
    }

    #[test]
    fn test_sort_is_stable_both_directions() {
        let rows = vec![
            cell("first", Some("50.00")),
            cell("high", Some("70.00")),
            cell("second", Some("50.00")),
            cell("third", Some("50.00")),
        ];

        let asc = apply_view(rows.clone(), &ViewState::sorted_by(SortSpec::asc("rate")));
        assert_eq!(names(&asc), vec!["first", "second", "third", "high"]);

        let desc = apply_view(rows, &ViewState::sorted_by(SortSpec::desc("rate")));
        assert_eq!(names(&desc), vec!["high", "first", "second", "third"]);
    }

    #[test]
    fn test_absent_sort_key_keeps_order() {
        let rows = vec![cell("b", None), cell("a", Some("1")), cell("c", None)];
        let sorted = apply_view(rows, &ViewState::sorted_by(SortSpec::asc("missing")));
        assert_eq!(names(&sorted), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_mixed_column_keeps_every_row() {
        let rows: Vec<Cell> = (0..300)
            .map(|i| match i % 3 {
                0 => cell("n", Some("12.50%")),
                1 => cell("t", Some("n/a")),
                _ => cell("m", None),
            })
            .collect();
        let sorted = apply_view(rows, &ViewState::sorted_by(SortSpec::desc("rate")));
        assert_eq!(sorted.len(), 300);
        assert_eq!(sorted.iter().filter(|r| r.name == "t").count(), 100);
    }

    #[test]
    fn test_text_values_compare_as_strings() {
        let rows = vec![cell("zed", None), cell("Ava", None), cell("kim", None)];
        let sorted = apply_view(rows, &ViewState::sorted_by(SortSpec::asc("name")));
        assert_eq!(names(&sorted), vec!["Ava", "kim", "zed"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let rows = vec![cell("Shadow Blade", None), cell("Light", None), cell("blademaster", None)];
        let state = ViewState::sorted_by(SortSpec::asc("name")).with_search("BLADE", FieldMatch::Either);
        assert_eq!(names(&apply_view(rows, &state)), vec!["Shadow Blade", "blademaster"]);
    }

    #[test]
    fn test_lane_filter_modes() {
        let rows = vec![
            Cell { name: "dd", rate: None, lanes: vec![Some(Lane::Dark), Some(Lane::Dark)] },
            Cell { name: "dm", rate: None, lanes: vec![Some(Lane::Dark), Some(Lane::Mid)] },
            Cell { name: "md", rate: None, lanes: vec![Some(Lane::Mid), Some(Lane::Dark)] },
            Cell { name: "mm", rate: None, lanes: vec![Some(Lane::Mid), Some(Lane::Mid)] },
        ];
        let view = |mode| {
            let state = ViewState::sorted_by(SortSpec::asc("none")).with_lane_filter(Lane::Dark, mode);
            names(&apply_view(rows.clone(), &state))
        };

        assert_eq!(view(FieldMatch::First), vec!["dd", "dm"]);
        assert_eq!(view(FieldMatch::Second), vec!["dd", "md"]);
        assert_eq!(view(FieldMatch::Either), vec!["dd", "dm", "md"]);
        assert_eq!(view(FieldMatch::Both), vec!["dd"]);
    }

    #[test]
    fn test_lane_filter_ignored_without_lane_fields() {
        let rows = vec![cell("a", None), cell("b", None)];
        let state = ViewState::sorted_by(SortSpec::asc("name")).with_lane_filter(Lane::Farm, FieldMatch::Both);
        assert_eq!(apply_view(rows, &state).len(), 2);
    }

    #[test]
    fn test_request_sort_toggles() {
        let mut state = ViewState::sorted_by(SortSpec::asc("win_rate"));
        state.request_sort("win_rate");
        assert_eq!(state.sort, SortSpec::desc("win_rate"));
        state.request_sort("win_rate");
        assert_eq!(state.sort, SortSpec::asc("win_rate"));
        state.request_sort("games");
        assert_eq!(state.sort, SortSpec::asc("games"));
    }

    #[test]
    fn test_view_states_are_independent() {
        let mut views = ViewStates::default();
        views.synergies.request_sort("games");
        assert_eq!(views.synergies.sort, SortSpec::asc("games"));
        assert_eq!(views.counters.sort, SortSpec::desc("win_rate"));
        assert_eq!(views.overview.sort, SortSpec::desc("pick_count"));
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert_eq!("against".parse::<FieldMatch>().unwrap(), FieldMatch::Second);
        assert!("sideways".parse::<FieldMatch>().is_err());
    }

    #[test]
    fn test_counter_search_modes() {
        assert_eq!(FieldMatch::counter_search("pick").unwrap(), FieldMatch::First);
        assert_eq!(FieldMatch::counter_search("Against").unwrap(), FieldMatch::Second);
        assert_eq!(FieldMatch::counter_search("both").unwrap(), FieldMatch::Either);
        assert!(FieldMatch::counter_search("first").is_err());
    }
}
