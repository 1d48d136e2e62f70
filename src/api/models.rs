use crate::analysis::record::MatchRecord;
use crate::error::AppError;
use serde::Deserialize;

pub const REQUIRED_COLUMNS: [&str; 5] = ["team1", "team2", "winner", "picks1", "picks2"];

/// One row of the match-history CSV, hero lists still comma-joined.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMatchRow {
    #[serde(default)]
    pub team1: String,
    #[serde(default)]
    pub team2: String,
    #[serde(default)]
    pub winner: String,
    #[serde(default)]
    pub picks1: String,
    #[serde(default)]
    pub picks2: String,
    #[serde(default)]
    pub bans1: String,
    #[serde(default)]
    pub bans2: String,
    #[serde(default)]
    pub tournament: Option<String>,
}

impl RawMatchRow {
    fn is_blank(&self) -> bool {
        [
            &self.team1,
            &self.team2,
            &self.winner,
            &self.picks1,
            &self.picks2,
            &self.bans1,
            &self.bans2,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }

    pub fn into_record(self) -> MatchRecord {
        MatchRecord::from_columns(
            &self.team1,
            &self.team2,
            &self.winner,
            &self.picks1,
            &self.picks2,
            &self.bans1,
            &self.bans2,
            self.tournament.as_deref(),
        )
    }
}

#[derive(Debug, Default)]
pub struct ParsedMatches {
    pub records: Vec<MatchRecord>,
    /// Rows that could not be read.
    pub skipped: usize,
}

/// Parse match-history CSV text. Unreadable rows are skipped, blank rows ignored.
pub fn parse_match_csv(text: &str) -> Result<ParsedMatches, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(AppError::CsvError(format!("missing column '{}'", column)));
        }
    }

    let mut parsed = ParsedMatches::default();
    for (line, row) in reader.deserialize::<RawMatchRow>().enumerate() {
        match row {
            Ok(row) if row.is_blank() => {}
            Ok(row) => parsed.records.push(row.into_record()),
            Err(e) => {
                tracing::warn!(row = line + 1, error = %e, "skipping unreadable match row");
                parsed.skipped += 1;
            }
        }
    }

    tracing::debug!(
        records = parsed.records.len(),
        skipped = parsed.skipped,
        "match csv parsed"
    );

    Ok(parsed)
}
