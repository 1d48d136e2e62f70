use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Rate limited by data source, please try again later")]
    RateLimited,

    #[error("CSV error: {0}")]
    CsvError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Combination size must be 2, 3 or 4 (got {0})")]
    InvalidCombinationSize(usize),

    #[error("Unknown lane: {0} (expected dark, farm, mid, abyssal or support)")]
    InvalidLane(String),

    #[error("Unknown sort direction: {0} (expected asc or desc)")]
    InvalidSortDirection(String),

    #[error("Unknown field match mode: {0} (expected first, second, either or both)")]
    InvalidFieldMatch(String),

    #[error("Tournament not found: {0}")]
    UnknownTournament(String),

    #[error("No matches found in data source")]
    NoMatches,
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::CsvError(e.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::IoError(e.to_string())
    }
}
