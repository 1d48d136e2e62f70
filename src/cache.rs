use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Last downloaded copy of a remote match-history CSV.
#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetCache {
    pub source: String,
    pub fetched_at: DateTime<Utc>,
    pub csv: String,
}

impl DatasetCache {
    pub fn new(source: &str, csv: String) -> Self {
        DatasetCache {
            source: source.to_string(),
            fetched_at: Utc::now(),
            csv,
        }
    }

    pub fn cache_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".draft_stats")
    }

    /// File name for a source: every non-alphanumeric character becomes `_`.
    pub fn file_name(source: &str) -> String {
        let slug: String = source
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("{}.json", slug)
    }

    pub fn get_cache_path(source: &str) -> PathBuf {
        Self::cache_dir().join(Self::file_name(source))
    }

    /// Cached copy in `dir`, or `None` if nothing was cached yet. Any other
    /// read failure is an error.
    pub fn load_from(dir: &Path, source: &str) -> Result<Option<Self>, AppError> {
        let path = dir.join(Self::file_name(source));

        match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map(Some)
                .map_err(|e| AppError::JsonError(format!("Failed to parse cache: {}", e))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::IoError(format!(
                "Failed to read cache {}: {}",
                path.display(),
                e
            ))),
        }
    }

    pub fn load(source: &str) -> Result<Option<Self>, AppError> {
        Self::load_from(&Self::cache_dir(), source)
    }

    pub fn save_to(&self, dir: &Path) -> Result<(), AppError> {
        fs::create_dir_all(dir)
            .map_err(|e| AppError::IoError(format!("Failed to create cache dir: {}", e)))?;

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AppError::JsonError(format!("Failed to serialize cache: {}", e)))?;

        fs::write(dir.join(Self::file_name(&self.source)), json)
            .map_err(|e| AppError::IoError(format!("Failed to write cache: {}", e)))?;

        Ok(())
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::cache_dir())
    }

    pub fn is_stale(&self, max_age_mins: u64) -> bool {
        let age = Utc::now().signed_duration_since(self.fetched_at);
        age.num_minutes() >= max_age_mins as i64
    }
}
