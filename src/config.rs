use crate::error::AppError;
use std::env;

pub const DEFAULT_SOURCE: &str = "https://saintar1997.github.io/character-dashboard/Game_History.csv";
pub const DEFAULT_CACHE_MAX_AGE_MINS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// CSV path or http(s) URL
    pub source: String,
    pub cache_max_age_mins: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: DEFAULT_SOURCE.to_string(),
            cache_max_age_mins: DEFAULT_CACHE_MAX_AGE_MINS,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_vars(
            env::var("DRAFT_STATS_SOURCE").ok(),
            env::var("DRAFT_STATS_CACHE_MAX_AGE_MINS").ok(),
        )
    }

    fn from_vars(source: Option<String>, max_age: Option<String>) -> Result<Self, AppError> {
        let source = source
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SOURCE.to_string());

        let cache_max_age_mins = match max_age {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::ConfigError(format!(
                    "DRAFT_STATS_CACHE_MAX_AGE_MINS must be a whole number of minutes, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_CACHE_MAX_AGE_MINS,
        };

        Ok(Config {
            source,
            cache_max_age_mins,
        })
    }

    pub fn is_remote(&self) -> bool {
        self.source.starts_with("http://") || self.source.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.source, DEFAULT_SOURCE);
        assert_eq!(config.cache_max_age_mins, 60);
        assert!(config.is_remote());
    }

    #[test]
    fn test_blank_source_falls_back() {
        let config = Config::from_vars(Some("  ".to_string()), None).unwrap();
        assert_eq!(config.source, DEFAULT_SOURCE);
    }

    #[test]
    fn test_local_source() {
        let config = Config::from_vars(Some("./games.csv".to_string()), Some("5".to_string())).unwrap();
        assert!(!config.is_remote());
        assert_eq!(config.cache_max_age_mins, 5);
    }

    #[test]
    fn test_invalid_max_age() {
        let err = Config::from_vars(None, Some("soon".to_string())).unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
