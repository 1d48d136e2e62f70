pub mod client;
pub mod models;

use crate::analysis::record::MatchRecord;
use crate::cache::DatasetCache;
use crate::config::Config;
use crate::error::AppError;
use client::SourceClient;
use models::parse_match_csv;

/// Where the loaded CSV came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    LocalFile,
    Cache,
    Download,
}

#[derive(Debug)]
pub struct LoadedMatches {
    pub records: Vec<MatchRecord>,
    pub skipped: usize,
    pub origin: LoadOrigin,
}

/// Load match records, going through the local cache for remote sources.
///
/// A fresh cached copy is used unless `refresh` is set; a failed download
/// falls back to a stale cached copy when one exists.
pub fn load_matches(config: &Config, refresh: bool) -> Result<LoadedMatches, AppError> {
    let client = SourceClient::new(config.clone());

    let (csv, origin) = if !config.is_remote() {
        (client.fetch_csv()?, LoadOrigin::LocalFile)
    } else {
        let cached = if refresh {
            None
        } else {
            DatasetCache::load(client.source()).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring unreadable cache");
                None
            })
        };

        match cached {
            Some(cache) if !cache.is_stale(config.cache_max_age_mins) => {
                tracing::info!(fetched_at = %cache.fetched_at, "using cached match history");
                (cache.csv, LoadOrigin::Cache)
            }
            stale => match client.fetch_csv() {
                Ok(csv) => {
                    let fresh = DatasetCache::new(client.source(), csv);
                    if let Err(e) = fresh.save() {
                        tracing::warn!(error = %e, "could not write cache");
                    }
                    (fresh.csv, LoadOrigin::Download)
                }
                Err(e) => match stale {
                    Some(cache) => {
                        tracing::warn!(error = %e, "download failed, using stale cache");
                        (cache.csv, LoadOrigin::Cache)
                    }
                    None => return Err(e),
                },
            },
        }
    };

    let parsed = parse_match_csv(&csv)?;
    if parsed.records.is_empty() {
        return Err(AppError::NoMatches);
    }

    Ok(LoadedMatches {
        records: parsed.records,
        skipped: parsed.skipped,
        origin,
    })
}
