use crate::config::Config;
use crate::error::AppError;
use std::fs;
use std::thread;
use std::time::Duration;

const MAX_RETRIES: u32 = 3;
const USER_AGENT: &str = concat!("draft_stats/", env!("CARGO_PKG_VERSION"));

/// Fetches the raw match-history CSV from a URL or a local path.
pub struct SourceClient {
    config: Config,
}

impl SourceClient {
    pub fn new(config: Config) -> Self {
        SourceClient { config }
    }

    pub fn source(&self) -> &str {
        &self.config.source
    }

    pub fn fetch_csv(&self) -> Result<String, AppError> {
        if self.config.is_remote() {
            self.execute_request(&self.config.source)
        } else {
            tracing::info!(path = %self.config.source, "reading match history from file");
            fs::read_to_string(&self.config.source).map_err(|e| {
                AppError::IoError(format!("Failed to read {}: {}", self.config.source, e))
            })
        }
    }

    fn execute_request(&self, url: &str) -> Result<String, AppError> {
        tracing::info!(url, "downloading match history");
        let mut retry_count = 0;

        loop {
            let response = ureq::get(url).set("User-Agent", USER_AGENT).call();

            match response {
                Ok(resp) => {
                    return resp
                        .into_string()
                        .map_err(|e| AppError::HttpError(e.to_string()));
                }
                Err(ureq::Error::Status(429, _)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    let wait_ms = 2000 * (retry_count + 1) as u64;
                    tracing::warn!(wait_ms, "rate limited, retrying");
                    thread::sleep(Duration::from_millis(wait_ms));
                    retry_count += 1;
                }
                Err(e) => {
                    return Err(AppError::HttpError(e.to_string()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "team1,team2,winner,picks1,picks2").unwrap();

        let client = SourceClient::new(Config {
            source: file.path().to_string_lossy().to_string(),
            ..Config::default()
        });
        assert!(client.fetch_csv().unwrap().starts_with("team1"));
    }

    #[test]
    fn test_missing_local_file() {
        let client = SourceClient::new(Config {
            source: "/definitely/not/here.csv".to_string(),
            ..Config::default()
        });
        assert!(matches!(client.fetch_csv(), Err(AppError::IoError(_))));
    }
}
