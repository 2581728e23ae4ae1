use std::env;
use std::time::Duration;

use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const RESOURCE_TIMEOUT: Duration = Duration::from_secs(60);
const MAX_ATTEMPTS: usize = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Configuration handed to [`TmdbClient`](crate::tmdb::TmdbClient) at
/// construction. All knobs are plain fields so callers (and tests) can
/// override the defaults before building the client.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub base_url: String,
    pub access_token: String,
    /// Injected as the first query parameter on every request.
    pub language: String,
    /// Bounds connection establishment for a single attempt.
    pub request_timeout: Duration,
    /// Bounds the whole transfer of a single attempt.
    pub resource_timeout: Duration,
    /// Total attempts per logical call, the first one included.
    pub max_attempts: usize,
    /// Fixed delay between attempts.
    pub retry_delay: Duration,
}

impl TmdbConfig {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: access_token.into(),
            language: "en-US".to_string(),
            request_timeout: REQUEST_TIMEOUT,
            resource_timeout: RESOURCE_TIMEOUT,
            max_attempts: MAX_ATTEMPTS,
            retry_delay: RETRY_DELAY,
        }
    }

    /// Reads `TMDB_ACCESS_TOKEN` (required) and `TMDB_BASE_URL` (optional
    /// override) from the environment.
    pub fn from_env() -> crate::Result<Self> {
        let access_token = env::var("TMDB_ACCESS_TOKEN")
            .map_err(|_| Error::Config("TMDB_ACCESS_TOKEN not set".to_string()))?;
        let base_url =
            env::var("TMDB_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(base_url, access_token))
    }
}
