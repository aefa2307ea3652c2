use serde::Deserialize;
use tracing::warn;

use crate::error::Result;
use crate::models::RankingMode;
use crate::services::limit_from_signed;

pub const ENV_PREFIX: &str = "PRIORITY_FEED_";

/// Ranking defaults read from `PRIORITY_FEED_*` variables
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Unknown values fall back to `hot`
    #[serde(default)]
    pub mode: RankingMode,
    /// Signed so that negative input clamps to an empty result instead of failing
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_limit() -> i64 {
    20
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: RankingMode::default(),
            limit: default_limit(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load `.env` if present, then read `PRIORITY_FEED_*` from the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Read configuration from explicit key/value pairs
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter(vars)?)
    }

    /// Result-size limit ready for ranking
    pub fn effective_limit(&self) -> usize {
        clamp_limit(self.limit)
    }
}

/// Turn a signed limit from env or flags into a ranking limit, warning when
/// a negative value empties the result
pub fn clamp_limit(limit: i64) -> usize {
    if limit < 0 {
        warn!(limit, "Negative feed limit, ranking will return no entries");
    }
    limit_from_signed(limit)
}
