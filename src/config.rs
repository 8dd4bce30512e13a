use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// HR API root, without the `/api` suffix
    pub hr_api_base_url: String,
    pub api_prefix: String,
    pub upstream_timeout: Duration,

    // Roster snapshots
    pub roster_cache_capacity: u64,
    pub roster_cache_ttl: Duration,

    pub dashboard_trend_days: u32,

    // Rate limiting
    pub rate_views_per_min: u32,

    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let string = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            server_addr: string("SERVER_ADDR", "127.0.0.1:8080"),
            hr_api_base_url: string("HR_API_BASE_URL", "http://localhost:8000"),
            api_prefix: string("API_PREFIX", "/api"),
            upstream_timeout: Duration::from_secs(parsed(&lookup, "UPSTREAM_TIMEOUT_SECS", 30)?),

            roster_cache_capacity: parsed(&lookup, "ROSTER_CACHE_CAPACITY", 366)?,
            roster_cache_ttl: Duration::from_secs(parsed(&lookup, "ROSTER_CACHE_TTL_SECS", 30)?),

            dashboard_trend_days: parsed(&lookup, "DASHBOARD_TREND_DAYS", 7)?,

            rate_views_per_min: parsed(&lookup, "RATE_VIEWS_PER_MIN", 1000)?,

            log_dir: string("LOG_DIR", "logs"),
        })
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a number, got '{}'", key, raw)),
        None => Ok(default),
    }
}
