use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub recommender: RecommenderConfig,
    /// JSON file backing the key-value store; in-memory when `None`.
    pub store_path: Option<PathBuf>,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let base_url = lookup("RECOMMENDATION_API_URL")
            .filter(|v| !v.trim().is_empty())
            .context("RECOMMENDATION_API_URL must be set")?
            .trim()
            .trim_end_matches('/')
            .to_string();

        let recommender = RecommenderConfig {
            base_url,
            request_timeout: Duration::from_secs(
                parse_or("RECOMMENDATION_TIMEOUT_SECS", &lookup, DEFAULT_REQUEST_TIMEOUT_SECS)?,
            ),
            connect_timeout: Duration::from_secs(
                parse_or("RECOMMENDATION_CONNECT_TIMEOUT_SECS", &lookup, DEFAULT_CONNECT_TIMEOUT_SECS)?,
            ),
        };

        Ok(Self {
            recommender,
            store_path: lookup("STORE_PATH")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or("APP_PORT", &lookup, 8080)?,
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().with_context(|| format!("{key} has invalid value {raw:?}")),
        None => Ok(default),
    }
}
