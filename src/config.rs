use crate::error::{PickerError, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Pool used when `PROXY_POOL` is not set
pub const DEFAULT_PROXY_POOL: &[&str] = &[
    "http://proxy1.example.com:8080",
    "http://proxy2.example.com:8080",
    "http://proxy3.example.com:8080",
];

/// Default lifetime of a failure mark
pub const DEFAULT_FAILURE_TTL: Duration = Duration::from_secs(5 * 60);

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Proxy pool configuration
    pub pool: PoolConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on (default: 8080)
    pub port: u16,
    /// Host to bind to (default: 0.0.0.0)
    pub host: String,
    /// Allowed CORS origins (comma-separated, empty = localhost only)
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Candidate proxy URLs, in pool order, without duplicates
    pub proxies: Vec<String>,
    /// How long a failure mark excludes a candidate
    pub failure_ttl: Duration,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            server: ServerConfig {
                port: get_env_or("SELECTOR_PORT", "8080").parse().map_err(|_| {
                    PickerError::InvalidConfig("SELECTOR_PORT must be a valid port number".into())
                })?,
                host: get_env_or("SELECTOR_HOST", "0.0.0.0"),
                cors_origins: split_list(&get_env_or("CORS_ORIGINS", "")),
            },
            pool: PoolConfig {
                proxies: parse_pool(env::var("PROXY_POOL").ok().as_deref())?,
                failure_ttl: parse_failure_ttl()?,
            },
        })
    }
}

impl ServerConfig {
    /// Get the server listen address
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl LogConfig {
    /// Loaded separately from [`Config`] so tracing is up before the rest of
    /// the configuration is validated; this never fails.
    pub fn from_env() -> Self {
        LogConfig {
            level: get_env_or("LOG_LEVEL", "info"),
            format: get_env_or("LOG_FORMAT", "pretty"),
        }
    }
}

/// Parse the candidate pool, falling back to the built-in pool when unset.
fn parse_pool(raw: Option<&str>) -> Result<Vec<String>> {
    let entries = match raw {
        Some(raw) => split_list(raw),
        None => DEFAULT_PROXY_POOL.iter().map(|s| s.to_string()).collect(),
    };

    if entries.is_empty() {
        return Err(PickerError::InvalidConfig(
            "PROXY_POOL must contain at least one proxy URL".into(),
        ));
    }

    let mut proxies: Vec<String> = Vec::with_capacity(entries.len());
    for entry in entries {
        let url = Url::parse(&entry).map_err(|e| {
            PickerError::InvalidConfig(format!("PROXY_POOL entry {:?} is not a valid URL: {}", entry, e))
        })?;
        if url.host_str().is_none() {
            return Err(PickerError::InvalidConfig(format!(
                "PROXY_POOL entry {:?} must include a host",
                entry
            )));
        }
        if !proxies.contains(&entry) {
            proxies.push(entry);
        }
    }

    Ok(proxies)
}

fn parse_failure_ttl() -> Result<Duration> {
    let default = DEFAULT_FAILURE_TTL.as_secs().to_string();
    let secs: u64 = get_env_or("FAILURE_TTL_SECS", &default)
        .parse()
        .map_err(|_| {
            PickerError::InvalidConfig("FAILURE_TTL_SECS must be a valid number".into())
        })?;

    if secs == 0 {
        return Err(PickerError::InvalidConfig(
            "FAILURE_TTL_SECS must be greater than zero".into(),
        ));
    }

    Ok(Duration::from_secs(secs))
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Get environment variable with a default value
fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
