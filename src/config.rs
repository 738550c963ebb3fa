use std::{env, fmt::Display, str::FromStr};

use anyhow::Context;
use tracing::{info, warn};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./association.sqlite?mode=rwc";

/// Process-wide settings, read once at startup and handed to the router
/// inside [`crate::AppState`].
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Shared secret for privileged routes. `None` locks them all.
    pub admin_token: Option<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Requests per minute per client IP; no limiting when unset.
    pub rate_limit_per_minute: Option<u32>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_token = lookup("ADMIN_TOKEN").filter(|t| !t.is_empty());
        if admin_token.is_none() {
            warn!("ADMIN_TOKEN not set, privileged routes will reject every request");
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 4000)?,
            admin_token,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| {
                info!("DATABASE_URL not set, using default: {}", DEFAULT_DATABASE_URL);
                DEFAULT_DATABASE_URL.to_string()
            }),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?,
            rate_limit_per_minute: lookup("RATE_LIMIT_PER_MINUTE")
                .map(|raw| parse_value("RATE_LIMIT_PER_MINUTE", &raw))
                .transpose()?,
        })
    }

    /// Config for tests and tools: in-memory SQLite and the given token.
    pub fn for_tests(admin_token: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            admin_token: Some(admin_token.to_string()).filter(|t| !t.is_empty()),
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            rate_limit_per_minute: None,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

fn parse_value<T>(key: &str, raw: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse()
        .with_context(|| format!("invalid {key} value: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.admin_token, None);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.rate_limit_per_minute, None);
    }

    #[test]
    fn reads_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("ADMIN_TOKEN", "s3cret"),
            ("DATABASE_URL", "postgres://asso@localhost/asso"),
            ("RATE_LIMIT_PER_MINUTE", "120"),
        ]))
        .unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.admin_token.as_deref(), Some("s3cret"));
        assert_eq!(config.database_url, "postgres://asso@localhost/asso");
        assert_eq!(config.rate_limit_per_minute, Some(120));
    }

    #[test]
    fn empty_token_counts_as_unset() {
        let config = Config::from_lookup(lookup_from(&[("ADMIN_TOKEN", "")])).unwrap();
        assert_eq!(config.admin_token, None);
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
