//! Centralized configuration (environment variables + defaults).

use std::net::SocketAddr;

pub const DB_URL: &str = "DB_URL";
pub const DB_AUTH_TOKEN: &str = "DB_AUTH_TOKEN";
pub const BIND_ADDR: &str = "BIND_ADDR";

/// Address the API server binds to when `BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8007";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set (in the environment or a .env file)")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Connection settings for the database handle.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub auth_token: String,
}

// The token must never end up in logs.
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

impl DatabaseConfig {
    /// Both `DB_URL` and `DB_AUTH_TOKEN` are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            url: required(&lookup, DB_URL)?,
            auth_token: required(&lookup, DB_AUTH_TOKEN)?,
        })
    }
}

/// Full API server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database = DatabaseConfig::from_lookup(&lookup)?;
        let raw_addr = lookup(BIND_ADDR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: BIND_ADDR,
                reason: format!("{} ({})", e, raw_addr),
            })?;
        Ok(Self {
            database,
            bind_addr,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ConfigError::Missing(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_url_fails_fast() {
        let vars = env(&[(DB_AUTH_TOKEN, "secret")]);
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(DB_URL)));
    }

    #[test]
    fn empty_token_counts_as_missing() {
        let vars = env(&[(DB_URL, "libsql://db.example.io"), (DB_AUTH_TOKEN, "  ")]);
        let err = DatabaseConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(DB_AUTH_TOKEN)));
    }

    #[test]
    fn bind_addr_defaults_and_parses() {
        let vars = env(&[(DB_URL, "sqlite::memory:"), (DB_AUTH_TOKEN, "t")]);
        let config = Config::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);

        let vars = env(&[
            (DB_URL, "sqlite::memory:"),
            (DB_AUTH_TOKEN, "t"),
            (BIND_ADDR, "not-an-addr"),
        ]);
        let err = Config::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: BIND_ADDR, .. }));
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = DatabaseConfig {
            url: "libsql://db.example.io".into(),
            auth_token: "super-secret".into(),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
    }
}
