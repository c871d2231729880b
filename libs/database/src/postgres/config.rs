use std::str::FromStr;
use std::time::Duration;

use core_config::{ConfigError, FromEnv, env_parse_or, env_required_any};
use sqlx::postgres::PgConnectOptions;

use crate::common::DatabaseError;

/// PostgreSQL connection settings.
///
/// Only the URL is required. `connect_timeout_secs` bounds how long a single
/// connection attempt may take.
#[derive(Clone)]
pub struct PostgresConfig {
    pub url: String,
    pub connect_timeout_secs: u64,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout_secs: 8,
        }
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Parse the URL into sqlx connect options
    pub fn connect_options(&self) -> Result<PgConnectOptions, DatabaseError> {
        PgConnectOptions::from_str(&self.url)
            .map_err(|e| DatabaseError::ConfigError(format!("Invalid database URL: {}", e)))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

// The URL carries credentials, so it is never printed.
impl std::fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("url", &"<redacted>")
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

/// Environment variables:
/// - `DATABASE_URL` (required; `DB_CONNECTION_STRING` is accepted as a fallback)
/// - `DB_CONNECT_TIMEOUT_SECS` (optional, default: 8)
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_required_any(&["DATABASE_URL", "DB_CONNECTION_STRING"])?;
        let connect_timeout_secs = env_parse_or("DB_CONNECT_TIMEOUT_SECS", 8u64)?;

        Ok(Self {
            url,
            connect_timeout_secs,
        })
    }
}
