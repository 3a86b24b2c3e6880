//! Service configuration loaded from environment variables.
//!
//! The loader is written against an injected lookup function so tests
//! can drive it from a plain map instead of mutating the process
//! environment.

use census_db::PostgresConfig;

use crate::error::ConfigError;

/// Default service listen port.
const DEFAULT_PORT: u16 = 4000;

/// Default database host.
const DEFAULT_DB_HOST: &str = "localhost";

/// Default database port.
const DEFAULT_DB_PORT: u16 = 5432;

/// Complete service configuration.
///
/// Required variables:
/// - `DB_USER` -- database user
/// - `DB_PASSWORD` -- database password
/// - `DB_NAME` -- database name
///
/// Optional variables:
/// - `DB_HOST` -- database host (default `localhost`)
/// - `DB_PORT` -- database port (default `5432`)
/// - `DB_MAX_CONNECTIONS` -- pool size (default 10)
/// - `PORT` -- HTTP listen port (default `4000`)
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Database connection and pool settings.
    pub database: PostgresConfig,
    /// HTTP listen port.
    pub port: u16,
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a
    /// numeric variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a
    /// numeric variable fails to parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let user = required(&lookup, "DB_USER")?;
        let password = required(&lookup, "DB_PASSWORD")?;
        let database = required(&lookup, "DB_NAME")?;
        let host = lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.to_owned());
        let db_port = parsed(&lookup, "DB_PORT", DEFAULT_DB_PORT)?;
        let port = parsed(&lookup, "PORT", DEFAULT_PORT)?;

        let mut db_config = PostgresConfig::new(&host, db_port, &user, &password, &database);
        if let Some(max) = lookup("DB_MAX_CONNECTIONS") {
            let max: u32 = max
                .parse()
                .map_err(|_| ConfigError::Invalid("DB_MAX_CONNECTIONS", max))?;
            db_config = db_config.with_max_connections(max);
        }

        Ok(Self {
            database: db_config,
            port,
        })
    }
}

fn required(lookup: impl Fn(&str) -> Option<String>, key: &'static str) -> Result<String, ConfigError> {
    lookup(key).ok_or(ConfigError::Missing(key))
}

fn parsed(
    lookup: impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: u16,
) -> Result<u16, ConfigError> {
    match lookup(key) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn loads_with_defaults() {
        let vars = env(&[
            ("DB_USER", "census"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "censusdb"),
        ]);
        let config = ServiceConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.user, "census");
        assert_eq!(config.database.database, "censusdb");
    }

    #[test]
    fn explicit_values_override_defaults() {
        let vars = env(&[
            ("DB_USER", "census"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "censusdb"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6432"),
            ("DB_MAX_CONNECTIONS", "25"),
            ("PORT", "8080"),
        ]);
        let config = ServiceConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6432);
        assert_eq!(config.database.max_connections, 25);
    }

    #[test]
    fn missing_required_variable_is_an_error() {
        let vars = env(&[("DB_USER", "census"), ("DB_NAME", "censusdb")]);
        let err = ServiceConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DB_PASSWORD")));
    }

    #[test]
    fn unparseable_port_is_an_error() {
        let vars = env(&[
            ("DB_USER", "census"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "censusdb"),
            ("PORT", "not-a-port"),
        ]);
        let err = ServiceConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("PORT", _)));
    }
}
