//! `PostgreSQL` connection pool management.
//!
//! The census data lives in a PostGIS-enabled `PostgreSQL` database. This
//! module wraps [`sqlx::PgPool`] behind an explicitly constructed handle
//! with a defined startup/shutdown lifecycle: the service creates the pool
//! lazily, probes connectivity once at startup, and closes the pool on
//! shutdown.
//!
//! Uses [`sqlx`] with runtime query construction (not compile-time checked)
//! to avoid requiring a live database at build time. All queries are
//! parameterized to prevent SQL injection.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

use crate::error::DbError;

/// Default maximum number of connections in the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default connection-acquire timeout in seconds.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Default idle timeout in seconds.
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 300;

/// Configuration for the `PostgreSQL` connection pool.
///
/// Built from discrete connection parts rather than a URL so that
/// credentials loaded from the environment never need URL-escaping.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database server hostname.
    pub host: String,
    /// Database server port.
    pub port: u16,
    /// Database user.
    pub user: String,
    /// Database password.
    pub password: String,
    /// Database name.
    pub database: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Timeout when acquiring a connection from the pool.
    pub acquire_timeout: Duration,
    /// Idle connection timeout.
    pub idle_timeout: Duration,
}

impl PostgresConfig {
    /// Create a new configuration from connection parts.
    pub fn new(host: &str, port: u16, user: &str, password: &str, database: &str) -> Self {
        Self {
            host: host.to_owned(),
            port,
            user: user.to_owned(),
            password: password.to_owned(),
            database: database.to_owned(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
        }
    }

    /// Set the maximum number of connections.
    #[must_use]
    pub const fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Set the acquire timeout.
    #[must_use]
    pub const fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
    }
}

/// Connection pool handle to `PostgreSQL`.
///
/// Wraps a [`sqlx::PgPool`] and is injected into the query layer and the
/// HTTP state. Cloning is cheap; all clones share the same pool.
#[derive(Clone)]
pub struct PostgresPool {
    pool: PgPool,
}

impl PostgresPool {
    /// Connect to `PostgreSQL` eagerly using the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the connection fails.
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DbError> {
        let pool = config
            .pool_options()
            .connect_with(config.connect_options())
            .await?;

        tracing::info!(
            host = config.host,
            database = config.database,
            max_connections = config.max_connections,
            "Connected to PostgreSQL"
        );

        Ok(Self { pool })
    }

    /// Create the pool without establishing any connection.
    ///
    /// Connections are opened on first use. A startup failure therefore
    /// does not stop the process; it surfaces as a per-request error on
    /// every subsequent query. Pair with [`PostgresPool::ping`] to log
    /// connectivity once at startup.
    #[must_use]
    pub fn connect_lazy(config: &PostgresConfig) -> Self {
        let pool = config
            .pool_options()
            .connect_lazy_with(config.connect_options());
        Self { pool }
    }

    /// Connect eagerly using a database URL string with default pool
    /// settings. Convenience for integration tests.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the URL cannot be parsed and
    /// [`DbError::Postgres`] if the connection fails.
    pub async fn connect_url(url: &str) -> Result<Self, DbError> {
        let options: PgConnectOptions = url
            .parse()
            .map_err(|e: sqlx::Error| DbError::Config(format!("Invalid database URL: {e}")))?;

        let pool = PgPoolOptions::new()
            .max_connections(DEFAULT_MAX_CONNECTIONS)
            .acquire_timeout(Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Issue a trivial query to verify connectivity.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Postgres`] if the round trip fails.
    pub async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run all pending migrations from the `migrations/` directory.
    ///
    /// The service itself is read-only and never runs migrations; this
    /// exists for integration tests that need the schema in place.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Migration`] if any migration fails.
    pub async fn run_migrations(&self) -> Result<(), DbError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    /// Return a reference to the underlying [`PgPool`].
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close all connections in the pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }
}
