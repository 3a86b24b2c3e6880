//! Service binary for the livestock census API.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from environment variables
//! 3. Create the `PostgreSQL` pool lazily and probe connectivity once;
//!    a failed probe is logged but does not abort -- the service keeps
//!    running and every query fails per-request until the database
//!    returns
//! 4. Serve HTTP until `Ctrl-C`
//! 5. Close the pool

mod config;
mod error;

use census_api::server::{ServerConfig, start_server};
use census_db::PostgresPool;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;
use crate::error::ServiceError;

#[tokio::main]
async fn main() -> Result<(), ServiceError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("census-server starting");

    let config = ServiceConfig::from_env()?;
    info!(
        db_host = config.database.host,
        db_name = config.database.database,
        port = config.port,
        "Configuration loaded"
    );

    let pool = PostgresPool::connect_lazy(&config.database);
    match pool.ping().await {
        Ok(()) => info!("Connected to PostgreSQL database successfully"),
        // The original service keeps serving after a failed startup
        // probe; queries fail per-request until the database is back.
        Err(e) => error!(error = %e, "Failed to connect to PostgreSQL database"),
    }

    let server_config = ServerConfig {
        host: String::from("0.0.0.0"),
        port: config.port,
    };
    start_server(&server_config, &pool).await?;

    pool.close().await;
    info!("census-server stopped");
    Ok(())
}
