//! Error types for the service binary.

use census_api::ServerError;

/// Errors that abort service startup.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP server failed to start or crashed.
    #[error("server error: {0}")]
    Server(#[from] ServerError),
}

/// Errors from environment configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// An environment variable holds an unparseable value.
    #[error("invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
