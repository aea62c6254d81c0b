//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid API base URL format")]
    InvalidApiUrl,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid push URL format, expected ws:// or wss://")]
    InvalidPushUrl,

    #[error("Reconnect backoff must be non-zero")]
    InvalidBackoff,
}
