//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `TRIAGE_DESK`
//! prefix and nested keys use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use triage_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Queue API at {}", config.api.base_url);
//! ```

mod api;
mod error;
mod push;

pub use api::ApiConfig;
pub use error::{ConfigError, ValidationError};
pub use push::PushConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// REST collaborator configuration (queue/admission/auth endpoints)
    pub api: ApiConfig,

    /// Push channel configuration
    pub push: PushConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present (for development), then reads
    /// environment variables with the `TRIAGE_DESK` prefix, e.g.
    /// `TRIAGE_DESK__API__BASE_URL=https://hospital.example/api`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRIAGE_DESK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.push.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests touching them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("TRIAGE_DESK__API__BASE_URL", "https://hospital.example/api");
        env::set_var("TRIAGE_DESK__PUSH__URL", "wss://hospital.example/push");
    }

    fn clear_env() {
        env::remove_var("TRIAGE_DESK__API__BASE_URL");
        env::remove_var("TRIAGE_DESK__PUSH__URL");
    }

    #[test]
    fn loads_from_environment_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();

        let config = AppConfig::load().unwrap();
        assert_eq!(config.api.base_url, "https://hospital.example/api");
        assert_eq!(config.push.topic, "/topic/queue");
        assert_eq!(config.push.reconnect_backoff_secs, 5);
        assert!(config.validate().is_ok());

        clear_env();
    }

    #[test]
    fn missing_required_values_fail_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();

        assert!(AppConfig::load().is_err());
    }
}
