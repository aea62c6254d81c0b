//! Push channel configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the server-push subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct PushConfig {
    /// WebSocket endpoint (e.g. `wss://hospital.example/push`)
    pub url: String,

    /// Logical topic carrying queue events
    #[serde(default = "default_topic")]
    pub topic: String,

    /// Fixed delay between reconnect attempts, in seconds
    #[serde(default = "default_backoff")]
    pub reconnect_backoff_secs: u64,
}

impl PushConfig {
    /// Reconnect backoff as a `Duration`.
    pub fn reconnect_backoff(&self) -> Duration {
        Duration::from_secs(self.reconnect_backoff_secs)
    }

    /// Validate push configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("push.url"));
        }
        if !self.url.starts_with("ws://") && !self.url.starts_with("wss://") {
            return Err(ValidationError::InvalidPushUrl);
        }
        if self.topic.trim().is_empty() {
            return Err(ValidationError::MissingRequired("push.topic"));
        }
        if self.reconnect_backoff_secs == 0 {
            return Err(ValidationError::InvalidBackoff);
        }
        Ok(())
    }
}

fn default_topic() -> String {
    "/topic/queue".to_string()
}

fn default_backoff() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> PushConfig {
        PushConfig {
            url: url.to_string(),
            topic: default_topic(),
            reconnect_backoff_secs: default_backoff(),
        }
    }

    #[test]
    fn wss_url_with_defaults_is_valid() {
        let c = config("wss://hospital.example/push");
        assert!(c.validate().is_ok());
        assert_eq!(c.reconnect_backoff(), Duration::from_secs(5));
    }

    #[test]
    fn http_url_is_rejected() {
        assert!(matches!(
            config("https://hospital.example/push").validate(),
            Err(ValidationError::InvalidPushUrl)
        ));
    }

    #[test]
    fn zero_backoff_is_rejected() {
        let mut c = config("wss://hospital.example/push");
        c.reconnect_backoff_secs = 0;
        assert!(matches!(c.validate(), Err(ValidationError::InvalidBackoff)));
    }
}
