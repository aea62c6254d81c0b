//! REST implementation of the credential verifier port.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::domain::queue::QueueError;
use crate::ports::CredentialVerifier;

use super::client::{ApiClient, ApiError};

/// Password re-verification over the hospital auth endpoint.
pub struct RestCredentialVerifier {
    client: ApiClient,
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    valid: bool,
}

impl RestCredentialVerifier {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CredentialVerifier for RestCredentialVerifier {
    async fn verify(&self, username: &str, password: &str) -> Result<bool, QueueError> {
        let body = VerifyRequest { username, password };
        let result: Result<VerifyResponse, ApiError> =
            self.client.post_json("/auth/verify", &body).await;

        match result {
            Ok(response) => Ok(response.valid),
            // The endpoint answers 401 for a wrong password rather than
            // a body with valid=false on some deployments.
            Err(ApiError::Status { code, .. }) if code == StatusCode::UNAUTHORIZED => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_request_serializes_credentials() {
        let body = VerifyRequest {
            username: "dr.chen",
            password: "hunter2",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["username"], "dr.chen");
        assert_eq!(json["password"], "hunter2");
    }

    #[test]
    fn verify_response_parses() {
        let r: VerifyResponse = serde_json::from_str(r#"{"valid": false}"#).unwrap();
        assert!(!r.valid);
    }
}
