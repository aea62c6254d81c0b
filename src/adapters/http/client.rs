//! Shared REST client for the hospital API.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ApiConfig;
use crate::domain::foundation::OperatorSession;
use crate::domain::queue::QueueError;

/// Low-level failure from an API call, before per-port mapping.
///
/// Adapters that know which resource they addressed map a `Status` of 404
/// to a domain not-found error; everything else converts via
/// [`ApiError::into`].
#[derive(Debug)]
pub enum ApiError {
    /// The server answered with a non-success status.
    Status { code: StatusCode, body: String },
    /// The request never completed (connect failure, timeout).
    Transport(String),
    /// The response body did not match the expected shape.
    Decode(String),
}

impl From<ApiError> for QueueError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { code, body } if code == StatusCode::CONFLICT => {
                QueueError::conflict(body)
            }
            ApiError::Status { code, body } => {
                QueueError::remote(format!("status {}: {}", code.as_u16(), body))
            }
            ApiError::Transport(msg) => QueueError::remote(msg),
            ApiError::Decode(msg) => QueueError::remote(msg),
        }
    }
}

/// Authenticated JSON client over the hospital REST API.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: OperatorSession,
}

impl ApiClient {
    /// Creates a client bound to the given endpoint and operator session.
    pub fn new(config: &ApiConfig, session: OperatorSession) -> Self {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// The session this client authenticates as.
    pub fn session(&self) -> &OperatorSession {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(self.session.token())
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(path, "POST");
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(self.session.token())
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response).await
    }

    pub(crate) async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(path, "PATCH");
        let response = self
            .http
            .patch(self.url(path))
            .bearer_auth(self.session.token())
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        debug!(path, "DELETE");
        let response = self
            .http
            .delete(self.url(path))
            .bearer_auth(self.session.token())
            .send()
            .await
            .map_err(transport_error)?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("Failed to parse response: {}", e)))
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { code: status, body })
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Transport(format!("Request timed out: {}", err))
    } else if err.is_connect() {
        ApiError::Transport(format!("Connection failed: {}", err))
    } else {
        ApiError::Transport(err.to_string())
    }
}
