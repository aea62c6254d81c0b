//! REST implementation of the queue CRUD port.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::domain::foundation::{PatientId, QueueId};
use crate::domain::queue::{QueueEntry, QueueError};
use crate::ports::{CreateQueueRequest, QueueService, UpdateQueueRequest};

use super::client::{ApiClient, ApiError};

/// Queue CRUD over the hospital REST API.
pub struct RestQueueService {
    client: ApiClient,
}

#[derive(Debug, Deserialize)]
struct ActiveAdmissionResponse {
    active: bool,
}

impl RestQueueService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn not_found(id: QueueId) -> impl FnOnce(ApiError) -> QueueError {
        move |err| match err {
            ApiError::Status { code, .. } if code == StatusCode::NOT_FOUND => {
                QueueError::EntryNotFound { queue_id: id }
            }
            other => other.into(),
        }
    }
}

#[async_trait]
impl QueueService for RestQueueService {
    async fn list(&self) -> Result<Vec<QueueEntry>, QueueError> {
        self.client.get_json("/queues").await.map_err(Into::into)
    }

    async fn get(&self, id: QueueId) -> Result<QueueEntry, QueueError> {
        self.client
            .get_json(&format!("/queues/{}", id))
            .await
            .map_err(Self::not_found(id))
    }

    async fn create(&self, req: CreateQueueRequest) -> Result<QueueEntry, QueueError> {
        self.client
            .post_json("/queues", &req)
            .await
            .map_err(Into::into)
    }

    async fn update(&self, id: QueueId, req: UpdateQueueRequest) -> Result<QueueEntry, QueueError> {
        self.client
            .patch_json(&format!("/queues/{}", id), &req)
            .await
            .map_err(Self::not_found(id))
    }

    async fn delete(&self, id: QueueId) -> Result<(), QueueError> {
        self.client
            .delete(&format!("/queues/{}", id))
            .await
            .map_err(Self::not_found(id))
    }

    async fn has_active_admission(&self, patient_id: PatientId) -> Result<bool, QueueError> {
        let response: ActiveAdmissionResponse = self
            .client
            .get_json(&format!("/patients/{}/active-admission", patient_id))
            .await?;
        Ok(response.active)
    }
}
