//! REST implementation of the admission port.

use async_trait::async_trait;

use crate::domain::admission::Admission;
use crate::domain::queue::QueueError;
use crate::ports::{AdmissionService, CreateAdmissionRequest};

use super::client::ApiClient;

/// Admission creation over the hospital REST API.
///
/// A 409 from the server means another session allocated the same bed
/// first; the shared status mapping surfaces that as a conflict.
pub struct RestAdmissionService {
    client: ApiClient,
}

impl RestAdmissionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdmissionService for RestAdmissionService {
    async fn create(&self, req: CreateAdmissionRequest) -> Result<Admission, QueueError> {
        self.client
            .post_json("/admissions", &req)
            .await
            .map_err(Into::into)
    }
}
