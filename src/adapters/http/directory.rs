//! REST implementation of the ward directory port.

use async_trait::async_trait;

use crate::domain::admission::{Bed, Department, Ward};
use crate::domain::foundation::{DepartmentId, WardId};
use crate::domain::queue::QueueError;
use crate::ports::WardDirectory;

use super::client::ApiClient;

/// Department, ward, and bed reads over the hospital REST API.
pub struct RestWardDirectory {
    client: ApiClient,
}

impl RestWardDirectory {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WardDirectory for RestWardDirectory {
    async fn list_departments(&self) -> Result<Vec<Department>, QueueError> {
        self.client
            .get_json("/departments")
            .await
            .map_err(Into::into)
    }

    async fn list_wards(&self, department_id: DepartmentId) -> Result<Vec<Ward>, QueueError> {
        self.client
            .get_json(&format!("/departments/{}/wards", department_id))
            .await
            .map_err(Into::into)
    }

    async fn list_beds(&self, ward_id: WardId) -> Result<Vec<Bed>, QueueError> {
        self.client
            .get_json(&format!("/wards/{}/beds", ward_id))
            .await
            .map_err(Into::into)
    }
}
