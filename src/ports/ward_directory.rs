//! WardDirectory port - department/ward/bed read endpoints.

use async_trait::async_trait;

use crate::domain::admission::{Bed, Department, Ward};
use crate::domain::foundation::{DepartmentId, WardId};
use crate::domain::queue::QueueError;

/// Port for the ward directory collaborator backing the cascading
/// department -> ward -> bed selection.
#[async_trait]
pub trait WardDirectory: Send + Sync {
    /// Lists all departments.
    async fn list_departments(&self) -> Result<Vec<Department>, QueueError>;

    /// Lists the wards of a department.
    async fn list_wards(&self, department_id: DepartmentId) -> Result<Vec<Ward>, QueueError>;

    /// Lists the beds of a ward, with their advisory `is_taken` flag.
    async fn list_beds(&self, ward_id: WardId) -> Result<Vec<Bed>, QueueError>;
}
