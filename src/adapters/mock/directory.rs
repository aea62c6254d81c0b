//! Static ward directory for testing.

use async_trait::async_trait;

use crate::domain::admission::{Bed, Department, Ward};
use crate::domain::foundation::{BedId, DepartmentId, WardId};
use crate::domain::queue::QueueError;
use crate::ports::WardDirectory;

/// [`WardDirectory`] serving a fixed directory.
pub struct StaticWardDirectory {
    departments: Vec<Department>,
    wards: Vec<Ward>,
    beds: Vec<Bed>,
}

impl StaticWardDirectory {
    pub fn new(departments: Vec<Department>, wards: Vec<Ward>, beds: Vec<Bed>) -> Self {
        Self {
            departments,
            wards,
            beds,
        }
    }

    /// A small two-department sample: department 1 has wards 2 and 3;
    /// ward 2 holds bed 9 (free) and bed 10 (taken), ward 3 holds bed 11.
    pub fn sample() -> Self {
        let departments = vec![
            Department {
                id: DepartmentId::new(1),
                name: "Emergency".to_string(),
            },
            Department {
                id: DepartmentId::new(2),
                name: "Cardiology".to_string(),
            },
        ];
        let wards = vec![
            Ward {
                id: WardId::new(2),
                department_id: DepartmentId::new(1),
                name: "Ward A".to_string(),
            },
            Ward {
                id: WardId::new(3),
                department_id: DepartmentId::new(1),
                name: "Ward B".to_string(),
            },
            Ward {
                id: WardId::new(4),
                department_id: DepartmentId::new(2),
                name: "Ward C".to_string(),
            },
        ];
        let beds = vec![
            Bed {
                id: BedId::new(9),
                ward_id: WardId::new(2),
                is_taken: false,
            },
            Bed {
                id: BedId::new(10),
                ward_id: WardId::new(2),
                is_taken: true,
            },
            Bed {
                id: BedId::new(11),
                ward_id: WardId::new(3),
                is_taken: false,
            },
        ];
        Self::new(departments, wards, beds)
    }
}

#[async_trait]
impl WardDirectory for StaticWardDirectory {
    async fn list_departments(&self) -> Result<Vec<Department>, QueueError> {
        Ok(self.departments.clone())
    }

    async fn list_wards(&self, department_id: DepartmentId) -> Result<Vec<Ward>, QueueError> {
        Ok(self
            .wards
            .iter()
            .filter(|w| w.department_id == department_id)
            .cloned()
            .collect())
    }

    async fn list_beds(&self, ward_id: WardId) -> Result<Vec<Bed>, QueueError> {
        Ok(self
            .beds
            .iter()
            .filter(|b| b.ward_id == ward_id)
            .cloned()
            .collect())
    }
}
