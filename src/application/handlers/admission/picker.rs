//! AllocationPicker - cascading department/ward/bed selection.
//!
//! Ward choices exist only once a department is chosen and are cleared
//! whenever the department changes; bed choices likewise depend on the
//! ward. The `is_taken` flag on beds is advisory: selecting a bed that is
//! locally taken is rejected as a best-effort pre-check, but the server
//! stays the sole authority at submission time.

use std::sync::{Arc, Mutex};

use crate::domain::admission::{Bed, BedSelection, Department, Ward};
use crate::domain::foundation::{BedId, DepartmentId, WardId};
use crate::domain::queue::QueueError;
use crate::ports::WardDirectory;

#[derive(Debug, Default)]
struct PickerState {
    departments: Vec<Department>,
    wards: Vec<Ward>,
    beds: Vec<Bed>,
    selection: BedSelection,
}

/// Stateful cascading selection backed by the ward directory.
pub struct AllocationPicker {
    directory: Arc<dyn WardDirectory>,
    state: Mutex<PickerState>,
}

impl AllocationPicker {
    pub fn new(directory: Arc<dyn WardDirectory>) -> Self {
        Self {
            directory,
            state: Mutex::new(PickerState::default()),
        }
    }

    /// Loads the department list, resetting the whole cascade.
    pub async fn load_departments(&self) -> Result<Vec<Department>, QueueError> {
        let departments = self.directory.list_departments().await?;
        let mut state = self.state.lock().expect("picker lock poisoned");
        state.departments = departments.clone();
        state.wards.clear();
        state.beds.clear();
        state.selection = BedSelection::empty();
        Ok(departments)
    }

    /// Selects a department and fetches its wards.
    ///
    /// Clears any previous ward and bed choice: options from the old
    /// department are invalid under the new one.
    pub async fn select_department(
        &self,
        department_id: DepartmentId,
    ) -> Result<Vec<Ward>, QueueError> {
        let wards = self.directory.list_wards(department_id).await?;
        let mut state = self.state.lock().expect("picker lock poisoned");
        state.wards = wards.clone();
        state.beds.clear();
        state.selection = BedSelection {
            department_id: Some(department_id),
            ward_id: None,
            bed_id: None,
        };
        Ok(wards)
    }

    /// Selects a ward and fetches its beds, clearing any bed choice.
    pub async fn select_ward(&self, ward_id: WardId) -> Result<Vec<Bed>, QueueError> {
        {
            let state = self.state.lock().expect("picker lock poisoned");
            if state.selection.department_id.is_none() {
                return Err(QueueError::MissingSelection {
                    fields: vec!["department"],
                });
            }
        }

        let beds = self.directory.list_beds(ward_id).await?;
        let mut state = self.state.lock().expect("picker lock poisoned");
        state.beds = beds.clone();
        state.selection.ward_id = Some(ward_id);
        state.selection.bed_id = None;
        Ok(beds)
    }

    /// Selects a bed from the fetched list.
    ///
    /// Rejects beds that are locally marked taken to avoid an obviously
    /// wasted allocation call; a locally free bed can still be rejected
    /// by the server.
    pub fn select_bed(&self, bed_id: BedId) -> Result<(), QueueError> {
        let mut state = self.state.lock().expect("picker lock poisoned");
        if state.selection.ward_id.is_none() {
            return Err(QueueError::MissingSelection {
                fields: vec!["ward"],
            });
        }

        let bed = state
            .beds
            .iter()
            .find(|b| b.id == bed_id)
            .ok_or(QueueError::MissingSelection {
                fields: vec!["bed"],
            })?;

        if bed.is_taken {
            return Err(QueueError::conflict(format!("bed {bed_id} is already taken")));
        }

        state.selection.bed_id = Some(bed_id);
        Ok(())
    }

    /// Snapshot of the current selection, for submission.
    pub fn selection(&self) -> BedSelection {
        self.state
            .lock()
            .expect("picker lock poisoned")
            .selection
            .clone()
    }
}
