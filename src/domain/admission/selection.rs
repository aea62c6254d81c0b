//! The department/ward/bed selection submitted to the allocation protocol.

use crate::domain::foundation::{BedId, DepartmentId, WardId};
use crate::domain::queue::QueueError;

/// Cascading selection state for a bed allocation.
///
/// All three levels must be concretely chosen before submission; `validate`
/// names every field still missing so the operator can correct them in one
/// pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BedSelection {
    pub department_id: Option<DepartmentId>,
    pub ward_id: Option<WardId>,
    pub bed_id: Option<BedId>,
}

impl BedSelection {
    /// An empty selection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fully specified selection.
    pub fn complete(department_id: DepartmentId, ward_id: WardId, bed_id: BedId) -> Self {
        Self {
            department_id: Some(department_id),
            ward_id: Some(ward_id),
            bed_id: Some(bed_id),
        }
    }

    /// Validates that every level is selected.
    ///
    /// Returns the validated `(department, ward, bed)` triple, or a
    /// [`QueueError::MissingSelection`] naming each unset field.
    pub fn validate(&self) -> Result<(DepartmentId, WardId, BedId), QueueError> {
        let mut missing = Vec::new();
        if self.department_id.is_none() {
            missing.push("department");
        }
        if self.ward_id.is_none() {
            missing.push("ward");
        }
        if self.bed_id.is_none() {
            missing.push("bed");
        }

        match (self.department_id, self.ward_id, self.bed_id) {
            (Some(d), Some(w), Some(b)) => Ok((d, w, b)),
            _ => Err(QueueError::MissingSelection { fields: missing }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_selection_validates() {
        let selection =
            BedSelection::complete(DepartmentId::new(1), WardId::new(2), BedId::new(9));
        let (d, w, b) = selection.validate().unwrap();
        assert_eq!(d, DepartmentId::new(1));
        assert_eq!(w, WardId::new(2));
        assert_eq!(b, BedId::new(9));
    }

    #[test]
    fn empty_selection_names_all_fields() {
        let err = BedSelection::empty().validate().unwrap_err();
        assert_eq!(
            err,
            QueueError::MissingSelection {
                fields: vec!["department", "ward", "bed"]
            }
        );
    }

    #[test]
    fn partially_set_selection_names_only_missing_fields() {
        let selection = BedSelection {
            department_id: Some(DepartmentId::new(1)),
            ward_id: None,
            bed_id: None,
        };
        let err = selection.validate().unwrap_err();
        assert_eq!(
            err,
            QueueError::MissingSelection {
                fields: vec!["ward", "bed"]
            }
        );
    }
}
