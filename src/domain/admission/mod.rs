//! Admission domain - ward resources and the admission record.

mod selection;
mod types;

pub use selection::BedSelection;
pub use types::{Admission, AdmissionStatus, Bed, Department, Ward};
