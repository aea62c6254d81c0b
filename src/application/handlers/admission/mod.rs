//! Admission allocation protocol.
//!
//! The cascading department -> ward -> bed picker plus the two-step
//! "create admission, confirm queue" composite action.

mod picker;
mod submit_admit;

pub use picker::AllocationPicker;
pub use submit_admit::{SubmitAdmitCommand, SubmitAdmitHandler};
