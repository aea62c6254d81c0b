//! Command handlers - the transition-request surface exposed to the UI.

pub mod admission;
pub mod queue;
