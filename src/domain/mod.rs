//! Domain layer - entities, value objects, and lifecycle rules.
//!
//! No I/O happens here; remote collaborators are reached through `ports`.

pub mod admission;
pub mod foundation;
pub mod queue;
