//! Triage Desk - Shared patient-queue coordination layer.
//!
//! This crate implements the real-time triage/admission queue shared by
//! nurse, doctor, and admin sessions: a read-model cache, a push
//! synchronization channel, the queue lifecycle state machine, the
//! two-phase admission allocation protocol, and the password
//! re-verification gate for sensitive mutations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
