//! Adapters - concrete implementations of the ports.
//!
//! `http` talks to the REST collaborators with reqwest, `websocket`
//! implements the push transport over tokio-tungstenite, and `mock`
//! provides deterministic in-memory implementations for tests.

pub mod http;
pub mod mock;
pub mod websocket;
