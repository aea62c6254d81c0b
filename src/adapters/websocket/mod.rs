//! WebSocket implementation of the push transport.

mod transport;

pub use transport::TungsteniteTransport;
