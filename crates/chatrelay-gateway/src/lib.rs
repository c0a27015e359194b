//! chatrelay gateway library entry.
//!
//! This crate wires the WebSocket transport, the message router, the
//! connection registry, and the periodic report into a runnable relay. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod dispatch;
pub mod obs;
pub mod ops;
pub mod realtime;
pub mod router;
pub mod transport;
