//! Realtime core components for the relay runtime.
//!
//! Connection registry and the egress engine shared by the router and the
//! periodic report.

mod realtime;
mod registry;

pub use realtime::RealtimeCore;
pub use registry::{ConnId, Connection, ConnectionRegistry, Registration, RegistrySnapshot};
