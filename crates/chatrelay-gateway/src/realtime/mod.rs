//! Realtime runtime (registry + egress engine) for the relay.

pub mod core;
pub mod types;

pub use self::core::{ConnId, Connection, ConnectionRegistry, RealtimeCore, Registration, RegistrySnapshot};
pub use types::Delivery;
