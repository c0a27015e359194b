//! Top-level facade crate for chatrelay.
//!
//! Re-exports the protocol core and the gateway library so users can depend on a single crate.

pub mod core {
    pub use chatrelay_core::*;
}

pub mod gateway {
    pub use chatrelay_gateway::*;
}
