//! Dispatcher module exports.
//!
//! Re-exports the event type and the message router so the transport can
//! depend on this module directly.

pub mod event;
pub mod router;

pub use event::{RelayEvent, RouteOutcome};
pub use router::MessageRouter;
