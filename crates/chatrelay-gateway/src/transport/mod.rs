//! Transport layer (WebSocket).
//!
//! Exposes the WS upgrade handler, the frame classifier, and the listener
//! bind helper. Everything here is I/O glue around the router.

pub mod codec;
pub mod listener;
pub mod ws;
