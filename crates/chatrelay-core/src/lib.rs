//! chatrelay core: transport-agnostic wire grammar, notice texts, and errors.
//!
//! This crate defines the text protocol spoken between relay clients and the
//! error surface shared by the gateway. It carries no transport or runtime
//! dependencies so the grammar can be tested and reused on its own.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed input never fails: it degrades to a broadcast.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{RelayError, Result};
pub use protocol::command::{parse, Command};
