//! Observability helpers.

pub mod report;

pub use report::{spawn_reporter, ConnectionReport, UserEntry};
