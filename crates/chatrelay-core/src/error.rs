//! Shared error type across chatrelay crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, RelayError>;

/// Unified error type used by core and gateway.
///
/// Clients never see these: the relay only ever speaks plain-text notices.
/// They surface in logs and in startup failures.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("connection closed")]
    ConnectionClosed,
    #[error("outbound queue full")]
    QueueFull,
    #[error("internal: {0}")]
    Internal(String),
}

impl RelayError {
    /// Stable short code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::BadRequest(_) => "BAD_REQUEST",
            RelayError::UnsupportedVersion => "UNSUPPORTED_VERSION",
            RelayError::ConnectionClosed => "CONNECTION_CLOSED",
            RelayError::QueueFull => "QUEUE_FULL",
            RelayError::Internal(_) => "INTERNAL",
        }
    }

    /// True for failures local to one recipient (the relay keeps going).
    pub fn is_delivery_failure(&self) -> bool {
        matches!(self, RelayError::ConnectionClosed | RelayError::QueueFull)
    }
}
