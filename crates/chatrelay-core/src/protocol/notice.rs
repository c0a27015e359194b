//! Relay-generated notices.
//!
//! These are the only texts the relay itself injects into the stream; every
//! other outbound message is client content relayed verbatim.

/// Sender name used when a private message comes from an unregistered connection.
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Broadcast to the remaining connections when one closes.
pub const DISCONNECTED: &str = "A user has disconnected!";

pub fn joined(username: &str) -> String {
    format!("{username} has joined the chat!")
}

pub fn private_from(sender: &str, body: &str) -> String {
    format!("Private message from {sender}: {body}")
}

pub fn sent_to(target: &str) -> String {
    format!("Message sent to {target}")
}

pub fn not_found(target: &str) -> String {
    format!("User {target} not found!")
}
