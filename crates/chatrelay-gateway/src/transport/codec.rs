//! Frame classification for the transport layer.
//!
//! - Text frames carry the relay protocol and go to the router untouched
//! - Binary frames are not part of the protocol and are only measured
//! - Ping/Pong/Close are surfaced for lifecycle management

use axum::extract::ws::Message;

#[derive(Debug, PartialEq, Eq)]
pub enum Inbound {
    Text(String),
    Binary { bytes_len: usize },
    Ping,
    Pong,
    Close,
}

pub fn decode(msg: Message) -> Inbound {
    match msg {
        Message::Text(s) => Inbound::Text(s),
        Message::Binary(b) => Inbound::Binary { bytes_len: b.len() },
        Message::Ping(_) => Inbound::Ping,
        Message::Pong(_) => Inbound::Pong,
        Message::Close(_) => Inbound::Close,
    }
}
