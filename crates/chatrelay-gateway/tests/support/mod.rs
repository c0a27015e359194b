//! Test connections backed by real bounded queues.

#![allow(dead_code)]

use axum::extract::ws::Message;
use tokio::sync::mpsc;

use chatrelay_gateway::realtime::{Connection, ConnectionRegistry};

pub struct Peer {
    pub conn: Connection,
    pub rx: mpsc::Receiver<Message>,
}

impl Peer {
    pub fn new(registry: &ConnectionRegistry, remote: &str) -> Self {
        Self::with_capacity(registry, remote, 16)
    }

    pub fn with_capacity(registry: &ConnectionRegistry, remote: &str, cap: usize) -> Self {
        let (tx, rx) = mpsc::channel(cap);
        Self {
            conn: Connection::new(registry.next_id(), remote, tx),
            rx,
        }
    }

    /// Everything queued so far, as text.
    pub fn drain(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                Message::Text(s) => out.push(s),
                other => panic!("unexpected frame: {other:?}"),
            }
        }
        out
    }
}
