use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::RwLock;

use chatrelay_core::error::{RelayError, Result};

/// Process-unique connection id, assigned by the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnId(u64);

impl ConnId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Handle to one live session: id, remote address, and its outbound queue.
///
/// The session task owns the socket; everything else only holds clones of
/// this handle. Handles compare by id.
#[derive(Clone)]
pub struct Connection {
    id: ConnId,
    remote: Arc<str>,
    tx: mpsc::Sender<Message>,
}

impl Connection {
    pub fn new(id: ConnId, remote: impl Into<Arc<str>>, tx: mpsc::Sender<Message>) -> Self {
        Self {
            id,
            remote: remote.into(),
            tx,
        }
    }

    pub fn id(&self) -> ConnId {
        self.id
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Queue a text frame without waiting. Never blocks on a slow peer.
    pub fn send_text(&self, text: impl Into<String>) -> Result<()> {
        self.tx
            .try_send(Message::Text(text.into()))
            .map_err(|e| match e {
                TrySendError::Full(_) => RelayError::QueueFull,
                TrySendError::Closed(_) => RelayError::ConnectionClosed,
            })
    }
}

impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Connection {}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("remote", &self.remote)
            .finish()
    }
}

/// Result of `ConnectionRegistry::register`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// Mapping stored. `replaced` is the previous holder of the name, if any
    /// other connection had it (last registration wins, silently).
    Registered { replaced: Option<ConnId> },
    /// The connection is not open (closed concurrently); nothing stored.
    NotConnected,
}

#[derive(Default)]
struct RegistryState {
    connections: HashMap<ConnId, Connection>,
    usernames: HashMap<String, ConnId>,
}

/// Consistent view of the registry taken under one read guard.
#[derive(Debug, Clone)]
pub struct RegistrySnapshot {
    /// Open connections.
    pub total: usize,
    /// `(username, connection)` pairs.
    pub users: Vec<(String, Connection)>,
}

/// Connection registry:
/// - `conn_id -> Connection` (exactly the open connections)
/// - `username -> conn_id` (every value is an open connection)
///
/// Both maps sit behind one lock so a close can never leave a username
/// pointing at a removed connection. Snapshots are cloned out before any send.
///
/// Reverse lookup (`conn_id -> username`) scans the username map. A
/// connection may hold several names if it registers more than once.
pub struct ConnectionRegistry {
    state: RwLock<RegistryState>,
    seq: AtomicU64,
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            seq: AtomicU64::new(1),
        }
    }

    /// Allocate an id for a new connection handle.
    pub fn next_id(&self) -> ConnId {
        ConnId(self.seq.fetch_add(1, Ordering::Relaxed))
    }

    pub async fn add(&self, conn: Connection) {
        let mut st = self.state.write().await;
        st.connections.insert(conn.id(), conn);
    }

    /// Remove a connection and every username mapped to it.
    /// Returns the names that were dropped. Idempotent.
    pub async fn remove(&self, id: ConnId) -> Vec<String> {
        let mut st = self.state.write().await;
        st.connections.remove(&id);

        let mut dropped = Vec::new();
        st.usernames.retain(|name, owner| {
            if *owner == id {
                dropped.push(name.clone());
                false
            } else {
                true
            }
        });
        dropped
    }

    pub async fn register(&self, username: &str, id: ConnId) -> Registration {
        let mut st = self.state.write().await;
        if !st.connections.contains_key(&id) {
            return Registration::NotConnected;
        }
        let replaced = st
            .usernames
            .insert(username.to_string(), id)
            .filter(|prev| *prev != id);
        Registration::Registered { replaced }
    }

    pub async fn lookup_by_username(&self, username: &str) -> Option<Connection> {
        let st = self.state.read().await;
        st.usernames
            .get(username)
            .and_then(|id| st.connections.get(id))
            .cloned()
    }

    /// First username mapped to `id` (map iteration order), if any.
    pub async fn lookup_username(&self, id: ConnId) -> Option<String> {
        let st = self.state.read().await;
        st.usernames
            .iter()
            .find(|(_, owner)| **owner == id)
            .map(|(name, _)| name.clone())
    }

    /// Snapshot of every open connection, for broadcast.
    pub async fn all_connections(&self) -> Vec<Connection> {
        self.state.read().await.connections.values().cloned().collect()
    }

    /// Connection count and registered users, for reporting.
    pub async fn snapshot(&self) -> RegistrySnapshot {
        let st = self.state.read().await;
        let users = st
            .usernames
            .iter()
            .filter_map(|(name, id)| st.connections.get(id).map(|c| (name.clone(), c.clone())))
            .collect();
        RegistrySnapshot {
            total: st.connections.len(),
            users,
        }
    }

    pub async fn contains(&self, id: ConnId) -> bool {
        self.state.read().await.connections.contains_key(&id)
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.connections.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.connections.is_empty()
    }
}
