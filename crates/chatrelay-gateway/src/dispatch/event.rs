use crate::realtime::{ConnId, Connection, Delivery};

/// Transport lifecycle and traffic, as seen by the router.
#[derive(Debug)]
pub enum RelayEvent {
    /// A session finished its handshake.
    Open(Connection),
    /// A text frame arrived on `conn`.
    Message { conn: Connection, text: String },
    /// The session closed normally.
    Close(ConnId),
    /// The session died with a transport fault (including a dropped socket
    /// that never sent a Close frame).
    Error { conn: ConnId, cause: String },
}

/// What the router did with one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Opened,
    /// Name stored and the join notice broadcast.
    Registered {
        username: String,
        replaced: Option<ConnId>,
        announced: Delivery,
    },
    /// The sender closed before its `register:` was applied.
    RegisterIgnored,
    PrivateDelivered {
        sender: String,
        target: String,
        delivered: bool,
    },
    PrivateNotFound {
        target: String,
    },
    Broadcast(Delivery),
    Closed {
        usernames: Vec<String>,
        announced: Delivery,
    },
    /// Cleaned up after a transport fault; the others still hear about it.
    Errored {
        usernames: Vec<String>,
        announced: Delivery,
    },
}
