use std::sync::Arc;

use chatrelay_core::protocol::command::{parse, Command};
use chatrelay_core::protocol::notice;

use crate::dispatch::event::{RelayEvent, RouteOutcome};
use crate::realtime::{Connection, RealtimeCore, Registration};

/// Single entry point for every transport event.
///
/// Never fails: malformed text degrades to a broadcast, unknown targets to a
/// notice, and a failed send only affects its own recipient.
pub struct MessageRouter {
    core: Arc<RealtimeCore>,
}

impl MessageRouter {
    pub fn new(core: Arc<RealtimeCore>) -> Self {
        Self { core }
    }

    pub fn core(&self) -> &Arc<RealtimeCore> {
        &self.core
    }

    pub async fn handle(&self, event: RelayEvent) -> RouteOutcome {
        match event {
            RelayEvent::Open(conn) => {
                tracing::debug!(conn = %conn.id(), remote = %conn.remote(), "open");
                self.core.registry().add(conn).await;
                RouteOutcome::Opened
            }
            RelayEvent::Message { conn, text } => self.route_text(&conn, &text).await,
            RelayEvent::Close(id) => {
                let usernames = self.core.registry().remove(id).await;
                let announced = self.core.broadcast(notice::DISCONNECTED).await;
                tracing::debug!(
                    conn = %id,
                    ?usernames,
                    sent = announced.sent,
                    attempted = announced.attempted(),
                    "closed"
                );
                RouteOutcome::Closed {
                    usernames,
                    announced,
                }
            }
            RelayEvent::Error { conn, cause } => {
                let usernames = self.core.registry().remove(conn).await;
                tracing::warn!(conn = %conn, ?usernames, %cause, "connection error");
                // an abnormal end is still a disconnect for everyone else
                let announced = self.core.broadcast(notice::DISCONNECTED).await;
                RouteOutcome::Errored {
                    usernames,
                    announced,
                }
            }
        }
    }

    async fn route_text(&self, conn: &Connection, text: &str) -> RouteOutcome {
        let cmd = parse(text);
        tracing::debug!(conn = %conn.id(), kind = cmd.kind(), len = text.len(), "message");

        match cmd {
            Command::Register { username } => self.register(conn, username).await,
            Command::Private { target, body } => self.private(conn, target, body).await,
            Command::Broadcast(text) => {
                let delivery = self.core.broadcast(text).await;
                if delivery.failed > 0 {
                    tracing::debug!(
                        conn = %conn.id(),
                        failed = delivery.failed,
                        attempted = delivery.attempted(),
                        "broadcast partially delivered"
                    );
                }
                RouteOutcome::Broadcast(delivery)
            }
        }
    }

    async fn register(&self, conn: &Connection, username: &str) -> RouteOutcome {
        match self.core.registry().register(username, conn.id()).await {
            Registration::Registered { replaced } => {
                if let Some(prev) = replaced {
                    tracing::info!(%username, conn = %conn.id(), previous = %prev, "username taken over");
                }
                let announced = self.core.broadcast(&notice::joined(username)).await;
                tracing::info!(
                    %username,
                    conn = %conn.id(),
                    sent = announced.sent,
                    attempted = announced.attempted(),
                    "registered"
                );
                RouteOutcome::Registered {
                    username: username.to_string(),
                    replaced,
                    announced,
                }
            }
            Registration::NotConnected => {
                tracing::debug!(%username, conn = %conn.id(), "register from closed connection ignored");
                RouteOutcome::RegisterIgnored
            }
        }
    }

    async fn private(&self, conn: &Connection, target: &str, body: &str) -> RouteOutcome {
        let registry = self.core.registry();

        let Some(target_conn) = registry.lookup_by_username(target).await else {
            self.core.send_to(conn, &notice::not_found(target));
            return RouteOutcome::PrivateNotFound {
                target: target.to_string(),
            };
        };

        let sender = registry
            .lookup_username(conn.id())
            .await
            .unwrap_or_else(|| notice::UNKNOWN_SENDER.to_string());

        let delivered = self
            .core
            .send_to(&target_conn, &notice::private_from(&sender, body));
        self.core.send_to(conn, &notice::sent_to(target));

        RouteOutcome::PrivateDelivered {
            sender,
            target: target.to_string(),
            delivered,
        }
    }
}
