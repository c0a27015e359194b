use std::sync::Arc;

use crate::realtime::core::{Connection, ConnectionRegistry};
use crate::realtime::types::Delivery;

/// RealtimeCore: egress engine (send to one connection / broadcast to all).
///
/// All sends are `try_send` into the recipient's bounded queue. A full or
/// closed queue fails that one send only.
pub struct RealtimeCore {
    registry: Arc<ConnectionRegistry>,
}

impl RealtimeCore {
    pub fn new() -> Self {
        Self::with_registry(Arc::new(ConnectionRegistry::new()))
    }

    pub fn with_registry(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    /// Send to one connection. Returns whether the frame was queued.
    pub fn send_to(&self, conn: &Connection, text: &str) -> bool {
        match conn.send_text(text) {
            Ok(()) => true,
            Err(e) if e.is_delivery_failure() => {
                tracing::debug!(conn = %conn.id(), code = e.code(), "send failed");
                false
            }
            Err(e) => {
                tracing::warn!(conn = %conn.id(), code = e.code(), error = %e, "send failed");
                false
            }
        }
    }

    /// Send to every open connection, in no particular order.
    pub async fn broadcast(&self, text: &str) -> Delivery {
        let targets = self.registry.all_connections().await;
        self.fan_out(&targets, text)
    }

    /// Deliver to a fixed recipient list; each send is independent.
    pub fn fan_out(&self, targets: &[Connection], text: &str) -> Delivery {
        let mut delivery = Delivery::default();
        for conn in targets {
            if self.send_to(conn, text) {
                delivery.sent += 1;
            } else {
                delivery.failed += 1;
            }
        }
        delivery
    }
}
