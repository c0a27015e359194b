//! Shared application state for the relay gateway.
//!
//! Holds the validated config and the single router (which owns the egress
//! core and, through it, the connection registry).

use std::sync::Arc;

use chatrelay_core::error::Result;

use crate::config::GatewayConfig;
use crate::dispatch::MessageRouter;
use crate::realtime::{ConnectionRegistry, RealtimeCore};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    router: Arc<MessageRouter>,
}

struct AppStateInner {
    cfg: GatewayConfig,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        cfg.validate()?;

        let realtime = Arc::new(RealtimeCore::new());
        let router = MessageRouter::new(realtime);

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            router: Arc::new(router),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn router(&self) -> Arc<MessageRouter> {
        Arc::clone(&self.router)
    }

    pub fn registry(&self) -> Arc<ConnectionRegistry> {
        Arc::clone(self.router.core().registry())
    }
}
