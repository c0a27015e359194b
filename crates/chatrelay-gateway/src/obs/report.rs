//! Periodic connection report.
//!
//! Every interval, log how many connections are open and which usernames are
//! registered from which peer. Only read snapshots are taken, so routing is
//! never stalled by the reporter.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior};

use crate::realtime::ConnectionRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEntry {
    pub username: String,
    pub remote: String,
}

/// Point-in-time view of the registry, users sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionReport {
    pub total: usize,
    pub users: Vec<UserEntry>,
}

impl ConnectionReport {
    pub async fn collect(registry: &ConnectionRegistry) -> Self {
        let snapshot = registry.snapshot().await;
        let total = snapshot.total;
        let mut users: Vec<UserEntry> = snapshot
            .users
            .into_iter()
            .map(|(username, conn)| UserEntry {
                username,
                remote: conn.remote().to_string(),
            })
            .collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Self { total, users }
    }

    pub fn log(&self) {
        tracing::info!(total = self.total, registered = self.users.len(), "active connections");
        for u in &self.users {
            tracing::info!(username = %u.username, remote = %u.remote, "connected user");
        }
    }
}

/// Spawn the reporter. The first report is emitted immediately.
pub fn spawn_reporter(registry: Arc<ConnectionRegistry>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(every);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tick.tick().await;
            ConnectionReport::collect(&registry).await.log();
        }
    })
}
