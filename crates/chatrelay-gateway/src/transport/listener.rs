//! Listener bind with bounded retry.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::time::{sleep, Duration};

use chatrelay_core::error::{RelayError, Result};

/// Bind `addr`, trying up to `attempts` times with `delay` in between.
pub async fn bind_with_retry(addr: SocketAddr, attempts: u32, delay: Duration) -> Result<TcpListener> {
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match TcpListener::bind(addr).await {
            Ok(listener) => return Ok(listener),
            Err(e) if attempt < attempts => {
                tracing::warn!(%addr, attempt, retry_in_ms = delay.as_millis() as u64, error = %e, "bind failed, retrying");
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                return Err(RelayError::Internal(format!(
                    "bind {addr} failed after {attempt} attempts: {e}"
                )));
            }
        }
    }
}
