//! WebSocket handler.
//!
//! Responsibilities:
//! - Upgrade HTTP -> WS and capture the peer address
//! - Register the session's `Connection` handle with the router (Open)
//! - Pump the outbound queue to the socket, inbound text to the router
//! - Lifecycle: ping interval + idle timeout
//! - Report the end of the session as Close (clean) or Error (transport fault)

use std::net::SocketAddr;

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, ConnectInfo, State},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tracing::Instrument;

use chatrelay_core::error::{RelayError, Result};

use crate::app_state::AppState;
use crate::dispatch::{MessageRouter, RelayEvent};
use crate::realtime::Connection;
use crate::transport::codec::{decode, Inbound};

// --------------------
// Entry
// --------------------
pub async fn ws_upgrade(
    State(app): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| run_session(app, remote, socket))
}

// --------------------
// Session lifecycle
// --------------------
async fn run_session(app: AppState, remote: SocketAddr, socket: WebSocket) {
    let router = app.router();
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(app.cfg().gateway.outbound_queue);
    let conn = Connection::new(app.registry().next_id(), remote.to_string(), out_tx);
    let id = conn.id();

    let span = tracing::info_span!("session", conn = %id, %remote);
    async move {
        tracing::info!("connection opened");
        router.handle(RelayEvent::Open(conn.clone())).await;

        let event = match pump(&app, &router, &conn, socket, &mut out_rx).await {
            Ok(()) => RelayEvent::Close(id),
            Err(e) => RelayEvent::Error {
                conn: id,
                cause: e.to_string(),
            },
        };
        router.handle(event).await;

        tracing::info!("connection closed");
    }
    .instrument(span)
    .await
}

// --------------------
// Core session loop
// --------------------
async fn pump(
    app: &AppState,
    router: &MessageRouter,
    conn: &Connection,
    socket: WebSocket,
    out_rx: &mut mpsc::Receiver<Message>,
) -> Result<()> {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let gw = &app.cfg().gateway;
    let idle_timeout = Duration::from_millis(gw.idle_timeout_ms);

    let mut ping_tick = tokio::time::interval(Duration::from_millis(gw.ping_interval_ms));
    ping_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_activity = Instant::now();

    loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                let Some(m) = maybe_out else { break; };
                ws_tx
                    .send(m)
                    .await
                    .map_err(|e| RelayError::Internal(format!("websocket send failed: {e}")))?;
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else { break; };
                let msg = incoming
                    .map_err(|e| RelayError::Internal(format!("websocket recv failed: {e}")))?;

                last_activity = Instant::now();

                match decode(msg) {
                    Inbound::Text(text) => {
                        router
                            .handle(RelayEvent::Message { conn: conn.clone(), text })
                            .await;
                    }
                    Inbound::Binary { bytes_len } => {
                        tracing::debug!(bytes_len, "binary frame ignored");
                    }
                    // pong replies are queued by the websocket layer itself
                    Inbound::Ping | Inbound::Pong => {}
                    Inbound::Close => break,
                }
            }

            // ping + idle timeout
            _ = ping_tick.tick() => {
                if last_activity.elapsed() >= idle_timeout {
                    tracing::info!("idle timeout");
                    break;
                }
                ws_tx
                    .send(Message::Ping(Vec::new()))
                    .await
                    .map_err(|e| RelayError::Internal(format!("websocket ping failed: {e}")))?;
            }
        }
    }

    Ok(())
}
