//! chatrelay: WebSocket text relay.
//!
//! - WebSocket endpoint: `/` (and `/v1/ws`)
//! - Registration, private messages, and broadcast over plain text frames
//! - Tracing span per session, periodic connection report
//! - Bind retry on startup, graceful shutdown on Ctrl+C / SIGTERM

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

use chatrelay_core::error::{RelayError, Result};
use chatrelay_gateway::{app_state::AppState, config, obs, router, transport};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides the port in `gateway.listen`)
    port: Option<u16>,

    /// Path to the YAML config file; missing file means defaults
    #[arg(short, long, default_value = "chatrelay.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.code(), error = %e, "chatrelay failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let cfg = config::load_or_default(&args.config)?;
    let listen = cfg.gateway.listen_addr(args.port)?;
    let state = AppState::new(cfg)?;

    let gw = &state.cfg().gateway;
    let listener = transport::listener::bind_with_retry(
        listen,
        gw.bind_retries,
        Duration::from_millis(gw.bind_retry_delay_ms),
    )
    .await?;

    let reporter = (gw.report_interval_ms > 0).then(|| {
        obs::spawn_reporter(state.registry(), Duration::from_millis(gw.report_interval_ms))
    });

    let app = router::build_router(state);

    tracing::info!(%listen, "chatrelay listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RelayError::Internal(format!("server failed: {e}")))?;

    if let Some(reporter) = reporter {
        reporter.abort();
    }
    tracing::info!("chatrelay stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}
