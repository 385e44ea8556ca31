mod bootstrap;
mod config;
mod console;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use courier_session::SessionEvents;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "courier=debug,courier_api=debug,courier_session=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;

    // Subscribe before the session starts so the first pairing code is seen.
    let events = SessionEvents::new();
    tokio::spawn(console::report_session_events(events.subscribe()));

    // No token or no ready session, no listener.
    let app = tokio::select! {
        app = bootstrap::prepare(&config, events) => app?,
        _ = shutdown_signal() => {
            info!("Shutdown requested before the session was ready");
            return Ok(());
        }
    };
    let app = app.layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("REST API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                tracing::warn!("SIGTERM handler unavailable: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
