//! Event List - Binary Entry Point
//!
//! Serves the event store to the desktop front-end over local HTTP.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use event_list::api::{create_router, AppState};
use event_list::Settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env();
    info!(
        version = event_list::VERSION,
        data_dir = %settings.data_dir().display(),
        "Starting event-list"
    );

    let state = Arc::new(AppState::from_settings(&settings));

    // Surface a corrupted file in the log at startup rather than on first request
    if let Err(e) = state.events.get(false).await {
        tracing::error!(error = %e, "Could not load events");
    }
    if let Err(e) = state.config.get().await {
        tracing::error!(error = %e, "Could not load configuration, using defaults");
    }

    let app = create_router(state);
    let listener = TcpListener::bind(&settings.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
