//! Application builder — wires state, realtime bridge, and router.

use std::sync::Arc;

use axum::Router;
use tokio::task::JoinHandle;
use tracing::info;

use mesa_core::config::AppConfig;
use mesa_core::error::AppError;
use mesa_core::traits::IdentityProvider;
use mesa_realtime::EventBridge;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the Axum application over a fully wired state.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Starts the bridge that forwards domain events to live connections.
pub fn spawn_event_bridge(state: &AppState) -> JoinHandle<()> {
    EventBridge::new(Arc::clone(&state.registry)).spawn(&state.event_bus)
}

/// Runs the Mesa server until shutdown.
pub async fn run_server(
    config: AppConfig,
    identity_provider: Arc<dyn IdentityProvider>,
) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, identity_provider);

    let _bridge = spawn_event_bridge(&state);
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(addr = %addr, "Mesa server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
