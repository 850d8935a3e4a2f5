//! Application builder: wires configuration, store, identity provider and
//! router into a running server.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use dataroom_auth::JwtIdentityProvider;
use dataroom_core::config::AppConfig;
use dataroom_core::error::AppError;
use dataroom_database::connect_store;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the DataRoom server until Ctrl+C (or SIGTERM on Unix).
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!(
        provider = ?config.database.provider,
        max_depth = config.hierarchy.max_depth,
        "Starting DataRoom server"
    );

    let store = connect_store(&config.database).await?;
    let identity = Arc::new(JwtIdentityProvider::new(&config.auth));
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app = build_app(AppState::new(config, store, identity));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("DataRoom server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("DataRoom server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, draining connections");
}
