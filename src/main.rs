//! Pandoc Gateway server binary.
//!
//! Loads configuration, acquires the temporary workspace, serves the
//! conversion API until SIGINT/SIGTERM, then removes the workspace.

use std::error::Error;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use pandoc_gateway::adapters::{app_router, ConvertAppState, PandocConverter, TempWorkspace};
use pandoc_gateway::config::{AppConfig, LogFormat, ServerConfig};
use pandoc_gateway::ports::DocumentConverter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let workspace = Arc::new(match &config.converter.temp_root {
        Some(root) => TempWorkspace::create_in(root)?,
        None => TempWorkspace::create()?,
    });

    let converter = PandocConverter::new(Arc::clone(&workspace))
        .with_pandoc_path(config.converter.program.clone());

    match converter.probe().await {
        Ok(version) => tracing::info!("Pandoc version: {}", version),
        Err(e) => tracing::warn!("{}; conversions will fail until it is installed", e),
    }

    let app = app_router(ConvertAppState::new(Arc::new(converter)), &config.server);

    let listener = TcpListener::bind(config.server.socket_addr()?).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    match Arc::try_unwrap(workspace) {
        Ok(workspace) => {
            if let Err(e) = workspace.close() {
                tracing::error!("Error cleaning up temporary directory: {}", e);
            }
        }
        Err(workspace) => tracing::warn!(
            path = %workspace.path().display(),
            "Temporary workspace still referenced at shutdown, leaving removal to drop"
        ),
    }

    served?;
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match server.effective_log_format() {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received");
}
