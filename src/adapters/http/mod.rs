//! HTTP adapters - REST API implementations.

pub mod convert;
pub mod middleware;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use convert::{convert_router, ConvertAppState};

/// Assemble the full application router with state and layers applied.
///
/// Request bodies are not size-limited; Markdown documents of any length
/// are passed to the converter.
pub fn app_router(state: ConvertAppState, server: &ServerConfig) -> Router {
    convert_router()
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::cors_layer(&server.cors_origins_list())),
        )
}
