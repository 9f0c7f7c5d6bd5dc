//! CORS layer construction.
//!
//! Browsers call the gateway directly from editor front-ends, so every route
//! answers cross-origin requests. Without configured origins any origin is
//! accepted; otherwise only the listed ones are.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build the CORS layer for the given allow-list.
///
/// Entries that are not valid header values are skipped with a warning;
/// `ServerConfig::validate` rejects them earlier in normal startup.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}
