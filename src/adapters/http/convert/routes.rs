//! Route configuration for conversion endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{convert, health_check, ConvertAppState};

/// Creates the conversion router.
///
/// Routes:
/// - `GET /` - Health check with endpoint listing
/// - `POST /convert` - Convert Markdown (`{"markdown": "..."}`) to DOCX
pub fn convert_router() -> Router<ConvertAppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/convert", post(convert))
}
