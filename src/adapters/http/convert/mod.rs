//! Conversion HTTP adapter - REST API for Markdown conversion.
//!
//! Provides endpoints for:
//! - Health check with a static capability listing
//! - Converting Markdown to a DOCX download

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ConvertRequest, ErrorResponse, HealthResponse};
pub use handlers::{ConvertApiError, ConvertAppState};
pub use routes::convert_router;
