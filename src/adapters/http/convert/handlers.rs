//! HTTP handlers for conversion endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{ConvertMarkdownCommand, ConvertMarkdownError, ConvertMarkdownHandler};
use crate::domain::ConvertedDocument;
use crate::ports::{ConversionError, DocumentConverter};

use super::dto::{ConvertRequest, ErrorResponse, HealthResponse};

/// Application state for conversion endpoints.
#[derive(Clone)]
pub struct ConvertAppState {
    /// Document converter (injected)
    pub converter: Arc<dyn DocumentConverter>,
}

impl ConvertAppState {
    pub fn new(converter: Arc<dyn DocumentConverter>) -> Self {
        Self { converter }
    }

    pub fn convert_markdown_handler(&self) -> ConvertMarkdownHandler {
        ConvertMarkdownHandler::new(Arc::clone(&self.converter))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - Health check with the static endpoint listing
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::current())
}

/// POST /convert - Convert Markdown to a downloadable DOCX
pub async fn convert(
    State(state): State<ConvertAppState>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Result<Response, ConvertApiError> {
    tracing::info!("Received conversion request");

    let Json(request) = payload.map_err(|rejection| {
        tracing::error!("Rejected conversion request body: {}", rejection.body_text());
        ConvertApiError::BadRequest(rejection.body_text())
    })?;

    let handler = state.convert_markdown_handler();
    let cmd = ConvertMarkdownCommand {
        markdown: request.markdown,
    };

    let document = handler.handle(cmd).await?;

    attachment(document)
}

/// Build the download response for a converted document.
fn attachment(document: ConvertedDocument) -> Result<Response, ConvertApiError> {
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        document.filename
    ))
    .map_err(|e| ConvertApiError::Internal(format!("Invalid download filename: {}", e)))?;

    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static(document.content_type),
        ),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((StatusCode::OK, headers, document.content).into_response())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts conversion errors to HTTP responses.
#[derive(Debug)]
pub enum ConvertApiError {
    BadRequest(String),
    ConverterUnavailable(String),
    ConversionFailed(String),
    OutputMissing(String),
    Internal(String),
}

impl From<ConvertMarkdownError> for ConvertApiError {
    fn from(err: ConvertMarkdownError) -> Self {
        let message = err.to_string();
        match err {
            ConvertMarkdownError::MissingMarkdown => ConvertApiError::BadRequest(message),
            ConvertMarkdownError::Conversion(ConversionError::Unavailable(_)) => {
                ConvertApiError::ConverterUnavailable(message)
            }
            ConvertMarkdownError::Conversion(ConversionError::Failed(_)) => {
                ConvertApiError::ConversionFailed(message)
            }
            ConvertMarkdownError::Conversion(ConversionError::OutputMissing(_)) => {
                ConvertApiError::OutputMissing(message)
            }
            ConvertMarkdownError::Conversion(ConversionError::Io(_)) => {
                tracing::error!("Unexpected error: {}", message);
                ConvertApiError::Internal(message)
            }
        }
    }
}

impl IntoResponse for ConvertApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ConvertApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            ConvertApiError::ConverterUnavailable(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::converter_unavailable(msg),
            ),
            ConvertApiError::ConversionFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::conversion_failed(msg),
            ),
            ConvertApiError::OutputMissing(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::output_missing(msg),
            ),
            ConvertApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}
