//! Data transfer objects for the conversion endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /convert`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConvertRequest {
    /// Markdown source text.
    #[serde(default)]
    pub markdown: Option<String>,
}

/// Static capability listing served on `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    /// Route -> human readable description.
    pub endpoints: BTreeMap<String, String>,
}

impl HealthResponse {
    pub fn current() -> Self {
        let endpoints = [
            ("/", "GET - Health check (this message)"),
            ("/convert", "POST - Convert Markdown to DOCX"),
        ]
        .into_iter()
        .map(|(path, description)| (path.to_string(), description.to_string()))
        .collect();

        Self {
            status: "OK".to_string(),
            message: "Pandoc Conversion API".to_string(),
            endpoints,
        }
    }
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error code.
    pub code: String,
}

impl ErrorResponse {
    fn with_code(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: code.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_code("BAD_REQUEST", message)
    }

    pub fn converter_unavailable(message: impl Into<String>) -> Self {
        Self::with_code("CONVERTER_UNAVAILABLE", message)
    }

    pub fn conversion_failed(message: impl Into<String>) -> Self {
        Self::with_code("CONVERSION_FAILED", message)
    }

    pub fn output_missing(message: impl Into<String>) -> Self {
        Self::with_code("OUTPUT_MISSING", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_code("INTERNAL_ERROR", message)
    }
}
