//! Converted document value types.
//!
//! The gateway never inspects document bytes; these types only carry the
//! metadata needed to hand the converter's output back as a download.

use serde::{Deserialize, Serialize};

/// Output formats the gateway can hand back to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Office Open XML word processing document.
    Docx,
}

impl DocumentFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Docx => "docx",
        }
    }

    /// Writer name passed to the converter's `--to` flag.
    pub fn pandoc_writer(&self) -> &'static str {
        match self {
            DocumentFormat::Docx => "docx",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Docx => write!(f, "docx"),
        }
    }
}

/// Base name used for every download.
pub const DOWNLOAD_BASE_NAME: &str = "document";

/// A document produced by the external converter.
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    /// The converted content as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: &'static str,
    /// Suggested filename for download.
    pub filename: String,
}

impl ConvertedDocument {
    /// Create a new converted document.
    pub fn new(content: Vec<u8>, format: DocumentFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type(),
            filename: format!("{}.{}", base_filename, format.extension()),
        }
    }

    /// Create from DOCX bytes with the standard download name.
    pub fn docx(content: Vec<u8>) -> Self {
        Self::new(content, DocumentFormat::Docx, DOWNLOAD_BASE_NAME)
    }
}
