//! Document Converter Port - External conversion interface.
//!
//! This port defines the contract for turning Markdown text into a finished
//! document. The application layer depends on this trait, while adapters
//! (like `PandocConverter`) provide the implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ConvertedDocument;

/// Port for converting Markdown to a downloadable document.
///
/// # Contract
///
/// Implementations must:
/// - Treat the Markdown as opaque text (no validation)
/// - Make a single attempt per call, no retries
/// - Remove any temporary state they create before returning, on every path
/// - Report clear errors that distinguish an unavailable converter from a
///   failing one
///
/// # Usage
///
/// ```rust,ignore
/// let converter: &dyn DocumentConverter = get_converter();
///
/// let version = converter.probe().await?;
/// let docx = converter.convert("# My Document\n\nContent here").await?;
/// ```
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    /// Check that the external converter can be executed.
    ///
    /// Returns the first line of the converter's version banner.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::Unavailable` if the converter is missing or
    /// refuses to report its version.
    async fn probe(&self) -> Result<String, ConversionError>;

    /// Convert Markdown content into a document.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError` if the converter cannot be started, exits
    /// with a failure, or does not produce an output file.
    async fn convert(&self, markdown: &str) -> Result<ConvertedDocument, ConversionError>;
}

/// Errors that can occur while converting a document.
#[derive(Debug, Clone, Error)]
pub enum ConversionError {
    /// External converter is not installed or cannot be executed.
    #[error("Pandoc not available: {0}")]
    Unavailable(String),

    /// Converter ran and exited with a failure status.
    ///
    /// Carries the converter's captured diagnostic output.
    #[error("Pandoc conversion failed: {0}")]
    Failed(String),

    /// Converter reported success but left no output file behind.
    #[error("Output file was not created")]
    OutputMissing(PathBuf),

    /// Staging the input or reading the output failed.
    #[error("I/O error during conversion: {0}")]
    Io(String),
}

impl ConversionError {
    /// Create an unavailable-converter error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    /// Create a failed-conversion error from captured diagnostics.
    pub fn failed(diagnostics: impl Into<String>) -> Self {
        Self::Failed(diagnostics.into())
    }

    /// Create an I/O error.
    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }
}
