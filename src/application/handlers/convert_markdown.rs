//! ConvertMarkdownHandler - Command handler for Markdown conversion.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::ConvertedDocument;
use crate::ports::{ConversionError, DocumentConverter};

/// Command to convert Markdown text into a document.
#[derive(Debug, Clone, Default)]
pub struct ConvertMarkdownCommand {
    /// Markdown text; `None` when the caller left the field out.
    pub markdown: Option<String>,
}

impl ConvertMarkdownCommand {
    pub fn new(markdown: impl Into<String>) -> Self {
        Self {
            markdown: Some(markdown.into()),
        }
    }
}

/// Errors returned by [`ConvertMarkdownHandler`].
#[derive(Debug, Clone, Error)]
pub enum ConvertMarkdownError {
    #[error("No markdown provided")]
    MissingMarkdown,

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Handler for converting Markdown through the external converter.
pub struct ConvertMarkdownHandler {
    converter: Arc<dyn DocumentConverter>,
}

impl ConvertMarkdownHandler {
    pub fn new(converter: Arc<dyn DocumentConverter>) -> Self {
        Self { converter }
    }

    pub async fn handle(
        &self,
        cmd: ConvertMarkdownCommand,
    ) -> Result<ConvertedDocument, ConvertMarkdownError> {
        // 1. Validate input
        let markdown = cmd.markdown.ok_or_else(|| {
            tracing::error!("No markdown provided in request");
            ConvertMarkdownError::MissingMarkdown
        })?;

        // 2. Make sure the converter can run at all
        let converter_version = self.converter.probe().await.map_err(|e| {
            tracing::error!("Error checking pandoc: {}", e);
            e
        })?;
        tracing::info!("Pandoc version: {}", converter_version);

        // 3. Convert (single attempt)
        let document = self.converter.convert(&markdown).await?;
        Ok(document)
    }
}
