//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the application and the outside world. Adapters implement these ports.
//!
//! - `DocumentConverter` - Markdown to document conversion via an external tool

mod document_converter;

pub use document_converter::{ConversionError, DocumentConverter};
