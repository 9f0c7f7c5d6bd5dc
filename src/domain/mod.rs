//! Domain layer containing the gateway's value types.
//!
//! # Module Organization
//!
//! - `document` - Output formats and converted document payloads

pub mod document;

pub use document::{ConvertedDocument, DocumentFormat, DOWNLOAD_BASE_NAME};
