//! Application handlers.
//!
//! Command handlers that orchestrate the conversion ports.

pub mod convert_markdown;

pub use convert_markdown::{ConvertMarkdownCommand, ConvertMarkdownError, ConvertMarkdownHandler};
