//! Converter adapters - Implementations of the `DocumentConverter` port.
//!
//! - `PandocConverter` - Runs the `pandoc` executable per request

mod pandoc;

pub use pandoc::{PandocConverter, DEFAULT_PANDOC_PROGRAM};
