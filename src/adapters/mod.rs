//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `converter` - Pandoc process invocation
//! - `storage` - Temporary workspace and per-request job directories
//! - `http` - axum router, handlers and middleware

pub mod converter;
pub mod http;
pub mod storage;

pub use converter::PandocConverter;
pub use http::{app_router, ConvertAppState};
pub use storage::{ConversionJob, TempWorkspace, WorkspaceError};
