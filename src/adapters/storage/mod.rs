//! Storage Adapters
//!
//! Temporary filesystem state for conversions.
//!
//! ## Available Adapters
//!
//! - **TempWorkspace** - Process-lifetime directory, removed on shutdown
//! - **ConversionJob** - Per-request directory, removed when the request ends
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::TempWorkspace;
//!
//! let workspace = TempWorkspace::create()?;
//! let job = workspace.open_job(DocumentFormat::Docx)?;
//! job.stage_input("# Hello").await?;
//! job.close();
//! ```

mod temp_workspace;

pub use temp_workspace::{ConversionJob, TempWorkspace, WorkspaceError};
