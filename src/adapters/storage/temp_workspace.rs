//! Temporary workspace for staging conversion input and output.
//!
//! The workspace is a single directory acquired at startup and owned for the
//! lifetime of the process. Every conversion request opens a `ConversionJob`,
//! a scoped subdirectory holding exactly one input and one output file.
//!
//! # Directory Structure
//!
//! ```text
//! {temp_root}/pandoc-gateway-XXXXXX/
//! ├── job-<uuid>-XXXXXX/
//! │   ├── input.md
//! │   └── document.docx
//! └── job-<uuid>-XXXXXX/
//!     └── input.md
//! ```
//!
//! Both levels are backed by `tempfile::TempDir`, so directories are removed
//! when their owner is closed or dropped, including on early returns and
//! cancelled requests.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;
use tokio::fs;
use uuid::Uuid;

use crate::domain::{DocumentFormat, DOWNLOAD_BASE_NAME};

/// Name of the staged Markdown file inside a job directory.
const INPUT_FILE_NAME: &str = "input.md";

/// Prefix of the process-wide workspace directory.
const WORKSPACE_PREFIX: &str = "pandoc-gateway-";

/// Errors raised while managing temporary files.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Failed to create temporary directory under {}: {source}", .root.display())]
    Create {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Process-lifetime directory that hosts all conversion jobs.
#[derive(Debug)]
pub struct TempWorkspace {
    dir: TempDir,
}

impl TempWorkspace {
    /// Creates a workspace under the operating system's temp directory.
    pub fn create() -> Result<Self, WorkspaceError> {
        Self::create_in(std::env::temp_dir())
    }

    /// Creates a workspace under the given root directory.
    pub fn create_in(root: impl AsRef<Path>) -> Result<Self, WorkspaceError> {
        let root = root.as_ref();
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(root)
            .map_err(|source| WorkspaceError::Create {
                root: root.to_path_buf(),
                source,
            })?;

        tracing::info!(path = %dir.path().display(), "Created temporary workspace");
        Ok(Self { dir })
    }

    /// Returns the workspace directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Opens a uniquely named job directory for one conversion.
    pub fn open_job(&self, format: DocumentFormat) -> Result<ConversionJob, WorkspaceError> {
        let id = Uuid::new_v4();
        let dir = tempfile::Builder::new()
            .prefix(&format!("job-{}-", id))
            .tempdir_in(self.dir.path())
            .map_err(|source| WorkspaceError::Create {
                root: self.dir.path().to_path_buf(),
                source,
            })?;

        let input_path = dir.path().join(INPUT_FILE_NAME);
        let output_path = dir
            .path()
            .join(format!("{}.{}", DOWNLOAD_BASE_NAME, format.extension()));

        Ok(ConversionJob {
            id,
            dir,
            input_path,
            output_path,
        })
    }

    /// Removes the workspace and everything still inside it.
    pub fn close(self) -> Result<(), WorkspaceError> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|source| WorkspaceError::Remove {
                path: path.clone(),
                source,
            })?;

        tracing::info!(path = %path.display(), "Cleaned up temporary workspace");
        Ok(())
    }
}

/// Scoped staging area for a single conversion.
///
/// Dropping the job removes its directory; `close` does the same but logs the
/// outcome.
#[derive(Debug)]
pub struct ConversionJob {
    id: Uuid,
    dir: TempDir,
    input_path: PathBuf,
    output_path: PathBuf,
}

impl ConversionJob {
    /// Unique id of this job, used for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the job directory.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the staged Markdown file.
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// Path the converter is told to write to.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes the Markdown text to the input file.
    pub async fn stage_input(&self, markdown: &str) -> Result<(), WorkspaceError> {
        fs::write(&self.input_path, markdown.as_bytes())
            .await
            .map_err(|source| WorkspaceError::Write {
                path: self.input_path.clone(),
                source,
            })
    }

    /// Reads the converter's output, or `None` if it was never written.
    pub async fn read_output(&self) -> Result<Option<Vec<u8>>, WorkspaceError> {
        match fs::read(&self.output_path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(WorkspaceError::Read {
                path: self.output_path.clone(),
                source,
            }),
        }
    }

    /// Removes the job directory with both staged files.
    ///
    /// Failures are logged, not returned: the conversion result is already
    /// decided by the time a job is closed.
    pub fn close(self) {
        let id = self.id;
        let path = self.dir.path().to_path_buf();
        match self.dir.close() {
            Ok(()) => {
                tracing::debug!(job_id = %id, path = %path.display(), "Removed temporary job files");
            }
            Err(e) => tracing::warn!(
                job_id = %id,
                path = %path.display(),
                "Error removing temporary job files: {}",
                e
            ),
        }
    }
}
