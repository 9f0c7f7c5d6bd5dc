//! Pandoc-backed converter adapter.
//!
//! This adapter implements the `DocumentConverter` port by shelling out to
//! the `pandoc` executable. Input is staged in a `ConversionJob` directory,
//! Pandoc writes the output file next to it, and the job directory is removed
//! before the result is returned.

use std::ffi::OsString;
use std::io;
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use crate::adapters::storage::{ConversionJob, TempWorkspace};
use crate::domain::{ConvertedDocument, DocumentFormat};
use crate::ports::{ConversionError, DocumentConverter};

/// Default executable name, resolved through `PATH`.
pub const DEFAULT_PANDOC_PROGRAM: &str = "pandoc";

/// Converter that runs Pandoc once per request.
///
/// # Invocation
///
/// ```text
/// pandoc <job>/input.md -o <job>/document.docx \
///     --from=markdown --to=docx --standalone --wrap=none --mathml
/// ```
///
/// # Example
///
/// ```rust,ignore
/// let workspace = Arc::new(TempWorkspace::create()?);
/// let converter = PandocConverter::new(workspace);
///
/// let version = converter.probe().await?;
/// let docx = converter.convert("# Hello\n\nWorld").await?;
/// ```
#[derive(Debug, Clone)]
pub struct PandocConverter {
    /// Path to pandoc executable. If None, will search PATH.
    pandoc_path: Option<String>,

    /// Shared staging area for job directories.
    workspace: Arc<TempWorkspace>,

    /// Target document format.
    format: DocumentFormat,
}

impl PandocConverter {
    /// Create a converter producing DOCX inside the given workspace.
    pub fn new(workspace: Arc<TempWorkspace>) -> Self {
        Self {
            pandoc_path: None,
            workspace,
            format: DocumentFormat::Docx,
        }
    }

    /// Set a custom path to the Pandoc executable.
    pub fn with_pandoc_path(mut self, path: impl Into<String>) -> Self {
        self.pandoc_path = Some(path.into());
        self
    }

    /// Get the pandoc command path.
    pub fn pandoc_command(&self) -> &str {
        self.pandoc_path.as_deref().unwrap_or(DEFAULT_PANDOC_PROGRAM)
    }

    /// Build the fixed argument list for one job.
    fn conversion_args(&self, job: &ConversionJob) -> Vec<OsString> {
        vec![
            job.input_path().as_os_str().to_owned(),
            OsString::from("-o"),
            job.output_path().as_os_str().to_owned(),
            OsString::from("--from=markdown"),
            OsString::from(format!("--to={}", self.format.pandoc_writer())),
            OsString::from("--standalone"),
            OsString::from("--wrap=none"),
            OsString::from("--mathml"),
        ]
    }

    /// Stage input, run Pandoc and collect the output for one job.
    async fn run_job(
        &self,
        job: &ConversionJob,
        markdown: &str,
    ) -> Result<ConvertedDocument, ConversionError> {
        job.stage_input(markdown)
            .await
            .map_err(|e| ConversionError::io(e.to_string()))?;

        let args = self.conversion_args(job);
        tracing::info!(
            job_id = %job.id(),
            "Executing command: {} {}",
            self.pandoc_command(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new(self.pandoc_command())
            .args(&args)
            .current_dir(job.dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| spawn_error(self.pandoc_command(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let diagnostics = if stderr.is_empty() {
                format!("pandoc exited with {}", output.status)
            } else {
                stderr
            };
            tracing::error!(job_id = %job.id(), "Pandoc error: {}", diagnostics);
            return Err(ConversionError::failed(diagnostics));
        }

        let content = job
            .read_output()
            .await
            .map_err(|e| ConversionError::io(e.to_string()))?
            .ok_or_else(|| {
                tracing::error!(
                    job_id = %job.id(),
                    "Output file not created at {}",
                    job.output_path().display()
                );
                ConversionError::OutputMissing(job.output_path().to_path_buf())
            })?;

        tracing::info!(job_id = %job.id(), bytes = content.len(), "Pandoc conversion successful");
        Ok(ConvertedDocument::docx(content))
    }
}

/// Map a failed spawn to the right error class.
fn spawn_error(program: &str, err: io::Error) -> ConversionError {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            ConversionError::unavailable(format!("{}: {}", program, err))
        }
        _ => ConversionError::io(format!("Failed to start {}: {}", program, err)),
    }
}

#[async_trait]
impl DocumentConverter for PandocConverter {
    async fn probe(&self) -> Result<String, ConversionError> {
        let output = Command::new(self.pandoc_command())
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ConversionError::unavailable(format!("{}: {}", self.pandoc_command(), e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConversionError::unavailable(format!(
                "`{} --version` exited with {}: {}",
                self.pandoc_command(),
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let version = stdout
            .lines()
            .next()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .unwrap_or("unknown version")
            .to_string();

        Ok(version)
    }

    async fn convert(&self, markdown: &str) -> Result<ConvertedDocument, ConversionError> {
        let job = self
            .workspace
            .open_job(self.format)
            .map_err(|e| ConversionError::io(e.to_string()))?;

        let result = self.run_job(&job, markdown).await;
        job.close();
        result
    }
}
