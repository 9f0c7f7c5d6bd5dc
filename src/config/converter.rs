//! External converter configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Converter configuration (Pandoc executable and staging location)
#[derive(Debug, Clone, Deserialize)]
pub struct ConverterConfig {
    /// Pandoc executable, bare names are resolved through `PATH`
    #[serde(default = "default_program")]
    pub program: String,

    /// Directory under which the temporary workspace is created.
    /// Defaults to the operating system temp directory.
    pub temp_root: Option<PathBuf>,
}

impl ConverterConfig {
    /// Validate converter configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.program.trim().is_empty() {
            return Err(ValidationError::MissingRequired("converter.program"));
        }
        if let Some(root) = &self.temp_root {
            if !root.is_dir() {
                return Err(ValidationError::InvalidTempRoot(root.clone()));
            }
        }
        Ok(())
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            temp_root: None,
        }
    }
}

fn default_program() -> String {
    "pandoc".to_string()
}
