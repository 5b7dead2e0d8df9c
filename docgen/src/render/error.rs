//! Error types for page rendering

use crate::logging::codes;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("Failed to create output directory '{path}': {message}")]
    OutputDirectory { path: PathBuf, message: String },

    #[error("Failed to write page '{path}': {message}")]
    PageWrite { path: PathBuf, message: String },

    #[error("Too many namespace pages: {count} (max: {limit})")]
    TooManyPages { count: usize, limit: usize },
}

impl RenderError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            RenderError::OutputDirectory { .. } => codes::render::OUTPUT_DIRECTORY_FAILURE,
            RenderError::PageWrite { .. } => codes::render::PAGE_WRITE_FAILURE,
            RenderError::TooManyPages { .. } => codes::render::TOO_MANY_PAGES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}
