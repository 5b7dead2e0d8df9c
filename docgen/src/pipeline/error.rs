use crate::extraction::ExtractionError;
use crate::file_processor::FileProcessorError;
use crate::logging::codes;
use crate::normalize::NormalizeError;
use crate::render::RenderError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Translation table setup failed: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("JSON export failed: {message}")]
    Json { message: String },

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            PipelineError::FileProcessing(e) => e.error_code(),
            PipelineError::Extraction(e) => e.error_code(),
            PipelineError::Normalize(e) => e.error_code(),
            PipelineError::Render(e) => e.error_code(),
            PipelineError::Json { .. } => codes::output::JSON_EXPORT_FAILURE,
            PipelineError::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: error.to_string(),
        }
    }
}
