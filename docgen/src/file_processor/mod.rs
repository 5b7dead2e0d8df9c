//! File processor module with compile-time limits and global logging integration

mod processor;

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::log_debug;
use crate::logging::codes;
use std::path::Path;

pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Read a documentation export with default settings
pub fn process_file(file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

pub fn create_processor() -> FileProcessor {
    FileProcessor::new()
}

/// Create a file processor from runtime preferences
pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Check if an error should halt processing
pub fn should_halt_on_error(error: &FileProcessorError) -> bool {
    error.requires_halt()
}

/// Get the compile-time maximum file size limit
///
/// This is a build-profile boundary and cannot be changed at runtime.
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

pub fn get_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}

/// Initialize file processor logging validation (for system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    codes::ensure_registered(
        &[
            codes::file_processing::FILE_NOT_FOUND,
            codes::file_processing::INVALID_EXTENSION,
            codes::file_processing::FILE_TOO_LARGE,
            codes::file_processing::EMPTY_FILE,
            codes::file_processing::PERMISSION_DENIED,
            codes::file_processing::INVALID_ENCODING,
            codes::file_processing::IO_ERROR,
            codes::file_processing::INVALID_PATH,
            codes::file_processing::TOO_MANY_LINES,
        ],
        "file processor",
    )?;

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT_FOR_ANALYSIS
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("MW.xml");
        fs::write(&file_path, "<doc><members/></doc>\n").unwrap();

        let result = process_file(&file_path).unwrap();
        assert_eq!(result.metadata.line_count, 1);
    }

    #[test]
    fn test_create_processor_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_xml_extension: true,
            enable_performance_logging: false,
        };

        let processor = create_processor_from_preferences(&prefs);
        assert!(processor.require_xml_extension);
        assert!(!processor.enable_performance_logging);
        assert!(!create_processor().require_xml_extension);
    }

    #[test]
    fn test_error_helpers() {
        let error = FileProcessorError::FileNotFound {
            path: "MW.xml".to_string(),
        };
        assert!(should_halt_on_error(&error));
        assert!(!should_halt_on_error(&FileProcessorError::InvalidExtension {
            extension: None
        }));
    }

    #[test]
    fn test_compile_time_constants_access() {
        assert_eq!(get_max_file_size(), MAX_FILE_SIZE);
        assert_eq!(get_large_file_threshold(), LARGE_FILE_THRESHOLD);
        assert!(get_large_file_threshold() <= get_max_file_size());
    }

    #[test]
    fn test_init_logging() {
        assert!(init_file_processor_logging().is_ok());
    }
}
