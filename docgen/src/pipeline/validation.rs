use crate::config::compile_time::{decoding, extraction, file_processing};
use crate::logging::codes;

/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating documentation pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;
    crate::extraction::init_extraction_logging()?;

    codes::ensure_registered(
        &[
            codes::decoding::UNKNOWN_KIND_MARKER,
            codes::decoding::EMPTY_MEMBER_NAME,
            codes::decoding::PARAMETER_COUNT_MISMATCH,
            codes::decoding::PARAMETER_LIMIT_EXCEEDED,
            codes::decoding::NAMESPACE_TOO_DEEP,
        ],
        "decoding",
    )?;

    crate::render::init_render_logging()?;
    codes::ensure_registered(&[codes::output::JSON_EXPORT_FAILURE], "output")?;

    if file_processing::LARGE_FILE_THRESHOLD > file_processing::MAX_FILE_SIZE {
        return Err("Large file threshold exceeds the maximum file size".to_string());
    }
    if extraction::MAX_MEMBERS == 0 || decoding::MAX_PARAMETERS == 0 {
        return Err("Member and parameter limits must be non-zero".to_string());
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Documentation pipeline validation succeeded",
        "stages_validated" => 4,
        "max_members" => extraction::MAX_MEMBERS,
        "max_file_size" => file_processing::MAX_FILE_SIZE
    );

    Ok(())
}
