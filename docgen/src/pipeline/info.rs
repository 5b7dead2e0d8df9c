use crate::config::compile_time::{decoding, extraction, file_processing, rendering};
use crate::config::constants::{EXPORT_EXTENSION, PAGE_EXTENSION};

/// Information about pipeline capabilities
#[derive(Debug, Clone)]
pub struct PipelineInfo {
    pub pipeline_stages: usize,
    pub max_file_size: u64,
    pub max_members: usize,
    pub max_parameters: usize,
    pub max_namespace_depth: usize,
    pub max_namespace_pages: usize,
    pub input_extension: String,
    pub output_extension: String,
    pub supports_json_export: bool,
    pub global_logging_enabled: bool,
    pub cargo_style_output: bool,
}

impl PipelineInfo {
    pub fn report(&self) -> String {
        format!(
            "MW Documentation Pipeline:\n\
             - Pipeline Stages: {}\n\
             - Max File Size: {} MB\n\
             - Max Members: {}\n\
             - Max Parameters: {}\n\
             - Max Namespace Depth: {}\n\
             - Max Namespace Pages: {}\n\
             - Input Extension: .{}\n\
             - Output Extension: .{}\n\
             - JSON Export: {}\n\
             - Global Logging: {}\n\
             - Cargo-style Output: {}",
            self.pipeline_stages,
            self.max_file_size / (1024 * 1024),
            self.max_members,
            self.max_parameters,
            self.max_namespace_depth,
            self.max_namespace_pages,
            self.input_extension,
            self.output_extension,
            self.supports_json_export,
            self.global_logging_enabled,
            self.cargo_style_output
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "{}-stage documentation generator reading .{} exports into .{} pages",
            self.pipeline_stages, self.input_extension, self.output_extension
        )
    }
}

/// Get pipeline capabilities information
pub fn get_pipeline_info() -> PipelineInfo {
    PipelineInfo {
        // read, extract, assemble, render
        pipeline_stages: 4,
        max_file_size: file_processing::MAX_FILE_SIZE,
        max_members: extraction::MAX_MEMBERS,
        max_parameters: decoding::MAX_PARAMETERS,
        max_namespace_depth: decoding::MAX_NAMESPACE_DEPTH,
        max_namespace_pages: rendering::MAX_NAMESPACE_PAGES,
        input_extension: EXPORT_EXTENSION.to_string(),
        output_extension: PAGE_EXTENSION.to_string(),
        supports_json_export: true,
        global_logging_enabled: true,
        cargo_style_output: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_info_reflects_limits() {
        let info = get_pipeline_info();
        assert_eq!(info.max_file_size, file_processing::MAX_FILE_SIZE);
        assert_eq!(info.max_members, extraction::MAX_MEMBERS);
        assert!(info.report().contains("Input Extension: .xml"));
        assert_eq!(
            info.summary(),
            "4-stage documentation generator reading .xml exports into .html pages"
        );
    }
}
