// build.rs - TOML-driven compile-time limit generation
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    extraction: ExtractionLimits,
    decoding: DecodingLimits,
    rendering: RenderingLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct FileProcessingLimits {
    max_file_size: u64,
    large_file_threshold: u64,
    max_line_count_for_analysis: usize,
}

#[derive(serde::Deserialize)]
struct ExtractionLimits {
    max_members: usize,
    max_identifier_length: usize,
    max_text_length: usize,
    max_element_depth: usize,
}

#[derive(serde::Deserialize)]
struct DecodingLimits {
    max_parameters: usize,
    max_namespace_depth: usize,
}

#[derive(serde::Deserialize)]
struct RenderingLimits {
    max_namespace_pages: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_events_per_file: usize,
    max_log_message_length: usize,
    security_min_log_level: u8,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=DOCGEN_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=DOCGEN_CONFIG_DIR");

    let profile = env::var("DOCGEN_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("DOCGEN_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Find workspace root (parent of the docgen directory)
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_FILE_SIZE: u64 = 1_000_000_000;
    const ABSOLUTE_MAX_MEMBERS: usize = 10_000_000;

    if config.file_processing.max_file_size > ABSOLUTE_MAX_FILE_SIZE {
        panic!("SECURITY: max_file_size exceeds absolute maximum");
    }

    if config.file_processing.large_file_threshold > config.file_processing.max_file_size {
        panic!("large_file_threshold must not exceed max_file_size");
    }

    if config.extraction.max_members > ABSOLUTE_MAX_MEMBERS {
        panic!("SECURITY: max_members exceeds absolute maximum");
    }

    if config.extraction.max_identifier_length == 0 || config.extraction.max_element_depth == 0 {
        panic!("extraction limits must be non-zero");
    }

    if config.decoding.max_parameters == 0 {
        panic!("max_parameters must be non-zero");
    }

    if config.logging.security_min_log_level > 2 {
        panic!("SECURITY: security_min_log_level too high (max: 2)");
    }

    if config.logging.max_log_events_per_file > config.logging.log_buffer_size {
        panic!("max_log_events_per_file exceeds log_buffer_size");
    }

    if profile == "production" && config.file_processing.max_file_size > 50_000_000 {
        panic!("PRODUCTION: max_file_size too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod file_processing {{
        pub const MAX_FILE_SIZE: u64 = {};
        pub const LARGE_FILE_THRESHOLD: u64 = {};
        pub const MAX_LINE_COUNT_FOR_ANALYSIS: usize = {};
    }}

    pub mod extraction {{
        pub const MAX_MEMBERS: usize = {};
        pub const MAX_IDENTIFIER_LENGTH: usize = {};
        pub const MAX_TEXT_LENGTH: usize = {};
        pub const MAX_ELEMENT_DEPTH: usize = {};
    }}

    pub mod decoding {{
        pub const MAX_PARAMETERS: usize = {};
        pub const MAX_NAMESPACE_DEPTH: usize = {};
    }}

    pub mod rendering {{
        pub const MAX_NAMESPACE_PAGES: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_EVENTS_PER_FILE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
        pub const SECURITY_MIN_LOG_LEVEL: u8 = {};
    }}
}}
"#,
        profile,
        // File Processing
        config.file_processing.max_file_size,
        config.file_processing.large_file_threshold,
        config.file_processing.max_line_count_for_analysis,
        // Extraction
        config.extraction.max_members,
        config.extraction.max_identifier_length,
        config.extraction.max_text_length,
        config.extraction.max_element_depth,
        // Decoding
        config.decoding.max_parameters,
        config.decoding.max_namespace_depth,
        // Rendering
        config.rendering.max_namespace_pages,
        // Logging
        config.logging.log_buffer_size,
        config.logging.max_log_events_per_file,
        config.logging.max_log_message_length,
        config.logging.security_min_log_level,
    );

    fs::write(output_path, constants_code).unwrap();
}
