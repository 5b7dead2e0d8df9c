//! Configuration module for the documentation generator
//! Automatically uses generated constants from TOML configuration

// Include generated constants from build.rs
// This file is generated at compile time from the TOML profile in config/
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

// Fixed naming constants that are not part of any build profile
pub mod constants;
pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("DOCGEN_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("DOCGEN_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_limits_are_consistent() {
        assert!(compile_time::file_processing::LARGE_FILE_THRESHOLD
            <= compile_time::file_processing::MAX_FILE_SIZE);
        assert!(compile_time::logging::MAX_LOG_EVENTS_PER_FILE
            <= compile_time::logging::LOG_BUFFER_SIZE);
        assert!(compile_time::decoding::MAX_PARAMETERS > 0);
    }

    #[test]
    fn test_source_info() {
        assert!(build_info::source_info().ends_with(".toml"));
    }
}
