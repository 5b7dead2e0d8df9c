// RUNTIME PREFERENCES (User Experience)

use super::constants::{
    DEFAULT_OUTPUT_DIR, DEFAULT_ROOT_NAMESPACE, DEFAULT_SITE_TITLE, DEFAULT_STYLESHEET,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Whether to require the .xml extension on documentation exports
    pub require_xml_extension: bool,

    /// Whether to enable detailed performance logging (user preference)
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_xml_extension: env::var(env_vars::REQUIRE_XML_EXTENSION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_performance_logging: env::var(env_vars::ENABLE_PERFORMANCE_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderSettings {
    /// Root namespace skipped at the start of every identifier
    pub root_namespace: String,

    /// Optional TOML file with extra `[translations]` entries
    pub translations_file: Option<PathBuf>,

    /// Whether to log a warning for identifiers with an unrecognised kind marker
    pub warn_on_unknown_kind: bool,

    /// Whether to log a warning when documented and decoded parameter counts differ
    pub warn_on_parameter_mismatch: bool,
}

impl Default for DecoderSettings {
    fn default() -> Self {
        Self {
            root_namespace: env::var(env_vars::ROOT_NAMESPACE)
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_ROOT_NAMESPACE.to_string()),
            translations_file: env::var(env_vars::TRANSLATIONS_FILE)
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            warn_on_unknown_kind: env::var(env_vars::WARN_ON_UNKNOWN_KIND)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            warn_on_parameter_mismatch: env::var(env_vars::WARN_ON_PARAMETER_MISMATCH)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderPreferences {
    /// Text appended to every page title
    pub site_title: String,

    /// Stylesheet path linked from every page
    pub stylesheet: String,

    /// Directory the pages are written into
    pub output_dir: PathBuf,

    /// Whether to emit `<decorations>` blocks above headings
    pub include_decorations: bool,
}

impl Default for RenderPreferences {
    fn default() -> Self {
        Self {
            site_title: env::var(env_vars::SITE_TITLE)
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_SITE_TITLE.to_string()),
            stylesheet: env::var(env_vars::STYLESHEET)
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_STYLESHEET.to_string()),
            output_dir: env::var(env_vars::OUTPUT_DIR)
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            include_decorations: env::var(env_vars::INCLUDE_DECORATIONS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging (user preference)
    pub use_structured_logging: bool,

    /// Whether to enable console output (user preference)
    pub enable_console_logging: bool,

    /// User preferred minimum log level
    pub min_log_level: LogLevel,

    /// Whether to include performance metrics in logs
    pub log_performance_events: bool,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Warning),
            log_performance_events: env::var(env_vars::LOGGING_LOG_PERFORMANCE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            enable_cargo_style_output: env::var(env_vars::LOGGING_CARGO_STYLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_file_context: env::var(env_vars::LOGGING_INCLUDE_FILE_CONTEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables and CLI flags)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub decoder: DecoderSettings,
    pub render: RenderPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRE_XML_EXTENSION: &str = "DOCGEN_REQUIRE_XML_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "DOCGEN_ENABLE_PERFORMANCE_LOGGING";

    // Decoder
    pub const ROOT_NAMESPACE: &str = "DOCGEN_ROOT_NAMESPACE";
    pub const TRANSLATIONS_FILE: &str = "DOCGEN_TRANSLATIONS_FILE";
    pub const WARN_ON_UNKNOWN_KIND: &str = "DOCGEN_WARN_ON_UNKNOWN_KIND";
    pub const WARN_ON_PARAMETER_MISMATCH: &str = "DOCGEN_WARN_ON_PARAMETER_MISMATCH";

    // Rendering
    pub const SITE_TITLE: &str = "DOCGEN_SITE_TITLE";
    pub const STYLESHEET: &str = "DOCGEN_STYLESHEET";
    pub const OUTPUT_DIR: &str = "DOCGEN_OUTPUT_DIR";
    pub const INCLUDE_DECORATIONS: &str = "DOCGEN_INCLUDE_DECORATIONS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "DOCGEN_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "DOCGEN_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "DOCGEN_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "DOCGEN_LOGGING_LOG_PERFORMANCE";
    pub const LOGGING_CARGO_STYLE: &str = "DOCGEN_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "DOCGEN_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_env_var_names_share_prefix() {
        for name in [
            env_vars::ROOT_NAMESPACE,
            env_vars::TRANSLATIONS_FILE,
            env_vars::SITE_TITLE,
            env_vars::LOGGING_MIN_LEVEL,
        ] {
            assert!(name.starts_with("DOCGEN_"));
        }
    }

    #[test]
    fn test_runtime_config_serializes() {
        let config = RuntimeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("root_namespace"));
        assert!(json.contains("site_title"));
    }
}
