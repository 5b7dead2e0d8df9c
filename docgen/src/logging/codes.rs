//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.
//! This module combines code constants with their behavioral metadata in one place.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR003");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// XML extraction error codes
pub mod extraction {
    use super::Code;

    pub const MALFORMED_XML: Code = Code::new("E020");
    pub const MISSING_MEMBERS_ELEMENT: Code = Code::new("E021");
    pub const MISSING_MEMBER_NAME: Code = Code::new("E022");
    pub const TOO_MANY_MEMBERS: Code = Code::new("E023");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E024");
    pub const TEXT_TOO_LONG: Code = Code::new("E025");
    pub const NESTING_TOO_DEEP: Code = Code::new("E026");
}

/// Identifier decoding warning codes
///
/// Decoding never fails; anomalies are reported as warnings only.
pub mod decoding {
    use super::Code;

    pub const UNKNOWN_KIND_MARKER: Code = Code::new("W101");
    pub const EMPTY_MEMBER_NAME: Code = Code::new("W102");
    pub const PARAMETER_COUNT_MISMATCH: Code = Code::new("W103");
    pub const PARAMETER_LIMIT_EXCEEDED: Code = Code::new("W104");
    pub const NAMESPACE_TOO_DEEP: Code = Code::new("W105");
}

/// HTML rendering error codes
pub mod render {
    use super::Code;

    pub const OUTPUT_DIRECTORY_FAILURE: Code = Code::new("E060");
    pub const PAGE_WRITE_FAILURE: Code = Code::new("E061");
    pub const TOO_MANY_PAGES: Code = Code::new("E062");
}

/// JSON export error codes
pub mod output {
    use super::Code;

    pub const JSON_EXPORT_FAILURE: Code = Code::new("E070");
}

// ============================================================================
// SUCCESS CODES
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    // System
    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // Stages
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const EXTRACTION_COMPLETE: Code = Code::new("I020");
    pub const TRANSLATION_TABLE_READY: Code = Code::new("I030");
    pub const ASSEMBLY_COMPLETE: Code = Code::new("I040");
    pub const RENDERING_COMPLETE: Code = Code::new("I060");
    pub const JSON_EXPORT_COMPLETE: Code = Code::new("I070");
    pub const PIPELINE_COMPLETE: Code = Code::new("I090");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "Contact the maintainers or file a bug report",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check system configuration and dependencies",
            ),
        );
        registry.insert(
            "ERR003",
            ErrorMetadata::new(
                "ERR003",
                "System",
                Severity::High,
                false,
                true,
                "Invalid runtime configuration",
                "Check DOCGEN_* environment variables and the translations file",
            ),
        );

        // File processing errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File not found at specified path",
                "Check file path and ensure file exists",
            ),
        );
        registry.insert(
            "E006",
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File does not have .xml extension",
                "Point the generator at the XML documentation export",
            ),
        );
        registry.insert(
            "E007",
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File exceeds maximum size limit",
                "Reduce file size or build with a larger profile limit",
            ),
        );
        registry.insert(
            "E008",
            ErrorMetadata::new(
                "E008",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File is empty when content expected",
                "Regenerate the documentation export",
            ),
        );
        registry.insert(
            "E009",
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Permission denied accessing file",
                "Check file permissions and user access rights",
            ),
        );
        registry.insert(
            "E010",
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid UTF-8 encoding in file",
                "Convert file to UTF-8 encoding",
            ),
        );
        registry.insert(
            "E011",
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "I/O error during file operation",
                "Check disk space, permissions, and file system integrity",
            ),
        );
        registry.insert(
            "E012",
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "Invalid file path provided",
                "Provide a valid file path",
            ),
        );
        registry.insert(
            "E013",
            ErrorMetadata::new(
                "E013",
                "FileProcessing",
                Severity::Medium,
                false,
                true,
                "File exceeds maximum line count",
                "Split the export or build with a larger profile limit",
            ),
        );

        // Extraction errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Extraction",
                Severity::High,
                false,
                true,
                "Documentation export is not well-formed XML",
                "Regenerate the export or fix the reported element",
            ),
        );
        registry.insert(
            "E021",
            ErrorMetadata::new(
                "E021",
                "Extraction",
                Severity::High,
                false,
                true,
                "Documentation export has no <members> element",
                "Check that the file is a compiler documentation export",
            ),
        );
        registry.insert(
            "E022",
            ErrorMetadata::new(
                "E022",
                "Extraction",
                Severity::Medium,
                false,
                true,
                "<member> element without a name attribute",
                "Fix the member element in the export",
            ),
        );
        registry.insert(
            "E023",
            ErrorMetadata::new(
                "E023",
                "Extraction",
                Severity::Medium,
                false,
                true,
                "Export contains more members than allowed",
                "Build with a larger max_members limit",
            ),
        );
        registry.insert(
            "E024",
            ErrorMetadata::new(
                "E024",
                "Extraction",
                Severity::Medium,
                false,
                true,
                "Member identifier exceeds maximum length",
                "Build with a larger max_identifier_length limit",
            ),
        );
        registry.insert(
            "E025",
            ErrorMetadata::new(
                "E025",
                "Extraction",
                Severity::Medium,
                false,
                true,
                "Documentation text exceeds maximum length",
                "Shorten the comment or build with a larger max_text_length",
            ),
        );
        registry.insert(
            "E026",
            ErrorMetadata::new(
                "E026",
                "Extraction",
                Severity::Medium,
                false,
                true,
                "XML elements nested too deeply",
                "Flatten the documentation markup",
            ),
        );

        // Decoding warnings
        registry.insert(
            "W101",
            ErrorMetadata::new(
                "W101",
                "Decoding",
                Severity::Low,
                true,
                false,
                "Identifier has an unrecognised kind marker",
                "The entry is documented as a member",
            ),
        );
        registry.insert(
            "W102",
            ErrorMetadata::new(
                "W102",
                "Decoding",
                Severity::Low,
                true,
                false,
                "Member identifier decoded without a member name",
                "Check the identifier in the export",
            ),
        );
        registry.insert(
            "W103",
            ErrorMetadata::new(
                "W103",
                "Decoding",
                Severity::Low,
                true,
                false,
                "Documented parameters do not match decoded parameters",
                "Update the <param> tags of the member",
            ),
        );
        registry.insert(
            "W104",
            ErrorMetadata::new(
                "W104",
                "Decoding",
                Severity::Low,
                true,
                false,
                "Member has more parameters than allowed",
                "Build with a larger max_parameters limit",
            ),
        );
        registry.insert(
            "W105",
            ErrorMetadata::new(
                "W105",
                "Decoding",
                Severity::Low,
                true,
                false,
                "Namespace is nested deeper than allowed",
                "Build with a larger max_namespace_depth limit",
            ),
        );

        // Rendering errors
        registry.insert(
            "E060",
            ErrorMetadata::new(
                "E060",
                "Rendering",
                Severity::High,
                false,
                true,
                "Failed to create the output directory",
                "Check permissions of the output path",
            ),
        );
        registry.insert(
            "E061",
            ErrorMetadata::new(
                "E061",
                "Rendering",
                Severity::High,
                false,
                true,
                "Failed to write a generated page",
                "Check disk space and permissions of the output path",
            ),
        );
        registry.insert(
            "E062",
            ErrorMetadata::new(
                "E062",
                "Rendering",
                Severity::Medium,
                false,
                true,
                "Too many namespace pages",
                "Build with a larger max_namespace_pages limit",
            ),
        );

        // Output errors
        registry.insert(
            "E070",
            ErrorMetadata::new(
                "E070",
                "Output",
                Severity::Medium,
                false,
                true,
                "Failed to export decoded members as JSON",
                "Check the JSON output path",
            ),
        );

        // Success codes
        registry.insert(
            "I001",
            ErrorMetadata::new(
                "I001",
                "Success",
                Severity::Low,
                true,
                false,
                "Operation completed successfully",
                "No action required",
            ),
        );
        registry.insert(
            "I004",
            ErrorMetadata::new(
                "I004",
                "Success",
                Severity::Low,
                true,
                false,
                "System initialization completed",
                "No action required",
            ),
        );
        registry.insert(
            "I006",
            ErrorMetadata::new(
                "I006",
                "Success",
                Severity::Low,
                true,
                false,
                "Documentation export read successfully",
                "Continue to extraction",
            ),
        );
        registry.insert(
            "I020",
            ErrorMetadata::new(
                "I020",
                "Success",
                Severity::Low,
                true,
                false,
                "Member entries extracted",
                "Continue to decoding",
            ),
        );
        registry.insert(
            "I030",
            ErrorMetadata::new(
                "I030",
                "Success",
                Severity::Low,
                true,
                false,
                "Translation table built",
                "Continue to decoding",
            ),
        );
        registry.insert(
            "I040",
            ErrorMetadata::new(
                "I040",
                "Success",
                Severity::Low,
                true,
                false,
                "Member identifiers decoded and assembled",
                "Continue to rendering",
            ),
        );
        registry.insert(
            "I060",
            ErrorMetadata::new(
                "I060",
                "Success",
                Severity::Low,
                true,
                false,
                "Namespace pages rendered",
                "No action required",
            ),
        );
        registry.insert(
            "I070",
            ErrorMetadata::new(
                "I070",
                "Success",
                Severity::Low,
                true,
                false,
                "JSON export written",
                "No action required",
            ),
        );
        registry.insert(
            "I090",
            ErrorMetadata::new(
                "I090",
                "Success",
                Severity::Low,
                true,
                false,
                "Documentation pipeline completed",
                "No action required",
            ),
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

/// Verify that every listed code has registry metadata
pub fn ensure_registered(codes: &[Code], family: &str) -> Result<(), String> {
    for code in codes {
        if get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "{} code {} not found in metadata registry",
                family,
                code.as_str()
            ));
        }
    }
    Ok(())
}
