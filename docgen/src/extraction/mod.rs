//! Extraction of member entries from XML documentation exports

mod entry;
mod error;
mod reader;

use crate::logging::codes;
use crate::{log_error, log_success};

pub use entry::{DocEntry, ParamDoc};
pub use error::{ExtractionError, ExtractionResult};
pub use reader::DocReader;

/// Extract every `<member>` entry from an export, logging the outcome
pub fn extract_entries(source: &str) -> ExtractionResult<Vec<DocEntry>> {
    match DocReader::new(source).read_entries() {
        Ok(entries) => {
            log_success!(codes::success::EXTRACTION_COMPLETE, "Documentation entries extracted",
                "members" => entries.len()
            );
            Ok(entries)
        }
        Err(e) => {
            match e.position() {
                Some(position) => log_error!(e.error_code(), "Extraction failed",
                    span = crate::utils::Span::at(position),
                    "error" => &e
                ),
                None => log_error!(e.error_code(), "Extraction failed", "error" => &e),
            }
            Err(e)
        }
    }
}

/// Initialize extraction logging validation (for system startup)
pub fn init_extraction_logging() -> Result<(), String> {
    codes::ensure_registered(
        &[
            codes::extraction::MALFORMED_XML,
            codes::extraction::MISSING_MEMBERS_ELEMENT,
            codes::extraction::MISSING_MEMBER_NAME,
            codes::extraction::TOO_MANY_MEMBERS,
            codes::extraction::IDENTIFIER_TOO_LONG,
            codes::extraction::TEXT_TOO_LONG,
            codes::extraction::NESTING_TOO_DEEP,
        ],
        "extraction",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_extract_entries() {
        let source = r#"<doc><members>
            <member name="T:MW.Time"><summary>Time utilities.</summary></member>
            <member name="P:MW.Time.DeltaTime"><summary>Frame delta.</summary></member>
        </members></doc>"#;

        let entries = extract_entries(source).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].identifier, "P:MW.Time.DeltaTime");
        assert_eq!(entries[1].summary, "Frame delta.");
    }

    #[test]
    fn test_extract_entries_error_code() {
        let error = extract_entries("<doc></doc>").unwrap_err();
        assert_matches!(error, ExtractionError::MissingMembersElement);
        assert_eq!(error.error_code().as_str(), "E021");
        assert!(error.position().is_none());
    }

    #[test]
    fn test_init_extraction_logging() {
        assert!(init_extraction_logging().is_ok());
    }
}
