//! Token normalization
//!
//! Maps raw CLR tokens from member identifiers to the display tokens used on
//! generated pages (primitive aliases, operator symbols, generic placeholders,
//! HTML-escaped brackets).

pub mod normalizer;
pub mod table;

use crate::config::runtime::DecoderSettings;
use crate::logging::codes;
use crate::{log_error, log_success};
use std::sync::Arc;

pub use normalizer::{escape_all_braces, escape_braces_once, TokenNormalizer};
pub use table::{NormalizeError, TranslationTable};

/// Build the translation table for a run
///
/// Starts from the built-in table and merges the overrides file named in the
/// decoder settings, if any.
pub fn build_table(settings: &DecoderSettings) -> Result<Arc<TranslationTable>, NormalizeError> {
    let mut table = TranslationTable::standard();

    if let Some(path) = &settings.translations_file {
        table = table.merge_file(path).map_err(|e| {
            log_error!(e.error_code(), "Failed to load translation overrides",
                "path" => path.display(),
                "error" => &e
            );
            e
        })?;
    }

    log_success!(codes::success::TRANSLATION_TABLE_READY, "Translation table built",
        "entries" => table.len(),
        "overrides" => settings.translations_file.is_some()
    );

    Ok(Arc::new(table))
}

/// Build a normalizer over the table configured in the decoder settings
pub fn create_normalizer(settings: &DecoderSettings) -> Result<TokenNormalizer, NormalizeError> {
    build_table(settings).map(TokenNormalizer::new)
}
