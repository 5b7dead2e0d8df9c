//! Member identifier decoding
//!
//! Turns XML documentation identifiers (`M:MW.Shapes.Circle.Scale(System.Single)`)
//! into [`MemberRecord`]s with normalized namespace, class, member and
//! parameter names.

mod decoder;
mod record;

use crate::config::compile_time::decoding::{MAX_NAMESPACE_DEPTH, MAX_PARAMETERS};
use crate::config::runtime::DecoderSettings;
use crate::log_debug;
use crate::normalize::{self, NormalizeError};

pub use decoder::IdentifierDecoder;
pub use record::{ImplicitConversion, MemberKind, MemberRecord, Parameter};

/// Decode one identifier with the default root namespace and built-in table
pub fn decode_identifier(identifier: &str) -> MemberRecord {
    IdentifierDecoder::standard().decode(identifier)
}

/// Build a decoder for a run, loading any configured translation overrides
pub fn create_decoder(settings: &DecoderSettings) -> Result<IdentifierDecoder, NormalizeError> {
    let normalizer = normalize::create_normalizer(settings)?;

    log_debug!("Identifier decoder configured",
        "root_namespace" => settings.root_namespace.as_str(),
        "max_parameters" => MAX_PARAMETERS,
        "max_namespace_depth" => MAX_NAMESPACE_DEPTH
    );

    Ok(IdentifierDecoder::from_settings(settings, normalizer))
}

/// Whether a decoded record exceeds the compile-time parameter limit
pub fn exceeds_parameter_limit(record: &MemberRecord) -> bool {
    record.parameters.len() > MAX_PARAMETERS
}

/// Whether a decoded record's namespace is nested deeper than the compile-time limit
pub fn exceeds_namespace_depth(record: &MemberRecord) -> bool {
    namespace_depth(&record.namespace_path) > MAX_NAMESPACE_DEPTH
}

/// Number of segments in a dotted namespace path
pub fn namespace_depth(namespace_path: &str) -> usize {
    if namespace_path.is_empty() {
        0
    } else {
        namespace_path.split('.').count()
    }
}
