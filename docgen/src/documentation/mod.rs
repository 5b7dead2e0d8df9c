//! Documentation assembly
//!
//! Joins the decoded identifier of each extracted entry with its free text.
//! Parameter names and descriptions from `<param>` tags are attached to the
//! decoded parameter types by position. The decoded signature alone decides
//! how many parameters a record has.

mod set;

use crate::config::compile_time::decoding::{MAX_NAMESPACE_DEPTH, MAX_PARAMETERS};
use crate::config::runtime::DecoderSettings;
use crate::extraction::{DocEntry, ParamDoc};
use crate::identifier::{self, IdentifierDecoder, MemberKind, MemberRecord};
use crate::logging::codes;
use crate::utils::Span;
use crate::{log_success, log_warning};

pub use set::{DocumentSet, DocumentedMember};

/// Which anomalies are reported while assembling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyOptions {
    pub warn_on_unknown_kind: bool,
    pub warn_on_parameter_mismatch: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            warn_on_unknown_kind: true,
            warn_on_parameter_mismatch: true,
        }
    }
}

impl From<&DecoderSettings> for AssemblyOptions {
    fn from(settings: &DecoderSettings) -> Self {
        Self {
            warn_on_unknown_kind: settings.warn_on_unknown_kind,
            warn_on_parameter_mismatch: settings.warn_on_parameter_mismatch,
        }
    }
}

/// Assemble entries with every warning enabled
pub fn assemble(entries: Vec<DocEntry>, decoder: &IdentifierDecoder) -> DocumentSet {
    assemble_with_options(entries, decoder, AssemblyOptions::default())
}

pub fn assemble_with_options(
    entries: Vec<DocEntry>,
    decoder: &IdentifierDecoder,
    options: AssemblyOptions,
) -> DocumentSet {
    let mut set = DocumentSet::new();
    let mut warnings = 0usize;

    for entry in entries {
        let mut record = decoder.decode(&entry.identifier);
        warnings += report_anomalies(&entry, &record, options);
        attach_parameter_docs(&mut record, entry.parameters);

        set.push(DocumentedMember {
            identifier: entry.identifier,
            record,
            summary: entry.summary,
            returns: entry.returns,
            remarks: entry.remarks,
            decorations: entry.decorations,
            position: entry.position,
        });
    }

    log_success!(codes::success::ASSEMBLY_COMPLETE, "Documentation assembled",
        "members" => set.len(),
        "namespaces" => set.namespaces().len(),
        "warnings" => warnings
    );

    set
}

/// Fill names and descriptions by position; docs past the decoded parameters are dropped
fn attach_parameter_docs(record: &mut MemberRecord, docs: Vec<ParamDoc>) {
    for (parameter, doc) in record.parameters.iter_mut().zip(docs) {
        parameter.name = doc.name;
        parameter.description = doc.description;
    }
}

/// Log decoding anomalies for one entry and return how many were found
fn report_anomalies(entry: &DocEntry, record: &MemberRecord, options: AssemblyOptions) -> usize {
    let span = Span::at(entry.position);
    let mut count = 0;

    let known_marker = entry.marker().and_then(MemberKind::from_marker).is_some();
    if options.warn_on_unknown_kind && !known_marker {
        log_warning!(code = codes::decoding::UNKNOWN_KIND_MARKER,
            "Unrecognised kind marker, decoding as member",
            span = span,
            "identifier" => &entry.identifier
        );
        count += 1;
    }

    if !record.is_type() && record.member_name.is_empty() {
        log_warning!(code = codes::decoding::EMPTY_MEMBER_NAME,
            "Member identifier decoded without a member name",
            span = span,
            "identifier" => &entry.identifier
        );
        count += 1;
    }

    if options.warn_on_parameter_mismatch && entry.parameters.len() != record.parameters.len() {
        log_warning!(code = codes::decoding::PARAMETER_COUNT_MISMATCH,
            "Documented parameter count differs from signature",
            span = span,
            "identifier" => &entry.identifier,
            "documented" => entry.parameters.len(),
            "decoded" => record.parameters.len()
        );
        count += 1;
    }

    if identifier::exceeds_parameter_limit(record) {
        log_warning!(code = codes::decoding::PARAMETER_LIMIT_EXCEEDED,
            "Signature exceeds parameter limit",
            span = span,
            "identifier" => &entry.identifier,
            "parameters" => record.parameters.len(),
            "limit" => MAX_PARAMETERS
        );
        count += 1;
    }

    if identifier::exceeds_namespace_depth(record) {
        log_warning!(code = codes::decoding::NAMESPACE_TOO_DEEP,
            "Namespace nesting exceeds limit",
            span = span,
            "identifier" => &entry.identifier,
            "depth" => identifier::namespace_depth(&record.namespace_path),
            "limit" => MAX_NAMESPACE_DEPTH
        );
        count += 1;
    }

    count
}
