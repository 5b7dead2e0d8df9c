use crate::documentation::DocumentSet;
use crate::file_processor::FileMetadata;
use crate::identifier::MemberKind;
use std::time::Duration;

/// Result of reading, extracting and assembling one export
#[derive(Debug)]
pub struct PipelineResult {
    pub documents: DocumentSet,
    pub file_metadata: FileMetadata,
    pub entry_count: usize,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        documents: DocumentSet,
        file_metadata: FileMetadata,
        entry_count: usize,
        processing_duration: Duration,
    ) -> Self {
        Self {
            documents,
            file_metadata,
            entry_count,
            processing_duration,
        }
    }

    pub fn namespace_count(&self) -> usize {
        self.documents.namespaces().len()
    }

    pub fn type_count(&self) -> usize {
        self.documents.count_by_kind(MemberKind::Type)
    }

    pub fn log_success(&self, file_path: &str) {
        let seconds = self.processing_duration.as_secs_f64();
        crate::log_performance!(
            crate::logging::codes::success::PIPELINE_COMPLETE,
            "Documentation pipeline succeeded",
            duration = self.processing_duration,
            "file" => file_path,
            "members" => self.documents.len(),
            "namespaces" => self.namespace_count(),
            "processing_rate_bytes_per_sec" => format!("{:.0}",
                if seconds > 0.0 { self.file_metadata.size as f64 / seconds } else { 0.0 })
        );
    }
}
