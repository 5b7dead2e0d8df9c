use crate::documentation::DocumentSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Serializable snapshot of an assembled document set
#[derive(Debug, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub generated_at: DateTime<Utc>,
    pub source: PathBuf,
    pub members: DocumentSet,
}

impl PipelineOutput {
    pub fn new(source: PathBuf, members: DocumentSet) -> Self {
        Self {
            generated_at: Utc::now(),
            source,
            members,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
