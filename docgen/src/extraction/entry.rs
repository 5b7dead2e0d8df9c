//! Raw documentation entries as read from the export

use crate::utils::Position;
use serde::{Deserialize, Serialize};

/// A `<param name="...">` description
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParamDoc {
    pub name: String,
    pub description: String,
}

impl ParamDoc {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// One `<member>` element: its identifier plus the free text attached to it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocEntry {
    pub identifier: String,
    pub summary: String,
    pub parameters: Vec<ParamDoc>,
    pub returns: String,
    pub remarks: String,
    /// Attribute text with braces already escaped for HTML
    pub decorations: Vec<String>,
    /// Start of the `<member>` element
    pub position: Position,
}

impl DocEntry {
    pub fn new(identifier: impl Into<String>, position: Position) -> Self {
        Self {
            identifier: identifier.into(),
            position,
            ..Default::default()
        }
    }

    pub fn marker(&self) -> Option<char> {
        self.identifier.chars().next()
    }

    pub fn has_remarks(&self) -> bool {
        !self.remarks.is_empty()
    }
}
