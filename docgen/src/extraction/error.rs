//! Error types for documentation extraction

use crate::logging::codes;
use crate::utils::Position;
use thiserror::Error;

/// Result type for extraction operations
pub type ExtractionResult<T> = Result<T, ExtractionError>;

#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    #[error("Malformed XML at {position}: {message}")]
    MalformedXml { position: Position, message: String },

    #[error("Document has no <members> element")]
    MissingMembersElement,

    #[error("<member> element at {position} has no name attribute")]
    MissingMemberName { position: Position },

    #[error("Document exceeds member limit: more than {limit} members")]
    TooManyMembers { limit: usize },

    #[error("Identifier at {position} is {length} characters long (max: {limit})")]
    IdentifierTooLong {
        position: Position,
        length: usize,
        limit: usize,
    },

    #[error("Text of <{element}> at {position} is {length} characters long (max: {limit})")]
    TextTooLong {
        element: String,
        position: Position,
        length: usize,
        limit: usize,
    },

    #[error("Elements nested deeper than {limit} levels at {position}")]
    NestingTooDeep { position: Position, limit: usize },
}

impl ExtractionError {
    pub fn malformed(position: Position, message: impl Into<String>) -> Self {
        Self::MalformedXml {
            position,
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ExtractionError::MalformedXml { .. } => codes::extraction::MALFORMED_XML,
            ExtractionError::MissingMembersElement => codes::extraction::MISSING_MEMBERS_ELEMENT,
            ExtractionError::MissingMemberName { .. } => codes::extraction::MISSING_MEMBER_NAME,
            ExtractionError::TooManyMembers { .. } => codes::extraction::TOO_MANY_MEMBERS,
            ExtractionError::IdentifierTooLong { .. } => codes::extraction::IDENTIFIER_TOO_LONG,
            ExtractionError::TextTooLong { .. } => codes::extraction::TEXT_TOO_LONG,
            ExtractionError::NestingTooDeep { .. } => codes::extraction::NESTING_TOO_DEEP,
        }
    }

    /// Source position of the error, when one is known
    pub fn position(&self) -> Option<Position> {
        match self {
            ExtractionError::MalformedXml { position, .. }
            | ExtractionError::MissingMemberName { position }
            | ExtractionError::IdentifierTooLong { position, .. }
            | ExtractionError::TextTooLong { position, .. }
            | ExtractionError::NestingTooDeep { position, .. } => Some(*position),
            ExtractionError::MissingMembersElement | ExtractionError::TooManyMembers { .. } => None,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}
