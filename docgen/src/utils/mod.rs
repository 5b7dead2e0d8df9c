//! Shared source-location helpers used by extraction and logging.

pub mod span;

pub use span::{Position, SourceMap, Span};
