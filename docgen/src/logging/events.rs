//! Log events emitted by every pipeline stage

use super::codes::{self, Code};
use crate::utils::{Position, Span};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Codes attached to events logged without a registered code
pub const GENERIC_WARNING: Code = Code::new("W000");
pub const GENERIC_INFO: Code = Code::new("I000");
pub const GENERIC_DEBUG: Code = Code::new("D000");

/// Log severity levels, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logged occurrence: a coded message, where it happened, and key/value context
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub span: Option<Span>,
    pub context: BTreeMap<String, String>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: message.to_string(),
            span: None,
            context: BTreeMap::new(),
        }
    }

    pub fn error(error_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, error_code, message)
    }

    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, GENERIC_WARNING, message)
    }

    pub fn warning_with_code(warning_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Warning, warning_code, message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, GENERIC_INFO, message)
    }

    /// Info event carrying a success code
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, success_code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, GENERIC_DEBUG, message)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    pub fn is_debug(&self) -> bool {
        self.level == LogLevel::Debug
    }

    /// Start of the span, if the event points into the export
    pub fn position(&self) -> Option<Position> {
        self.span.map(|span| span.start())
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.code.as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.code.as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.code.as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.code.as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.code.as_str())
    }

    /// `[LEVEL] CODE - message at line:col`
    pub fn format(&self) -> String {
        match self.position() {
            Some(position) => format!(
                "[{}] {} - {} at {}",
                self.level,
                self.code.as_str(),
                self.message,
                position
            ),
            None => format!("[{}] {} - {}", self.level, self.code.as_str(), self.message),
        }
    }

    /// Multi-line form with registry metadata and context
    pub fn format_detailed(&self) -> String {
        let mut lines = vec![
            self.format(),
            format!("  Category: {}", self.category()),
            format!("  Severity: {}", self.severity()),
        ];

        if self.is_error() {
            lines.push(format!("  Recoverable: {}", self.is_recoverable()));
            lines.push(format!("  Requires halt: {}", self.requires_halt()));
        }

        if let Some(metadata) = codes::get_error_metadata(self.code.as_str()) {
            lines.push(format!("  Description: {}", metadata.description));
            lines.push(format!("  Recommended action: {}", metadata.recommended_action));
        }

        if !self.context.is_empty() {
            lines.push("  Context:".to_string());
            lines.extend(
                self.context
                    .iter()
                    .map(|(key, value)| format!("    {}: {}", key, value)),
            );
        }

        lines.join("\n")
    }

    /// Single-line JSON for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&EventRecord::from(self))
    }
}

/// Serialized shape of a [`LogEvent`]
#[derive(Serialize)]
struct EventRecord<'a> {
    timestamp: String,
    level: &'static str,
    code: &'static str,
    message: &'a str,
    category: &'static str,
    severity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_metadata: Option<ErrorRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    span: Option<Span>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    context: &'a BTreeMap<String, String>,
}

#[derive(Serialize)]
struct ErrorRecord {
    recoverable: bool,
    requires_halt: bool,
    description: &'static str,
    recommended_action: &'static str,
}

impl<'a> From<&'a LogEvent> for EventRecord<'a> {
    fn from(event: &'a LogEvent) -> Self {
        let error_metadata = event.is_error().then(|| ErrorRecord {
            recoverable: event.is_recoverable(),
            requires_halt: event.requires_halt(),
            description: event.description(),
            recommended_action: event.recommended_action(),
        });

        Self {
            timestamp: event.timestamp.to_rfc3339(),
            level: event.level.as_str(),
            code: event.code.as_str(),
            message: &event.message,
            category: event.category(),
            severity: event.severity(),
            error_metadata,
            span: event.span,
            context: &event.context,
        }
    }
}
