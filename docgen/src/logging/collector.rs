//! Error collector with cargo-style output
//!
//! Events logged while a file context is active are grouped under that file so
//! the CLI can print one report per documentation export at the end of a run.

use super::events::LogEvent;
use crate::config::compile_time::logging::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

// ============================================================================
// FILE PROCESSING CONTEXT
// ============================================================================

/// Context information for file processing
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
    pub start_time: Instant,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

/// Summary of collected events across processed files
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
    pub files_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
}

impl ProcessingSummary {
    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe error collector
pub struct ErrorCollector {
    /// Events organized by file path for cargo-style output
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,

    /// Processing contexts for timing information
    file_contexts: Mutex<BTreeMap<PathBuf, FileProcessingContext>>,

    processing_start: Instant,
}

fn recover<T>(lock: &Mutex<T>) -> MutexGuard<'_, T> {
    lock.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
            file_contexts: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event for a specific file
    ///
    /// Once a file reaches `MAX_LOG_EVENTS_PER_FILE`, one overflow warning is
    /// appended and further events for that file are dropped.
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = recover(&self.file_events);

        let file_events = events.entry(file_path.to_path_buf()).or_default();

        if file_events.len() < MAX_LOG_EVENTS_PER_FILE {
            file_events.push(event);
        } else if file_events.len() == MAX_LOG_EVENTS_PER_FILE {
            file_events.push(LogEvent::warning(&format!(
                "Too many events for file (limit: {})",
                MAX_LOG_EVENTS_PER_FILE
            )));
        }
    }

    /// Record file processing context
    pub fn record_file_context(&self, context: FileProcessingContext) {
        recover(&self.file_contexts).insert(context.file_path.clone(), context);
    }

    /// Get all events for a specific file
    pub fn get_file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        recover(&self.file_events)
            .get(file_path)
            .cloned()
            .unwrap_or_default()
    }

    /// Get errors for a specific file
    pub fn get_file_errors(&self, file_path: &Path) -> Vec<LogEvent> {
        self.get_file_events(file_path)
            .into_iter()
            .filter(|e| e.is_error())
            .collect()
    }

    /// Get all file events (for cargo-style output)
    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        recover(&self.file_events).clone()
    }

    pub fn file_has_errors(&self, file_path: &Path) -> bool {
        recover(&self.file_events)
            .get(file_path)
            .map(|events| events.iter().any(|e| e.is_error()))
            .unwrap_or(false)
    }

    /// Get processing summary
    ///
    /// Files with a recorded context but no events count as successful.
    pub fn get_summary(&self) -> ProcessingSummary {
        let events = recover(&self.file_events);
        let contexts = recover(&self.file_contexts);

        let mut summary = ProcessingSummary {
            total_processing_time: self.processing_start.elapsed(),
            ..Default::default()
        };

        for (file_path, file_events) in events.iter() {
            let errors = file_events.iter().filter(|e| e.is_error()).count();
            let warnings = file_events.iter().filter(|e| e.is_warning()).count();

            if errors > 0 {
                summary.failed_files += 1;
            } else if warnings > 0 {
                summary.files_with_warnings += 1;
            } else if contexts.contains_key(file_path) {
                summary.successful_files += 1;
            }

            summary.total_errors += errors;
            summary.total_warnings += warnings;
        }

        summary.successful_files += contexts
            .keys()
            .filter(|path| !events.contains_key(*path))
            .count();
        summary.total_files =
            summary.successful_files + summary.failed_files + summary.files_with_warnings;

        summary
    }

    /// Get errors that require halting, paired with their file
    pub fn get_critical_errors(&self) -> Vec<(PathBuf, LogEvent)> {
        recover(&self.file_events)
            .iter()
            .flat_map(|(path, events)| {
                events
                    .iter()
                    .filter(|e| e.is_error() && e.requires_halt())
                    .map(move |e| (path.clone(), e.clone()))
            })
            .collect()
    }

    pub fn clear(&self) {
        recover(&self.file_events).clear();
        recover(&self.file_contexts).clear();
    }

    pub fn total_event_count(&self) -> usize {
        recover(&self.file_events).values().map(Vec::len).sum()
    }

    /// Current event count, buffer size, and fill ratio
    pub fn get_capacity_info(&self) -> (usize, usize, f64) {
        let current = self.total_event_count();
        (current, LOG_BUFFER_SIZE, current as f64 / LOG_BUFFER_SIZE as f64)
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE FORMATTING
// ============================================================================

fn location(file_path: &Path, event: &LogEvent) -> String {
    event
        .span
        .as_ref()
        .map(|s| {
            format!(
                " --> {}:{}:{}",
                file_path.display(),
                s.start().line,
                s.start().column
            )
        })
        .unwrap_or_default()
}

fn push_context(output: &mut String, event: &LogEvent) {
    let mut keys: Vec<_> = event
        .context
        .keys()
        .filter(|key| *key != "file" && *key != "file_id")
        .collect();
    keys.sort();

    for key in keys {
        output.push_str(&format!("  = {}: {}\n", key, event.context[key]));
    }
}

/// Format errors in cargo-style output
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (file_path, events) in &collector.get_all_file_events() {
        let error_events: Vec<_> = events.iter().filter(|e| e.is_error()).collect();
        let warning_events: Vec<_> = events.iter().filter(|e| e.is_warning()).collect();

        if error_events.is_empty() && warning_events.is_empty() {
            continue;
        }

        output.push_str(&format!("Checking {}...\n", file_path.display()));

        for event in error_events {
            output.push_str(&format!(
                "error[{}]: {}{}\n",
                event.code.as_str(),
                event.message,
                location(file_path, event)
            ));
            output.push_str(&format!(
                "  = severity: {}, category: {}\n",
                event.severity(),
                event.category()
            ));
            push_context(&mut output, event);

            let action = event.recommended_action();
            if action != "No specific action available" {
                output.push_str(&format!("  = help: {}\n", action));
            }
        }

        for event in warning_events {
            output.push_str(&format!(
                "warning[{}]: {}{}\n",
                event.code.as_str(),
                event.message,
                location(file_path, event)
            ));
            push_context(&mut output, event);
        }

        output.push('\n');
    }

    let summary = collector.get_summary();

    if summary.total_errors > 0 {
        output.push_str(&format!("\nTotal errors: {}\n", summary.total_errors));
    }
    if summary.has_warnings() {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::{Position, Span};

    #[test]
    fn test_error_collector_basic() {
        let collector = ErrorCollector::new();

        let file_path = PathBuf::from("Assembly-CSharp.xml");
        let event = LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "Test error");

        collector.record_event(&file_path, event);

        assert_eq!(collector.get_file_events(&file_path).len(), 1);
        assert_eq!(collector.get_file_errors(&file_path).len(), 1);
        assert!(collector.file_has_errors(&file_path));
    }

    #[test]
    fn test_processing_summary() {
        let collector = ErrorCollector::new();

        let broken = PathBuf::from("broken.xml");
        let noisy = PathBuf::from("noisy.xml");
        let clean = PathBuf::from("clean.xml");

        collector.record_event(
            &broken,
            LogEvent::error(codes::extraction::MALFORMED_XML, "Error"),
        );
        collector.record_event(
            &noisy,
            LogEvent::warning_with_code(codes::decoding::UNKNOWN_KIND_MARKER, "Warning"),
        );
        collector.record_file_context(FileProcessingContext::new(clean, 3));

        let summary = collector.get_summary();
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.failed_files, 1);
        assert_eq!(summary.files_with_warnings, 1);
        assert_eq!(summary.successful_files, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 1);
        assert!(summary.has_warnings());
    }

    #[test]
    fn test_critical_errors() {
        let collector = ErrorCollector::new();

        let file_path = PathBuf::from("docs.xml");
        collector.record_event(
            &file_path,
            LogEvent::error(codes::system::INTERNAL_ERROR, "Critical error"),
        );
        collector.record_event(
            &file_path,
            LogEvent::error(codes::file_processing::INVALID_EXTENSION, "Recoverable"),
        );

        let critical_errors = collector.get_critical_errors();
        assert_eq!(critical_errors.len(), 1);
        assert_eq!(critical_errors[0].1.code.as_str(), "ERR001");
    }

    #[test]
    fn test_per_file_limit_appends_single_overflow_warning() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("flood.xml");

        for _ in 0..MAX_LOG_EVENTS_PER_FILE + 5 {
            collector.record_event(&file_path, LogEvent::warning("repeat"));
        }

        let events = collector.get_file_events(&file_path);
        assert_eq!(events.len(), MAX_LOG_EVENTS_PER_FILE + 1);
        assert!(events
            .last()
            .map(|e| e.message.starts_with("Too many events"))
            .unwrap_or(false));

        let (current, max, _) = collector.get_capacity_info();
        assert_eq!(current, MAX_LOG_EVENTS_PER_FILE + 1);
        assert_eq!(max, LOG_BUFFER_SIZE);
    }

    #[test]
    fn test_cargo_style_output() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("docs.xml");

        collector.record_event(
            &file_path,
            LogEvent::error(codes::extraction::MISSING_MEMBER_NAME, "member has no name")
                .with_span(Span::at(Position::new(120, 6, 5)))
                .with_context("file", "docs.xml")
                .with_context("element", "member"),
        );
        collector.record_event(
            &file_path,
            LogEvent::warning_with_code(codes::decoding::UNKNOWN_KIND_MARKER, "marker 'E'"),
        );

        let output = format_cargo_style_errors(&collector);
        assert!(output.contains("Checking docs.xml..."));
        assert!(output.contains("error[E022]: member has no name --> docs.xml:6:5"));
        assert!(output.contains("  = element: member"));
        assert!(!output.contains("  = file:"));
        assert!(output.contains("warning[W101]: marker 'E'"));
        assert!(output.contains("Total errors: 1"));
        assert!(output.contains("Total warnings: 1"));
    }
}
