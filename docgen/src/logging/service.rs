//! Logging service and logger backends

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Destination for log events
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level filter in front of a single logger backend
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Pick the backend from the logging preferences
    ///
    /// With console output disabled, events still reach a memory buffer so
    /// nothing is printed while the error collector keeps working.
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let logger: Arc<dyn Logger> = if !config::use_console_logging() {
            Arc::new(MemoryLogger::new())
        } else if config::use_structured_logging() {
            Arc::new(ConsoleLogger::json())
        } else {
            Arc::new(ConsoleLogger::plain())
        };

        Self::new(logger, min_level)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

/// Line format written by [`ConsoleLogger`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleFormat {
    Plain,
    Json,
}

/// Writes errors to stderr and everything else to stdout
pub struct ConsoleLogger {
    format: ConsoleFormat,
}

impl ConsoleLogger {
    pub fn plain() -> Self {
        Self {
            format: ConsoleFormat::Plain,
        }
    }

    pub fn json() -> Self {
        Self {
            format: ConsoleFormat::Json,
        }
    }

    pub fn format(&self) -> ConsoleFormat {
        self.format
    }

    fn render(&self, event: &LogEvent) -> String {
        match self.format {
            ConsoleFormat::Plain => event.format(),
            // Fall back to plain text if serialization fails.
            ConsoleFormat::Json => event.format_json().unwrap_or_else(|_| event.format()),
        }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        let line = self.render(event);
        if event.is_error() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

/// Bounded in-memory buffer; the oldest events are dropped once full
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
    capacity: usize,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::with_capacity(config::get_error_buffer_size())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.buffer().clone()
    }

    pub fn event_count(&self) -> usize {
        self.buffer().len()
    }

    pub fn clear(&self) {
        self.buffer().clear();
    }

    /// Events at exactly `level`
    pub fn events_at(&self, level: LogLevel) -> Vec<LogEvent> {
        self.buffer()
            .iter()
            .filter(|e| e.level == level)
            .cloned()
            .collect()
    }

    pub fn has_code(&self, code: Code) -> bool {
        self.buffer()
            .iter()
            .any(|e| e.code.as_str() == code.as_str())
    }

    pub fn count_code(&self, code: Code) -> usize {
        self.buffer()
            .iter()
            .filter(|e| e.code.as_str() == code.as_str())
            .count()
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.buffer();
        if events.len() >= self.capacity {
            let overflow = events.len() + 1 - self.capacity;
            events.drain(..overflow);
        }
        events.push(event.clone());
    }
}

/// Create logging service based on current configuration
pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}
