//! Source location tracking for documentation exports
//!
//! The XML reader reports byte offsets; these types turn them into line and
//! column positions so extraction errors and log events can point at the
//! offending `<member>` element.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Create the starting position (offset 0, line 1, column 1)
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start to end position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Zero-width span at a single position
    pub fn at(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Get the byte length of this span
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A source map that tracks line starts for efficient position lookup
#[derive(Debug, Clone)]
pub struct SourceMap<'a> {
    source: &'a str,
    /// Byte offsets of line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceMap<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Get the line and column for a byte offset
    ///
    /// Offsets past the end clamp to the end of input; offsets inside a
    /// multi-byte character resolve to that character's column.
    pub fn position_at(&self, offset: usize) -> Position {
        let offset = offset.min(self.source.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };

        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let column = self
            .source
            .get(line_start..)
            .unwrap_or("")
            .char_indices()
            .take_while(|(i, ch)| line_start + i + ch.len_utf8() <= offset)
            .count();

        Position::new(offset, (line + 1) as u32, (column + 1) as u32)
    }

    /// Get a line of text by line number (1-based)
    pub fn get_line(&self, line_num: u32) -> Option<&'a str> {
        if line_num == 0 {
            return None;
        }

        let line_idx = (line_num - 1) as usize;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());

        self.source
            .get(start..end)
            .map(|line| line.trim_end_matches('\r'))
    }

    /// Format an error message with source context
    pub fn format_error(&self, pos: Position, message: &str) -> String {
        let mut result = String::new();

        result.push_str(&format!("Error: {}\n", message));
        result.push_str(&format!("  --> {}:{}\n", pos.line, pos.column));

        if let Some(line) = self.get_line(pos.line) {
            let line_num_str = format!("{}", pos.line);
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!("   {} |\n", padding));
            result.push_str(&format!("{} | {}\n", line_num_str, line));
            result.push_str(&format!(
                "   {} | {}^\n",
                padding,
                " ".repeat(pos.column.saturating_sub(1) as usize)
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_lookup() {
        let source = "<doc>\n  <members>\n</doc>";
        let map = SourceMap::new(source);

        assert_eq!(map.position_at(0), Position::new(0, 1, 1));
        assert_eq!(map.position_at(8), Position::new(8, 2, 3));
        assert_eq!(map.get_line(2), Some("  <members>"));
        assert_eq!(map.get_line(4), None);
    }

    #[test]
    fn test_position_lookup_clamps_and_handles_multibyte() {
        let source = "é<a>";
        let map = SourceMap::new(source);

        assert_eq!(map.position_at(1).column, 1);
        assert_eq!(map.position_at(2).column, 2);
        assert_eq!(map.position_at(999).offset, source.len());
    }

    #[test]
    fn test_format_error_points_at_column() {
        let map = SourceMap::new("<doc>\n<member>\n");
        let formatted = map.format_error(Position::new(7, 2, 2), "unexpected end");

        assert!(formatted.contains("--> 2:2"));
        assert!(formatted.contains("2 | <member>"));
        assert!(formatted.contains(" ^"));
    }

    #[test]
    fn test_span_display() {
        let span = Span::new(Position::new(0, 3, 1), Position::new(5, 3, 6));
        assert_eq!(span.to_string(), "3:1-6");
        assert_eq!(span.len(), 5);
        assert!(Span::at(Position::start()).is_empty());
    }
}
