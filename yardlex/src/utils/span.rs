//! Source location tracking
//!
//! Coordinates are zero-based line indices into the line sequence handed to
//! the tokenizer and zero-based byte columns within that line. `Display`
//! renders them one-based, which is what people expect to read.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in a sequence of source lines.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Line index (0-based)
    pub line: usize,
    /// Byte column within the line (0-based)
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// The first column of the first line
    pub fn start() -> Self {
        Self { line: 0, column: 0 }
    }

    /// Move along the same line by `n` bytes
    pub fn advance_bytes(self, n: usize) -> Self {
        Self {
            line: self.line,
            column: self.column + n,
        }
    }

    /// One-based line number for display
    pub fn display_line(&self) -> usize {
        self.line + 1
    }

    /// One-based column number for display
    pub fn display_column(&self) -> usize {
        self.column + 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.display_line(), self.display_column())
    }
}

/// A half-open range of source text, possibly crossing line boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    /// Create a new span
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "Span start must not be after end");
        Self { start, end }
    }

    /// Span on a single line
    pub fn on_line(line: usize, start_column: usize, end_column: usize) -> Self {
        Self::new(
            Position::new(line, start_column),
            Position::new(line, end_column),
        )
    }

    /// A one-byte span at `pos`
    pub fn single(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos.advance_bytes(1),
        }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Whether the span crosses at least one line break
    pub fn is_multiline(&self) -> bool {
        self.end.line > self.start.line
    }

    /// A span is degenerate when it covers no text at all
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of lines touched by this span
    pub fn line_count(&self) -> usize {
        self.end.line - self.start.line + 1
    }

    /// Check if this span contains a position
    pub fn contains(&self, pos: Position) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.display_line(),
                self.start.display_column(),
                self.end.display_column()
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based() {
        let pos = Position::new(0, 4);
        assert_eq!(pos.to_string(), "1:5");

        let span = Span::on_line(2, 1, 3);
        assert_eq!(span.to_string(), "3:2-4");
    }

    #[test]
    fn test_multiline_span() {
        let span = Span::new(Position::new(0, 2), Position::new(2, 8));
        assert!(span.is_multiline());
        assert_eq!(span.line_count(), 3);
        assert_eq!(span.to_string(), "1:3-3:9");
        assert!(span.contains(Position::new(1, 100)));
        assert!(!span.contains(Position::new(2, 8)));
    }

    #[test]
    fn test_merge() {
        let a = Span::on_line(0, 2, 4);
        let b = Span::on_line(1, 0, 1);
        let merged = a.merge(b);
        assert_eq!(merged.start, Position::new(0, 2));
        assert_eq!(merged.end, Position::new(1, 1));
    }

    #[test]
    fn test_single_and_empty() {
        let s = Span::single(Position::new(3, 3));
        assert!(!s.is_empty());
        assert_eq!(s.end.column, 4);
        assert!(Span::default().is_empty());
    }
}
