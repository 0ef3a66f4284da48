//! Location tracking inside an expression string
//!
//! Expressions are single-line values embedded in pipeline documents, so a
//! position is a byte offset plus a 1-based character column. Spans are used
//! by the scanner to report which function call failed and by the CLI to
//! underline it.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in an expression with byte offset and character column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Column number (1-based, counted in chars)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, column: u32) -> Self {
        Self { offset, column }
    }

    /// Offset 0, column 1
    pub fn start() -> Self {
        Self {
            offset: 0,
            column: 1,
        }
    }

    /// Position of byte `offset` within `input`.
    ///
    /// Offsets past the end clamp to the end of input. Offsets inside a
    /// multi-byte char resolve to the column of that char.
    pub fn at(input: &str, offset: usize) -> Self {
        let offset = offset.min(input.len());
        let column = input
            .char_indices()
            .take_while(|(index, _)| *index < offset)
            .count();
        Self {
            offset,
            column: column as u32 + 1,
        }
    }

    /// Advance position by one character
    pub fn advance(self, ch: char) -> Self {
        Self {
            offset: self.offset + ch.len_utf8(),
            column: self.column + 1,
        }
    }

    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, |pos, ch| pos.advance(ch))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "col {}", self.column)
    }
}

/// A half-open range `[start, end)` of an expression.
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

    /// Span covering bytes `start..end` of `input`
    pub fn from_offsets(input: &str, start: usize, end: usize) -> Self {
        let start_pos = Position::at(input, start);
        let end_pos = Position::at(input, end.max(start));
        Self::new(start_pos, end_pos)
    }

    /// Span covering all of `input`
    pub fn whole(input: &str) -> Self {
        Self::from_offsets(input, 0, input.len())
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        let start = if self.start.offset < other.start.offset {
            self.start
        } else {
            other.start
        };
        let end = if self.end.offset > other.end.offset {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Byte length
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Source text for this span. Returns "" when the span does not fit `input`.
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        input
            .get(self.start.offset..self.end.offset)
            .unwrap_or_default()
    }

    /// Render `input` with carets under this span, cargo style.
    pub fn underline(&self, input: &str, message: &str) -> String {
        let mut result = String::new();
        result.push_str(&format!("error: {}\n", message));
        result.push_str(&format!("  --> {}\n", self.start));
        result.push_str("   |\n");
        result.push_str(&format!("   | {}\n", input));

        let mut underline = String::from("   | ");
        for _ in 1..self.start.column {
            underline.push(' ');
        }
        let width = self.end.column.saturating_sub(self.start.column).max(1);
        for _ in 0..width {
            underline.push('^');
        }
        result.push_str(&underline);
        result.push('\n');
        result
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "col {}-{}", self.start.column, self.end.column)
    }
}
