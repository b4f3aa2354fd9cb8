// Dweve Smithy Tools - Smithy IDL language support
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Source positions and ranges.
//!
//! Every position is zero-based. `index` and `column` count UTF-16 code
//! units, which is what editors speaking the Language Server Protocol
//! expect by default.
//!
//! # Examples
//!
//! ```
//! use smithy_core::{Position, Range};
//!
//! let start = Position::new(4, 1, 0);
//! let end = Position::new(9, 1, 5);
//! let range = Range::new(start, end);
//! assert!(range.is_single_line());
//! assert_eq!(range.len(), 5);
//! ```

use std::cmp::Ordering;
use std::fmt;

/// A location in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Absolute offset from the start of the text, in UTF-16 code units.
    pub index: usize,
    /// Line number.
    pub line: usize,
    /// Column within the line, in UTF-16 code units.
    pub column: usize,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub const fn new(index: usize, line: usize, column: usize) -> Self {
        Self {
            index,
            line,
            column,
        }
    }

    /// The position of the first character of any text.
    #[inline]
    pub const fn start() -> Self {
        Self::new(0, 0, 0)
    }

    /// Advances past a character on the current line.
    #[inline]
    pub fn advance(&mut self, ch: char) {
        let width = ch.len_utf16();
        self.index += width;
        self.column += width;
    }

    /// Advances past a line terminator of `width` code units.
    #[inline]
    pub fn next_line(&mut self, width: usize) {
        self.index += width;
        self.line += 1;
        self.column = 0;
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A half-open range `[start, end)` in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl Range {
    /// Creates a new range.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates an empty range at a single position.
    #[inline]
    pub const fn point(pos: Position) -> Self {
        Self::new(pos, pos)
    }

    /// Checks if this range starts and ends on the same line.
    #[inline]
    pub const fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Length of the range in UTF-16 code units.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end.index - self.start.index
    }

    /// Checks if the range covers no text.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.end.index == self.start.index
    }

    /// Checks whether a line/column pair falls inside this range.
    ///
    /// Both ends are inclusive so that a cursor placed right after the last
    /// character of a token still counts as being on it. Columns are only
    /// checked on the first and last line of the range.
    pub fn contains(&self, line: usize, column: usize) -> bool {
        if line < self.start.line || line > self.end.line {
            return false;
        }
        if line == self.start.line && column < self.start.column {
            return false;
        }
        if line == self.end.line && column > self.end.column {
            return false;
        }
        true
    }

    /// Orders this range against a cursor: `Less` when the range ends
    /// before the cursor, `Greater` when it starts after it and `Equal`
    /// when [`contains`](Self::contains) holds.
    pub fn cmp_cursor(&self, line: usize, column: usize) -> Ordering {
        if (self.end.line, self.end.column) < (line, column) {
            Ordering::Less
        } else if (self.start.line, self.start.column) > (line, column) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_line() {
            write!(
                f,
                "{}:{}-{}",
                self.start.line + 1,
                self.start.column + 1,
                self.end.column + 1
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
    fn test_position_advance_ascii() {
        let mut pos = Position::start();
        pos.advance('a');
        assert_eq!(pos, Position::new(1, 0, 1));
    }

    #[test]
    fn test_position_advance_surrogate_pair() {
        let mut pos = Position::start();
        pos.advance('😀');
        assert_eq!(pos.index, 2);
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_position_next_line() {
        let mut pos = Position::new(7, 0, 7);
        pos.next_line(2);
        assert_eq!(pos, Position::new(9, 1, 0));
    }

    #[test]
    fn test_position_display_is_one_based() {
        assert_eq!(Position::new(0, 0, 0).to_string(), "1:1");
    }

    #[test]
    fn test_range_len() {
        let range = Range::new(Position::new(3, 0, 3), Position::new(8, 0, 8));
        assert_eq!(range.len(), 5);
        assert!(!range.is_empty());
        assert!(Range::point(Position::new(3, 0, 3)).is_empty());
    }

    #[test]
    fn test_range_contains_single_line() {
        let range = Range::new(Position::new(12, 2, 4), Position::new(18, 2, 10));
        assert!(range.contains(2, 4));
        assert!(range.contains(2, 7));
        assert!(range.contains(2, 10));
        assert!(!range.contains(2, 3));
        assert!(!range.contains(2, 11));
        assert!(!range.contains(1, 5));
        assert!(!range.contains(3, 5));
    }

    #[test]
    fn test_range_contains_multi_line() {
        let range = Range::new(Position::new(5, 1, 5), Position::new(30, 3, 2));
        assert!(range.contains(2, 0));
        assert!(range.contains(2, 500));
        assert!(range.contains(1, 9));
        assert!(!range.contains(1, 4));
        assert!(range.contains(3, 2));
        assert!(!range.contains(3, 3));
    }

    #[test]
    fn test_range_cmp_cursor_agrees_with_contains() {
        let range = Range::new(Position::new(5, 1, 5), Position::new(30, 3, 2));
        for line in 0..5 {
            for column in 0..12 {
                let ordering = range.cmp_cursor(line, column);
                assert_eq!(ordering == Ordering::Equal, range.contains(line, column));
            }
        }
        assert_eq!(range.cmp_cursor(0, 50), Ordering::Greater);
        assert_eq!(range.cmp_cursor(3, 3), Ordering::Less);
    }

    #[test]
    fn test_range_display() {
        let range = Range::new(Position::new(0, 4, 9), Position::new(5, 4, 14));
        assert_eq!(range.to_string(), "5:10-15");
    }
}
