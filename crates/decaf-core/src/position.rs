//! Source positions attached to tree nodes by the parser.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single point in the source text (1-based line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// The source range a node was parsed from.
///
/// Only the first line takes part in diagnostics and pretty printing; the
/// remaining fields are kept so reporting layers can underline the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub start: Location,
    pub end: Location,
}

impl Position {
    #[must_use]
    pub const fn new(start: Location, end: Location) -> Self {
        Self { start, end }
    }

    /// A zero-width position at the start of `line`.
    #[must_use]
    pub const fn line(line: usize) -> Self {
        Self {
            start: Location::new(line, 1),
            end: Location::new(line, 1),
        }
    }

    /// The line the range begins on.
    #[must_use]
    pub const fn first_line(&self) -> usize {
        self.start.line
    }

    /// Checks if a location is contained within this range.
    #[must_use]
    pub fn contains(&self, location: Location) -> bool {
        self.start <= location && location <= self.end
    }

    /// Joins two ranges into one covering both.
    #[must_use]
    pub fn join(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start.line, self.start.column)
    }
}
