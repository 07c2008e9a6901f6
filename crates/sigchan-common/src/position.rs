//! Line/column positions.
//!
//! The AST uses byte offsets; diagnostics are reported to humans as
//! `file:line:column`. Lines and columns are 1-based and columns count
//! bytes, matching the Go toolchain's position format.

use serde::{Deserialize, Serialize};

/// A 1-based line/column position in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

/// Line map for efficient offset -> position conversion.
/// Stores the starting offset of each line.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Starting offset of each line (`line_starts[0]` is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        let newlines = memchr::memchr_iter(b'\n', source.as_bytes());
        line_starts.extend(newlines.map(|i| (i + 1) as u32));
        LineMap { line_starts }
    }

    /// Convert a byte offset to a 1-based `Position`.
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        Position {
            line: line as u32 + 1,
            column: offset.saturating_sub(line_start) + 1,
        }
    }

    /// Byte offset where the given 1-based line starts.
    pub fn line_start(&self, line: u32) -> Option<u32> {
        self.line_starts
            .get(line.checked_sub(1)? as usize)
            .copied()
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
