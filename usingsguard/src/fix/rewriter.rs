//! Byte-range safe code rewriter.
//!
//! This module provides a reusable rewriter that applies code edits
//! using byte ranges, preserving formatting and handling overlaps safely.
//!
//! # Usage
//!
//! ```
//! use usingsguard::fix::{ByteRangeRewriter, Edit};
//!
//! let source = "using System;\nclass C { }\n";
//! let mut rewriter = ByteRangeRewriter::new(source);
//! rewriter.add_edit(Edit::delete_line(source, 0, 13));
//! let fixed = rewriter.apply().expect("should apply");
//! assert_eq!(fixed, "class C { }\n");
//! ```

use crate::cancel::{CancellationToken, Cancelled};
use crate::cst::{CstError, CstParser};

/// A single edit operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Replacement content
    pub replacement: String,
}

impl Edit {
    /// Create a new edit
    #[must_use]
    pub fn new(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
        }
    }

    /// Create a deletion edit
    #[must_use]
    pub fn delete(start_byte: usize, end_byte: usize) -> Self {
        Self::new(start_byte, end_byte, "")
    }

    /// Create an insertion edit (insert before position)
    #[must_use]
    pub fn insert(position: usize, content: impl Into<String>) -> Self {
        Self::new(position, position, content)
    }

    /// Deletes `start..end` of `source`, widened to the whole line (line break
    /// included) when nothing else is on that line. Otherwise only trailing
    /// blanks after the range go with it.
    #[must_use]
    pub fn delete_line(source: &str, start_byte: usize, end_byte: usize) -> Self {
        let bytes = source.as_bytes();
        let is_blank = |b: u8| b == b' ' || b == b'\t';

        let mut end = end_byte.min(bytes.len());
        while end < bytes.len() && is_blank(bytes[end]) {
            end += 1;
        }

        let mut line_start = start_byte.min(end);
        while line_start > 0 && is_blank(bytes[line_start - 1]) {
            line_start -= 1;
        }
        let starts_line = line_start == 0 || bytes[line_start - 1] == b'\n';
        let ends_line = end == bytes.len() || bytes[end] == b'\n' || bytes[end] == b'\r';

        if !(starts_line && ends_line) {
            return Self::delete(start_byte, end);
        }

        if source[end..].starts_with("\r\n") {
            end += 2;
        } else if source[end..].starts_with('\n') {
            end += 1;
        }
        Self::delete(line_start, end)
    }

    /// Check if this edit overlaps with another
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }
}

/// Error during rewriting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// Two or more edits have overlapping ranges
    #[error("Overlapping edits at indices {edit_a} and {edit_b}")]
    OverlappingEdits {
        /// Index of first overlapping edit
        edit_a: usize,
        /// Index of second overlapping edit
        edit_b: usize,
    },
    /// Edit range is out of bounds or splits a character
    #[error("Edit {edit_index} out of bounds: {start_byte}..{end_byte} in source of length {source_len}")]
    OutOfBounds {
        /// Index of the bad edit
        edit_index: usize,
        /// Start byte of the edit
        start_byte: usize,
        /// End byte of the edit
        end_byte: usize,
        /// Length of the source
        source_len: usize,
    },
    /// Rewritten source no longer parses as C#
    #[error("Rewritten source contains syntax errors")]
    InvalidSyntax,
    /// Parser could not be run on the result
    #[error("Cannot verify rewritten source: {0}")]
    Verification(String),
    /// Rewrite stopped on request
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

/// Safe code rewriter using byte ranges
///
/// This rewriter applies edits in reverse order to preserve byte positions,
/// and validates that edits don't overlap.
#[derive(Debug, Clone)]
pub struct ByteRangeRewriter {
    /// Original source code
    source: String,
    /// Pending edits
    edits: Vec<Edit>,
}

impl ByteRangeRewriter {
    /// Create a new rewriter for the given source
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            edits: Vec::new(),
        }
    }

    /// Add an edit to the pending list
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Add multiple edits
    pub fn add_edits(&mut self, edits: impl IntoIterator<Item = Edit>) {
        self.edits.extend(edits);
    }

    /// Validate edits without applying them
    ///
    /// # Errors
    /// Returns error if edits overlap or are out of bounds
    pub fn validate(&self) -> Result<(), RewriteError> {
        for (i, edit) in self.edits.iter().enumerate() {
            if edit.start_byte > edit.end_byte
                || edit.end_byte > self.source.len()
                || !self.source.is_char_boundary(edit.start_byte)
                || !self.source.is_char_boundary(edit.end_byte)
            {
                return Err(RewriteError::OutOfBounds {
                    edit_index: i,
                    start_byte: edit.start_byte,
                    end_byte: edit.end_byte,
                    source_len: self.source.len(),
                });
            }
        }

        for i in 0..self.edits.len() {
            for j in (i + 1)..self.edits.len() {
                if self.edits[i].overlaps(&self.edits[j]) {
                    return Err(RewriteError::OverlappingEdits {
                        edit_a: i,
                        edit_b: j,
                    });
                }
            }
        }

        Ok(())
    }

    /// Apply all edits and return the modified source
    ///
    /// # Errors
    /// Returns error if edits overlap or are out of bounds
    pub fn apply(self) -> Result<String, RewriteError> {
        self.apply_with(&CancellationToken::new())
    }

    /// Apply all edits, checking `cancel` between edits.
    ///
    /// Edits are applied in reverse order (by start position) so earlier
    /// offsets stay valid. Nothing is returned on cancellation.
    ///
    /// # Errors
    /// Returns error if edits are invalid or `cancel` fires
    pub fn apply_with(self, cancel: &CancellationToken) -> Result<String, RewriteError> {
        self.validate()?;

        let mut result = self.source;
        let mut sorted_edits = self.edits;
        sorted_edits.sort_by(|a, b| b.start_byte.cmp(&a.start_byte));

        for edit in sorted_edits {
            cancel.check()?;
            result.replace_range(edit.start_byte..edit.end_byte, &edit.replacement);
        }

        Ok(result)
    }

    /// Apply edits and verify the result parses as C# without errors
    ///
    /// # Errors
    /// Returns error if edits are invalid, `cancel` fires, or the result
    /// doesn't parse cleanly
    pub fn apply_verified(self, cancel: &CancellationToken) -> Result<String, RewriteError> {
        let result = self.apply_with(cancel)?;

        let has_errors = CstParser::new()
            .and_then(|mut parser| parser.has_errors(&result))
            .map_err(|e: CstError| RewriteError::Verification(e.to_string()))?;
        if has_errors {
            return Err(RewriteError::InvalidSyntax);
        }

        Ok(result)
    }
}

/// Builder for constructing multiple edits
#[derive(Debug, Default)]
pub struct EditBuilder {
    edits: Vec<Edit>,
}

impl EditBuilder {
    /// Create a new edit builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a replacement edit
    #[must_use]
    pub fn replace(
        mut self,
        start_byte: usize,
        end_byte: usize,
        replacement: impl Into<String>,
    ) -> Self {
        self.edits
            .push(Edit::new(start_byte, end_byte, replacement));
        self
    }

    /// Add an insertion edit
    #[must_use]
    pub fn insert(mut self, position: usize, content: impl Into<String>) -> Self {
        self.edits.push(Edit::insert(position, content));
        self
    }

    /// Add a whole-line deletion, see [`Edit::delete_line`]
    #[must_use]
    pub fn delete_line(mut self, source: &str, start_byte: usize, end_byte: usize) -> Self {
        self.edits.push(Edit::delete_line(source, start_byte, end_byte));
        self
    }

    /// Build the list of edits
    #[must_use]
    pub fn build(self) -> Vec<Edit> {
        self.edits
    }
}
