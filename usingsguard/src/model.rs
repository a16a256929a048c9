//! Data model shared by the placement checker and the relocation fixer.

use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A point in source code (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Point {
    /// Zero-indexed row number
    pub row: usize,
    /// Zero-indexed column, counted in characters
    pub column: usize,
}

impl Point {
    /// Converts a tree-sitter point (byte column) at `byte` in `source` into
    /// a character column.
    #[must_use]
    pub fn from_byte_point(source: &str, byte: usize, point: tree_sitter::Point) -> Self {
        let column = byte
            .checked_sub(point.column)
            .and_then(|line_start| source.get(line_start..byte))
            .map_or(point.column, |prefix| prefix.chars().count());
        Self {
            row: point.row,
            column,
        }
    }
}

/// Source range of a node, both as byte offsets and as points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// Start point
    pub start: Point,
    /// End point
    pub end: Point,
}

/// Where in the unit a directive sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeclarationScope {
    /// Directly under the compilation unit.
    CompilationUnit,
    /// Inside a block or file-scoped namespace.
    Namespace,
}

/// One `using` directive of a parsed unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportDeclaration {
    /// Namespace or type path split on `.`; `None` when the directive does not
    /// name a namespace or type (e.g. `using Pair = (int, int);`).
    pub path: Option<Vec<String>>,
    /// Alias introduced by `using Alias = ...;`.
    pub alias: Option<String>,
    /// `using static`.
    pub is_static: bool,
    /// `global using`.
    pub is_global: bool,
    /// Nesting of the directive.
    pub scope: DeclarationScope,
    /// Location in the owning unit.
    pub span: Span,
    /// Directive text exactly as written.
    pub text: String,
    /// Path of the owning unit (empty when the unit has no path).
    #[serde(skip)]
    pub unit: Arc<PathBuf>,
}

impl ImportDeclaration {
    /// Dotted target, e.g. `System.Collections.Generic`.
    #[must_use]
    pub fn target(&self) -> Option<String> {
        self.path.as_ref().map(|segments| segments.join("."))
    }

    /// Canonical single-line rendering, or `None` without a resolvable path.
    #[must_use]
    pub fn render(&self) -> Option<String> {
        let target = self.target()?;
        let mut out = String::new();
        if self.is_global {
            out.push_str("global ");
        }
        out.push_str("using ");
        if self.is_static {
            out.push_str("static ");
        }
        if let Some(alias) = &self.alias {
            let _ = write!(out, "{alias} = ");
        }
        out.push_str(&target);
        out.push(';');
        Some(out)
    }

    /// Text used to decide whether two directives are the same entry.
    #[must_use]
    pub fn identity(&self) -> String {
        self.render()
            .unwrap_or_else(|| self.text.split_whitespace().collect::<Vec<_>>().join(" "))
    }

    /// Copy of this directive with global visibility, keeping the static flag
    /// and alias. `None` when the path could not be resolved.
    #[must_use]
    pub fn promoted(&self) -> Option<Self> {
        self.path.as_ref()?;
        Some(Self {
            is_global: true,
            ..self.clone()
        })
    }
}

/// A parsed C# file: the snapshot the checker and fixer operate on.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// File path; empty when the host supplied none.
    pub id: Arc<PathBuf>,
    /// Full text.
    pub source: String,
    /// Every `using` directive, in source order.
    pub imports: Vec<ImportDeclaration>,
    /// Whether the parser recovered from syntax errors.
    pub has_syntax_errors: bool,
}

impl SourceUnit {
    /// Path of the unit.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.id.as_path()
    }

    /// Basename, or `""` when the unit has no path.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.id
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("")
    }

    /// Directives written directly under the compilation unit.
    pub fn top_level_imports(&self) -> impl Iterator<Item = &ImportDeclaration> {
        self.imports
            .iter()
            .filter(|decl| decl.scope == DeclarationScope::CompilationUnit)
    }

    /// Source text covered by `span`, if the span fits this snapshot.
    #[must_use]
    pub fn slice(&self, span: &Span) -> Option<&str> {
        self.source.get(span.start_byte..span.end_byte)
    }
}

/// Case-insensitive basename comparison used for designated-file matching.
#[must_use]
pub fn same_file_name(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
