//! Tree-sitter based CST parser for C# source code.
//!
//! Produces [`SourceUnit`] snapshots carrying every `using` directive with its
//! exact byte range and position.

use super::directive::{decode_directive, USING_DIRECTIVE};
use crate::cancel::{CancellationToken, Cancelled};
use crate::model::SourceUnit;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tree_sitter::Parser;

/// Nodes visited between two cancellation checks.
const CANCEL_CHECK_INTERVAL: usize = 256;

/// Error during CST parsing
#[derive(Debug, thiserror::Error)]
pub enum CstError {
    /// Failed to create parser
    #[error("Failed to create CST parser: {0}")]
    ParserCreation(String),
    /// Failed to parse source
    #[error("Failed to parse source as C#")]
    ParseFailed,
    /// Traversal stopped on request
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

/// Tree-sitter based CST parser
pub struct CstParser {
    parser: Parser,
}

impl CstParser {
    /// Create a new CST parser for C#
    ///
    /// # Errors
    /// Returns error if parser creation fails
    pub fn new() -> Result<Self, CstError> {
        let mut parser = Parser::new();

        parser
            .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
            .map_err(|e| CstError::ParserCreation(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse source code into a unit snapshot.
    ///
    /// `path` may be `None` for in-memory buffers; such units have an empty
    /// file name.
    ///
    /// # Errors
    /// Returns error if parsing fails or `cancel` fires during traversal.
    pub fn parse_unit(
        &mut self,
        path: Option<&Path>,
        source: &str,
        cancel: &CancellationToken,
    ) -> Result<SourceUnit, CstError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(CstError::ParseFailed)?;

        let id = Arc::new(path.map(Path::to_path_buf).unwrap_or_default());
        let mut imports = Vec::new();
        let mut cursor = tree.walk();
        let mut visited = 0usize;

        // Pre-order walk keeps directives in source order.
        'walk: loop {
            visited += 1;
            if visited % CANCEL_CHECK_INTERVAL == 0 {
                cancel.check()?;
            }

            let node = cursor.node();
            if node.kind() == USING_DIRECTIVE {
                imports.push(decode_directive(node, source, &id));
            } else if cursor.goto_first_child() {
                continue;
            }

            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }
        cancel.check()?;

        Ok(SourceUnit {
            id,
            source: source.to_owned(),
            imports,
            has_syntax_errors: tree.root_node().has_error(),
        })
    }

    /// Whether `source` contains syntax errors.
    ///
    /// # Errors
    /// Returns error if parsing fails
    pub fn has_errors(&mut self, source: &str) -> Result<bool, CstError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(CstError::ParseFailed)?;
        Ok(tree.root_node().has_error())
    }
}

/// Parses a buffer with a fresh parser.
///
/// # Errors
/// Returns error if parser creation or parsing fails.
pub fn parse_unit(path: Option<&Path>, source: &str) -> Result<SourceUnit, CstError> {
    CstParser::new()?.parse_unit(path, source, &CancellationToken::new())
}

/// Reparses `unit.source` under the same path, e.g. after a rewrite.
///
/// # Errors
/// Returns error if parser creation or parsing fails.
pub fn reparse(id: &Arc<PathBuf>, source: &str) -> Result<SourceUnit, CstError> {
    let mut unit = parse_unit(Some(id.as_path()), source)?;
    unit.id = Arc::clone(id);
    for decl in &mut unit.imports {
        decl.unit = Arc::clone(id);
    }
    Ok(unit)
}
