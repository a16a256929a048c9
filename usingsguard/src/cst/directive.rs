//! Decoding of `using_directive` nodes into [`ImportDeclaration`]s.

use crate::model::{DeclarationScope, ImportDeclaration, Point, Span};
use std::path::PathBuf;
use std::sync::Arc;
use tree_sitter::Node;

/// Node kind of a `using` directive in the C# grammar.
pub(crate) const USING_DIRECTIVE: &str = "using_directive";

const COMPILATION_UNIT: &str = "compilation_unit";

/// Node kinds that name a namespace or type and can be promoted.
const NAME_KINDS: &[&str] = &[
    "identifier",
    "qualified_name",
    "generic_name",
    "alias_qualified_name",
];

pub(crate) fn span_of(node: Node<'_>, source: &str) -> Span {
    Span {
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
        start: Point::from_byte_point(source, node.start_byte(), node.start_position()),
        end: Point::from_byte_point(source, node.end_byte(), node.end_position()),
    }
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Decodes one directive. Keyword tokens set the flags, an `=` token turns the
/// preceding name into the alias, and the last named child is the target.
pub(crate) fn decode_directive(
    node: Node<'_>,
    source: &str,
    unit: &Arc<PathBuf>,
) -> ImportDeclaration {
    let mut is_global = false;
    let mut is_static = false;
    let mut alias = None;
    let mut pending: Option<Node<'_>> = None;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.is_named() {
            if child.kind() != "comment" {
                pending = Some(child);
            }
            continue;
        }
        match child.kind() {
            "global" => is_global = true,
            "static" => is_static = true,
            "=" => {
                alias = pending
                    .take()
                    .map(|name| node_text(name, source).trim().to_owned());
            }
            _ => {}
        }
    }

    let path = pending
        .filter(|target| NAME_KINDS.contains(&target.kind()))
        .and_then(|target| name_segments(node_text(target, source)));

    let scope = match node.parent() {
        Some(parent) if parent.kind() == COMPILATION_UNIT => DeclarationScope::CompilationUnit,
        _ => DeclarationScope::Namespace,
    };

    ImportDeclaration {
        path,
        alias,
        is_static,
        is_global,
        scope,
        span: span_of(node, source),
        text: node_text(node, source).to_owned(),
        unit: Arc::clone(unit),
    }
}

/// Splits a name on `.` outside generic argument lists, dropping whitespace.
pub(crate) fn name_segments(text: &str) -> Option<Vec<String>> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for ch in text.chars().filter(|c| !c.is_whitespace()) {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            '.' if depth == 0 => {
                segments.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(ch);
    }
    segments.push(current);

    if segments.iter().any(String::is_empty) {
        None
    } else {
        Some(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_segments_plain() {
        assert_eq!(
            name_segments("System.Collections.Generic"),
            Some(vec![
                "System".to_owned(),
                "Collections".to_owned(),
                "Generic".to_owned()
            ])
        );
    }

    #[test]
    fn test_name_segments_generic_arguments_stay_whole() {
        assert_eq!(
            name_segments("System.Collections.Generic.Dictionary<System.String, int>"),
            Some(vec![
                "System".to_owned(),
                "Collections".to_owned(),
                "Generic".to_owned(),
                "Dictionary<System.String,int>".to_owned()
            ])
        );
    }

    #[test]
    fn test_name_segments_alias_qualified() {
        assert_eq!(
            name_segments("global::System . Text"),
            Some(vec!["global::System".to_owned(), "Text".to_owned()])
        );
    }

    #[test]
    fn test_name_segments_rejects_empty() {
        assert_eq!(name_segments(""), None);
        assert_eq!(name_segments("System."), None);
    }
}
