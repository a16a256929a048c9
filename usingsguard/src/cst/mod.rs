//! CST (Concrete Syntax Tree) front end for C# sources.
//!
//! This module turns C# text into [`SourceUnit`](crate::model::SourceUnit)
//! snapshots using Tree-sitter:
//! - Every `using` directive, at any nesting level, with its exact byte range
//! - Directive flags (`global`, `static`) and alias
//! - The namespace or type path, when the target is a name
//!
//! # Design Principles
//!
//! - **Parser decides syntax, rules decide placement**: nothing outside this
//!   module looks at grammar node kinds
//! - **Byte-range anchored**: spans are byte offsets into the snapshot text

mod directive;
mod parser;

pub use parser::{parse_unit, reparse, CstError, CstParser};
