//! Auto-remediation of misplaced `using` directives.
//!
//! [`relocate::fix`] computes a [`RelocationPatch`] from immutable snapshots;
//! the edits themselves go through [`ByteRangeRewriter`], which applies
//! byte-offset edits back to front and re-parses the result.

mod relocate;
mod rewriter;

pub use relocate::{
    dedupe_entries, fix, DestinationChange, FixError, OriginEdit, RelocationPatch,
};
pub use rewriter::{ByteRangeRewriter, Edit, EditBuilder, RewriteError};
