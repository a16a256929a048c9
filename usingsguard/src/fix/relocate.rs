//! Relocation of misplaced `using` directives into the designated file.
//!
//! [`fix`] is a pure function of the origin snapshot, its violations and the
//! designated unit's snapshot. It returns a [`RelocationPatch`] describing
//! both edits; callers apply both or neither.

use super::rewriter::{ByteRangeRewriter, Edit, EditBuilder, RewriteError};
use crate::cancel::{CancellationToken, Cancelled};
use crate::model::{ImportDeclaration, SourceUnit, Span};
use crate::rules::ViolationRecord;
use rustc_hash::FxHashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Why a relocation could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixError {
    /// Nothing in the request can be fixed against this origin.
    #[error("no actionable violation: {0}")]
    NoActionableViolation(&'static str),
    /// A flagged directive is no longer where the violation says it is.
    #[error("{} changed since it was checked (directive at {}:{} not found)", .unit.display(), .line, .col)]
    StaleDocumentState {
        /// Origin unit.
        unit: PathBuf,
        /// 1-based line of the missing directive.
        line: usize,
        /// 1-based column of the missing directive.
        col: usize,
    },
    /// The edit set could not be applied.
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
    /// Fix stopped on request.
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
}

/// Edit of the unit the directives are removed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginEdit {
    /// Origin unit.
    pub unit: Arc<PathBuf>,
    /// Removed directive spans, in source order.
    pub deleted: Vec<Span>,
    /// Origin text after removal.
    pub new_source: String,
}

/// What happens to the designated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationChange {
    /// No designated unit exists yet.
    Create {
        /// Name of the file to create.
        file_name: String,
        /// Its content.
        content: String,
    },
    /// The designated unit gets a regenerated directive list.
    Merge {
        /// Designated unit.
        unit: Arc<PathBuf>,
        /// Its text after the merge.
        new_source: String,
    },
}

/// Combined edit of origin and destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationPatch {
    /// Removal from the origin.
    pub origin: OriginEdit,
    /// Creation or merge of the designated file.
    pub destination: DestinationChange,
    /// Designated file name the directives were moved to.
    pub target_file: String,
    /// Entries that were not in the designated file before.
    pub added: Vec<String>,
    /// Directives removed from the origin without being promoted because
    /// their target is not a namespace or type name.
    pub dropped: Vec<ImportDeclaration>,
}

/// Keeps the first occurrence of every entry, preserving order.
#[must_use]
pub fn dedupe_entries(entries: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}

/// Builds the relocation patch for one origin unit.
///
/// All violations must belong to `origin` and share one target (as produced
/// by the placement checker). `designated` is the current designated unit,
/// if the workspace has one.
///
/// # Errors
///
/// - `NoActionableViolation` when `violations` is empty, refers to another
///   unit, or `designated` is the origin itself
/// - `StaleDocumentState` when a flagged directive is not at its recorded
///   span in `origin`
/// - `Rewrite` when an edit cannot be applied or breaks a cleanly parsing unit
/// - `Cancelled` when `cancel` fires
pub fn fix(
    origin: &SourceUnit,
    violations: &[ViolationRecord],
    designated: Option<&SourceUnit>,
    cancel: &CancellationToken,
) -> Result<RelocationPatch, FixError> {
    let first = violations
        .first()
        .ok_or(FixError::NoActionableViolation("no violations"))?;
    if violations.iter().any(|v| v.declaration.unit != origin.id) {
        return Err(FixError::NoActionableViolation(
            "violation belongs to another unit",
        ));
    }
    if designated.is_some_and(|unit| unit.id == origin.id) {
        return Err(FixError::NoActionableViolation(
            "origin is the designated file",
        ));
    }
    let target_file = first.target.file_name.clone();

    let flagged = resolve_flagged(origin, violations, cancel)?;
    let origin_edit = remove_from_origin(origin, &flagged, cancel)?;

    let mut promoted = Vec::with_capacity(flagged.len());
    let mut dropped = Vec::new();
    for decl in flagged {
        cancel.check()?;
        if let Some(global) = decl.promoted() {
            promoted.push(global.identity());
        } else {
            log::warn!(
                "{}:{}: `{}` does not name a namespace or type; it is removed without being moved to {}",
                origin.path().display(),
                decl.span.start.row + 1,
                decl.text,
                target_file
            );
            dropped.push(decl.clone());
        }
    }

    let (destination, added) = match designated {
        None => {
            let entries = dedupe_entries(promoted);
            let content = render_list(&entries, "\n");
            (
                DestinationChange::Create {
                    file_name: target_file.clone(),
                    content,
                },
                entries,
            )
        }
        Some(unit) => merge_into(unit, promoted, cancel)?,
    };

    Ok(RelocationPatch {
        origin: origin_edit,
        destination,
        target_file,
        added,
        dropped,
    })
}

/// Maps each violation back onto the origin's current directives.
fn resolve_flagged<'u>(
    origin: &'u SourceUnit,
    violations: &[ViolationRecord],
    cancel: &CancellationToken,
) -> Result<Vec<&'u ImportDeclaration>, FixError> {
    let mut flagged: Vec<&ImportDeclaration> = Vec::with_capacity(violations.len());
    for violation in violations {
        cancel.check()?;
        let wanted = &violation.declaration;
        let current = origin
            .imports
            .iter()
            .find(|decl| decl.span == wanted.span && decl.text == wanted.text)
            .filter(|decl| origin.slice(&decl.span) == Some(decl.text.as_str()))
            .ok_or_else(|| FixError::StaleDocumentState {
                unit: origin.path().to_path_buf(),
                line: wanted.span.start.row + 1,
                col: wanted.span.start.column + 1,
            })?;
        if !flagged.iter().any(|seen| seen.span == current.span) {
            flagged.push(current);
        }
    }
    flagged.sort_by_key(|decl| decl.span.start_byte);
    Ok(flagged)
}

fn remove_from_origin(
    origin: &SourceUnit,
    flagged: &[&ImportDeclaration],
    cancel: &CancellationToken,
) -> Result<OriginEdit, FixError> {
    let mut rewriter = ByteRangeRewriter::new(origin.source.as_str());
    rewriter.add_edits(
        flagged
            .iter()
            .map(|decl| Edit::delete_line(&origin.source, decl.span.start_byte, decl.span.end_byte)),
    );

    let new_source = if origin.has_syntax_errors {
        rewriter.apply_with(cancel)?
    } else {
        rewriter.apply_verified(cancel)?
    };

    Ok(OriginEdit {
        unit: Arc::clone(&origin.id),
        deleted: flagged.iter().map(|decl| decl.span).collect(),
        new_source,
    })
}

/// Regenerates the designated unit's compilation-unit directive list.
///
/// The list replaces the first existing directive; the other existing
/// compilation-unit directives are deleted. Other content stays untouched.
fn merge_into(
    unit: &SourceUnit,
    promoted: Vec<String>,
    cancel: &CancellationToken,
) -> Result<(DestinationChange, Vec<String>), FixError> {
    let existing: Vec<&ImportDeclaration> = unit.top_level_imports().collect();
    let existing_entries: FxHashSet<String> =
        existing.iter().map(|decl| decl.identity()).collect();

    let added: Vec<String> = dedupe_entries(promoted)
        .into_iter()
        .filter(|entry| !existing_entries.contains(entry))
        .collect();
    let entries = dedupe_entries(
        existing
            .iter()
            .map(|decl| decl.identity())
            .chain(added.iter().cloned()),
    );

    let newline = if unit.source.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    };

    let edits = match existing.split_first() {
        Some((head, rest)) => rest.iter().fold(
            EditBuilder::new().replace(
                head.span.start_byte,
                head.span.end_byte,
                entries.join(newline),
            ),
            |builder, decl| {
                builder.delete_line(&unit.source, decl.span.start_byte, decl.span.end_byte)
            },
        ),
        None if entries.is_empty() => EditBuilder::new(),
        None => {
            let mut block = render_list(&entries, newline);
            if !unit.source.trim().is_empty() {
                block.push_str(newline);
            }
            EditBuilder::new().insert(0, block)
        }
    }
    .build();

    let mut rewriter = ByteRangeRewriter::new(unit.source.as_str());
    rewriter.add_edits(edits);
    let new_source = if unit.has_syntax_errors {
        rewriter.apply_with(cancel)?
    } else {
        rewriter.apply_verified(cancel)?
    };

    Ok((
        DestinationChange::Merge {
            unit: Arc::clone(&unit.id),
            new_source,
        },
        added,
    ))
}

/// One entry per line, each line terminated.
fn render_list(entries: &[String], newline: &str) -> String {
    entries.iter().fold(String::new(), |mut out, entry| {
        out.push_str(entry);
        out.push_str(newline);
        out
    })
}
