use crate::cancel::{CancellationToken, Cancelled};
use crate::config::{TargetFileConfig, TargetFileResolver};
use crate::model::{ImportDeclaration, SourceUnit};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A misplaced directive and the designated file it belongs in.
pub struct ViolationRecord {
    /// The offending directive.
    pub declaration: ImportDeclaration,
    /// Designated file resolved for the owning unit.
    pub target: TargetFileConfig,
}

impl ViolationRecord {
    /// Converts the record into a reportable diagnostic for `rule`.
    #[must_use]
    pub fn to_diagnostic(&self, rule: RuleMetadata) -> Diagnostic {
        let span = &self.declaration.span;
        Diagnostic {
            rule_id: rule.id.to_owned(),
            category: rule.category.to_owned(),
            severity: rule.severity.as_str().to_owned(),
            message: rule.message_format.replace("{0}", &self.target.file_name),
            file: self.declaration.unit.as_ref().clone(),
            line: span.start.row + 1,
            col: span.start.column + 1,
            end_line: span.end.row + 1,
            end_col: span.end.column + 1,
            target_file: self.target.file_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// A single issue found by a rule.
pub struct Diagnostic {
    /// ID of the rule that triggered the diagnostic.
    pub rule_id: String,
    /// Category of the rule.
    pub category: String,
    /// Severity level (e.g., "warning").
    pub severity: String,
    /// Description of the issue.
    pub message: String,
    /// File where the issue was found.
    pub file: PathBuf,
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based, in characters).
    pub col: usize,
    /// End line number (1-based).
    pub end_line: usize,
    /// End column number (1-based, in characters, exclusive).
    pub end_col: usize,
    /// Designated file the directive should move to.
    pub target_file: String,
}

/// How a diagnostic is surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Non-blocking.
    Warning,
}

impl Severity {
    /// Lower-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
/// Metadata associated with a rule.
pub struct RuleMetadata {
    /// Unique code/ID of the rule.
    pub id: &'static str,
    /// Category of the rule.
    pub category: &'static str,
    /// Message with `{0}` standing for the designated file name.
    pub message_format: &'static str,
    /// Default severity.
    pub severity: Severity,
}

/// Trait defining a linting rule over a parsed unit.
pub trait Rule: Send + Sync {
    /// Returns the descriptive name of the rule.
    fn name(&self) -> &'static str;
    /// Returns the unique code/ID of the rule.
    fn code(&self) -> &'static str {
        self.metadata().id
    }
    /// Returns the full metadata for the rule.
    fn metadata(&self) -> RuleMetadata;
    /// Inspects one unit.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` when `cancel` fires mid-check.
    fn check(
        &self,
        unit: &SourceUnit,
        resolver: &dyn TargetFileResolver,
        cancel: &CancellationToken,
    ) -> Result<Vec<ViolationRecord>, Cancelled>;
}

/// Module containing rule ID constants.
pub mod ids;
/// Module containing the `using` placement rule.
pub mod placement;
