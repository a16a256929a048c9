//! Import placement: every `using` directive belongs in the designated file.

use super::ids::RULE_ID_USINGS_PLACEMENT;
use super::{Rule, RuleMetadata, Severity, ViolationRecord};
use crate::cancel::{CancellationToken, Cancelled};
use crate::config::TargetFileResolver;
use crate::model::{same_file_name, SourceUnit};

/// Metadata of the placement rule.
pub const PLACEMENT_RULE: RuleMetadata = RuleMetadata {
    id: RULE_ID_USINGS_PLACEMENT,
    category: "Style",
    message_format: "Move using statements to '{0}'",
    severity: Severity::Warning,
};

/// Flags each `using` directive of a unit that is not the designated file.
///
/// Units without directives are never flagged and never consult the resolver.
/// A unit whose basename equals the target (ignoring ASCII case) is in place.
///
/// # Errors
///
/// Returns `Cancelled` when `cancel` fires between directives.
pub fn check(
    unit: &SourceUnit,
    resolver: &dyn TargetFileResolver,
    cancel: &CancellationToken,
) -> Result<Vec<ViolationRecord>, Cancelled> {
    if unit.imports.is_empty() {
        return Ok(Vec::new());
    }

    let target = resolver.resolve(unit);
    if same_file_name(unit.file_name(), &target.file_name) {
        return Ok(Vec::new());
    }

    let mut violations = Vec::with_capacity(unit.imports.len());
    for declaration in &unit.imports {
        cancel.check()?;
        violations.push(ViolationRecord {
            declaration: declaration.clone(),
            target: target.clone(),
        });
    }
    Ok(violations)
}

/// [`Rule`] wrapper around [`check`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PlacementRule;

impl Rule for PlacementRule {
    fn name(&self) -> &'static str {
        "UsingsPlacement"
    }

    fn metadata(&self) -> RuleMetadata {
        PLACEMENT_RULE
    }

    fn check(
        &self,
        unit: &SourceUnit,
        resolver: &dyn TargetFileResolver,
        cancel: &CancellationToken,
    ) -> Result<Vec<ViolationRecord>, Cancelled> {
        check(unit, resolver, cancel)
    }
}
