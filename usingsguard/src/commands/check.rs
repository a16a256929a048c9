//! Check mode: report misplaced `using` directives.

use crate::cancel::CancellationToken;
use crate::output;
use crate::rules::placement::PLACEMENT_RULE;
use crate::rules::Diagnostic;
use crate::workspace::Workspace;
use anyhow::Result;
use std::io::Write;

/// Options for check mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    /// Print the diagnostic array as JSON.
    pub json: bool,
    /// Skip the summary table and status line.
    pub quiet: bool,
}

/// Checks the workspace and prints diagnostics.
///
/// Returns the exit code: 1 when any directive is misplaced.
///
/// # Errors
///
/// Returns an error if the check is cancelled or writing fails.
pub fn run_check<W: Write>(
    workspace: &Workspace,
    options: CheckOptions,
    cancel: &CancellationToken,
    mut writer: W,
) -> Result<i32> {
    let diagnostics: Vec<Diagnostic> = workspace
        .check(cancel)?
        .iter()
        .map(|violation| violation.to_diagnostic(PLACEMENT_RULE))
        .collect();

    if options.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&diagnostics)?)?;
    } else {
        output::print_diagnostics(&mut writer, &diagnostics)?;
        if !options.quiet {
            output::print_skipped(&mut writer, workspace.skipped())?;
            output::print_summary_table(&mut writer, &diagnostics)?;
            output::print_check_status(&mut writer, workspace.units().len(), diagnostics.len())?;
        }
    }

    Ok(i32::from(!diagnostics.is_empty()))
}
