//! Fix mode: move misplaced `using` directives into the designated files.

use crate::cancel::CancellationToken;
use crate::output;
use crate::utils::normalize_display_path;
use crate::workspace::{FixReport, Workspace};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;

/// Options for fix mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixOptions {
    /// Only show what would change.
    pub dry_run: bool,
    /// Print the report as JSON.
    pub json: bool,
    /// List every written file.
    pub verbose: bool,
}

/// Relocates directives in memory, then writes them unless `dry_run`.
///
/// Files are written only after every relocation was computed. Returns
/// the exit code: 1 when some origin could not be fixed.
///
/// # Errors
///
/// Returns an error if the fix is cancelled or a file cannot be written.
pub fn run_fix<W: Write>(
    workspace: &mut Workspace,
    options: FixOptions,
    cancel: &CancellationToken,
    mut writer: W,
) -> Result<i32> {
    let report = workspace.fix(cancel)?;

    if options.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        output::print_fix_report(&mut writer, &report, options.dry_run)?;
    }

    if !options.dry_run {
        let written = workspace.write_changes()?;
        if options.verbose && !options.json {
            for path in &written {
                writeln!(
                    writer,
                    "  {} {}",
                    "Fixed:".green(),
                    normalize_display_path(path)
                )?;
            }
        }
        log::debug!("wrote {} file(s)", written.len());
    }

    Ok(exit_code(&report))
}

fn exit_code(report: &FixReport) -> i32 {
    i32::from(!report.failures.is_empty())
}
