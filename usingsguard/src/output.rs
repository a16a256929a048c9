use crate::rules::Diagnostic;
use crate::utils::normalize_display_path;
use crate::workspace::{FixReport, SkippedFile};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use rustc_hash::FxHashMap;
use std::io::Write;
use std::path::PathBuf;

/// Helper to create a styled table
fn create_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

/// Print one line per diagnostic: `file:line:col: severity ID message`.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_diagnostics(writer: &mut impl Write, diagnostics: &[Diagnostic]) -> std::io::Result<()> {
    for d in diagnostics {
        writeln!(
            writer,
            "{}:{}:{}: {} {} {}",
            normalize_display_path(&d.file).bold(),
            d.line,
            d.col,
            d.severity.yellow(),
            d.rule_id.dimmed(),
            d.message
        )?;
    }
    Ok(())
}

/// Print a per-file count table.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_summary_table(
    writer: &mut impl Write,
    diagnostics: &[Diagnostic],
) -> std::io::Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }

    let mut per_file: FxHashMap<&PathBuf, (usize, &str)> = FxHashMap::default();
    for d in diagnostics {
        let entry = per_file.entry(&d.file).or_insert((0, d.target_file.as_str()));
        entry.0 += 1;
    }
    let mut rows: Vec<_> = per_file.into_iter().collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));

    let mut table = create_table(vec!["File", "Misplaced", "Move To"]);
    for (file, (count, target)) in rows {
        table.add_row(vec![
            Cell::new(normalize_display_path(file)).add_attribute(Attribute::Bold),
            Cell::new(count)
                .fg(Color::Yellow)
                .set_alignment(CellAlignment::Right),
            Cell::new(target),
        ]);
    }

    writeln!(writer, "\n{table}")?;
    Ok(())
}

/// Print the overall result line.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_check_status(
    writer: &mut impl Write,
    files: usize,
    violations: usize,
) -> std::io::Result<()> {
    if violations == 0 {
        writeln!(
            writer,
            "{} {}",
            "[OK]".green().bold(),
            format!("Checked {files} files, all using directives are in place").dimmed()
        )
    } else {
        writeln!(
            writer,
            "{} {} misplaced using directive(s) in {} files checked",
            "[FAIL]".red().bold(),
            violations.to_string().red().bold(),
            files
        )
    }
}

/// Print the relocations of a fix run.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_fix_report(
    writer: &mut impl Write,
    report: &FixReport,
    dry_run: bool,
) -> std::io::Result<()> {
    if dry_run {
        writeln!(
            writer,
            "\n{}",
            "[DRY-RUN] Using directives that would be moved:".yellow()
        )?;
    } else {
        writeln!(writer, "\n{}", "Moving using directives...".cyan())?;
    }

    if report.relocations.is_empty() && report.failures.is_empty() {
        writeln!(writer, "  Nothing to move.")?;
        return Ok(());
    }

    for relocation in &report.relocations {
        let verb = if dry_run { "Would move" } else { "Moved" };
        let action = if relocation.created { "new file" } else { "existing file" };
        writeln!(
            writer,
            "  {} {} directive(s) from {} to {} ({})",
            verb,
            relocation.removed,
            normalize_display_path(&relocation.origin).bold(),
            normalize_display_path(&relocation.destination).bold(),
            action
        )?;
        for entry in &relocation.added {
            writeln!(writer, "    {} {}", "+".green(), entry)?;
        }
        for text in &relocation.dropped {
            writeln!(
                writer,
                "    {} {} {}",
                "-".red(),
                text,
                "(not a namespace or type, not moved)".dimmed()
            )?;
        }
    }

    for failure in &report.failures {
        writeln!(
            writer,
            "  {} {}: {}",
            "Skip:".yellow(),
            normalize_display_path(&failure.file),
            failure.error
        )?;
    }
    Ok(())
}

/// Print files that could not be loaded.
///
/// # Errors
///
/// Returns an error if writing to the output fails.
pub fn print_skipped(writer: &mut impl Write, skipped: &[SkippedFile]) -> std::io::Result<()> {
    for file in skipped {
        writeln!(
            writer,
            "  {} {}: {}",
            "Skip:".yellow(),
            normalize_display_path(&file.file),
            file.reason.red()
        )?;
    }
    Ok(())
}
