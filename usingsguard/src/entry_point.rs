use crate::cancel::CancellationToken;
use crate::cli::Cli;
use crate::commands::{run_check, run_fix, CheckOptions, FixOptions};
use crate::workspace::{Workspace, WorkspaceSettings};
use anyhow::Result;
use clap::Parser;

/// Runs usingsguard with the given arguments.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run usingsguard with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["usingsguard".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(1);
            }
        },
    };

    crate::logger::init(crate::logger::level_for(
        cli_var.output.verbose,
        cli_var.output.quiet,
    ));

    let roots = cli_var.paths.roots();
    if let Some(missing) = roots.iter().find(|root| !root.exists()) {
        eprintln!(
            "Error: The file or directory '{}' does not exist.",
            missing.display()
        );
        return Ok(1);
    }

    log::debug!("usingsguard v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("using {} threads", rayon::current_num_threads());

    let cancel = CancellationToken::new();
    let settings = WorkspaceSettings {
        usings_file: cli_var.usings_file.clone(),
        exclude_folders: cli_var.exclude_folders.clone(),
        include_folders: cli_var.include_folders.clone(),
    };
    let mut workspace = Workspace::load(&roots, settings, &cancel)?;
    log::debug!("loaded {} files", workspace.units().len());

    if cli_var.fix {
        run_fix(
            &mut workspace,
            FixOptions {
                dry_run: !cli_var.apply,
                json: cli_var.output.json,
                verbose: cli_var.output.verbose,
            },
            &cancel,
            writer,
        )
    } else {
        run_check(
            &workspace,
            CheckOptions {
                json: cli_var.output.json,
                quiet: cli_var.output.quiet,
            },
            &cancel,
            writer,
        )
    }
}
