use clap::{Args, Parser};
use std::path::PathBuf;

/// Help text for configuration options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION:
  .editorconfig (per directory, nearest wins):

  [*.cs]
  dotnet_usings_file_name = Usings.cs   # Designated file for using directives
  usings_file_name = Usings.cs          # Legacy key, used when the above is unset

  .usingsguard.toml (project root):

  [usingsguard]
  usings_file_name = \"Usings.cs\"
  exclude_folders = [\"Generated\"]
  include_folders = [\"packages\"]      # Force-include these
";

/// Shared path arguments (mutually exclusive paths/root).
#[derive(Args, Debug, Default, Clone)]
pub struct PathArgs {
    /// Paths to check (files or directories).
    /// When no paths are provided, defaults to the current directory.
    /// Cannot be used with --root.
    #[arg(conflicts_with = "root")]
    pub paths: Vec<PathBuf>,

    /// Project root to check.
    /// Use this instead of positional paths when running from a different directory.
    #[arg(long, conflicts_with = "paths")]
    pub root: Option<PathBuf>,
}

impl PathArgs {
    /// Roots to walk; the current directory when none were given.
    #[must_use]
    pub fn roots(&self) -> Vec<PathBuf> {
        match (&self.root, self.paths.is_empty()) {
            (Some(root), _) => vec![root.clone()],
            (None, true) => vec![PathBuf::from(".")],
            (None, false) => self.paths.clone(),
        }
    }
}

/// Options for output formatting and verbosity.
#[derive(Args, Debug, Default, Clone)]
pub struct OutputOptions {
    /// Output raw JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (shows files being checked).
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode: print only diagnostics, no summary table.
    #[arg(short, long)]
    pub quiet: bool,
}

/// Command line interface configuration using `clap`.
#[derive(Parser, Debug)]
#[command(
    name = "usingsguard",
    author,
    version,
    about = "usingsguard - Keep C# using directives in one designated file",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Global path options (paths vs root).
    #[command(flatten)]
    pub paths: PathArgs,

    /// Designated file name for every file (overrides .editorconfig).
    #[arg(long, value_name = "NAME")]
    pub usings_file: Option<String>,

    /// Output formatting options.
    #[command(flatten)]
    pub output: OutputOptions,

    /// Folders to exclude from the walk.
    #[arg(long, alias = "exclude-folder", num_args = 1..)]
    pub exclude_folders: Vec<String>,

    /// Folders to force-include (overrides default exclusions).
    #[arg(long, alias = "include-folder", num_args = 1..)]
    pub include_folders: Vec<String>,

    /// Move misplaced using directives into the designated file.
    /// By default, shows a preview of what would be changed (dry-run).
    /// Use --apply to actually modify files.
    #[arg(long)]
    pub fix: bool,

    /// Apply the fixes to files (use with --fix).
    #[arg(short = 'a', long, requires = "fix")]
    pub apply: bool,
}
