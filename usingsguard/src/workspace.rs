//! Workspace host: loads C# files from disk, runs the placement checker over
//! them and applies relocation patches to an in-memory snapshot.
//!
//! Nothing touches the file system after [`Workspace::load`] until
//! [`Workspace::write_changes`] is called.

use crate::cancel::{CancellationToken, Cancelled};
use crate::config::{Config, ConfigOptions};
use crate::constants::PRIMARY_CONFIG_KEY;
use crate::cst::{self, CstError, CstParser};
use crate::editorconfig::EditorConfigCache;
use crate::fix::{self, DestinationChange, FixError, RelocationPatch};
use crate::model::{same_file_name, SourceUnit};
use crate::rules::placement;
use crate::rules::ViolationRecord;
use crate::utils::{collect_source_files, find_project_dir, normalize_display_path};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Options supplied by the caller on top of the project configuration.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSettings {
    /// Overrides the designated file name for every unit.
    pub usings_file: Option<String>,
    /// Extra folder names to skip.
    pub exclude_folders: Vec<String>,
    /// Folder names to walk even when excluded.
    pub include_folders: Vec<String>,
}

/// One loaded file with the options that govern it.
#[derive(Debug, Clone)]
pub struct WorkspaceUnit {
    /// Current snapshot.
    pub unit: SourceUnit,
    /// Flat options (project config, `.editorconfig`, overrides).
    pub options: ConfigOptions,
    /// Text on disk when loaded; `None` for files created by a fix.
    pub original: Option<String>,
    /// Whether a fix moved directives into this unit.
    pub is_destination: bool,
}

impl WorkspaceUnit {
    /// Whether the snapshot differs from disk.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.original.as_deref() != Some(self.unit.source.as_str())
    }
}

/// A file that could not be loaded.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    /// File path.
    pub file: PathBuf,
    /// Why it was skipped.
    pub reason: String,
}

/// Outcome of relocating one origin file.
#[derive(Debug, Clone, Serialize)]
pub struct RelocationSummary {
    /// File the directives were removed from.
    pub origin: PathBuf,
    /// Designated file that received them.
    pub destination: PathBuf,
    /// Whether the designated file was created.
    pub created: bool,
    /// Number of directives removed from the origin.
    pub removed: usize,
    /// Entries new to the designated file.
    pub added: Vec<String>,
    /// Directives removed without promotion.
    pub dropped: Vec<String>,
}

/// A unit whose relocation failed; the workspace is unchanged for it.
#[derive(Debug, Clone, Serialize)]
pub struct FixFailure {
    /// Origin file.
    pub file: PathBuf,
    /// Error message.
    pub error: String,
}

/// Everything [`Workspace::fix`] did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FixReport {
    /// Applied relocations, by origin path.
    pub relocations: Vec<RelocationSummary>,
    /// Origins that could not be fixed.
    pub failures: Vec<FixFailure>,
}

/// Loaded set of C# files.
#[derive(Debug)]
pub struct Workspace {
    roots: Vec<PathBuf>,
    units: Vec<WorkspaceUnit>,
    skipped: Vec<SkippedFile>,
    config: Config,
    settings: WorkspaceSettings,
    editorconfig: EditorConfigCache,
}

impl Workspace {
    /// Loads every C# file under `roots`.
    ///
    /// Unreadable or unparsable files are skipped and listed in
    /// [`Workspace::skipped`].
    ///
    /// # Errors
    ///
    /// Returns an error when `cancel` fires during parsing.
    pub fn load(
        roots: &[PathBuf],
        settings: WorkspaceSettings,
        cancel: &CancellationToken,
    ) -> Result<Self> {
        let config_root = roots.first().map_or(Path::new("."), PathBuf::as_path);
        let config = Config::load_from_path(config_root);
        if let Some(path) = &config.config_file_path {
            log::debug!("using project config {}", path.display());
        }

        let mut settings = settings;
        settings
            .exclude_folders
            .extend(config.usingsguard.exclude_folders.iter().flatten().cloned());
        settings
            .include_folders
            .extend(config.usingsguard.include_folders.iter().flatten().cloned());

        let mut files: Vec<PathBuf> = roots
            .iter()
            .flat_map(|root| {
                collect_source_files(root, &settings.exclude_folders, &settings.include_folders)
            })
            .collect();
        files.sort();
        files.dedup();
        log::debug!("found {} source files", files.len());

        let mut workspace = Self {
            roots: roots.to_vec(),
            units: Vec::with_capacity(files.len()),
            skipped: Vec::new(),
            config,
            settings,
            editorconfig: EditorConfigCache::new(),
        };

        let mut pending = Vec::with_capacity(files.len());
        for path in files {
            match fs::read_to_string(&path) {
                Ok(source) => {
                    let options = workspace.options_for(&path);
                    pending.push((path, source, options));
                }
                Err(e) => {
                    log::warn!("skipping {}: {e}", normalize_display_path(&path));
                    workspace.skipped.push(SkippedFile {
                        file: path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let parsed: Vec<(PathBuf, std::result::Result<WorkspaceUnit, CstError>)> = pending
            .into_par_iter()
            .map_init(CstParser::new, |parser, (path, source, options)| {
                let result = match parser {
                    Ok(parser) => parser.parse_unit(Some(path.as_path()), &source, cancel),
                    Err(e) => Err(CstError::ParserCreation(e.to_string())),
                }
                .map(|unit| WorkspaceUnit {
                    unit,
                    options,
                    original: Some(source),
                    is_destination: false,
                });
                (path, result)
            })
            .collect();

        for (path, result) in parsed {
            match result {
                Ok(unit) => workspace.units.push(unit),
                Err(CstError::Cancelled(c)) => return Err(c.into()),
                Err(e) => {
                    log::warn!("skipping {}: {e}", normalize_display_path(&path));
                    workspace.skipped.push(SkippedFile {
                        file: path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(workspace)
    }

    /// Options for a file path: project config, then `.editorconfig`, then
    /// the caller's override.
    fn options_for(&mut self, path: &Path) -> ConfigOptions {
        let mut options = self.config.base_options();
        self.editorconfig.apply_to(path, &mut options);
        if let Some(name) = &self.settings.usings_file {
            options.insert(PRIMARY_CONFIG_KEY, name.as_str());
        }
        options
    }

    /// Loaded units, sorted by path; created files come last.
    #[must_use]
    pub fn units(&self) -> &[WorkspaceUnit] {
        &self.units
    }

    /// Files that could not be loaded.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Unit at `path`, if loaded or created.
    #[must_use]
    pub fn unit(&self, path: &Path) -> Option<&WorkspaceUnit> {
        self.units.iter().find(|entry| entry.unit.path() == path)
    }

    /// Runs the placement checker over every unit in parallel.
    ///
    /// Results are ordered by file, then position.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` when `cancel` fires.
    pub fn check(&self, cancel: &CancellationToken) -> std::result::Result<Vec<ViolationRecord>, Cancelled> {
        let per_unit: Vec<Vec<ViolationRecord>> = self
            .units
            .par_iter()
            .map(|entry| placement::check(&entry.unit, &entry.options, cancel))
            .collect::<std::result::Result<_, _>>()?;

        let mut violations: Vec<ViolationRecord> = per_unit.into_iter().flatten().collect();
        violations.sort_by(|a, b| {
            a.declaration
                .unit
                .cmp(&b.declaration.unit)
                .then(a.declaration.span.start_byte.cmp(&b.declaration.span.start_byte))
        });
        Ok(violations)
    }

    /// Relocates the directives of every flagged unit, one origin at a time.
    ///
    /// Each origin is re-checked against the current snapshot, so later
    /// relocations see the designated files earlier ones produced. A unit
    /// whose fix fails is left unchanged and listed in the report.
    ///
    /// # Errors
    ///
    /// Returns an error when `cancel` fires or a rewritten unit cannot be
    /// re-parsed.
    pub fn fix(&mut self, cancel: &CancellationToken) -> Result<FixReport> {
        let mut report = FixReport::default();
        let loaded = self.units.len();

        for index in 0..loaded {
            cancel.check()?;
            let entry = &self.units[index];
            let violations = placement::check(&entry.unit, &entry.options, cancel)?;
            let Some(first) = violations.first() else {
                continue;
            };

            let designated = self.find_designated(index, &first.target.file_name);
            let patch = match fix::fix(
                &entry.unit,
                &violations,
                designated.map(|i| &self.units[i].unit),
                cancel,
            ) {
                Ok(patch) => patch,
                Err(FixError::Cancelled(c)) => return Err(c.into()),
                Err(e) => {
                    log::warn!("cannot fix {}: {e}", normalize_display_path(entry.unit.path()));
                    report.failures.push(FixFailure {
                        file: entry.unit.path().to_path_buf(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            if let DestinationChange::Create { file_name, .. } = &patch.destination {
                let path = self.new_file_dir(entry.unit.path()).join(file_name);
                if let Some(error) = self.create_conflict(&path) {
                    log::warn!("cannot fix {}: {error}", normalize_display_path(entry.unit.path()));
                    report.failures.push(FixFailure {
                        file: entry.unit.path().to_path_buf(),
                        error,
                    });
                    continue;
                }
            }

            let summary = self.apply_patch(index, designated, patch)?;
            log::debug!(
                "moved {} directive(s) from {} to {}",
                summary.removed,
                normalize_display_path(&summary.origin),
                normalize_display_path(&summary.destination)
            );
            report.relocations.push(summary);
        }

        Ok(report)
    }

    /// Index of the designated unit for the origin at `origin`.
    ///
    /// Only files of the origin's own project count. Among those, the one in
    /// the nearest enclosing directory wins, then the first by path.
    fn find_designated(&self, origin: usize, file_name: &str) -> Option<usize> {
        let origin_path = self.units[origin].unit.path();
        let project = self.new_file_dir(origin_path);
        self.units
            .iter()
            .enumerate()
            .filter(|(i, entry)| {
                *i != origin
                    && same_file_name(entry.unit.file_name(), file_name)
                    && self.new_file_dir(entry.unit.path()) == project
            })
            .max_by_key(|(i, entry)| {
                let depth = entry
                    .unit
                    .path()
                    .parent()
                    .filter(|dir| origin_path.starts_with(dir))
                    .map_or(0, |dir| dir.components().count() + 1);
                (depth, std::cmp::Reverse(*i))
            })
            .map(|(i, _)| i)
    }

    /// Directory a new designated file for `origin` is created in.
    fn new_file_dir(&self, origin: &Path) -> PathBuf {
        let root = self
            .roots
            .iter()
            .find(|root| origin.starts_with(root))
            .or_else(|| self.roots.first());
        let boundary = root.map_or_else(|| PathBuf::from("."), |root| dir_of(root));

        find_project_dir(origin, &boundary).unwrap_or(boundary)
    }

    /// Why a new designated file cannot be created at `path`, if it cannot.
    ///
    /// A file already on disk at `path`, or a same-named file of the same
    /// project that failed to load, must not be replaced by a fresh one.
    fn create_conflict(&self, path: &Path) -> Option<String> {
        let file_name = path.file_name()?.to_string_lossy();
        let project = path.parent()?;
        let unloaded = self.skipped.iter().find(|skipped| {
            skipped
                .file
                .file_name()
                .is_some_and(|name| same_file_name(&name.to_string_lossy(), &file_name))
                && self.new_file_dir(&skipped.file) == project
        });
        if let Some(skipped) = unloaded {
            return Some(format!(
                "designated file {} could not be loaded",
                normalize_display_path(&skipped.file)
            ));
        }
        path.exists()
            .then(|| format!("{} exists but was not loaded", normalize_display_path(path)))
    }

    fn apply_patch(
        &mut self,
        origin: usize,
        designated: Option<usize>,
        patch: RelocationPatch,
    ) -> Result<RelocationSummary> {
        let RelocationPatch {
            origin: origin_edit,
            destination,
            added,
            dropped,
            ..
        } = patch;

        let origin_id = Arc::clone(&origin_edit.unit);
        let new_origin = cst::reparse(&origin_id, &origin_edit.new_source)
            .with_context(|| format!("re-parsing {}", origin_id.display()))?;

        let (destination_path, created, new_destination) = match destination {
            DestinationChange::Merge { unit, new_source } => {
                let reparsed = cst::reparse(&unit, &new_source)
                    .with_context(|| format!("re-parsing {}", unit.display()))?;
                (unit.as_ref().clone(), false, reparsed)
            }
            DestinationChange::Create { file_name, content } => {
                let path = self.new_file_dir(&origin_id).join(file_name);
                let parsed = cst::parse_unit(Some(path.as_path()), &content)
                    .with_context(|| format!("parsing new file {}", path.display()))?;
                (path, true, parsed)
            }
        };

        self.units[origin].unit = new_origin;
        match designated {
            Some(index) if !created => {
                self.units[index].unit = new_destination;
                self.units[index].is_destination = true;
            }
            _ => {
                let options = self.options_for(&destination_path);
                self.units.push(WorkspaceUnit {
                    unit: new_destination,
                    options,
                    original: None,
                    is_destination: true,
                });
            }
        }

        Ok(RelocationSummary {
            origin: origin_id.as_ref().clone(),
            destination: destination_path,
            created,
            removed: origin_edit.deleted.len(),
            added,
            dropped: dropped.into_iter().map(|decl| decl.text).collect(),
        })
    }

    /// Units whose snapshot differs from disk.
    pub fn changed_units(&self) -> impl Iterator<Item = &WorkspaceUnit> {
        self.units.iter().filter(|entry| entry.is_dirty())
    }

    /// Writes every changed or created unit to disk.
    ///
    /// Designated files go first, so a failed write never leaves directives
    /// removed from an origin without their new home. Created files must not
    /// exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error when a file cannot be written. Files after it are
    /// left untouched.
    pub fn write_changes(&self) -> Result<Vec<PathBuf>> {
        let (destinations, origins): (Vec<_>, Vec<_>) =
            self.changed_units().partition(|entry| entry.is_destination);

        let mut written = Vec::new();
        for entry in destinations.into_iter().chain(origins) {
            let path = entry.unit.path();
            write_unit(entry).with_context(|| format!("writing {}", path.display()))?;
            written.push(path.to_path_buf());
        }
        Ok(written)
    }
}

fn write_unit(entry: &WorkspaceUnit) -> std::io::Result<()> {
    let path = entry.unit.path();
    if entry.original.is_some() {
        return fs::write(path, &entry.unit.source);
    }
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    file.write_all(entry.unit.source.as_bytes())
}

fn dir_of(root: &Path) -> PathBuf {
    if root.is_file() {
        root.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    } else {
        root.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn load(dir: &TempDir, settings: WorkspaceSettings) -> Workspace {
        Workspace::load(&[dir.path().to_path_buf()], settings, &CancellationToken::new()).unwrap()
    }

    #[test]
    fn test_check_sorted_by_file_and_position() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "B.cs", "using System;\nclass B { }\n");
        write(dir.path(), "A.cs", "using System;\nusing System.IO;\nclass A { }\n");
        write(dir.path(), "Usings.cs", "global using System;\n");

        let workspace = load(&dir, WorkspaceSettings::default());
        let found = workspace.check(&CancellationToken::new()).unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|v| {
                (
                    v.declaration.unit.file_name().unwrap().to_string_lossy().into_owned(),
                    v.declaration.span.start.row,
                )
            })
            .collect();
        assert_eq!(
            names,
            vec![
                ("A.cs".to_owned(), 0),
                ("A.cs".to_owned(), 1),
                ("B.cs".to_owned(), 0)
            ]
        );
    }

    #[test]
    fn test_override_beats_editorconfig() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".editorconfig", "root = true\n[*.cs]\ndotnet_usings_file_name = Imports.cs\n");
        write(dir.path(), "Imports.cs", "using System;\n");

        let workspace = load(&dir, WorkspaceSettings::default());
        assert!(workspace.check(&CancellationToken::new()).unwrap().is_empty());

        let workspace = load(
            &dir,
            WorkspaceSettings {
                usings_file: Some("Usings.cs".to_owned()),
                ..WorkspaceSettings::default()
            },
        );
        assert_eq!(workspace.check(&CancellationToken::new()).unwrap().len(), 1);
    }

    #[test]
    fn test_fix_creates_designated_file_next_to_project() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "App/App.csproj", "<Project />");
        let program = write(dir.path(), "App/Services/Worker.cs", "using System;\nclass Worker { }\n");

        let mut workspace = load(&dir, WorkspaceSettings::default());
        let report = workspace.fix(&CancellationToken::new()).unwrap();

        let usings = dir.path().join("App/Usings.cs");
        assert_eq!(report.relocations.len(), 1);
        assert!(report.relocations[0].created);
        assert_eq!(report.relocations[0].destination, usings);
        assert_eq!(workspace.unit(&program).unwrap().unit.source, "class Worker { }\n");
        assert_eq!(
            workspace.unit(&usings).unwrap().unit.source,
            "global using System;\n"
        );
        // Nothing is written until asked.
        assert!(!usings.exists());
    }

    #[test]
    fn test_fix_reuses_created_file_for_later_origins() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "A.cs", "using System;\nclass A { }\n");
        write(dir.path(), "B.cs", "using System.IO;\nusing System;\nclass B { }\n");

        let mut workspace = load(&dir, WorkspaceSettings::default());
        let report = workspace.fix(&CancellationToken::new()).unwrap();
        assert_eq!(report.relocations.len(), 2);
        assert!(report.relocations[0].created);
        assert!(!report.relocations[1].created);
        assert_eq!(report.relocations[1].added, vec!["global using System.IO;".to_owned()]);

        let written = workspace.write_changes().unwrap();
        assert_eq!(written.len(), 3);
        assert_eq!(
            fs::read_to_string(dir.path().join("Usings.cs")).unwrap(),
            "global using System;\nglobal using System.IO;\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("B.cs")).unwrap(),
            "class B { }\n"
        );
    }

    #[test]
    fn test_fix_leaves_clean_workspace_untouched() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Usings.cs", "global using System;\n");
        write(dir.path(), "A.cs", "class A { }\n");

        let mut workspace = load(&dir, WorkspaceSettings::default());
        let report = workspace.fix(&CancellationToken::new()).unwrap();
        assert!(report.relocations.is_empty());
        assert_eq!(workspace.changed_units().count(), 0);
    }

    #[test]
    fn test_nearest_designated_file_wins() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Usings.cs", "global using System;\n");
        write(dir.path(), "Lib/Usings.cs", "global using System.Linq;\n");
        write(dir.path(), "Lib/Service.cs", "using System.Text;\nclass S { }\n");

        let mut workspace = load(&dir, WorkspaceSettings::default());
        let report = workspace.fix(&CancellationToken::new()).unwrap();
        assert_eq!(report.relocations[0].destination, dir.path().join("Lib/Usings.cs"));
        assert_eq!(
            workspace.unit(&dir.path().join("Lib/Usings.cs")).unwrap().unit.source,
            "global using System.Linq;\nglobal using System.Text;\n"
        );
    }

    #[test]
    fn test_designated_file_of_other_project_ignored() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "A/A.csproj", "<Project />");
        let a_usings = write(dir.path(), "A/Usings.cs", "global using System;\n");
        write(dir.path(), "B/B.csproj", "<Project />");
        write(dir.path(), "B/Worker.cs", "using System.Text;\nclass Worker { }\n");

        let mut workspace = load(&dir, WorkspaceSettings::default());
        let report = workspace.fix(&CancellationToken::new()).unwrap();
        assert_eq!(report.relocations.len(), 1);
        assert!(report.relocations[0].created);
        assert_eq!(report.relocations[0].destination, dir.path().join("B/Usings.cs"));
        assert!(!workspace.unit(&a_usings).unwrap().is_dirty());

        workspace.write_changes().unwrap();
        assert_eq!(fs::read_to_string(&a_usings).unwrap(), "global using System;\n");
        assert_eq!(
            fs::read_to_string(dir.path().join("B/Usings.cs")).unwrap(),
            "global using System.Text;\n"
        );
    }

    #[test]
    fn test_unloadable_designated_file_is_not_replaced() {
        let dir = TempDir::new().unwrap();
        let usings = dir.path().join("Usings.cs");
        let bytes: &[u8] = b"// Caf\xe9 imports\nglobal using System.Net;\n";
        fs::write(&usings, bytes).unwrap();
        let origin = write(dir.path(), "A.cs", "using System;\nclass A { }\n");

        let mut workspace = load(&dir, WorkspaceSettings::default());
        assert_eq!(workspace.skipped().len(), 1);
        let report = workspace.fix(&CancellationToken::new()).unwrap();
        assert!(report.relocations.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file, origin);
        assert!(report.failures[0].error.contains("could not be loaded"));

        assert!(workspace.write_changes().unwrap().is_empty());
        assert_eq!(fs::read(&usings).unwrap(), bytes);
        assert_eq!(
            fs::read_to_string(&origin).unwrap(),
            "using System;\nclass A { }\n"
        );
    }

    #[test]
    fn test_existing_path_blocks_new_designated_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("Usings.cs")).unwrap();
        let origin = write(dir.path(), "A.cs", "using System;\nclass A { }\n");

        let mut workspace = load(&dir, WorkspaceSettings::default());
        let report = workspace.fix(&CancellationToken::new()).unwrap();
        assert!(report.relocations.is_empty());
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].error.contains("exists but was not loaded"));
        assert_eq!(workspace.changed_units().count(), 0);
        assert!(!workspace.unit(&origin).unwrap().is_dirty());
    }

    #[test]
    fn test_failed_destination_write_keeps_origin() {
        let dir = TempDir::new().unwrap();
        let origin = write(dir.path(), "A.cs", "using System;\nclass A { }\n");

        let mut workspace = load(&dir, WorkspaceSettings::default());
        let report = workspace.fix(&CancellationToken::new()).unwrap();
        assert!(report.relocations[0].created);

        // Someone else creates the file between fix and write.
        let usings = write(dir.path(), "Usings.cs", "global using System.IO;\n");
        assert!(workspace.write_changes().is_err());
        assert_eq!(fs::read_to_string(&usings).unwrap(), "global using System.IO;\n");
        assert_eq!(
            fs::read_to_string(&origin).unwrap(),
            "using System;\nclass A { }\n"
        );
    }

    #[test]
    fn test_write_changes_writes_destinations_first() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "A/A.csproj", "<Project />");
        write(dir.path(), "A/Program.cs", "using System;\nclass A { }\n");
        write(dir.path(), "Z/Z.csproj", "<Project />");
        write(dir.path(), "Z/Usings.cs", "global using System.IO;\n");
        write(dir.path(), "Z/B.cs", "using System.Linq;\nclass B { }\n");

        let mut workspace = load(&dir, WorkspaceSettings::default());
        workspace.fix(&CancellationToken::new()).unwrap();
        let written = workspace.write_changes().unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("Z/Usings.cs"),
                dir.path().join("A/Usings.cs"),
                dir.path().join("A/Program.cs"),
                dir.path().join("Z/B.cs"),
            ]
        );
    }
}
