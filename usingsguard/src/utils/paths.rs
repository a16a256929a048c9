//! Path utilities for usingsguard.
//!
//! This module consolidates all path-related logic for:
//! - Cross-platform path normalization
//! - C# source discovery with gitignore support
//! - Locating the project directory that owns a file

use crate::constants::{DEFAULT_EXCLUDE_FOLDERS, PROJECT_EXTENSION, SOURCE_EXTENSION};
use std::path::{Path, PathBuf};

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use usingsguard::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\src\\Program.cs")), "src/Program.cs");
/// assert_eq!(normalize_display_path(Path::new("./src/Usings.cs")), "src/Usings.cs");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    // Strip Windows extended path prefix if present
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|exclude| match exclude.strip_prefix('*') {
        Some(suffix) if suffix.starts_with('.') => name.ends_with(suffix),
        _ => name == exclude,
    })
}

/// Collects C# source files below `root` with gitignore support.
///
/// Uses the `ignore` crate to respect .gitignore, .git/info/exclude, and global gitignore
/// IN ADDITION to the default exclusions (`bin`, `obj`, `.git`, ...).
///
/// # Arguments
/// * `root` - Directory to search, or a single source file
/// * `exclude` - Additional user-specified exclusion patterns
/// * `include` - Folders to force-include (overrides excludes)
///
/// Walk errors are logged at debug level and skipped.
#[must_use]
pub fn collect_source_files(root: &Path, exclude: &[String], include: &[String]) -> Vec<PathBuf> {
    use ignore::WalkBuilder;

    let mut all_excludes: Vec<String> = exclude
        .iter()
        .cloned()
        .chain(DEFAULT_EXCLUDE_FOLDERS().iter().map(|&s| s.to_owned()))
        .collect();
    all_excludes.retain(|ex| !include.iter().any(|inc| ex == inc));

    let root_for_filter = root.to_path_buf();
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !is_excluded(name, &all_excludes))
        })
        .build();

    let mut files = Vec::new();
    for result in walker {
        match result {
            Ok(entry) => {
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    continue;
                }
                let path = entry.path();
                if has_extension(path, SOURCE_EXTENSION) {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => log::debug!("walk error: {e}"),
        }
    }

    files.sort();
    files
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Nearest directory at or above `file`'s parent that contains a project
/// file, without leaving `boundary`.
#[must_use]
pub fn find_project_dir(file: &Path, boundary: &Path) -> Option<PathBuf> {
    let mut dir = file.parent();
    while let Some(current) = dir {
        let has_project = std::fs::read_dir(current).is_ok_and(|entries| {
            entries
                .filter_map(Result::ok)
                .any(|entry| has_extension(&entry.path(), PROJECT_EXTENSION))
        });
        if has_project {
            return Some(current.to_path_buf());
        }
        if current == boundary || !current.starts_with(boundary) {
            break;
        }
        dir = current.parent();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_excluded_patterns() {
        let excludes = vec!["Generated".to_owned(), "*.g".to_owned()];
        assert!(is_excluded("Generated", &excludes));
        assert!(is_excluded("api.g", &excludes));
        assert!(!is_excluded("GeneratedCode", &excludes));
        assert!(!is_excluded("src", &excludes));
    }

    #[test]
    fn test_collect_source_files_exclusion() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();

        fs::write(root.join("Program.cs"), "class P { }")?;
        fs::write(root.join("README.md"), "# readme")?;
        fs::create_dir_all(root.join("obj/Debug"))?;
        fs::write(root.join("obj/Debug/AssemblyInfo.cs"), "// generated")?;
        fs::create_dir_all(root.join("bin"))?;
        fs::write(root.join("bin/Leftover.cs"), "// stale")?;
        fs::create_dir_all(root.join("src/Models"))?;
        fs::write(root.join("src/Models/User.CS"), "class User { }")?;

        let files = collect_source_files(root, &[], &[]);
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name())
            .filter_map(|f| f.to_str())
            .collect();

        assert_eq!(names, vec!["Program.cs", "User.CS"]);
        Ok(())
    }

    #[test]
    fn test_collect_source_files_user_exclude_and_include() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();

        fs::create_dir_all(root.join("Generated"))?;
        fs::write(root.join("Generated/Api.cs"), "class Api { }")?;
        fs::create_dir_all(root.join("packages"))?;
        fs::write(root.join("packages/Vendored.cs"), "class V { }")?;

        assert!(collect_source_files(root, &["Generated".to_owned()], &[]).is_empty());

        let files = collect_source_files(root, &[], &["packages".to_owned()]);
        assert_eq!(files.len(), 2);
        Ok(())
    }

    #[test]
    fn test_collect_single_file_root() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let file = temp.path().join("Only.cs");
        fs::write(&file, "using System;")?;

        assert_eq!(collect_source_files(&file, &[], &[]), vec![file]);
        Ok(())
    }

    #[test]
    fn test_find_project_dir() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("App/Services"))?;
        fs::write(root.join("App/App.csproj"), "<Project />")?;
        let file = root.join("App/Services/Worker.cs");
        fs::write(&file, "class Worker { }")?;

        assert_eq!(find_project_dir(&file, root), Some(root.join("App")));
        assert_eq!(find_project_dir(&root.join("Loose.cs"), root), None);
        Ok(())
    }
}
