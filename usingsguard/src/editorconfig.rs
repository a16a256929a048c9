//! `.editorconfig` lookup for per-file analyzer options.
//!
//! Files are collected from the source file's directory upward until one
//! declares `root = true`. Farther files apply first, so nearer files and
//! later sections win.

use crate::config::ConfigOptions;
use crate::constants::EDITORCONFIG_FILENAME;
use regex::Regex;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One `[glob]` section.
#[derive(Debug, Clone)]
pub struct Section {
    /// Glob as written between the brackets.
    pub glob: String,
    matcher: Option<Regex>,
    /// Properties in file order, keys lower-cased.
    pub properties: Vec<(String, String)>,
}

impl Section {
    fn new(glob: &str) -> Self {
        let matcher = glob_to_regex(glob);
        if matcher.is_none() {
            log::debug!("unsupported .editorconfig section [{glob}]");
        }
        Self {
            glob: glob.to_owned(),
            matcher,
            properties: Vec::new(),
        }
    }

    /// Whether this section applies to `relative`, a `/`-separated path
    /// relative to the directory holding the `.editorconfig`.
    #[must_use]
    pub fn matches(&self, relative: &str) -> bool {
        self.matcher.as_ref().is_some_and(|re| re.is_match(relative))
    }
}

/// A parsed `.editorconfig` file.
#[derive(Debug, Clone, Default)]
pub struct EditorConfigFile {
    /// `root = true` in the preamble.
    pub is_root: bool,
    /// Sections in file order.
    pub sections: Vec<Section>,
}

impl EditorConfigFile {
    /// Parses INI-style `.editorconfig` content. Unknown lines are skipped.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut file = Self::default();
        let mut current: Option<Section> = None;

        for raw in content.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(glob) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                if let Some(done) = current.replace(Section::new(glob)) {
                    file.sections.push(done);
                }
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim().to_owned();

            match current.as_mut() {
                Some(section) => section.properties.push((key, value)),
                None if key == "root" => file.is_root = value.eq_ignore_ascii_case("true"),
                None => {}
            }
        }

        if let Some(done) = current {
            file.sections.push(done);
        }
        file
    }

    /// Applies every matching section to `options`.
    fn apply(&self, relative: &str, options: &mut ConfigOptions) {
        for section in self.sections.iter().filter(|s| s.matches(relative)) {
            for (key, value) in &section.properties {
                options.insert(key.clone(), value.clone());
            }
        }
    }
}

/// Translates an editorconfig glob into an anchored regex.
///
/// Globs without `/` match the file name at any depth.
fn glob_to_regex(glob: &str) -> Option<Regex> {
    let (glob, anchored) = match glob.strip_prefix('/') {
        Some(rest) => (rest, true),
        None => (glob, glob.contains('/')),
    };

    let mut pattern = String::from(if anchored { "^" } else { "^(?:.*/)?" });
    let mut chars = glob.chars().peekable();
    let mut in_braces = false;

    while let Some(ch) = chars.next() {
        match ch {
            '*' if chars.peek() == Some(&'*') => {
                chars.next();
                pattern.push_str(".*");
            }
            '*' => pattern.push_str("[^/]*"),
            '?' => pattern.push_str("[^/]"),
            '{' if !in_braces => {
                in_braces = true;
                pattern.push_str("(?:");
            }
            '}' if in_braces => {
                in_braces = false;
                pattern.push(')');
            }
            ',' if in_braces => pattern.push('|'),
            '[' => {
                pattern.push('[');
                if chars.peek() == Some(&'!') {
                    chars.next();
                    pattern.push('^');
                }
                for class_ch in chars.by_ref() {
                    if class_ch == ']' {
                        break;
                    }
                    if class_ch == '\\' || class_ch == '[' {
                        pattern.push('\\');
                    }
                    pattern.push(class_ch);
                }
                pattern.push(']');
            }
            '\\' => {
                if let Some(escaped) = chars.next() {
                    pattern.push_str(&regex::escape(&escaped.to_string()));
                }
            }
            other => pattern.push_str(&regex::escape(&other.to_string())),
        }
    }
    if in_braces {
        return None;
    }
    pattern.push('$');

    Regex::new(&pattern).ok()
}

/// Caches parsed `.editorconfig` files by directory.
#[derive(Debug, Default)]
pub struct EditorConfigCache {
    files: FxHashMap<PathBuf, Option<Arc<EditorConfigFile>>>,
}

impl EditorConfigCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn load(&mut self, dir: &Path) -> Option<Arc<EditorConfigFile>> {
        self.files
            .entry(dir.to_path_buf())
            .or_insert_with(|| {
                let candidate = dir.join(EDITORCONFIG_FILENAME);
                match fs::read_to_string(&candidate) {
                    Ok(content) => Some(Arc::new(EditorConfigFile::parse(&content))),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                    Err(e) => {
                        log::debug!("cannot read {}: {e}", candidate.display());
                        None
                    }
                }
            })
            .clone()
    }

    /// Merges the options of every `.editorconfig` governing `file` into `options`.
    pub fn apply_to(&mut self, file: &Path, options: &mut ConfigOptions) {
        let mut chain = Vec::new();
        let mut dir = file.parent();

        while let Some(current) = dir {
            if let Some(config) = self.load(current) {
                let is_root = config.is_root;
                chain.push((current.to_path_buf(), config));
                if is_root {
                    break;
                }
            }
            dir = current.parent();
        }

        for (dir, config) in chain.iter().rev() {
            let Ok(relative) = file.strip_prefix(dir) else {
                continue;
            };
            let relative = relative.to_string_lossy().replace('\\', "/");
            config.apply(&relative, options);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options_for(cache: &mut EditorConfigCache, file: &Path) -> ConfigOptions {
        let mut options = ConfigOptions::default();
        cache.apply_to(file, &mut options);
        options
    }

    #[test]
    fn test_parse_sections_and_root() {
        let file = EditorConfigFile::parse(
            "root = true\n\n[*.cs]\ndotnet_usings_file_name = CustomUsings.cs\n# comment\n[*]\nindent_style = space\n",
        );
        assert!(file.is_root);
        assert_eq!(file.sections.len(), 2);
        assert_eq!(file.sections[0].glob, "*.cs");
        assert_eq!(
            file.sections[0].properties,
            vec![(
                "dotnet_usings_file_name".to_owned(),
                "CustomUsings.cs".to_owned()
            )]
        );
    }

    #[test]
    fn test_glob_matching() {
        let section = |glob: &str| Section::new(glob);
        assert!(section("*").matches("src/Program.cs"));
        assert!(section("*.cs").matches("src/App/Program.cs"));
        assert!(!section("*.cs").matches("Program.csx"));
        assert!(section("*.{cs,vb}").matches("Module.vb"));
        assert!(section("Program.cs").matches("deep/Program.cs"));
        assert!(section("src/*.cs").matches("src/A.cs"));
        assert!(!section("src/*.cs").matches("src/nested/A.cs"));
        assert!(section("src/**.cs").matches("src/nested/A.cs"));
        assert!(section("/Tests/**").matches("Tests/Unit/A.cs"));
        assert!(!section("/Tests/**").matches("src/Tests/A.cs"));
        assert!(section("File?.cs").matches("File1.cs"));
    }

    #[test]
    fn test_nearer_file_overrides_and_root_stops() {
        let dir = TempDir::new().unwrap();
        let outer = dir.path().join("outer");
        let project = outer.join("project");
        let src = project.join("src");
        fs::create_dir_all(&src).unwrap();

        fs::write(
            outer.join(".editorconfig"),
            "[*.cs]\nusings_file_name = Outer.cs\n",
        )
        .unwrap();
        fs::write(
            project.join(".editorconfig"),
            "root = true\n[*.cs]\ndotnet_usings_file_name = Project.cs\nusings_file_name = Legacy.cs\n",
        )
        .unwrap();
        fs::write(
            src.join(".editorconfig"),
            "[*.cs]\ndotnet_usings_file_name = Src.cs\n",
        )
        .unwrap();

        let mut cache = EditorConfigCache::new();
        let options = options_for(&mut cache, &src.join("Program.cs"));
        assert_eq!(options.get("dotnet_usings_file_name"), Some("Src.cs"));
        // `root = true` in project/ hides outer/.
        assert_eq!(options.get("usings_file_name"), Some("Legacy.cs"));

        let options = options_for(&mut cache, &project.join("Other.cs"));
        assert_eq!(options.get("dotnet_usings_file_name"), Some("Project.cs"));
    }

    #[test]
    fn test_later_section_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".editorconfig"),
            "root = true\n[*]\nusings_file_name = All.cs\n[*.cs]\nusings_file_name = Cs.cs\n",
        )
        .unwrap();
        let mut cache = EditorConfigCache::new();
        let options = options_for(&mut cache, &dir.path().join("A.cs"));
        assert_eq!(options.get("usings_file_name"), Some("Cs.cs"));
    }
}
