use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Designated file name used when no configuration key resolves.
pub const DEFAULT_USINGS_FILE_NAME: &str = "Usings.cs";

/// Primary `.editorconfig` key naming the designated file.
pub const PRIMARY_CONFIG_KEY: &str = "dotnet_usings_file_name";

/// Legacy `.editorconfig` key, consulted when the primary key is absent or blank.
pub const LEGACY_CONFIG_KEY: &str = "usings_file_name";

/// Project configuration file name.
pub const CONFIG_FILENAME: &str = ".usingsguard.toml";

/// Per-directory analyzer options file name.
pub const EDITORCONFIG_FILENAME: &str = ".editorconfig";

/// Extension of the source files this tool inspects.
pub const SOURCE_EXTENSION: &str = "cs";

/// Extension of project files used to place a newly created designated file.
pub const PROJECT_EXTENSION: &str = "csproj";

/// Set of folders to exclude by default.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert("bin");
        s.insert("obj");
        s.insert(".git");
        s.insert(".vs");
        s.insert(".idea");
        s.insert("node_modules");
        s.insert("packages");
        s.insert("TestResults");
        s
    })
}

pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
