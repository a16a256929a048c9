//! Utilities module for usingsguard.

mod paths;

pub use paths::{collect_source_files, find_project_dir, is_excluded, normalize_display_path};
