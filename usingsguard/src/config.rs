use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::{
    CONFIG_FILENAME, DEFAULT_USINGS_FILE_NAME, LEGACY_CONFIG_KEY, PRIMARY_CONFIG_KEY,
};
use crate::model::SourceUnit;
use rustc_hash::FxHashMap;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default)]
    /// The main configuration section for usingsguard.
    pub usingsguard: UsingsGuardConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<std::path::PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone)]
/// Configuration options for usingsguard.
pub struct UsingsGuardConfig {
    /// Project-wide designated file name. `.editorconfig` keys override it.
    pub usings_file_name: Option<String>,
    /// List of folders to exclude.
    pub exclude_folders: Option<Vec<String>>,
    /// List of folders to include.
    pub include_folders: Option<Vec<String>>,
}

impl Config {
    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                match fs::read_to_string(&candidate)
                    .map_err(anyhow::Error::from)
                    .and_then(|content| toml::from_str::<Config>(&content).map_err(Into::into))
                {
                    Ok(mut config) => {
                        config.config_file_path = Some(candidate);
                        return config;
                    }
                    Err(e) => log::debug!("ignoring {}: {e}", candidate.display()),
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }

    /// Options every unit starts from before `.editorconfig` is applied.
    #[must_use]
    pub fn base_options(&self) -> ConfigOptions {
        let mut options = ConfigOptions::default();
        if let Some(name) = &self.usingsguard.usings_file_name {
            options.insert(LEGACY_CONFIG_KEY, name);
        }
        options
    }
}

/// Flat string-keyed analyzer options for one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOptions {
    values: FxHashMap<String, String>,
}

impl ConfigOptions {
    /// Sets `key` to `value`, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Raw value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Overlays `other` on top of `self`.
    pub fn extend(&mut self, other: ConfigOptions) {
        self.values.extend(other.values);
    }

    /// Looks up `key`, treating blank values as absent.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Lookup<'_> {
        match self.get(key).map(str::trim) {
            Some(value) if !value.is_empty() => Lookup::Resolved(value),
            _ => Lookup::Absent,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigOptions {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Outcome of a single key lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Key present with a non-blank value (trimmed).
    Resolved(&'a str),
    /// Key missing or blank.
    Absent,
}

/// Which rung of the fallback chain produced the target name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ConfigSource {
    /// `dotnet_usings_file_name`
    PrimaryKey,
    /// `usings_file_name`
    LegacyKey,
    /// Neither key resolved.
    Default,
}

/// Resolved designated file name for one unit. Never blank.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TargetFileConfig {
    /// Designated file name, e.g. `Usings.cs`.
    pub file_name: String,
    /// Where the name came from.
    pub source: ConfigSource,
}

impl Default for TargetFileConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_USINGS_FILE_NAME.to_owned(),
            source: ConfigSource::Default,
        }
    }
}

/// Resolves the designated file name: primary key, then legacy key, then
/// `Usings.cs`.
#[must_use]
pub fn resolve_target_file(options: &ConfigOptions) -> TargetFileConfig {
    if let Lookup::Resolved(name) = options.lookup(PRIMARY_CONFIG_KEY) {
        return TargetFileConfig {
            file_name: name.to_owned(),
            source: ConfigSource::PrimaryKey,
        };
    }
    if let Lookup::Resolved(name) = options.lookup(LEGACY_CONFIG_KEY) {
        return TargetFileConfig {
            file_name: name.to_owned(),
            source: ConfigSource::LegacyKey,
        };
    }
    TargetFileConfig::default()
}

/// Supplies the designated-file configuration for a unit.
pub trait TargetFileResolver: Sync {
    /// Returns the resolved target for `unit`.
    fn resolve(&self, unit: &SourceUnit) -> TargetFileConfig;
}

impl TargetFileResolver for ConfigOptions {
    fn resolve(&self, _unit: &SourceUnit) -> TargetFileConfig {
        resolve_target_file(self)
    }
}
