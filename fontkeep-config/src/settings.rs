//! Font manager settings, persisted as YAML.
//!
//! Default location: `<config dir>/fontkeep/config.yaml` (XDG on Linux).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::resources::ResourceConfig;
use crate::types::PathOverrideEntry;

/// Settings consumed by `FontManager::new` and `FontManager::with_resources`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerSettings {
    /// Directory searched for fonts without a path override
    #[serde(default = "crate::defaults::base_path")]
    pub base_path: PathBuf,

    /// Extension appended to font names when synthesizing a path
    #[serde(default = "crate::defaults::default_extension")]
    pub default_extension: String,

    /// Number of released fonts kept alive for revival (0 disables the cache)
    #[serde(default = "crate::defaults::reuse_capacity")]
    pub reuse_capacity: usize,

    /// Font names starting with this prefix are served by the emoji provider
    #[serde(default = "crate::defaults::emoji_prefix")]
    pub emoji_prefix: String,

    /// Optional JSON file with font families and emoji sets
    #[serde(default = "crate::defaults::resource_file")]
    pub resource_file: Option<PathBuf>,

    /// Per-name font file overrides, first match wins
    #[serde(default)]
    pub path_overrides: Vec<PathOverrideEntry>,
}

impl Default for ManagerSettings {
    fn default() -> Self {
        Self {
            base_path: crate::defaults::base_path(),
            default_extension: crate::defaults::default_extension(),
            reuse_capacity: crate::defaults::reuse_capacity(),
            emoji_prefix: crate::defaults::emoji_prefix(),
            resource_file: crate::defaults::resource_file(),
            path_overrides: Vec::new(),
        }
    }
}

impl ManagerSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = path.into();
        self
    }

    pub fn with_default_extension(mut self, ext: &str) -> Self {
        self.default_extension = ext.trim_start_matches('.').to_string();
        self
    }

    pub fn with_reuse_capacity(mut self, capacity: usize) -> Self {
        self.reuse_capacity = capacity;
        self
    }

    pub fn with_emoji_prefix(mut self, prefix: &str) -> Self {
        self.emoji_prefix = prefix.to_string();
        self
    }

    pub fn with_resource_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.resource_file = Some(path.into());
        self
    }

    /// Directory holding the settings file.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fontkeep")
    }

    /// Default settings file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Parse settings from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_yaml_ng::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`, or defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Settings path: {:?}", path);
        if !path.exists() {
            log::info!("Settings file not found, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_yaml_str(&contents)
    }

    /// Save settings to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(|e| ConfigError::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| ConfigError::io(path, e))?;
        Ok(())
    }

    /// Load the resource file named by `resource_file`, if any.
    ///
    /// A missing or broken file yields empty resources.
    pub fn load_resources(&self) -> ResourceConfig {
        match &self.resource_file {
            Some(path) => ResourceConfig::load_or_absent(path),
            None => ResourceConfig::default(),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.default_extension.is_empty() {
            return Err(ConfigError::Validation(
                "default_extension must not be empty".to_string(),
            ));
        }
        if let Some(entry) = self.path_overrides.iter().find(|o| o.name.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "path override for {:?} has an empty name",
                entry.path
            )));
        }
        Ok(())
    }
}
