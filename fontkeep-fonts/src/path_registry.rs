//! Logical font name to file path resolution.
//!
//! Overrides are kept in insertion order and the first one whose name
//! matches wins. Names without an override resolve to
//! `{base_path}/{name}.{default_extension}`. Nothing here touches the
//! filesystem except `exists`, which is only a metadata probe.

use std::path::{Path, PathBuf};

use crate::error::FontError;

/// Identity of a registered path override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverrideId(u64);

/// A single `name -> path` mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOverride {
    pub id: OverrideId,
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct PathRegistry {
    base_path: PathBuf,
    default_extension: String,
    overrides: Vec<PathOverride>,
    next_id: u64,
}

impl PathRegistry {
    pub fn new(base_path: impl Into<PathBuf>, default_extension: &str) -> Self {
        Self {
            base_path: base_path.into(),
            default_extension: default_extension.trim_start_matches('.').to_string(),
            overrides: Vec::new(),
            next_id: 1,
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub fn set_base_path(&mut self, path: impl Into<PathBuf>) {
        self.base_path = path.into();
        log::info!("Font base path set to {:?}", self.base_path);
    }

    pub fn default_extension(&self) -> &str {
        &self.default_extension
    }

    pub fn set_default_extension(&mut self, ext: &str) {
        self.default_extension = ext.trim_start_matches('.').to_string();
    }

    /// Resolve `name` to the file the engine should load.
    pub fn resolve(&self, name: &str) -> PathBuf {
        match self.overrides.iter().find(|o| o.name == name) {
            Some(entry) => entry.path.clone(),
            None => self
                .base_path
                .join(format!("{}.{}", name, self.default_extension)),
        }
    }

    /// Whether the resolved file for `name` currently exists.
    pub fn exists(&self, name: &str) -> bool {
        std::fs::metadata(self.resolve(name)).is_ok()
    }

    /// Register an override. An identical `{name, path}` pair is rejected.
    ///
    /// The same name may be registered with different paths; the earliest
    /// registration keeps winning until it is removed.
    pub fn add_override(
        &mut self,
        name: &str,
        path: impl Into<PathBuf>,
    ) -> Result<OverrideId, FontError> {
        let path = path.into();
        if self
            .overrides
            .iter()
            .any(|o| o.name == name && o.path == path)
        {
            log::warn!("Path override '{}' -> {:?} already registered", name, path);
            return Err(FontError::DuplicateOverride {
                name: name.to_string(),
                path,
            });
        }

        let id = OverrideId(self.next_id);
        self.next_id += 1;
        log::debug!("Path override {:?}: '{}' -> {:?}", id, name, path);
        self.overrides.push(PathOverride {
            id,
            name: name.to_string(),
            path,
        });
        Ok(id)
    }

    pub fn remove_override(&mut self, id: OverrideId) -> Result<PathOverride, FontError> {
        let Some(pos) = self.overrides.iter().position(|o| o.id == id) else {
            log::warn!("Path override {:?} is not registered", id);
            return Err(FontError::UnknownOverride(id));
        };
        Ok(self.overrides.remove(pos))
    }

    pub fn overrides(&self) -> &[PathOverride] {
        &self.overrides
    }
}
