//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `ManagerSettings` fields and by its `Default` impl.

use std::path::PathBuf;

pub fn base_path() -> PathBuf {
    PathBuf::from("fonts")
}

pub fn default_extension() -> String {
    "ttf".to_string()
}

/// Number of released faces kept alive for quick revival.
pub fn reuse_capacity() -> usize {
    8
}

pub fn emoji_prefix() -> String {
    "emoji".to_string()
}

pub fn resource_file() -> Option<PathBuf> {
    None
}
