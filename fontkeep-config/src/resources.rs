//! Font family and emoji resource file.
//!
//! The resource file is a JSON document with two optional top-level arrays:
//!
//! ```json
//! {
//!   "font-family": [
//!     { "font-name": "Sans", "fallback": ["Sans CJK", "Symbols"] }
//!   ],
//!   "emoji-list": [
//!     {
//!       "font-name": "emoji_noto", "path": "/emoji/", "ext": "png",
//!       "match-size": { "min": 16, "max": 48 },
//!       "unicode-range": { "begin": 128512, "end": 128591 }
//!     }
//!   ]
//! }
//! ```
//!
//! Each section is parsed on its own. A section that is missing, malformed or
//! fails validation is treated as absent and the matching feature is disabled;
//! the other section is unaffected.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{EmojiEntry, FontFamilyEntry};

/// Top-level key of the font family table.
pub const FAMILY_KEY: &str = "font-family";
/// Top-level key of the emoji table.
pub const EMOJI_KEY: &str = "emoji-list";

/// Parsed resource file. Empty sections mean the feature is disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceConfig {
    #[serde(rename = "font-family", default)]
    pub families: Vec<FontFamilyEntry>,
    #[serde(rename = "emoji-list", default)]
    pub emoji: Vec<EmojiEntry>,
}

impl ResourceConfig {
    /// Parse a resource document.
    ///
    /// Only a document that is not JSON at all (or not an object) is an
    /// error; bad sections degrade to empty.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let root: serde_json::Value = serde_json::from_str(json)?;
        let Some(root) = root.as_object() else {
            return Err(ConfigError::Validation(
                "resource file must be a JSON object".to_string(),
            ));
        };

        let families = parse_section::<FontFamilyEntry>(root, FAMILY_KEY, validate_family);
        let emoji = parse_section::<EmojiEntry>(root, EMOJI_KEY, validate_emoji);

        Ok(Self { families, emoji })
    }

    /// Read and parse a resource file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_json_str(&contents)
    }

    /// Read a resource file, treating any failure as "no resources".
    pub fn load_or_absent(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!(
                    "Loaded resource file {:?}: {} families, {} emoji sets",
                    path,
                    config.families.len(),
                    config.emoji.len()
                );
                config
            }
            Err(e) => {
                log::warn!(
                    "Resource file {:?} unavailable, family and emoji support disabled: {}",
                    path,
                    e
                );
                Self::default()
            }
        }
    }

    /// Look up the family whose base font is `name` (exact match).
    pub fn family(&self, name: &str) -> Option<&FontFamilyEntry> {
        self.families.iter().find(|f| f.font_name == name)
    }

    pub fn has_families(&self) -> bool {
        !self.families.is_empty()
    }

    pub fn has_emoji(&self) -> bool {
        !self.emoji.is_empty()
    }
}

fn parse_section<T: DeserializeOwned>(
    root: &serde_json::Map<String, serde_json::Value>,
    key: &str,
    validate: fn(&T) -> Result<(), String>,
) -> Vec<T> {
    let Some(value) = root.get(key) else {
        log::debug!("Resource section '{}' not present", key);
        return Vec::new();
    };

    let entries: Vec<T> = match serde_json::from_value(value.clone()) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Resource section '{}' is malformed, ignoring it: {}", key, e);
            return Vec::new();
        }
    };

    for (idx, entry) in entries.iter().enumerate() {
        if let Err(reason) = validate(entry) {
            log::warn!(
                "Resource section '{}' entry {} is invalid ({}), ignoring the section",
                key,
                idx,
                reason
            );
            return Vec::new();
        }
    }

    entries
}

fn validate_family(entry: &FontFamilyEntry) -> Result<(), String> {
    if entry.font_name.is_empty() {
        return Err("empty font-name".to_string());
    }
    if entry.fallback.iter().any(String::is_empty) {
        return Err(format!("empty fallback name in '{}'", entry.font_name));
    }
    Ok(())
}

fn validate_emoji(entry: &EmojiEntry) -> Result<(), String> {
    if entry.font_name.is_empty() {
        return Err("empty font-name".to_string());
    }
    if entry.match_size.min > entry.match_size.max {
        return Err(format!(
            "match-size min {} exceeds max {}",
            entry.match_size.min, entry.match_size.max
        ));
    }
    if entry.unicode_range.begin > entry.unicode_range.end {
        return Err(format!(
            "unicode-range begin {:#X} exceeds end {:#X}",
            entry.unicode_range.begin, entry.unicode_range.end
        ));
    }
    Ok(())
}
