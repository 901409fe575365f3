//! Configuration entry types shared by the settings and resource files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Resource file entries (JSON)
// ============================================================================

/// A font family: a base font name and its ordered fallback names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFamilyEntry {
    /// Name of the base font this family applies to
    #[serde(rename = "font-name")]
    pub font_name: String,
    /// Fallback font names, consulted in declared order
    pub fallback: Vec<String>,
}

/// Inclusive pixel-height range an emoji set can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: u32,
    pub max: u32,
}

impl SizeRange {
    pub fn contains(&self, height: u32) -> bool {
        (self.min..=self.max).contains(&height)
    }
}

/// Inclusive range of Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodepointRange {
    pub begin: u32,
    pub end: u32,
}

impl CodepointRange {
    pub fn contains(&self, unicode: u32) -> bool {
        (self.begin..=self.end).contains(&unicode)
    }
}

/// An emoji image set: glyphs are image files named by decimal code point.
///
/// The image for code point `U` is `{path}{U}.{ext}`, valid only when `U`
/// lies in `unicode_range`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiEntry {
    /// Font name that selects this set (exact match)
    #[serde(rename = "font-name")]
    pub font_name: String,
    /// Prefix prepended to the decimal code point
    pub path: String,
    /// Image file extension, without the dot
    pub ext: String,
    /// Heights this set may be used for
    #[serde(rename = "match-size")]
    pub match_size: SizeRange,
    /// Code points this set provides images for
    #[serde(rename = "unicode-range")]
    pub unicode_range: CodepointRange,
}

// ============================================================================
// Settings file entries (YAML)
// ============================================================================

/// Maps a logical font name to a concrete font file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathOverrideEntry {
    pub name: String,
    pub path: PathBuf,
}
