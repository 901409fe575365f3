//! Caller-facing types returned by `FontManager`.

use std::fmt;

use crate::types::{FontHandle, FontKey, FontMetrics};

/// What backs a font handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    /// A shared, reference-counted engine face
    Outline,
    /// An unshared emoji image font
    Emoji,
}

/// Caller-visible view of a font.
///
/// `fallback` links fonts into a chain that glyph lookup walks in order.
#[derive(Debug, Clone, PartialEq)]
pub struct FontView {
    pub handle: FontHandle,
    pub key: FontKey,
    pub metrics: FontMetrics,
    pub kind: FontKind,
    pub fallback: Option<FontHandle>,
}

/// Where a glyph for a character comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphSource {
    /// Rasterize from this engine font
    Outline(FontHandle),
    /// Draw this image file
    Image { font: FontHandle, path: String },
}

impl GlyphSource {
    pub fn font(&self) -> FontHandle {
        match self {
            GlyphSource::Outline(font) => *font,
            GlyphSource::Image { font, .. } => *font,
        }
    }
}

/// Everything still in use when shutdown was attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeakReport {
    /// Caller records never destroyed
    pub records: Vec<(FontHandle, FontKey)>,
    /// Live reference entries and their counts
    pub entries: Vec<(FontKey, usize)>,
}

impl LeakReport {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.entries.is_empty()
    }
}

impl fmt::Display for LeakReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} font handle(s) and {} font object(s) still in use",
            self.records.len(),
            self.entries.len()
        )?;
        for (handle, key) in &self.records {
            write!(f, "\n  leaked handle {handle} -> {key}")?;
        }
        for (key, refs) in &self.entries {
            write!(f, "\n  live font {key} (refs={refs})")?;
        }
        Ok(())
    }
}

/// Store occupancy snapshot, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManagerStats {
    pub records: usize,
    pub live_entries: usize,
    pub cached_entries: usize,
    pub cache_capacity: usize,
    pub emoji_fonts: usize,
}
