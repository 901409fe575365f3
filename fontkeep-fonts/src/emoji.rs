//! Image-glyph emoji fonts.
//!
//! An emoji font never rasterizes: glyph lookup maps a code point to an
//! image path `{path}{decimal code point}.{ext}`. Fonts are selected by name
//! (names starting with the configured prefix) and pixel height. They are not
//! shared or reference counted; every `create` yields an independent font.

use fontkeep_config::EmojiEntry;

use crate::engine::FontFace;
use crate::types::FontMetrics;

/// Longest decimal rendering of a `u32`.
const MAX_DECIMAL_DIGITS: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct EmojiProvider {
    prefix: String,
    ranges: Vec<EmojiEntry>,
}

impl EmojiProvider {
    pub fn new(prefix: &str, ranges: Vec<EmojiEntry>) -> Self {
        Self {
            prefix: prefix.to_string(),
            ranges,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.prefix.is_empty()
    }

    /// Whether `name` follows the emoji naming convention.
    pub fn matches_prefix(&self, name: &str) -> bool {
        self.is_enabled() && name.starts_with(&self.prefix)
    }

    /// First configured set named exactly `name` whose size range covers `height`.
    pub fn find(&self, name: &str, height: u32) -> Option<&EmojiEntry> {
        self.ranges
            .iter()
            .find(|r| r.font_name == name && r.match_size.contains(height))
    }

    pub fn create(&self, name: &str, height: u32) -> Option<EmojiFont> {
        let range = self.find(name, height)?.clone();
        log::debug!(
            "Emoji font '{}' at {}px uses {}*.{}",
            name,
            height,
            range.path,
            range.ext
        );
        Some(EmojiFont { range, height })
    }
}

/// An emoji "font" bound to one configured set and height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiFont {
    range: EmojiEntry,
    height: u32,
}

impl EmojiFont {
    pub fn name(&self) -> &str {
        &self.range.font_name
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn range(&self) -> &EmojiEntry {
        &self.range
    }

    pub fn covers(&self, unicode: u32) -> bool {
        self.range.unicode_range.contains(unicode)
    }

    /// Image path for `unicode`, or `None` outside the set's range.
    pub fn glyph_path(&self, unicode: u32) -> Option<String> {
        let mut path = String::new();
        self.write_glyph_path(unicode, &mut path).then_some(path)
    }

    /// Write the image path for `unicode` into a caller-owned buffer.
    ///
    /// The buffer is cleared first. Returns `false` (buffer left empty) when
    /// `unicode` is outside the set's range.
    pub fn write_glyph_path(&self, unicode: u32, buf: &mut String) -> bool {
        buf.clear();
        if !self.covers(unicode) {
            return false;
        }

        let mut digits = [0u8; MAX_DECIMAL_DIGITS];
        let decimal = decimal_digits(unicode, &mut digits);

        buf.reserve(self.range.path.len() + decimal.len() + 1 + self.range.ext.len());
        buf.push_str(&self.range.path);
        buf.push_str(decimal);
        buf.push('.');
        buf.push_str(&self.range.ext);
        true
    }
}

impl FontFace for EmojiFont {
    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            line_height: self.height as f32,
            base_line: 0.0,
            ascent: self.height as f32,
            descent: 0.0,
        }
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.covers(ch as u32)
    }
}

fn decimal_digits(mut value: u32, buf: &mut [u8; MAX_DECIMAL_DIGITS]) -> &str {
    let mut start = MAX_DECIMAL_DIGITS;
    loop {
        start -= 1;
        buf[start] = b'0' + (value % 10) as u8;
        value /= 10;
        if value == 0 {
            break;
        }
    }
    // Only ASCII digits were written
    std::str::from_utf8(&buf[start..]).unwrap_or_default()
}
