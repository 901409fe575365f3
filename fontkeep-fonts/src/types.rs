//! Core value types shared by every store.

use std::fmt;
use std::str::FromStr;

/// Font style requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Bold,
    BoldItalic,
}

impl FontStyle {
    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::BoldItalic)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Bold => "bold",
            FontStyle::BoldItalic => "bold-italic",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" | "regular" => Ok(FontStyle::Normal),
            "italic" => Ok(FontStyle::Italic),
            "bold" => Ok(FontStyle::Bold),
            "bold-italic" | "bold_italic" | "bolditalic" => Ok(FontStyle::BoldItalic),
            other => Err(format!("unknown font style '{other}'")),
        }
    }
}

/// Identity of a distinct font-engine object.
///
/// Names compare case-sensitively; two keys are equal only when name, size
/// and style all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontKey {
    pub name: String,
    /// Pixel size
    pub size: u32,
    pub style: FontStyle,
}

impl FontKey {
    pub fn new(name: impl Into<String>, size: u32, style: FontStyle) -> Self {
        Self {
            name: name.into(),
            size,
            style,
        }
    }

    /// Same size and style, different font name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: self.size,
            style: self.style,
        }
    }
}

impl fmt::Display for FontKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}px/{}", self.name, self.size, self.style)
    }
}

/// Read-only metrics exposed by every font, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FontMetrics {
    /// Distance between two consecutive baselines
    pub line_height: f32,
    /// Distance from the bottom of the line box to the baseline
    pub base_line: f32,
    pub ascent: f32,
    pub descent: f32,
}

/// Opaque identity of a font handed to a caller.
///
/// Handles are never reused by a manager, so a stale handle can never alias
/// a newer font. Each handle also carries the id of the manager that issued
/// it; serials restart at 1 in every manager, so two managers can hand out
/// the same serial without their handles comparing equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontHandle {
    pub(crate) manager: u32,
    pub(crate) serial: u64,
}

impl FontHandle {
    pub(crate) fn new(manager: u32, serial: u64) -> Self {
        Self { manager, serial }
    }

    /// Per-manager serial number.
    pub fn id(self) -> u64 {
        self.serial
    }

    /// Id of the manager that issued this handle.
    pub fn manager_id(self) -> u32 {
        self.manager
    }
}

impl fmt::Display for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font#{}", self.serial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_equality_is_exact() {
        let a = FontKey::new("Sans", 16, FontStyle::Normal);
        assert_eq!(a, FontKey::new("Sans", 16, FontStyle::Normal));
        assert_ne!(a, FontKey::new("sans", 16, FontStyle::Normal));
        assert_ne!(a, FontKey::new("Sans", 17, FontStyle::Normal));
        assert_ne!(a, FontKey::new("Sans", 16, FontStyle::Bold));
    }

    #[test]
    fn test_with_name_keeps_size_and_style() {
        let base = FontKey::new("Sans", 20, FontStyle::Italic);
        let fallback = base.with_name("Symbols");
        assert_eq!(fallback.name, "Symbols");
        assert_eq!(fallback.size, 20);
        assert_eq!(fallback.style, FontStyle::Italic);
    }

    #[test]
    fn test_style_parse() {
        assert_eq!("Bold".parse::<FontStyle>(), Ok(FontStyle::Bold));
        assert_eq!("bold-italic".parse::<FontStyle>(), Ok(FontStyle::BoldItalic));
        assert_eq!("regular".parse::<FontStyle>(), Ok(FontStyle::Normal));
        assert!("heavy".parse::<FontStyle>().is_err());
        assert!(FontStyle::BoldItalic.is_bold());
        assert!(FontStyle::BoldItalic.is_italic());
        assert!(!FontStyle::Italic.is_bold());
    }
}
