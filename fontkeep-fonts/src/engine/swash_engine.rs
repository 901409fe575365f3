//! Default font engine backed by swash.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use swash::{CacheKey, FontRef};

use super::{FontEngine, FontFace};
use crate::error::EngineError;
use crate::types::{FontMetrics, FontStyle};

/// A parsed font face at a fixed pixel size.
///
/// Owns the font bytes; `font_ref()` borrows a swash view into them.
#[derive(Clone)]
pub struct SwashFace {
    /// Raw font data bytes (TTF/OTF/TTC)
    data: Arc<Vec<u8>>,
    /// Offset of the selected face's table directory
    offset: u32,
    /// Swash cache key, stable for the lifetime of the data
    key: CacheKey,
    size: u32,
    style: FontStyle,
    metrics: FontMetrics,
}

impl std::fmt::Debug for SwashFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwashFace")
            .field("data_len", &self.data.len())
            .field("size", &self.size)
            .field("style", &self.style)
            .finish()
    }
}

impl SwashFace {
    /// Parse face `face_index` out of `data` and compute metrics at `size`.
    ///
    /// Returns `None` if the bytes are not a usable font.
    pub fn from_bytes(
        data: Vec<u8>,
        face_index: usize,
        size: u32,
        style: FontStyle,
    ) -> Option<Self> {
        let data = Arc::new(data);
        let font_ref = FontRef::from_index(data.as_slice(), face_index)?;
        let metrics = scaled_metrics(&font_ref, size)?;
        let (offset, key) = (font_ref.offset, font_ref.key);

        Some(Self {
            data,
            offset,
            key,
            size,
            style,
            metrics,
        })
    }

    /// Swash view of this face for glyph operations.
    pub fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: self.data.as_slice(),
            offset: self.offset,
            key: self.key,
        }
    }
}

impl FontFace for SwashFace {
    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn has_glyph(&self, ch: char) -> bool {
        self.font_ref().charmap().map(ch) != 0
    }
}

fn scaled_metrics(font_ref: &FontRef<'_>, size: u32) -> Option<FontMetrics> {
    let metrics = font_ref.metrics(&[]);
    if metrics.units_per_em == 0 {
        return None;
    }
    let scale = size as f32 / metrics.units_per_em as f32;

    let ascent = metrics.ascent * scale;
    let descent = metrics.descent * scale;
    let leading = metrics.leading * scale;

    Some(FontMetrics {
        line_height: (ascent + descent + leading).max(1.0),
        base_line: descent,
        ascent,
        descent,
    })
}

/// Loads faces from disk with swash.
///
/// Bold and italic are recorded on the face; synthesizing them is left to
/// the rasterizer.
#[derive(Debug, Default)]
pub struct SwashEngine {
    loaded: usize,
    destroyed: usize,
}

impl SwashEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of faces currently alive.
    pub fn live_faces(&self) -> usize {
        self.loaded.saturating_sub(self.destroyed)
    }
}

impl FontEngine for SwashEngine {
    type Face = SwashFace;

    fn load(
        &mut self,
        path: &Path,
        size: u32,
        style: FontStyle,
    ) -> Result<Self::Face, EngineError> {
        if size == 0 {
            return Err(EngineError::InvalidSize(size));
        }

        let data = fs::read(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Read {} bytes from {:?}", data.len(), path);

        let face = SwashFace::from_bytes(data, 0, size, style).ok_or_else(|| {
            EngineError::InvalidFont {
                path: path.to_path_buf(),
            }
        })?;

        self.loaded += 1;
        Ok(face)
    }

    fn destroy(&mut self, face: Self::Face) {
        log::trace!("Destroying swash face ({:?})", face);
        self.destroyed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut engine = SwashEngine::new();
        let result = engine.load(&dir.path().join("nope.ttf"), 16, FontStyle::Normal);
        assert!(matches!(result, Err(EngineError::Io { .. })));
        assert_eq!(engine.live_faces(), 0);
    }

    #[test]
    fn test_garbage_is_invalid_font() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 100]).unwrap();

        let mut engine = SwashEngine::new();
        let result = engine.load(file.path(), 16, FontStyle::Normal);
        assert!(matches!(result, Err(EngineError::InvalidFont { .. })));
    }

    #[test]
    fn test_zero_size_rejected_before_io() {
        let mut engine = SwashEngine::new();
        let result = engine.load(Path::new("/does/not/matter.ttf"), 0, FontStyle::Normal);
        assert!(matches!(result, Err(EngineError::InvalidSize(0))));
    }

    #[test]
    fn test_face_from_empty_bytes() {
        assert!(SwashFace::from_bytes(Vec::new(), 0, 12, FontStyle::Normal).is_none());
    }
}
