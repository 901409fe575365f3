//! Font engine seam.
//!
//! The manager never parses fonts itself. It asks a `FontEngine` to turn a
//! file path into a face and hands the face back when it is no longer
//! needed. `SwashEngine` is the default implementation; tests plug in
//! counting engines to observe loads and destructions.

mod swash_engine;

use std::path::Path;

use crate::error::EngineError;
use crate::types::{FontMetrics, FontStyle};

pub use swash_engine::{SwashEngine, SwashFace};

/// A constructed font-engine object.
pub trait FontFace {
    /// Pixel metrics copied into every caller view of this face.
    fn metrics(&self) -> FontMetrics;

    /// Whether the face maps `ch` to a real glyph.
    fn has_glyph(&self, ch: char) -> bool;
}

/// Constructs and destroys faces.
pub trait FontEngine {
    type Face: FontFace;

    /// Build a face from the font file at `path`.
    ///
    /// Blocks for the duration of the file read and parse.
    fn load(&mut self, path: &Path, size: u32, style: FontStyle)
    -> Result<Self::Face, EngineError>;

    /// Release a face. Called exactly once per successfully loaded face.
    fn destroy(&mut self, face: Self::Face) {
        drop(face);
    }
}
