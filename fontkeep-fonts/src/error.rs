//! Typed error types for fontkeep-fonts.
//!
//! Every error is local to the call that produced it: no store is left in a
//! partially updated state, and the manager stays usable afterwards.

use std::path::PathBuf;

use thiserror::Error;

use crate::font_manager::LeakReport;
use crate::path_registry::OverrideId;
use crate::types::{FontHandle, FontKey};

/// Failure reported by a font engine while constructing a face.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The font file could not be read.
    #[error("Font file read failed for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not a usable font.
    #[error("Invalid font data in '{path}'")]
    InvalidFont { path: PathBuf },

    /// The engine cannot produce a face at this pixel size.
    #[error("Unsupported font size: {0}px")]
    InvalidSize(u32),
}

/// Top-level error type of the font manager.
#[derive(Debug, Error)]
pub enum FontError {
    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------
    /// The font engine failed to construct a face.
    #[error("Failed to load font {key} from '{path}': {source}")]
    Load {
        key: FontKey,
        path: PathBuf,
        #[source]
        source: EngineError,
    },

    /// An emoji font name was requested but no configured set matches it.
    #[error("No emoji set named '{name}' covers height {height}px")]
    NoEmojiMatch { name: String, height: u32 },

    // -----------------------------------------------------------------------
    // Ownership
    // -----------------------------------------------------------------------
    /// The handle was not created by this manager, or was already destroyed.
    #[error("Font handle {0} is not owned by this manager")]
    NotOwned(FontHandle),

    // -----------------------------------------------------------------------
    // Path registry
    // -----------------------------------------------------------------------
    /// The exact `{name, path}` override is already registered.
    #[error("Path override '{name}' -> '{path}' already registered")]
    DuplicateOverride { name: String, path: PathBuf },

    /// The override id is not currently registered.
    #[error("Path override {0:?} is not registered")]
    UnknownOverride(OverrideId),

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------
    /// Shutdown was attempted while fonts are still in use.
    #[error("Shutdown refused: {0}")]
    Leaked(LeakReport),
}

impl FontError {
    /// Whether this error means a font could not be produced.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, FontError::Load { .. } | FontError::NoEmojiMatch { .. })
    }
}
