//! Reference-counted font resource manager.
//!
//! This crate provides:
//! - One shared font-engine face per `(name, size, style)` key, with a
//!   reference count per face and one lightweight record per caller handle
//! - A bounded reuse window that keeps recently released faces alive
//! - Fallback chains built from a configured family table
//! - Emoji "fonts" that map code points to image files instead of rasterizing
//! - Per-name path overrides on top of a base font directory
//!
//! # Architecture
//!
//! `FontManager` owns every store and the engine:
//! 1. `PathRegistry` resolves a font name to a file
//! 2. `ReferenceStore` owns live faces and their counts, and the `ReuseCache`
//!    of released ones
//! 3. `RecordStore` maps caller handles to the face they reference
//! 4. `EmojiProvider` serves names carrying the emoji prefix
//!
//! The engine is pluggable through `FontEngine`; `SwashEngine` is the
//! default.

pub mod emoji;
pub mod engine;
pub mod error;
pub mod font_manager;
pub mod path_registry;
pub mod record_store;
pub mod reference_store;
pub mod reuse_cache;
pub mod types;

// Re-export main types for convenience
pub use emoji::{EmojiFont, EmojiProvider};
pub use engine::{FontEngine, FontFace, SwashEngine, SwashFace};
pub use error::{EngineError, FontError};
pub use font_manager::{FontKind, FontManager, FontView, GlyphSource, LeakReport, ManagerStats};
pub use path_registry::{OverrideId, PathOverride, PathRegistry};
pub use types::{FontHandle, FontKey, FontMetrics, FontStyle};
