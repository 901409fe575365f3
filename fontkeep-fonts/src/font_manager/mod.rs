//! Font manager: the caller-facing surface over the font stores.
//!
//! This module ties together:
//! - Shared, reference-counted engine faces (one per `FontKey`)
//! - A bounded reuse window for released faces
//! - One record per caller handle
//! - Emoji image fonts selected by name prefix
//! - Fallback chains built from the family table
//! - Per-name path overrides

mod fallbacks;
mod types;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

use fontkeep_config::{ManagerSettings, ResourceConfig};

use crate::emoji::{EmojiFont, EmojiProvider};
use crate::engine::{FontEngine, FontFace};
use crate::error::FontError;
use crate::path_registry::{OverrideId, PathRegistry};
use crate::record_store::RecordStore;
use crate::reference_store::{Acquired, ReferenceStore, Released};
use crate::types::{FontHandle, FontKey, FontStyle};

pub use types::{FontKind, FontView, GlyphSource, LeakReport, ManagerStats};

/// Source of manager ids stamped into handles.
static NEXT_MANAGER_ID: AtomicU32 = AtomicU32::new(1);

/// An emoji font and the view handed out for it.
struct EmojiSlot {
    font: EmojiFont,
    view: FontView,
}

/// Reference-counted allocator for font-engine faces.
///
/// Every `create` returns a fresh handle; handles for the same
/// `(name, size, style)` share one engine face. A face is only handed back
/// to the engine after its last handle is destroyed and it has aged out of
/// the reuse cache.
///
/// All mutation takes `&mut self`; the manager is not meant to be shared
/// between threads.
pub struct FontManager<E: FontEngine> {
    engine: E,
    paths: PathRegistry,
    references: ReferenceStore<E::Face>,
    records: RecordStore,
    emoji: EmojiProvider,
    emoji_fonts: HashMap<FontHandle, EmojiSlot>,
    resources: ResourceConfig,
}

impl<E: FontEngine> FontManager<E> {
    /// Create a manager, loading the resource file named in `settings`.
    pub fn new(engine: E, settings: &ManagerSettings) -> Self {
        let resources = settings.load_resources();
        Self::with_resources(engine, settings, resources)
    }

    /// Create a manager with an already parsed resource table.
    pub fn with_resources(
        engine: E,
        settings: &ManagerSettings,
        resources: ResourceConfig,
    ) -> Self {
        let mut paths = PathRegistry::new(&settings.base_path, &settings.default_extension);
        for entry in &settings.path_overrides {
            // Duplicates are logged by the registry and skipped
            let _ = paths.add_override(&entry.name, &entry.path);
        }

        let emoji = EmojiProvider::new(&settings.emoji_prefix, resources.emoji.clone());

        log::info!(
            "Font manager ready: base {:?}, reuse capacity {}, {} families, {} emoji sets",
            paths.base_path(),
            settings.reuse_capacity,
            resources.families.len(),
            resources.emoji.len()
        );

        Self {
            engine,
            paths,
            references: ReferenceStore::new(settings.reuse_capacity),
            records: RecordStore::new(NEXT_MANAGER_ID.fetch_add(1, Ordering::Relaxed)),
            emoji,
            emoji_fonts: HashMap::new(),
            resources,
        }
    }

    // ========================================================================
    // Create / destroy
    // ========================================================================

    /// Create a font handle for `(name, size, style)`.
    pub fn create(
        &mut self,
        name: &str,
        size: u32,
        style: FontStyle,
    ) -> Result<FontHandle, FontError> {
        self.create_key(&FontKey::new(name, size, style))
    }

    /// Create a font handle for `key`.
    ///
    /// Names carrying the emoji prefix are served by the emoji provider and
    /// never touch the engine. On failure no state is left behind.
    pub fn create_key(&mut self, key: &FontKey) -> Result<FontHandle, FontError> {
        if self.emoji.matches_prefix(&key.name) {
            return self.create_emoji(key);
        }

        let (entry, how) = self
            .references
            .request(key, &self.paths, &mut self.engine)?;
        let metrics = entry.face.metrics();
        let refs = entry.ref_count;

        let handle = self.records.insert(key.clone(), metrics);
        log::debug!(
            "Created {} for {} ({}, refs={})",
            handle,
            key,
            match how {
                Acquired::Shared => "shared",
                Acquired::Revived => "revived",
                Acquired::Loaded => "loaded",
            },
            refs
        );
        Ok(handle)
    }

    fn create_emoji(&mut self, key: &FontKey) -> Result<FontHandle, FontError> {
        let font = self.emoji.create(&key.name, key.size).ok_or_else(|| {
            log::warn!("No emoji set matches {}", key);
            FontError::NoEmojiMatch {
                name: key.name.clone(),
                height: key.size,
            }
        })?;

        let handle = self.records.allocate();
        let view = FontView {
            handle,
            key: key.clone(),
            metrics: font.metrics(),
            kind: FontKind::Emoji,
            fallback: None,
        };
        self.emoji_fonts.insert(handle, EmojiSlot { font, view });
        log::debug!("Created emoji {} for {}", handle, key);
        Ok(handle)
    }

    /// Destroy one handle.
    ///
    /// A handle this manager did not create (or already destroyed) is
    /// rejected with `NotOwned` and nothing changes.
    pub fn destroy(&mut self, handle: FontHandle) -> Result<(), FontError> {
        if self.emoji_fonts.remove(&handle).is_some() {
            log::debug!("Destroyed emoji {}", handle);
            return Ok(());
        }

        let Some(record) = self.records.remove(handle) else {
            log::warn!("Refusing to destroy {}: not owned by this manager", handle);
            return Err(FontError::NotOwned(handle));
        };

        match self.references.release(&record.owner, &mut self.engine) {
            Some(Released::InUse { ref_count }) => {
                log::debug!("Destroyed {} ({} refs left)", handle, ref_count);
            }
            Some(Released::Parked { .. }) | Some(Released::Destroyed) => {
                log::debug!("Destroyed {} (last reference)", handle);
            }
            None => {
                log::error!(
                    "Record {} pointed at {} which has no live entry",
                    handle,
                    record.owner
                );
            }
        }
        Ok(())
    }

    /// Caller view of `handle`.
    pub fn font(&self, handle: FontHandle) -> Option<&FontView> {
        match self.records.get(handle) {
            Some(record) => Some(&record.view),
            None => self.emoji_fonts.get(&handle).map(|slot| &slot.view),
        }
    }

    /// Emoji font behind `handle`, if it is one.
    pub fn emoji_font(&self, handle: FontHandle) -> Option<&EmojiFont> {
        self.emoji_fonts.get(&handle).map(|slot| &slot.font)
    }

    pub fn owns(&self, handle: FontHandle) -> bool {
        self.records.contains(handle) || self.emoji_fonts.contains_key(&handle)
    }

    fn view_mut(&mut self, handle: FontHandle) -> Option<&mut FontView> {
        match self.records.view_mut(handle) {
            Some(view) => Some(view),
            None => self.emoji_fonts.get_mut(&handle).map(|slot| &mut slot.view),
        }
    }

    /// Whether the font behind `handle` can draw `ch`.
    fn glyph_source(&self, handle: FontHandle, ch: char) -> Option<GlyphSource> {
        if let Some(record) = self.records.get(handle) {
            let entry = self.references.get(&record.owner)?;
            return entry
                .face
                .has_glyph(ch)
                .then_some(GlyphSource::Outline(handle));
        }
        let slot = self.emoji_fonts.get(&handle)?;
        slot.font
            .glyph_path(ch as u32)
            .map(|path| GlyphSource::Image { font: handle, path })
    }

    // ========================================================================
    // Path registry
    // ========================================================================

    pub fn set_base_path(&mut self, path: impl Into<PathBuf>) {
        self.paths.set_base_path(path);
    }

    pub fn set_default_extension(&mut self, ext: &str) {
        self.paths.set_default_extension(ext);
    }

    /// Register a path override. `None` if the exact pair already exists.
    pub fn add_path_override(
        &mut self,
        name: &str,
        path: impl Into<PathBuf>,
    ) -> Option<OverrideId> {
        self.paths.add_override(name, path).ok()
    }

    /// Remove a path override. `false` if `id` is not registered.
    pub fn remove_path_override(&mut self, id: OverrideId) -> bool {
        match self.paths.remove_override(id) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    /// File a font name would be loaded from.
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.paths.resolve(name)
    }

    pub fn paths(&self) -> &PathRegistry {
        &self.paths
    }

    // ========================================================================
    // Shutdown
    // ========================================================================

    /// Tear the manager down.
    ///
    /// Fails with `Leaked` while any handle or live face remains; nothing is
    /// freed in that case and the manager stays usable. On success every
    /// parked face is returned to the engine.
    pub fn shutdown(&mut self) -> Result<(), FontError> {
        let report = self.leak_report();
        if !report.is_empty() {
            log::error!("Font manager shutdown refused: {}", report);
            return Err(FontError::Leaked(report));
        }

        let destroyed = self.references.drain_cache(&mut self.engine);
        if !self.emoji_fonts.is_empty() {
            log::debug!("Dropping {} emoji font(s) at shutdown", self.emoji_fonts.len());
            self.emoji_fonts.clear();
        }
        log::info!("Font manager shut down ({} parked font(s) destroyed)", destroyed);
        Ok(())
    }

    /// Handles and live faces that would block shutdown.
    pub fn leak_report(&self) -> LeakReport {
        LeakReport {
            records: self.records.outstanding(),
            entries: self.references.live_entries(),
        }
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn stats(&self) -> ManagerStats {
        ManagerStats {
            records: self.records.len(),
            live_entries: self.references.live_len(),
            cached_entries: self.references.cached_len(),
            cache_capacity: self.references.cache_capacity(),
            emoji_fonts: self.emoji_fonts.len(),
        }
    }

    /// Number of handles currently referencing `key`.
    pub fn ref_count(&self, key: &FontKey) -> usize {
        self.references.ref_count(key)
    }

    /// Whether a released face for `key` is waiting in the reuse cache.
    pub fn is_cached(&self, key: &FontKey) -> bool {
        self.references.is_cached(key)
    }

    /// Keys in the reuse cache, oldest first.
    pub fn cached_keys(&self) -> Vec<FontKey> {
        self.references.cached_keys()
    }

    pub fn resources(&self) -> &ResourceConfig {
        &self.resources
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Base directory fonts are resolved against.
    pub fn base_path(&self) -> &Path {
        self.paths.base_path()
    }
}

impl<E: FontEngine> Drop for FontManager<E> {
    fn drop(&mut self) {
        let report = self.leak_report();
        if !report.is_empty() {
            log::error!("Font manager dropped with fonts in use: {}", report);
        }
        let destroyed = self.references.drain_all(&mut self.engine);
        if destroyed > 0 {
            log::debug!("Destroyed {} font(s) on drop", destroyed);
        }
    }
}
