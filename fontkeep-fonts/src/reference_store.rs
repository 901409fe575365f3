//! Source of truth for distinct font-engine objects.
//!
//! One `ReferenceEntry` per live `FontKey`, owning the face and counting the
//! caller records that point at it. Entries whose count drops to zero leave
//! the live map and are parked in the reuse cache; only faces evicted from
//! (or refused by) the cache go back to the engine.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::engine::{FontEngine, FontFace};
use crate::error::FontError;
use crate::path_registry::PathRegistry;
use crate::reuse_cache::ReuseCache;
use crate::types::FontKey;

/// A live face and its reference count (always >= 1 while in the map).
#[derive(Debug)]
pub struct ReferenceEntry<F> {
    pub key: FontKey,
    pub face: F,
    pub ref_count: usize,
}

/// How a `request` was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquired {
    /// An existing live entry gained a reference
    Shared,
    /// A parked face was taken back out of the reuse cache
    Revived,
    /// The engine loaded a new face
    Loaded,
}

/// What a `release` did with the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Released {
    /// Other references remain
    InUse { ref_count: usize },
    /// Parked in the reuse cache; `evicted` is the slot destroyed to make room
    Parked { evicted: Option<FontKey> },
    /// Caching is disabled and the face went straight back to the engine
    Destroyed,
}

pub struct ReferenceStore<F> {
    live: HashMap<FontKey, ReferenceEntry<F>>,
    reuse: ReuseCache<F>,
}

impl<F: FontFace> ReferenceStore<F> {
    pub fn new(reuse_capacity: usize) -> Self {
        Self {
            live: HashMap::new(),
            reuse: ReuseCache::new(reuse_capacity),
        }
    }

    /// Take a reference on the face for `key`, loading it if needed.
    ///
    /// On engine failure nothing is inserted anywhere.
    pub fn request<E>(
        &mut self,
        key: &FontKey,
        paths: &PathRegistry,
        engine: &mut E,
    ) -> Result<(&ReferenceEntry<F>, Acquired), FontError>
    where
        E: FontEngine<Face = F>,
    {
        match self.live.entry(key.clone()) {
            Entry::Occupied(occupied) => {
                let entry = occupied.into_mut();
                entry.ref_count += 1;
                log::trace!("Font {} shared (refs={})", key, entry.ref_count);
                Ok((entry, Acquired::Shared))
            }
            Entry::Vacant(vacant) => {
                let (face, how) = match self.reuse.take(key) {
                    Some(face) => {
                        log::debug!("Font {} revived from reuse cache", key);
                        (face, Acquired::Revived)
                    }
                    None => {
                        let path = paths.resolve(&key.name);
                        let face = engine.load(&path, key.size, key.style).map_err(|source| {
                            log::warn!("Font {} failed to load from {:?}: {}", key, path, source);
                            FontError::Load {
                                key: key.clone(),
                                path: path.clone(),
                                source,
                            }
                        })?;
                        log::debug!("Font {} loaded from {:?}", key, path);
                        (face, Acquired::Loaded)
                    }
                };
                let entry = vacant.insert(ReferenceEntry {
                    key: key.clone(),
                    face,
                    ref_count: 1,
                });
                Ok((entry, how))
            }
        }
    }

    /// Drop one reference on `key`.
    ///
    /// Returns `None` if `key` has no live entry.
    pub fn release<E>(&mut self, key: &FontKey, engine: &mut E) -> Option<Released>
    where
        E: FontEngine<Face = F>,
    {
        let entry = self.live.get_mut(key)?;
        entry.ref_count -= 1;
        if entry.ref_count > 0 {
            return Some(Released::InUse {
                ref_count: entry.ref_count,
            });
        }

        let entry = self.live.remove(key)?;
        match self.reuse.insert(entry.key, entry.face) {
            None => {
                log::debug!("Font {} parked in reuse cache", key);
                Some(Released::Parked { evicted: None })
            }
            Some(slot) if slot.key == *key && self.reuse.capacity() == 0 => {
                log::debug!("Font {} destroyed (reuse cache disabled)", key);
                engine.destroy(slot.face);
                Some(Released::Destroyed)
            }
            Some(slot) => {
                log::debug!("Font {} evicted from reuse cache to park {}", slot.key, key);
                engine.destroy(slot.face);
                Some(Released::Parked {
                    evicted: Some(slot.key),
                })
            }
        }
    }

    pub fn get(&self, key: &FontKey) -> Option<&ReferenceEntry<F>> {
        self.live.get(key)
    }

    /// Reference count of `key`, zero when it is not live.
    pub fn ref_count(&self, key: &FontKey) -> usize {
        self.live.get(key).map_or(0, |e| e.ref_count)
    }

    pub fn live_len(&self) -> usize {
        self.live.len()
    }

    /// Live keys with their reference counts, sorted for stable output.
    pub fn live_entries(&self) -> Vec<(FontKey, usize)> {
        let mut entries: Vec<_> = self
            .live
            .values()
            .map(|e| (e.key.clone(), e.ref_count))
            .collect();
        entries.sort_by(|(a, _), (b, _)| {
            (&a.name, a.size, a.style.as_str()).cmp(&(&b.name, b.size, b.style.as_str()))
        });
        entries
    }

    pub fn cached_len(&self) -> usize {
        self.reuse.len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.reuse.capacity()
    }

    pub fn is_cached(&self, key: &FontKey) -> bool {
        self.reuse.contains(key)
    }

    /// Parked keys, oldest first.
    pub fn cached_keys(&self) -> Vec<FontKey> {
        self.reuse.keys()
    }

    /// Destroy every parked face. Returns how many were destroyed.
    pub fn drain_cache<E>(&mut self, engine: &mut E) -> usize
    where
        E: FontEngine<Face = F>,
    {
        let slots = self.reuse.drain();
        let count = slots.len();
        for slot in slots {
            log::debug!("Font {} destroyed from reuse cache", slot.key);
            engine.destroy(slot.face);
        }
        count
    }

    /// Destroy every face, live or parked, regardless of reference counts.
    ///
    /// Only for final teardown when the owner is going away.
    pub fn drain_all<E>(&mut self, engine: &mut E) -> usize
    where
        E: FontEngine<Face = F>,
    {
        let mut count = self.drain_cache(engine);
        for (_, entry) in self.live.drain() {
            engine.destroy(entry.face);
            count += 1;
        }
        count
    }
}
