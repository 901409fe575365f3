//! Bounded pool of released faces kept alive for quick revival.
//!
//! Absorbs destroy-then-recreate churn (list scrolling, tab switches)
//! without another engine load. Entries are only ever pushed and taken,
//! never promoted, so the LRU order of the backing cache is plain insertion
//! order and eviction always removes the oldest slot.

use std::num::NonZeroUsize;

use lru::LruCache;

use crate::types::FontKey;

/// A released face with an implicit reference count of zero.
#[derive(Debug)]
pub struct ReuseSlot<F> {
    pub key: FontKey,
    pub face: F,
}

pub struct ReuseCache<F> {
    /// `None` when the capacity is zero
    slots: Option<LruCache<FontKey, F>>,
}

impl<F> ReuseCache<F> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: NonZeroUsize::new(capacity).map(LruCache::new),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.as_ref().map_or(0, |s| s.cap().get())
    }

    pub fn len(&self) -> usize {
        self.slots.as_ref().map_or(0, LruCache::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &FontKey) -> bool {
        self.slots.as_ref().is_some_and(|s| s.contains(key))
    }

    /// Park a released face as the newest slot.
    ///
    /// Returns the slot the caller must destroy: the evicted oldest slot when
    /// the cache was full, or the face itself when caching is disabled.
    #[must_use = "the returned face must be handed back to the engine"]
    pub fn insert(&mut self, key: FontKey, face: F) -> Option<ReuseSlot<F>> {
        let Some(slots) = self.slots.as_mut() else {
            return Some(ReuseSlot { key, face });
        };
        slots
            .push(key, face)
            .map(|(key, face)| ReuseSlot { key, face })
    }

    /// Remove and return the parked face for `key`, if any.
    pub fn take(&mut self, key: &FontKey) -> Option<F> {
        self.slots.as_mut()?.pop(key)
    }

    /// Parked keys, oldest first.
    pub fn keys(&self) -> Vec<FontKey> {
        match &self.slots {
            Some(slots) => slots.iter().rev().map(|(k, _)| k.clone()).collect(),
            None => Vec::new(),
        }
    }

    /// Remove every slot, oldest first.
    pub fn drain(&mut self) -> Vec<ReuseSlot<F>> {
        let mut drained = Vec::with_capacity(self.len());
        if let Some(slots) = self.slots.as_mut() {
            while let Some((key, face)) = slots.pop_lru() {
                drained.push(ReuseSlot { key, face });
            }
        }
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FontStyle;

    fn key(name: &str) -> FontKey {
        FontKey::new(name, 16, FontStyle::Normal)
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut cache = ReuseCache::new(2);
        assert!(cache.insert(key("a"), 1).is_none());
        assert!(cache.insert(key("b"), 2).is_none());

        let evicted = cache.insert(key("c"), 3).expect("oldest slot evicted");
        assert_eq!(evicted.key, key("a"));
        assert_eq!(evicted.face, 1);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.keys(), vec![key("b"), key("c")]);
    }

    #[test]
    fn test_take_removes_slot() {
        let mut cache = ReuseCache::new(4);
        let _ = cache.insert(key("a"), 10);
        assert!(cache.contains(&key("a")));
        assert_eq!(cache.take(&key("a")), Some(10));
        assert!(!cache.contains(&key("a")));
        assert_eq!(cache.take(&key("a")), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_take_does_not_refresh_order() {
        let mut cache = ReuseCache::new(2);
        let _ = cache.insert(key("a"), 1);
        let _ = cache.insert(key("b"), 2);
        assert_eq!(cache.take(&key("missing")), None);
        let evicted = cache.insert(key("c"), 3).unwrap();
        assert_eq!(evicted.key, key("a"));
    }

    #[test]
    fn test_zero_capacity_returns_face_immediately() {
        let mut cache = ReuseCache::new(0);
        assert_eq!(cache.capacity(), 0);
        let slot = cache.insert(key("a"), 7).expect("nothing is parked");
        assert_eq!(slot.face, 7);
        assert!(cache.is_empty());
        assert_eq!(cache.take(&key("a")), None);
    }

    #[test]
    fn test_drain_oldest_first() {
        let mut cache = ReuseCache::new(3);
        let _ = cache.insert(key("a"), 1);
        let _ = cache.insert(key("b"), 2);
        let drained: Vec<_> = cache.drain().into_iter().map(|s| s.face).collect();
        assert_eq!(drained, vec![1, 2]);
        assert!(cache.is_empty());
    }
}
