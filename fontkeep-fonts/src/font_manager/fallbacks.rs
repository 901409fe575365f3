//! Fallback chains built from the font family table.
//!
//! A chain is a singly linked list threaded through `FontView::fallback`.
//! Every link is an ordinary handle with its own reference, so tearing a
//! chain down is just destroying each link from head to tail.

use super::{FontManager, GlyphSource};
use crate::engine::FontEngine;
use crate::types::{FontHandle, FontKey, FontStyle};

impl<E: FontEngine> FontManager<E> {
    /// Create `name` with its configured fallbacks attached.
    ///
    /// The base font heads the chain. Fallbacks that fail to load are
    /// skipped. If the base itself fails, the fallback chain is returned on
    /// its own; `None` only when nothing at all could be created.
    pub fn create_family(&mut self, name: &str, size: u32, style: FontStyle) -> Option<FontHandle> {
        let key = FontKey::new(name, size, style);
        let base = match self.create_key(&key) {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("Family base font {} unavailable: {}", key, e);
                None
            }
        };
        let fallbacks = self.build_fallbacks(&key);

        match (base, fallbacks) {
            (Some(head), Some(chain)) => {
                self.link(head, chain);
                Some(head)
            }
            (Some(head), None) => Some(head),
            (None, chain) => chain,
        }
    }

    /// Build the fallback chain for `base_key` without the base font.
    ///
    /// Returns the first fallback that loaded, or `None` when the family is
    /// not configured or every fallback failed.
    pub fn build_fallbacks(&mut self, base_key: &FontKey) -> Option<FontHandle> {
        let names = match self.resources.family(&base_key.name) {
            Some(family) => family.fallback.clone(),
            None => {
                log::debug!("No font family configured for '{}'", base_key.name);
                return None;
            }
        };

        let mut head = None;
        let mut tail: Option<FontHandle> = None;
        for name in &names {
            let key = base_key.with_name(name.as_str());
            let handle = match self.create_key(&key) {
                Ok(handle) => handle,
                Err(e) => {
                    log::warn!("Skipping fallback {} for '{}': {}", key, base_key.name, e);
                    continue;
                }
            };
            match tail {
                Some(prev) => self.link(prev, handle),
                None => head = Some(handle),
            }
            tail = Some(handle);
        }

        if head.is_none() && !names.is_empty() {
            log::warn!("No fallback for '{}' could be loaded", base_key.name);
        }
        head
    }

    fn link(&mut self, from: FontHandle, to: FontHandle) {
        if let Some(view) = self.view_mut(from) {
            view.fallback = Some(to);
        }
    }

    /// Destroy every link of the chain starting at `head`, head first.
    ///
    /// Stops at the first link that is no longer owned. Returns how many
    /// fonts were destroyed.
    pub fn destroy_family(&mut self, head: FontHandle) -> usize {
        let mut destroyed = 0;
        let mut next = Some(head);
        while let Some(handle) = next {
            next = self.font(handle).and_then(|view| view.fallback);
            if let Err(e) = self.destroy(handle) {
                log::warn!("Fallback chain teardown stopped at {}: {}", handle, e);
                break;
            }
            destroyed += 1;
        }
        destroyed
    }

    /// Handles of the chain starting at `head`, in lookup order.
    pub fn chain(&self, head: FontHandle) -> Vec<FontHandle> {
        let mut handles = Vec::new();
        let mut next = Some(head);
        while let Some(handle) = next {
            let Some(view) = self.font(handle) else {
                break;
            };
            handles.push(handle);
            next = view.fallback;
        }
        handles
    }

    /// First font in the chain at `head` that can draw `ch`.
    pub fn resolve_glyph(&self, head: FontHandle, ch: char) -> Option<GlyphSource> {
        self.chain(head)
            .into_iter()
            .find_map(|handle| self.glyph_source(handle, ch))
    }
}
