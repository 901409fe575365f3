//! One record per caller-visible font handle.
//!
//! A record owns nothing durable: it names the reference entry it counts
//! against and carries a copy of the face metrics. Many records may point at
//! the same entry; destroying a record only ever drops one reference.

use std::collections::HashMap;

use crate::font_manager::{FontKind, FontView};
use crate::types::{FontHandle, FontKey, FontMetrics};

#[derive(Debug, Clone)]
pub struct CallerRecord {
    /// Key of the reference entry this record holds a reference on
    pub owner: FontKey,
    pub view: FontView,
}

#[derive(Debug)]
pub struct RecordStore {
    records: HashMap<FontHandle, CallerRecord>,
    /// Id stamped into every handle this store issues
    manager: u32,
    next_handle: u64,
}

impl RecordStore {
    pub fn new(manager: u32) -> Self {
        Self {
            records: HashMap::new(),
            manager,
            next_handle: 1,
        }
    }

    /// Hand out a fresh handle. Handles are never reused.
    pub fn allocate(&mut self) -> FontHandle {
        let handle = FontHandle::new(self.manager, self.next_handle);
        self.next_handle += 1;
        handle
    }

    /// Create a record for a new reference on `owner`.
    pub fn insert(&mut self, owner: FontKey, metrics: FontMetrics) -> FontHandle {
        let handle = self.allocate();
        let view = FontView {
            handle,
            key: owner.clone(),
            metrics,
            kind: FontKind::Outline,
            fallback: None,
        };
        self.records.insert(handle, CallerRecord { owner, view });
        handle
    }

    pub fn get(&self, handle: FontHandle) -> Option<&CallerRecord> {
        self.records.get(&handle)
    }

    pub fn view_mut(&mut self, handle: FontHandle) -> Option<&mut FontView> {
        self.records.get_mut(&handle).map(|r| &mut r.view)
    }

    pub fn contains(&self, handle: FontHandle) -> bool {
        self.records.contains_key(&handle)
    }

    pub fn remove(&mut self, handle: FontHandle) -> Option<CallerRecord> {
        self.records.remove(&handle)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Outstanding `(handle, key)` pairs in creation order.
    pub fn outstanding(&self) -> Vec<(FontHandle, FontKey)> {
        let mut out: Vec<_> = self
            .records
            .iter()
            .map(|(h, r)| (*h, r.owner.clone()))
            .collect();
        out.sort_by_key(|(h, _)| *h);
        out
    }
}
