//! Per-view lookup memo: the child count and a one-slot cursor.
//!
//! Views read through `&self`, so the memo lives in a [`Cell`]. Every mutation
//! made through a view calls [`CursorCache::invalidate`].
use core::cell::Cell;

use crate::{document::Document, node::NodeId};

#[derive(Debug, Clone, Copy, Default)]
struct CacheState {
    len: Option<usize>,
    /// Position and node of the last successful lookup.
    cursor: Option<(usize, NodeId)>,
}

#[derive(Debug, Default)]
pub(crate) struct CursorCache(Cell<CacheState>);

impl Clone for CursorCache {
    fn clone(&self) -> Self {
        CursorCache(Cell::new(self.0.get()))
    }
}

impl CursorCache {
    pub(crate) fn invalidate(&self) {
        self.0.set(CacheState::default());
    }

    pub(crate) fn len(&self, doc: &Document, container: NodeId) -> usize {
        let mut state = self.0.get();
        if let Some(len) = state.len {
            return len;
        }
        let len = doc.children(container).count();
        state.len = Some(len);
        self.0.set(state);
        len
    }

    /// Child at `index`. Walks from the cursor when it is at or before
    /// `index`, otherwise from the head, so ascending access is amortized
    /// O(1) per step.
    pub(crate) fn nth(&self, doc: &Document, container: NodeId, index: usize) -> Option<NodeId> {
        let mut state = self.0.get();
        if let Some(len) = state.len {
            if index >= len {
                return None;
            }
        }
        let (mut at, mut node) = match state.cursor {
            Some((at, node)) if at <= index => (at, node),
            _ => (0, doc.first_child(container)?),
        };
        while at < index {
            node = doc.next_sibling(node)?;
            at += 1;
        }
        state.cursor = Some((index, node));
        self.0.set(state);
        Some(node)
    }

    /// First field of an object whose key is `key`. The last match is
    /// remembered, so repeated lookups of one key do not rescan.
    pub(crate) fn find_field(&self, doc: &Document, object: NodeId, key: &str) -> Option<NodeId> {
        let mut state = self.0.get();
        if let Some((_, field)) = state.cursor {
            if doc.key_matches(field, key) {
                return Some(field);
            }
        }
        let (index, field) = doc
            .children(object)
            .enumerate()
            .find(|&(_, field)| doc.key_matches(field, key))?;
        state.cursor = Some((index, field));
        self.0.set(state);
        Some(field)
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> Option<(usize, NodeId)> {
        self.0.get().cursor
    }

    #[cfg(test)]
    pub(crate) fn cached_len(&self) -> Option<usize> {
        self.0.get().len
    }
}
