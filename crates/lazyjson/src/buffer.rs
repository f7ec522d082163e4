//! Backing text for document nodes.
//!
//! A parsed document owns one immutable source buffer. Values written after
//! parsing go to a per-document mutation buffer that is created on the first
//! write. Both are reference counted so that adopting a subtree into another
//! document shares the text instead of copying it.
use alloc::{string::String, sync::Arc, vec::Vec};

use tracing::trace;

/// Index of a buffer in a document's buffer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct BufferId(usize);

impl BufferId {
    /// The source buffer of a parsed document is always the first slot.
    pub(crate) const SOURCE: BufferId = BufferId(0);

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// Half-open byte range `[start, end)` into one buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) buffer: BufferId,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

#[derive(Debug, Clone)]
pub(crate) enum Buffer {
    /// Text of an original parse. Never changes.
    Source(Arc<str>),
    /// Append-only text written by mutations. Appending through a shared
    /// handle clones it first, so spans held elsewhere stay valid.
    Mutation(Arc<String>),
}

impl Buffer {
    pub(crate) fn as_str(&self) -> &str {
        match self {
            Buffer::Source(text) => text,
            Buffer::Mutation(text) => text,
        }
    }

    fn same_storage(&self, other: &Buffer) -> bool {
        match (self, other) {
            (Buffer::Source(a), Buffer::Source(b)) => Arc::ptr_eq(a, b),
            (Buffer::Mutation(a), Buffer::Mutation(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// The buffer table of one document.
#[derive(Debug, Clone, Default)]
pub(crate) struct Buffers {
    slots: Vec<Buffer>,
    mutation: Option<BufferId>,
}

impl Buffers {
    pub(crate) fn with_source(source: Arc<str>) -> Self {
        Self {
            slots: alloc::vec![Buffer::Source(source)],
            mutation: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn has_mutation_buffer(&self) -> bool {
        self.mutation.is_some()
    }

    pub(crate) fn buffer(&self, id: BufferId) -> &Buffer {
        &self.slots[id.0]
    }

    pub(crate) fn text(&self, span: Span) -> &str {
        &self.slots[span.buffer.0].as_str()[span.start..span.end]
    }

    /// Appends to the mutation buffer through `write` and returns the span of
    /// whatever `write` pushed.
    pub(crate) fn append_with(&mut self, write: impl FnOnce(&mut String)) -> Span {
        let id = self.mutation_id();
        let Buffer::Mutation(shared) = &mut self.slots[id.0] else {
            unreachable!("mutation slot always holds a mutation buffer");
        };
        let text = Arc::make_mut(shared);
        let start = text.len();
        write(text);
        Span {
            buffer: id,
            start,
            end: text.len(),
        }
    }

    /// Registers a buffer of another document in this table, reusing the slot
    /// if the same storage is already present.
    pub(crate) fn share(&mut self, foreign: &Buffer) -> BufferId {
        if let Some(pos) = self.slots.iter().position(|b| b.same_storage(foreign)) {
            return BufferId(pos);
        }
        self.slots.push(foreign.clone());
        BufferId(self.slots.len() - 1)
    }

    fn mutation_id(&mut self) -> BufferId {
        if let Some(id) = self.mutation {
            return id;
        }
        let id = BufferId(self.slots.len());
        trace!(slot = id.0, "creating mutation buffer");
        self.slots.push(Buffer::Mutation(Arc::new(String::new())));
        self.mutation = Some(id);
        id
    }
}
