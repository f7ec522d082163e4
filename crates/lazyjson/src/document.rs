//! The node arena of one document and the mutation engine that edits it.
//!
//! Nodes are addressed by [`NodeId`] and linked into sibling lists. Parsed
//! nodes point into the shared source buffer; written scalars point into the
//! document's mutation buffer; adopted subtrees keep pointing into whatever
//! buffers they came from, which are registered in this document's buffer
//! table.
//!
//! Removing a child or replacing a field's value releases the slots of the
//! whole dropped subtree, and later writes and adoptions reuse them, so a
//! document edited in place does not grow without bound. Text appended to the
//! mutation buffer is never reclaimed; [`detach`](crate::JsonObject::detach)
//! copies a tree into a fresh document when that matters.
use alloc::{string::String, sync::Arc, vec::Vec};
use core::fmt::{self, Write as _};

use tracing::debug;

use crate::{
    buffer::{BufferId, Buffers, Span},
    decode,
    error::AccessError,
    node::{Node, NodeId, NodeKind},
    value::{Scalar, needs_escape, write_escaped_string},
};

/// Storage behind a JSON tree: the node arena plus the text buffers the nodes
/// point into.
///
/// A `Document` is plain data and can be sent to or shared between threads.
/// Reading through views never changes it; mutation needs exclusive access.
/// Cloning copies the node records and shares the buffers.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    free: Vec<NodeId>,
    buffers: Buffers,
    root: NodeId,
    dirty: bool,
}

/// Iterator over the children of one node, in order.
pub(crate) struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.doc.node(id).next;
        Some(id)
    }
}

impl Document {
    /// An empty object or array with no buffers.
    pub(crate) fn new(kind: NodeKind) -> Self {
        Self {
            nodes: alloc::vec![Node::new(kind, None)],
            free: Vec::new(),
            buffers: Buffers::default(),
            root: NodeId::new(0),
            dirty: false,
        }
    }

    /// An empty arena over a source buffer. The first node pushed is the root.
    pub(crate) fn with_source(source: Arc<str>) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            buffers: Buffers::with_source(source),
            root: NodeId::new(0),
            dirty: false,
        }
    }

    /// Whether the document has been mutated since it was parsed or created.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether values written by mutations have a buffer to live in yet.
    #[must_use]
    pub fn has_mutation_buffer(&self) -> bool {
        self.buffers.has_mutation_buffer()
    }

    /// Number of node slots in the arena, free ones included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of slots released by removals and replacements and not yet
    /// reused.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Number of distinct text buffers the nodes point into.
    #[must_use]
    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    // --------------------------------------------------------------------------------------------
    // Reading
    // --------------------------------------------------------------------------------------------

    pub(crate) fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub(crate) fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    /// Raw span text of a node, or the empty string for nodes without one.
    pub(crate) fn raw(&self, id: NodeId) -> &str {
        self.node(id).span.map_or("", |span| self.buffers.text(span))
    }

    pub(crate) fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).first_child
    }

    pub(crate) fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    pub(crate) fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.first_child(id),
        }
    }

    /// The value node of a field.
    pub(crate) fn field_value(&self, field: NodeId) -> Option<NodeId> {
        self.first_child(field)
    }

    /// Raw comparison for plain keys, decode-then-compare for escaped ones.
    pub(crate) fn key_matches(&self, field: NodeId, key: &str) -> bool {
        match self.kind(field) {
            NodeKind::Field => self.raw(field) == key,
            NodeKind::EscapedField => decode::unescape(self.raw(field)).is_ok_and(|k| k == key),
            _ => false,
        }
    }

    /// First field of `object` whose key is `key`.
    pub(crate) fn find_field(&self, object: NodeId, key: &str) -> Option<NodeId> {
        self.children(object).find(|&field| self.key_matches(field, key))
    }

    // --------------------------------------------------------------------------------------------
    // Mutation engine
    // --------------------------------------------------------------------------------------------

    pub(crate) fn push_node(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = node;
            return id;
        }
        self.nodes.push(node);
        NodeId::new(self.nodes.len() - 1)
    }

    /// Returns the slots of the unlinked subtree at `id` to the free list.
    fn release(&mut self, id: NodeId) {
        let mut pending = alloc::vec![id];
        while let Some(id) = pending.pop() {
            let node = core::mem::replace(&mut self.nodes[id.index()], Node::new(NodeKind::Null, None));
            let mut child = node.first_child;
            while let Some(c) = child {
                child = self.nodes[c.index()].next;
                pending.push(c);
            }
            self.free.push(id);
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Appends text to the mutation buffer and creates a leaf spanning it.
    fn write_text(&mut self, kind: NodeKind, write: impl FnOnce(&mut String)) -> NodeId {
        let span = self.buffers.append_with(write);
        self.push_node(Node::new(kind, Some(span)))
    }

    /// Encodes a scalar into a new, unlinked leaf node.
    pub(crate) fn write_scalar(&mut self, scalar: &Scalar<'_>) -> Result<NodeId, AccessError> {
        let id = match scalar {
            Scalar::Null => self.push_node(Node::new(NodeKind::Null, None)),
            Scalar::Boolean(true) => self.push_node(Node::new(NodeKind::BooleanTrue, None)),
            Scalar::Boolean(false) => self.push_node(Node::new(NodeKind::BooleanFalse, None)),
            Scalar::Int(n) => self.write_text(NodeKind::Integer, |text| push_fmt(text, format_args!("{n}"))),
            Scalar::Long(n) => self.write_text(NodeKind::Integer, |text| push_fmt(text, format_args!("{n}"))),
            Scalar::Float(n) => {
                if !n.is_finite() {
                    return Err(AccessError::NonFiniteNumber(f64::from(*n)));
                }
                self.write_text(NodeKind::Float, |text| push_fmt(text, format_args!("{n:?}")))
            }
            Scalar::Double(n) => {
                if !n.is_finite() {
                    return Err(AccessError::NonFiniteNumber(*n));
                }
                self.write_text(NodeKind::Float, |text| push_fmt(text, format_args!("{n:?}")))
            }
            Scalar::String(s) => self.write_string(s, NodeKind::String, NodeKind::EscapedString),
        };
        Ok(id)
    }

    fn write_string(&mut self, s: &str, plain: NodeKind, escaped: NodeKind) -> NodeId {
        if s.chars().any(needs_escape) {
            self.write_text(escaped, |text| push_escaped(text, s))
        } else {
            self.write_text(plain, |text| text.push_str(s))
        }
    }

    /// Creates an unlinked field node for `key` owning `value`.
    pub(crate) fn write_field(&mut self, key: &str, value: NodeId) -> NodeId {
        let field = self.write_string(key, NodeKind::Field, NodeKind::EscapedField);
        self.set_field_value(field, value);
        field
    }

    /// Points a field at a new value node and releases the old value.
    pub(crate) fn set_field_value(&mut self, field: NodeId, value: NodeId) {
        self.nodes[value.index()].next = None;
        let node = &mut self.nodes[field.index()];
        let old = node.first_child.replace(value);
        node.last_child = Some(value);
        if let Some(old) = old {
            self.release(old);
        }
        self.mark_dirty();
    }

    /// Links `child` as the last child of `parent` in O(1).
    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.link_child(parent, child);
        self.mark_dirty();
    }

    /// Links `child` last without marking the document dirty.
    pub(crate) fn link_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].next = None;
        match self.nodes[parent.index()].last_child {
            Some(tail) => self.nodes[tail.index()].next = Some(child),
            None => self.nodes[parent.index()].first_child = Some(child),
        }
        self.nodes[parent.index()].last_child = Some(child);
    }

    /// Finds the node after which a child inserted at `index` goes. `None`
    /// means a head insert. Fails if `index` is past the end.
    pub(crate) fn insertion_point(&self, parent: NodeId, index: usize) -> Result<Option<NodeId>, AccessError> {
        if index == 0 {
            return Ok(None);
        }
        let mut seen = 0;
        for child in self.children(parent) {
            seen += 1;
            if seen == index {
                return Ok(Some(child));
            }
        }
        Err(AccessError::IndexOutOfBounds { index, len: seen })
    }

    /// Links `child` after `prev`, or at the head when `prev` is `None`.
    pub(crate) fn insert_after(&mut self, parent: NodeId, prev: Option<NodeId>, child: NodeId) {
        let next = match prev {
            Some(prev) => self.nodes[prev.index()].next.replace(child),
            None => self.nodes[parent.index()].first_child.replace(child),
        };
        self.nodes[child.index()].next = next;
        if next.is_none() {
            self.nodes[parent.index()].last_child = Some(child);
        }
        self.mark_dirty();
    }

    /// Unlinks `child` from `parent`, found by a predecessor scan, and
    /// releases its subtree.
    pub(crate) fn unlink(&mut self, parent: NodeId, child: NodeId) -> bool {
        let mut prev: Option<NodeId> = None;
        let mut cursor = self.first_child(parent);
        while let Some(id) = cursor {
            if id == child {
                let next = self.nodes[id.index()].next.take();
                match prev {
                    Some(prev) => self.nodes[prev.index()].next = next,
                    None => self.nodes[parent.index()].first_child = next,
                }
                if next.is_none() {
                    self.nodes[parent.index()].last_child = prev;
                }
                self.release(id);
                self.mark_dirty();
                return true;
            }
            prev = Some(id);
            cursor = self.next_sibling(id);
        }
        false
    }

    /// Copies the node records of `donor`'s subtree at `node` into this arena
    /// and returns the new, unlinked subtree root.
    ///
    /// No text is copied: the donor's buffers are registered in this
    /// document's buffer table and the copied spans point at them.
    pub(crate) fn adopt(&mut self, donor: &Document, node: NodeId) -> NodeId {
        let mut remap: Vec<Option<BufferId>> = alloc::vec![None; donor.buffers.len()];
        let buffers_before = self.buffers.len();

        let root = self.copy_record(donor, node, &mut remap);
        let mut copied = 1usize;
        let mut pending = alloc::vec![(node, root)];
        while let Some((from, to)) = pending.pop() {
            for child in donor.children(from) {
                let copy = self.copy_record(donor, child, &mut remap);
                self.link_child(to, copy);
                pending.push((child, copy));
                copied += 1;
            }
        }

        debug!(
            nodes = copied,
            shared_buffers = self.buffers.len() - buffers_before,
            "adopted subtree"
        );
        root
    }

    fn copy_record(&mut self, donor: &Document, id: NodeId, remap: &mut [Option<BufferId>]) -> NodeId {
        let source = donor.node(id);
        let span = source.span.map(|span| {
            let slot = &mut remap[span.buffer.index()];
            let buffer = match *slot {
                Some(buffer) => buffer,
                None => {
                    let buffer = self.buffers.share(donor.buffers.buffer(span.buffer));
                    *slot = Some(buffer);
                    buffer
                }
            };
            Span { buffer, ..span }
        });
        self.push_node(Node::new(source.kind, span))
    }

    /// Copies the subtree at `node` into a new document of its own.
    pub(crate) fn detach(&self, node: NodeId) -> Document {
        let mut doc = Document {
            nodes: Vec::new(),
            free: Vec::new(),
            buffers: Buffers::default(),
            root: NodeId::new(0),
            dirty: false,
        };
        doc.root = doc.adopt(self, node);
        doc
    }
}

fn push_fmt(text: &mut String, args: fmt::Arguments<'_>) {
    // Writing into a `String` cannot fail.
    let _ = text.write_fmt(args);
}

fn push_escaped(text: &mut String, s: &str) {
    let _ = write_escaped_string(s, text);
}
