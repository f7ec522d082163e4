use alloc::{string::String, sync::Arc};
use core::{
    borrow::{Borrow, BorrowMut},
    fmt,
};

use crate::{
    JsonObject, ParseError, ParserOptions,
    access::{or_default, typed_accessors},
    cursor::CursorCache,
    decode,
    document::Document,
    element::Element,
    error::AccessError,
    node::{NodeId, NodeKind},
    serialize,
    value::{Scalar, Value},
};

/// An array view: positional access over a container node.
///
/// Elements live in a singly linked list. The view remembers the last
/// position it resolved, so reading indices in ascending order costs O(1)
/// per step while arbitrary or descending access walks from the head.
/// Any mutation through the view resets that memo and the cached length.
pub struct JsonArray<D = Document> {
    doc: D,
    node: NodeId,
    cache: CursorCache,
}

impl JsonArray {
    /// An empty array.
    #[must_use]
    pub fn new() -> Self {
        Self::from_document(Document::new(NodeKind::Array))
    }

    /// Parses text whose root must be an array.
    ///
    /// # Errors
    ///
    /// Fails on malformed input or when the root is an object.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_with(text, ParserOptions::default())
    }

    /// Parses text whose root must be an array, with explicit options.
    ///
    /// # Errors
    ///
    /// Fails on malformed input or when the root is an object.
    pub fn parse_with(text: &str, options: ParserOptions) -> Result<Self, ParseError> {
        Element::parse_shared(Arc::from(text), options)?.into_array_or_error(text)
    }

    pub(crate) fn from_document(doc: Document) -> Self {
        let node = doc.root();
        Self::view(doc, node)
    }

    /// The document backing this array.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.doc
    }
}

impl Default for JsonArray {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> JsonArray<D> {
    pub(crate) fn view(doc: D, node: NodeId) -> Self {
        Self {
            doc,
            node,
            cache: CursorCache::default(),
        }
    }
}

impl<D: Borrow<Document>> JsonArray<D> {
    /// The document this view reads from.
    #[must_use]
    pub fn document(&self) -> &Document {
        self.doc.borrow()
    }

    pub(crate) fn node(&self) -> NodeId {
        self.node
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len(self.document(), self.node)
    }

    /// Whether the array has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `index` is in bounds.
    #[must_use]
    pub fn has(&self, index: usize) -> bool {
        index < self.len()
    }

    /// Elements in order. Values that cannot be decoded are skipped.
    pub fn iter(&self) -> impl Iterator<Item = Value<&Document>> + '_ {
        let doc = self.document();
        doc.children(self.node)
            .filter_map(move |id| or_default(decode::value(doc, id).map(Some), None))
    }

    /// Copies this array into a document of its own. Text buffers are
    /// shared, node records are copied.
    #[must_use]
    pub fn detach(&self) -> JsonArray {
        JsonArray::from_document(self.document().detach(self.node))
    }

    /// Renders the array as text. `indent` is the number of spaces per
    /// nesting level; `0` renders compactly. An array with exactly one
    /// element is always rendered on one line.
    #[must_use]
    pub fn serialize(&self, indent: usize) -> String {
        serialize::to_string(self.document(), self.node, indent)
    }

    fn locate(&self, index: usize) -> Result<NodeId, AccessError> {
        self.cache
            .nth(self.document(), self.node, index)
            .ok_or_else(|| AccessError::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }
}

typed_accessors!(JsonArray, usize, index, "at `index`");

impl<D: BorrowMut<Document>> JsonArray<D> {
    fn document_mut(&mut self) -> &mut Document {
        self.doc.borrow_mut()
    }

    fn link_last(&mut self, child: NodeId) {
        self.cache.invalidate();
        let node = self.node;
        self.document_mut().append_child(node, child);
    }

    /// Validates `index` and returns the node to insert after.
    fn insertion_point(&self, index: usize) -> Result<Option<NodeId>, AccessError> {
        self.document().insertion_point(self.node, index)
    }

    fn link_after(&mut self, prev: Option<NodeId>, child: NodeId) {
        self.cache.invalidate();
        let node = self.node;
        self.document_mut().insert_after(node, prev, child);
    }

    /// Appends a scalar.
    ///
    /// # Errors
    ///
    /// Fails for NaN and infinite numbers, leaving the array unchanged.
    pub fn append<'v>(&mut self, value: impl Into<Scalar<'v>>) -> Result<&mut Self, AccessError> {
        let child = self.document_mut().write_scalar(&value.into())?;
        self.link_last(child);
        Ok(self)
    }

    /// Appends a copy of the tree of `object`, sharing its text.
    pub fn append_object<E: Borrow<Document>>(&mut self, object: &JsonObject<E>) -> &mut Self {
        let child = self.document_mut().adopt(object.document(), object.node());
        self.link_last(child);
        self
    }

    /// Appends a copy of the tree of `array`, sharing its text.
    pub fn append_array<E: Borrow<Document>>(&mut self, array: &JsonArray<E>) -> &mut Self {
        let child = self.document_mut().adopt(array.document(), array.node());
        self.link_last(child);
        self
    }

    /// Appends a copy of the tree of `element`, sharing its text.
    pub fn append_element<E: Borrow<Document>>(&mut self, element: &Element<E>) -> &mut Self {
        match element {
            Element::Object(object) => self.append_object(object),
            Element::Array(array) => self.append_array(array),
        }
    }

    /// Inserts a scalar so that it ends up at `index`. `index` may equal the
    /// length, which appends.
    ///
    /// # Errors
    ///
    /// Fails if `index` is past the end or the number is not finite. The
    /// array is unchanged on failure.
    pub fn insert<'v>(&mut self, index: usize, value: impl Into<Scalar<'v>>) -> Result<&mut Self, AccessError> {
        let prev = self.insertion_point(index)?;
        let child = self.document_mut().write_scalar(&value.into())?;
        self.link_after(prev, child);
        Ok(self)
    }

    /// Inserts a copy of the tree of `object` at `index`, sharing its text.
    ///
    /// # Errors
    ///
    /// Fails if `index` is past the end; the array is unchanged.
    pub fn insert_object<E: Borrow<Document>>(
        &mut self,
        index: usize,
        object: &JsonObject<E>,
    ) -> Result<&mut Self, AccessError> {
        let prev = self.insertion_point(index)?;
        let child = self.document_mut().adopt(object.document(), object.node());
        self.link_after(prev, child);
        Ok(self)
    }

    /// Inserts a copy of the tree of `array` at `index`, sharing its text.
    ///
    /// # Errors
    ///
    /// Fails if `index` is past the end; the array is unchanged.
    pub fn insert_array<E: Borrow<Document>>(
        &mut self,
        index: usize,
        array: &JsonArray<E>,
    ) -> Result<&mut Self, AccessError> {
        let prev = self.insertion_point(index)?;
        let child = self.document_mut().adopt(array.document(), array.node());
        self.link_after(prev, child);
        Ok(self)
    }

    /// Removes the element at `index` and returns it. Removed containers come
    /// back as documents of their own.
    ///
    /// Returns `None` for an out-of-range index. A value that cannot be
    /// decoded is still removed, and `None` is returned for it.
    pub fn remove(&mut self, index: usize) -> Option<Value<Document>> {
        let child = self.locate(index).ok()?;
        let removed = or_default(decode::owned_value(self.document(), child).map(Some), None);
        self.cache.invalidate();
        let node = self.node;
        self.document_mut().unlink(node, child);
        removed
    }

    /// Returns an editable view of the object at `index`.
    ///
    /// # Errors
    ///
    /// Fails if `index` is out of range or the element is not an object.
    pub fn get_object_mut(&mut self, index: usize) -> Result<JsonObject<&mut Document>, AccessError> {
        let id = decode::expect_kind(self.document(), self.locate(index)?, NodeKind::Object)?;
        Ok(JsonObject::view(self.document_mut(), id))
    }

    /// Returns an editable view of the array at `index`.
    ///
    /// # Errors
    ///
    /// Fails if `index` is out of range or the element is not an array.
    pub fn get_array_mut(&mut self, index: usize) -> Result<JsonArray<&mut Document>, AccessError> {
        let id = decode::expect_kind(self.document(), self.locate(index)?, NodeKind::Array)?;
        Ok(JsonArray::view(self.document_mut(), id))
    }
}

impl<D: Borrow<Document>> fmt::Display for JsonArray<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        serialize::write_node(f, self.document(), self.node, 0, 0)
    }
}

impl<D: Borrow<Document>> fmt::Debug for JsonArray<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JsonArray").field(&format_args!("{self}")).finish()
    }
}

impl<D: Borrow<Document>, E: Borrow<Document>> PartialEq<JsonArray<E>> for JsonArray<D> {
    fn eq(&self, other: &JsonArray<E>) -> bool {
        crate::equality::nodes_equal(self.document(), self.node, other.document(), other.node())
    }
}

impl<D: Borrow<Document> + Clone> Clone for JsonArray<D> {
    fn clone(&self) -> Self {
        Self {
            doc: self.doc.clone(),
            node: self.node,
            cache: self.cache.clone(),
        }
    }
}
