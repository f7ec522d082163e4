use alloc::{borrow::Cow, string::String, sync::Arc};
use core::{
    borrow::{Borrow, BorrowMut},
    fmt,
};

use crate::{
    JsonArray, ParseError, ParserOptions,
    access::typed_accessors,
    cursor::CursorCache,
    decode,
    document::Document,
    element::Element,
    error::AccessError,
    node::{NodeId, NodeKind},
    serialize,
    value::{Scalar, Value},
};

/// An object view: key lookup over a container node.
///
/// `D` decides what the view holds on to: [`Document`] for a root that owns
/// its tree, `&Document` for a read-only view of a nested object, or
/// `&mut Document` for a view that can edit it.
///
/// Key lookups are linear scans. The last matched field is remembered, and
/// the field count is computed once and cached until the next mutation made
/// through this view.
pub struct JsonObject<D = Document> {
    doc: D,
    node: NodeId,
    cache: CursorCache,
}

impl JsonObject {
    /// An empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::from_document(Document::new(NodeKind::Object))
    }

    /// Parses text whose root must be an object.
    ///
    /// # Errors
    ///
    /// Fails on malformed input or when the root is an array.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_with(text, ParserOptions::default())
    }

    /// Parses text whose root must be an object, with explicit options.
    ///
    /// # Errors
    ///
    /// Fails on malformed input or when the root is an array.
    pub fn parse_with(text: &str, options: ParserOptions) -> Result<Self, ParseError> {
        Element::parse_shared(Arc::from(text), options)?.into_object_or_error(text)
    }

    pub(crate) fn from_document(doc: Document) -> Self {
        let node = doc.root();
        Self::view(doc, node)
    }

    /// The document backing this object.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.doc
    }
}

impl Default for JsonObject {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> JsonObject<D> {
    pub(crate) fn view(doc: D, node: NodeId) -> Self {
        Self {
            doc,
            node,
            cache: CursorCache::default(),
        }
    }
}

impl<D: Borrow<Document>> JsonObject<D> {
    /// The document this view reads from.
    #[must_use]
    pub fn document(&self) -> &Document {
        self.doc.borrow()
    }

    pub(crate) fn node(&self) -> NodeId {
        self.node
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len(self.document(), self.node)
    }

    /// Whether the object has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a field named `key` exists.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        self.field(key).is_some()
    }

    /// Field names in document order, decoded. A key with a malformed
    /// escape is yielded as written.
    pub fn keys(&self) -> impl Iterator<Item = Cow<'_, str>> + '_ {
        let doc = self.document();
        doc.children(self.node)
            .map(move |field| decode::string(doc, field).unwrap_or(Cow::Borrowed(doc.raw(field))))
    }

    /// Copies this object into a document of its own. Text buffers are
    /// shared, node records are copied.
    #[must_use]
    pub fn detach(&self) -> JsonObject {
        JsonObject::from_document(self.document().detach(self.node))
    }

    /// Renders the object as text. `indent` is the number of spaces per
    /// nesting level; `0` renders compactly.
    #[must_use]
    pub fn serialize(&self, indent: usize) -> String {
        serialize::to_string(self.document(), self.node, indent)
    }

    fn field(&self, key: &str) -> Option<NodeId> {
        self.cache.find_field(self.document(), self.node, key)
    }

    fn locate(&self, key: &str) -> Result<NodeId, AccessError> {
        self.field(key)
            .and_then(|field| self.document().field_value(field))
            .ok_or_else(|| AccessError::unknown_field(key))
    }
}

typed_accessors!(JsonObject, &str, key, "stored under `key`");

impl<D: BorrowMut<Document>> JsonObject<D> {
    fn document_mut(&mut self) -> &mut Document {
        self.doc.borrow_mut()
    }

    /// Stores a scalar under `key`, replacing the value of an existing field
    /// in place or appending a new field.
    ///
    /// # Errors
    ///
    /// Fails for NaN and infinite numbers, leaving the object unchanged.
    pub fn put<'v>(&mut self, key: &str, value: impl Into<Scalar<'v>>) -> Result<&mut Self, AccessError> {
        let scalar = value.into();
        let value = self.document_mut().write_scalar(&scalar)?;
        self.attach(key, value);
        Ok(self)
    }

    /// Stores a copy of the tree of `object` under `key`. The text of the
    /// adopted values is shared with `object`'s document, not copied.
    pub fn put_object<E: Borrow<Document>>(&mut self, key: &str, object: &JsonObject<E>) -> &mut Self {
        let value = self.document_mut().adopt(object.document(), object.node());
        self.attach(key, value);
        self
    }

    /// Stores a copy of the tree of `array` under `key`, sharing its text.
    pub fn put_array<E: Borrow<Document>>(&mut self, key: &str, array: &JsonArray<E>) -> &mut Self {
        let value = self.document_mut().adopt(array.document(), array.node());
        self.attach(key, value);
        self
    }

    /// Stores a copy of the tree of `element` under `key`, sharing its text.
    pub fn put_element<E: Borrow<Document>>(&mut self, key: &str, element: &Element<E>) -> &mut Self {
        match element {
            Element::Object(object) => self.put_object(key, object),
            Element::Array(array) => self.put_array(key, array),
        }
    }

    fn attach(&mut self, key: &str, value: NodeId) {
        self.cache.invalidate();
        let node = self.node;
        let doc = self.document_mut();
        match doc.find_field(node, key) {
            Some(field) => doc.set_field_value(field, value),
            None => {
                let field = doc.write_field(key, value);
                doc.append_child(node, field);
            }
        }
    }

    /// Removes the field named `key` and returns its value. Removed
    /// containers come back as documents of their own.
    ///
    /// Returns `None` when the key is missing. A value that cannot be decoded
    /// is still removed, and `None` is returned for it.
    pub fn remove(&mut self, key: &str) -> Option<Value<Document>> {
        let field = self.field(key)?;
        let doc = self.document();
        let removed = doc
            .field_value(field)
            .and_then(|value| crate::access::or_default(decode::owned_value(doc, value).map(Some), None));
        self.cache.invalidate();
        let node = self.node;
        self.document_mut().unlink(node, field);
        removed
    }

    /// Returns an editable view of the object stored under `key`.
    ///
    /// # Errors
    ///
    /// Fails if there is no such field or it is not an object.
    pub fn get_object_mut(&mut self, key: &str) -> Result<JsonObject<&mut Document>, AccessError> {
        let id = decode::expect_kind(self.document(), self.locate(key)?, NodeKind::Object)?;
        Ok(JsonObject::view(self.document_mut(), id))
    }

    /// Returns an editable view of the array stored under `key`.
    ///
    /// # Errors
    ///
    /// Fails if there is no such field or it is not an array.
    pub fn get_array_mut(&mut self, key: &str) -> Result<JsonArray<&mut Document>, AccessError> {
        let id = decode::expect_kind(self.document(), self.locate(key)?, NodeKind::Array)?;
        Ok(JsonArray::view(self.document_mut(), id))
    }
}

impl<D: Borrow<Document>> fmt::Display for JsonObject<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        serialize::write_node(f, self.document(), self.node, 0, 0)
    }
}

impl<D: Borrow<Document>> fmt::Debug for JsonObject<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JsonObject").field(&format_args!("{self}")).finish()
    }
}

impl<D: Borrow<Document>, E: Borrow<Document>> PartialEq<JsonObject<E>> for JsonObject<D> {
    fn eq(&self, other: &JsonObject<E>) -> bool {
        crate::equality::nodes_equal(self.document(), self.node, other.document(), other.node())
    }
}

impl<D: Borrow<Document> + Clone> Clone for JsonObject<D> {
    fn clone(&self) -> Self {
        Self {
            doc: self.doc.clone(),
            node: self.node,
            cache: self.cache.clone(),
        }
    }
}
