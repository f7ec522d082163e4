use alloc::{string::String, sync::Arc};
use core::{borrow::Borrow, fmt};

use crate::{
    JsonArray, JsonObject, ParseError, ParserOptions,
    document::Document,
    error::SyntaxError,
    node::NodeKind,
    parser,
    value::ValueKind,
};

/// A parsed document whose root may be either container kind.
pub enum Element<D = Document> {
    /// The root is an object.
    Object(JsonObject<D>),
    /// The root is an array.
    Array(JsonArray<D>),
}

impl Element {
    /// Parses text with the default, lenient options.
    ///
    /// # Errors
    ///
    /// Fails on malformed input. The error carries the character offset.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_with(text, ParserOptions::default())
    }

    /// Parses text with explicit options.
    ///
    /// # Errors
    ///
    /// Fails on malformed input. The error carries the character offset.
    pub fn parse_with(text: &str, options: ParserOptions) -> Result<Self, ParseError> {
        Self::parse_shared(Arc::from(text), options)
    }

    /// Parses a buffer the caller already shares. The document keeps a
    /// reference to it instead of copying the text.
    ///
    /// # Errors
    ///
    /// Fails on malformed input. The error carries the character offset.
    pub fn parse_shared(source: Arc<str>, options: ParserOptions) -> Result<Self, ParseError> {
        let doc = parser::parse_document(source, options)?;
        Ok(Self::from_document(doc))
    }

    /// The root as an object.
    ///
    /// # Errors
    ///
    /// Returns the element unchanged if the root is an array.
    pub fn into_object(self) -> Result<JsonObject, Self> {
        match self {
            Element::Object(object) => Ok(object),
            other @ Element::Array(_) => Err(other),
        }
    }

    /// The root as an array.
    ///
    /// # Errors
    ///
    /// Returns the element unchanged if the root is an object.
    pub fn into_array(self) -> Result<JsonArray, Self> {
        match self {
            Element::Array(array) => Ok(array),
            other @ Element::Object(_) => Err(other),
        }
    }

    pub(crate) fn into_object_or_error(self, text: &str) -> Result<JsonObject, ParseError> {
        self.into_object()
            .map_err(|_| root_error(SyntaxError::UnexpectedRoot('{'), text))
    }

    pub(crate) fn into_array_or_error(self, text: &str) -> Result<JsonArray, ParseError> {
        self.into_array()
            .map_err(|_| root_error(SyntaxError::UnexpectedRoot('['), text))
    }

    /// The document backing this element.
    #[must_use]
    pub fn into_document(self) -> Document {
        match self {
            Element::Object(object) => object.into_document(),
            Element::Array(array) => array.into_document(),
        }
    }
}

/// Reported at the root's opening bracket.
fn root_error(source: SyntaxError, text: &str) -> ParseError {
    let start = text.len() - text.trim_start_matches([' ', '\t', '\n', '\r']).len();
    ParseError::at(source, text, start)
}

impl<D: Borrow<Document>> Element<D> {
    /// Opens a view of the root of `doc`. Backing the view with `&Document`
    /// reads a document without taking ownership, for example one shared
    /// between threads behind an `Arc`.
    pub fn from_document(doc: D) -> Self {
        let (root, kind) = {
            let doc = doc.borrow();
            (doc.root(), doc.kind(doc.root()))
        };
        if kind == NodeKind::Object {
            Element::Object(JsonObject::view(doc, root))
        } else {
            Element::Array(JsonArray::view(doc, root))
        }
    }

    /// Whether the root is an object or an array.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Element::Object(_) => ValueKind::Object,
            Element::Array(_) => ValueKind::Array,
        }
    }

    /// The root object, if the root is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&JsonObject<D>> {
        match self {
            Element::Object(object) => Some(object),
            Element::Array(_) => None,
        }
    }

    /// The root array, if the root is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&JsonArray<D>> {
        match self {
            Element::Array(array) => Some(array),
            Element::Object(_) => None,
        }
    }

    /// The root object for editing, if the root is an object.
    #[must_use]
    pub fn as_object_mut(&mut self) -> Option<&mut JsonObject<D>> {
        match self {
            Element::Object(object) => Some(object),
            Element::Array(_) => None,
        }
    }

    /// The root array for editing, if the root is an array.
    #[must_use]
    pub fn as_array_mut(&mut self) -> Option<&mut JsonArray<D>> {
        match self {
            Element::Array(array) => Some(array),
            Element::Object(_) => None,
        }
    }

    /// The document this element reads from.
    #[must_use]
    pub fn document(&self) -> &Document {
        match self {
            Element::Object(object) => object.document(),
            Element::Array(array) => array.document(),
        }
    }

    /// Renders the element as text; see [`JsonObject::serialize`].
    #[must_use]
    pub fn serialize(&self, indent: usize) -> String {
        match self {
            Element::Object(object) => object.serialize(indent),
            Element::Array(array) => array.serialize(indent),
        }
    }
}

impl<D: Borrow<Document>> fmt::Display for Element<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Object(object) => fmt::Display::fmt(object, f),
            Element::Array(array) => fmt::Display::fmt(array, f),
        }
    }
}

impl<D: Borrow<Document>> fmt::Debug for Element<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Object(object) => fmt::Debug::fmt(object, f),
            Element::Array(array) => fmt::Debug::fmt(array, f),
        }
    }
}

impl<D: Borrow<Document>, E: Borrow<Document>> PartialEq<Element<E>> for Element<D> {
    fn eq(&self, other: &Element<E>) -> bool {
        match (self, other) {
            (Element::Object(a), Element::Object(b)) => a == b,
            (Element::Array(a), Element::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl<D: Borrow<Document> + Clone> Clone for Element<D> {
    fn clone(&self) -> Self {
        match self {
            Element::Object(object) => Element::Object(object.clone()),
            Element::Array(array) => Element::Array(array.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_kind_decides_the_variant() {
        assert_eq!(Element::parse("{}").unwrap().kind(), ValueKind::Object);
        assert_eq!(Element::parse(" [ ] ").unwrap().kind(), ValueKind::Array);
        assert!(Element::parse("[1]").unwrap().as_object().is_none());
    }

    #[test]
    fn into_wrong_kind_returns_the_element() {
        let element = Element::parse("[1]").unwrap();
        let element = element.into_object().unwrap_err();
        assert_eq!(element.into_array().unwrap().get_int(0).unwrap(), 1);
    }

    #[test]
    fn wrong_root_reports_its_position() {
        let err = JsonArray::parse("\n {}").unwrap_err();
        assert_eq!(err.kind(), &SyntaxError::UnexpectedRoot('['));
        assert_eq!((err.offset, err.line, err.column), (2, 2, 2));
    }

    #[test]
    fn shared_source_is_not_copied() {
        let source: Arc<str> = Arc::from(r#"{"k":"v"}"#);
        let element = Element::parse_shared(source.clone(), ParserOptions::default()).unwrap();
        assert_eq!(Arc::strong_count(&source), 2);
        drop(element);
        assert_eq!(Arc::strong_count(&source), 1);
    }

    #[test]
    fn elements_compare_by_content() {
        let a = Element::parse(r#"{"a":[1,2]}"#).unwrap();
        let b = Element::parse(r#"{ a : [ 1 , 2 ] }"#).unwrap();
        let c = Element::parse("[1,2]").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
