//! A lazily decoded, mutable JSON document tree.
//!
//! Parsing builds a flat arena of nodes that only record where each value's
//! text lives. Nothing is decoded until an accessor asks for it, so reading a
//! few fields of a large document costs little more than one scan of it.
//!
//! ```
//! let doc = lazyjson::parse(r#"{"a": 1, "b": [1, 2, 3]}"#)?;
//! let obj = doc.as_object().unwrap();
//! assert_eq!(obj.get_array("b")?.get_int(1)?, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The parser also takes a few liberties with the grammar unless
//! [`ParserOptions::strict`] is set: single-quoted strings, bare words as keys
//! and values, and keywords with a capital first letter.
//!
//! ```
//! let obj = lazyjson::JsonObject::parse("{'x': {y: -1.5}, flag: True}")?;
//! assert_eq!(obj.get_object("x")?.get_double("y")?, -1.5);
//! assert!(obj.get_bool("flag")?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Edits write new text into a per-document mutation buffer. Attaching a
//! subtree from another document copies its node records but none of its
//! text; both documents then share the underlying buffers.
//!
//! ```
//! use lazyjson::{JsonArray, JsonObject};
//!
//! let mut root = JsonObject::new();
//! root.put("name", "lazy")?.put("version", 1)?;
//! root.put_array("tags", &JsonArray::parse(r#"["a","b"]"#)?);
//! assert_eq!(root.to_string(), r#"{"name":"lazy","version":1,"tags":["a","b"]}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod access;
mod buffer;
mod cursor;
mod decode;
mod escape_buffer;
mod node;

mod array;
mod document;
mod element;
mod equality;
mod error;
mod object;
mod options;
mod parser;
mod serialize;
mod value;

#[cfg(feature = "serde")]
mod serde_impl;

#[cfg(test)]
mod tests;

use alloc::sync::Arc;

pub use array::JsonArray;
pub use document::Document;
pub use element::Element;
pub use error::{AccessError, DecodeError, ParseError, SyntaxError};
pub use object::JsonObject;
pub use options::ParserOptions;
pub use value::{Scalar, Value, ValueKind};

/// Parses a document whose root is an object or an array.
///
/// # Errors
///
/// Fails on malformed input. The error carries the character offset.
pub fn parse(text: &str) -> Result<Element, ParseError> {
    Element::parse(text)
}

/// Parses a document with explicit options.
///
/// # Errors
///
/// Fails on malformed input. The error carries the character offset.
pub fn parse_with(text: &str, options: ParserOptions) -> Result<Element, ParseError> {
    Element::parse_with(text, options)
}

/// Parses a buffer the caller already shares, without copying it.
///
/// # Errors
///
/// Fails on malformed input. The error carries the character offset.
pub fn parse_shared(source: Arc<str>, options: ParserOptions) -> Result<Element, ParseError> {
    Element::parse_shared(source, options)
}
