//! `serde::Serialize` for the lazy tree. Values are decoded while they are
//! streamed into the serializer; nothing is materialized up front.
use core::borrow::Borrow;

use serde::{
    Serialize, Serializer,
    ser::{Error as _, SerializeMap, SerializeSeq},
};

use crate::{
    Element, JsonArray, JsonObject, Value, decode,
    document::Document,
    node::{NodeId, NodeKind},
};

/// One node of a document, serialized with its subtree.
struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl Serialize for NodeRef<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let Self { doc, id } = *self;
        match doc.kind(id) {
            NodeKind::Null => serializer.serialize_unit(),
            NodeKind::BooleanTrue => serializer.serialize_bool(true),
            NodeKind::BooleanFalse => serializer.serialize_bool(false),
            NodeKind::Integer => serializer.serialize_i64(decode::long(doc, id).map_err(S::Error::custom)?),
            NodeKind::Float => serializer.serialize_f64(decode::double(doc, id).map_err(S::Error::custom)?),
            NodeKind::String | NodeKind::EscapedString | NodeKind::Field | NodeKind::EscapedField => {
                serializer.serialize_str(&decode::string(doc, id).map_err(S::Error::custom)?)
            }
            NodeKind::Array => {
                let mut seq = serializer.serialize_seq(None)?;
                for child in doc.children(id) {
                    seq.serialize_element(&NodeRef { doc, id: child })?;
                }
                seq.end()
            }
            NodeKind::Object => {
                let mut map = serializer.serialize_map(None)?;
                for field in doc.children(id) {
                    map.serialize_key(&NodeRef { doc, id: field })?;
                    match doc.field_value(field) {
                        Some(value) => map.serialize_value(&NodeRef { doc, id: value })?,
                        None => map.serialize_value(&())?,
                    }
                }
                map.end()
            }
        }
    }
}

impl<D: Borrow<Document>> Serialize for JsonObject<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        NodeRef {
            doc: self.document(),
            id: self.node(),
        }
        .serialize(serializer)
    }
}

impl<D: Borrow<Document>> Serialize for JsonArray<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        NodeRef {
            doc: self.document(),
            id: self.node(),
        }
        .serialize(serializer)
    }
}

impl<D: Borrow<Document>> Serialize for Element<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Element::Object(object) => Serialize::serialize(object, serializer),
            Element::Array(array) => Serialize::serialize(array, serializer),
        }
    }
}

impl<D: Borrow<Document>> Serialize for Value<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Object(object) => Serialize::serialize(object, serializer),
            Value::Array(array) => Serialize::serialize(array, serializer),
        }
    }
}
