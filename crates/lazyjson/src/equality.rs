//! Deep structural equality between subtrees, possibly of different
//! documents.
//!
//! Containers match when they have the same kind and child count. Arrays then
//! compare by position. Objects need the same key set, and each key's first
//! field, the one lookups return, must hold equal values on both sides.
//! Scalars compare by decoded value, never by their raw text or the buffer it
//! lives in.
use alloc::{borrow::Cow, vec::Vec};

use crate::{
    decode,
    document::Document,
    node::{NodeId, NodeKind},
};

/// Whether the subtree at `a` in `a_doc` equals the subtree at `b` in `b_doc`.
pub(crate) fn nodes_equal(a_doc: &Document, a: NodeId, b_doc: &Document, b: NodeId) -> bool {
    let mut pending = Vec::new();
    pending.push((a, b));

    while let Some((a, b)) = pending.pop() {
        let kind = a_doc.kind(a);
        if !same_kind(kind, b_doc.kind(b)) {
            return false;
        }
        match kind {
            NodeKind::Array => {
                let mut left = a_doc.children(a);
                let mut right = b_doc.children(b);
                loop {
                    match (left.next(), right.next()) {
                        (Some(x), Some(y)) => pending.push((x, y)),
                        (None, None) => break,
                        _ => return false,
                    }
                }
            }
            NodeKind::Object => {
                if a_doc.children(a).count() != b_doc.children(b).count() {
                    return false;
                }
                for field in a_doc.children(a) {
                    let key = text(a_doc, field);
                    // Lookups see the first of several fields with one key.
                    if find_field(a_doc, a, &key) != Some(field) {
                        continue;
                    }
                    let Some(other) = find_field(b_doc, b, &key) else {
                        return false;
                    };
                    match (a_doc.field_value(field), b_doc.field_value(other)) {
                        (Some(x), Some(y)) => pending.push((x, y)),
                        (None, None) => {}
                        _ => return false,
                    }
                }
                if b_doc
                    .children(b)
                    .any(|field| find_field(a_doc, a, &text(b_doc, field)).is_none())
                {
                    return false;
                }
            }
            _ => {
                if !scalars_equal(a_doc, a, b_doc, b) {
                    return false;
                }
            }
        }
    }
    true
}

/// Strings match strings whether or not their text holds escapes.
fn same_kind(a: NodeKind, b: NodeKind) -> bool {
    a == b
        || matches!(
            (a, b),
            (NodeKind::String, NodeKind::EscapedString) | (NodeKind::EscapedString, NodeKind::String)
        )
}

/// Decoded text of a string or key node; the raw text if it cannot be
/// decoded.
fn text(doc: &Document, id: NodeId) -> Cow<'_, str> {
    decode::string(doc, id).unwrap_or(Cow::Borrowed(doc.raw(id)))
}

fn find_field(doc: &Document, object: NodeId, key: &str) -> Option<NodeId> {
    doc.children(object).find(|&field| text(doc, field) == key)
}

#[allow(clippy::float_cmp)]
fn scalars_equal(a_doc: &Document, a: NodeId, b_doc: &Document, b: NodeId) -> bool {
    match a_doc.kind(a) {
        NodeKind::Null | NodeKind::BooleanTrue | NodeKind::BooleanFalse => true,
        NodeKind::Integer => match (decode::long(a_doc, a), decode::long(b_doc, b)) {
            (Ok(x), Ok(y)) => x == y,
            _ => a_doc.raw(a) == b_doc.raw(b),
        },
        NodeKind::Float => match (decode::double(a_doc, a), decode::double(b_doc, b)) {
            (Ok(x), Ok(y)) => x == y,
            _ => a_doc.raw(a) == b_doc.raw(b),
        },
        _ => text(a_doc, a) == text(b_doc, b),
    }
}

#[cfg(test)]
mod tests {
    use crate::{Element, JsonArray, JsonObject};

    fn eq(a: &str, b: &str) -> bool {
        Element::parse(a).unwrap() == Element::parse(b).unwrap()
    }

    #[test]
    fn formatting_and_quoting_do_not_matter() {
        assert!(eq(r#"{"a":"x","b":[1,2.5]}"#, "{ b : [1, 2.5], 'a' : x }"));
        assert!(eq(r#"["A"]"#, r#"["A"]"#));
        assert!(eq(r#"{"a":1}"#, r#"{"a":1}"#));
    }

    #[test]
    fn kinds_and_values_must_match() {
        assert!(!eq("[1]", "[1.0]"));
        assert!(!eq("[1]", r#"["1"]"#));
        assert!(!eq("[true]", "[false]"));
        assert!(!eq("[null]", "[[]]"));
        assert!(!eq("[1,2]", "[2,1]"));
        assert!(eq("[1.50]", "[1.5]"));
    }

    #[test]
    fn objects_need_the_same_key_set() {
        assert!(!eq(r#"{"a":1}"#, r#"{"a":1,"b":2}"#));
        assert!(!eq(r#"{"a":1,"b":2}"#, r#"{"a":1}"#));
        assert!(!eq(r#"{"a":1}"#, r#"{"b":1}"#));
        assert!(eq(r#"{"a":{"b":[{}]}}"#, r#"{"a":{"b":[{}]}}"#));
    }

    #[test]
    fn repeated_keys_compare_by_first_occurrence() {
        let dup = r#"{"a":1,"a":2}"#;
        assert!(eq(dup, dup));
        assert!(eq(dup, r#"{"a":1,"a":3}"#));
        assert!(!eq(dup, r#"{"a":2,"a":1}"#));
        assert!(!eq(r#"{"a":1,"a":1}"#, r#"{"a":1,"b":1}"#));
        assert!(!eq(r#"{"a":1,"b":1}"#, r#"{"a":1,"a":1}"#));
    }

    #[test]
    fn strings_compare_decoded() {
        assert!(eq(r#"["\u0041"]"#, r#"["A"]"#));
        assert!(eq(r#"{"\u0041":1}"#, r#"{"A":1}"#));
        assert!(!eq(r#"["\n"]"#, r#"["n"]"#));
    }

    #[test]
    fn appended_values_compare_equal() {
        let mut a = JsonArray::new();
        a.append(1.5).unwrap().append("x").unwrap();
        let b = JsonArray::parse(r#"[1.5, 'x']"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn built_and_parsed_documents_compare_equal() {
        let mut built = JsonObject::new();
        built.put("name", "lazy").unwrap().put("n", 3).unwrap();
        let parsed = JsonObject::parse(r#"{"n":3,"name":"lazy"}"#).unwrap();
        assert_eq!(built, parsed);
    }
}
