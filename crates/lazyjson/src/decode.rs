//! On-demand conversion of raw node text into native values.
//!
//! Nothing is decoded at parse time. Integer decoding accumulates a negative
//! running total so the most negative value needs no special case, and wraps
//! on overflow like native fixed-width arithmetic.
use alloc::{
    borrow::Cow,
    string::{String, ToString},
};

use bstr::ByteSlice;

use crate::{
    array::JsonArray,
    document::Document,
    error::{AccessError, DecodeError},
    escape_buffer::{CodeUnit, UnicodeEscapeBuffer},
    node::{NodeId, NodeKind},
    object::JsonObject,
    value::{Value, ValueKind},
};

// ------------------------------------------------------------------------------------------------
// Text level
// ------------------------------------------------------------------------------------------------

/// Resolves backslash escapes. Text without escapes is returned borrowed.
pub(crate) fn unescape(raw: &str) -> Result<Cow<'_, str>, DecodeError> {
    let bytes = raw.as_bytes();
    let Some(first) = bytes.find_byte(b'\\') else {
        return Ok(Cow::Borrowed(raw));
    };
    let mut out = String::with_capacity(raw.len());
    out.push_str(&raw[..first]);

    let mut pos = first;
    while pos < bytes.len() {
        if bytes[pos] != b'\\' {
            let run_end = bytes[pos..].find_byte(b'\\').map_or(bytes.len(), |i| pos + i);
            out.push_str(&raw[pos..run_end]);
            pos = run_end;
            continue;
        }
        let escape_at = pos;
        let Some(&kind) = bytes.get(pos + 1) else {
            return Err(DecodeError::InvalidEscape { offset: escape_at });
        };
        pos += 2;
        let c = match kind {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{08}',
            b'f' => '\u{0C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => {
                let (c, next) = unicode_escape(bytes, pos, escape_at)?;
                pos = next;
                c
            }
            _ => return Err(DecodeError::InvalidEscape { offset: escape_at }),
        };
        out.push(c);
    }
    Ok(Cow::Owned(out))
}

/// Decodes the payload of a `\u` escape starting at `pos`, pairing surrogates.
/// Returns the character and the position after the consumed digits.
fn unicode_escape(bytes: &[u8], pos: usize, escape_at: usize) -> Result<(char, usize), DecodeError> {
    let invalid = DecodeError::InvalidUnicodeEscape { offset: escape_at };
    match code_unit(bytes, pos).ok_or_else(|| invalid.clone())? {
        CodeUnit::Scalar(c) => Ok((c, pos + 4)),
        CodeUnit::HighSurrogate(high) => {
            if bytes.get(pos + 4..pos + 6) == Some(b"\\u".as_slice()) {
                if let Some(CodeUnit::LowSurrogate(low)) = code_unit(bytes, pos + 6) {
                    if let Some(c) = CodeUnit::combine(high, low) {
                        return Ok((c, pos + 10));
                    }
                }
            }
            Err(invalid)
        }
        CodeUnit::LowSurrogate(_) => Err(invalid),
    }
}

fn code_unit(bytes: &[u8], pos: usize) -> Option<CodeUnit> {
    let digits = bytes.get(pos..pos + 4)?;
    let mut buffer = UnicodeEscapeBuffer::new();
    let mut unit = None;
    for &b in digits {
        unit = buffer.feed(b).ok()?;
    }
    unit
}

macro_rules! wrapping_decoder {
    ($name:ident, $ty:ty) => {
        pub(crate) fn $name(text: &str) -> Result<$ty, DecodeError> {
            let (negative, digits) = match text.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (false, text.strip_prefix('+').unwrap_or(text)),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(DecodeError::InvalidNumber {
                    text: text.to_string(),
                    target: stringify!($ty),
                });
            }
            let mut value: $ty = 0;
            for b in digits.bytes() {
                value = value.wrapping_mul(10).wrapping_sub(<$ty>::from(b - b'0'));
            }
            Ok(if negative { value } else { value.wrapping_neg() })
        }
    };
}

wrapping_decoder!(parse_i32, i32);
wrapping_decoder!(parse_i64, i64);

/// Standard decimal-to-double conversion: overflow gives an infinity,
/// underflow gives zero.
pub(crate) fn parse_f64(text: &str) -> Result<f64, DecodeError> {
    text.parse::<f64>().map_err(|_| DecodeError::InvalidNumber {
        text: text.to_string(),
        target: "double",
    })
}

// ------------------------------------------------------------------------------------------------
// Node level
// ------------------------------------------------------------------------------------------------

fn mismatch(expected: ValueKind, found: NodeKind) -> AccessError {
    AccessError::TypeMismatch {
        expected,
        found: found.value_kind(),
    }
}

/// String content of a node. Numbers yield their raw text and booleans their
/// literal.
pub(crate) fn string(doc: &Document, id: NodeId) -> Result<Cow<'_, str>, AccessError> {
    match doc.kind(id) {
        NodeKind::String | NodeKind::Field | NodeKind::Integer | NodeKind::Float => {
            Ok(Cow::Borrowed(doc.raw(id)))
        }
        NodeKind::EscapedString | NodeKind::EscapedField => Ok(unescape(doc.raw(id))?),
        NodeKind::BooleanTrue => Ok(Cow::Borrowed("true")),
        NodeKind::BooleanFalse => Ok(Cow::Borrowed("false")),
        kind @ (NodeKind::Null | NodeKind::Object | NodeKind::Array) => {
            Err(mismatch(ValueKind::String, kind))
        }
    }
}

pub(crate) fn int(doc: &Document, id: NodeId) -> Result<i32, AccessError> {
    match doc.kind(id) {
        NodeKind::Integer => Ok(parse_i32(doc.raw(id))?),
        #[allow(clippy::cast_possible_truncation)]
        NodeKind::Float => Ok(parse_f64(doc.raw(id))? as i32),
        NodeKind::String | NodeKind::EscapedString => Ok(parse_i32(&string(doc, id)?)?),
        kind => Err(mismatch(ValueKind::Integer, kind)),
    }
}

pub(crate) fn long(doc: &Document, id: NodeId) -> Result<i64, AccessError> {
    match doc.kind(id) {
        NodeKind::Integer => Ok(parse_i64(doc.raw(id))?),
        #[allow(clippy::cast_possible_truncation)]
        NodeKind::Float => Ok(parse_f64(doc.raw(id))? as i64),
        NodeKind::String | NodeKind::EscapedString => Ok(parse_i64(&string(doc, id)?)?),
        kind => Err(mismatch(ValueKind::Integer, kind)),
    }
}

pub(crate) fn double(doc: &Document, id: NodeId) -> Result<f64, AccessError> {
    match doc.kind(id) {
        NodeKind::Integer | NodeKind::Float => Ok(parse_f64(doc.raw(id))?),
        NodeKind::String | NodeKind::EscapedString => Ok(parse_f64(&string(doc, id)?)?),
        kind => Err(mismatch(ValueKind::Float, kind)),
    }
}

/// Booleans, plus the strings `"true"` and `"false"` in any case.
pub(crate) fn boolean(doc: &Document, id: NodeId) -> Result<bool, AccessError> {
    match doc.kind(id) {
        NodeKind::BooleanTrue => Ok(true),
        NodeKind::BooleanFalse => Ok(false),
        kind @ (NodeKind::String | NodeKind::EscapedString) => {
            let text = string(doc, id)?;
            let text = text.trim();
            if text.eq_ignore_ascii_case("true") {
                Ok(true)
            } else if text.eq_ignore_ascii_case("false") {
                Ok(false)
            } else {
                Err(mismatch(ValueKind::Boolean, kind))
            }
        }
        kind => Err(mismatch(ValueKind::Boolean, kind)),
    }
}

pub(crate) fn expect_kind(doc: &Document, id: NodeId, expected: NodeKind) -> Result<NodeId, AccessError> {
    let kind = doc.kind(id);
    if kind == expected {
        Ok(id)
    } else {
        Err(mismatch(expected.value_kind(), kind))
    }
}

fn scalar<D>(doc: &Document, id: NodeId) -> Result<Value<D>, AccessError> {
    Ok(match doc.kind(id) {
        NodeKind::Null => Value::Null,
        NodeKind::BooleanTrue => Value::Boolean(true),
        NodeKind::BooleanFalse => Value::Boolean(false),
        NodeKind::Integer => Value::Integer(parse_i64(doc.raw(id))?),
        NodeKind::Float => Value::Float(parse_f64(doc.raw(id))?),
        NodeKind::String
        | NodeKind::EscapedString
        | NodeKind::Field
        | NodeKind::EscapedField
        | NodeKind::Object
        | NodeKind::Array => Value::String(string(doc, id)?.into_owned()),
    })
}

/// Materializes a node, keeping containers as views into `doc`.
pub(crate) fn value(doc: &Document, id: NodeId) -> Result<Value<&Document>, AccessError> {
    match doc.kind(id) {
        NodeKind::Object => Ok(Value::Object(JsonObject::view(doc, id))),
        NodeKind::Array => Ok(Value::Array(JsonArray::view(doc, id))),
        _ => scalar(doc, id),
    }
}

/// Materializes a node, detaching containers into documents of their own.
pub(crate) fn owned_value(doc: &Document, id: NodeId) -> Result<Value<Document>, AccessError> {
    match doc.kind(id) {
        NodeKind::Object => Ok(Value::Object(JsonObject::from_document(doc.detach(id)))),
        NodeKind::Array => Ok(Value::Array(JsonArray::from_document(doc.detach(id)))),
        _ => scalar(doc, id),
    }
}
