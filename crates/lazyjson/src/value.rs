use alloc::{borrow::Cow, string::String};
use core::{borrow::Borrow, fmt, fmt::Write as _};

use crate::{array::JsonArray, document::Document, object::JsonObject};

/// The kind of a JSON value, as reported in errors and by `kind_of`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`
    Null,
    /// `true` or `false`
    Boolean,
    /// A number without fraction or exponent.
    Integer,
    /// A number with a fraction or an exponent.
    Float,
    /// Quoted or bare text.
    String,
    /// `[...]`
    Array,
    /// `{...}`
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        })
    }
}

/// A decoded value read out of a document.
///
/// Scalars are materialized; containers stay lazy views over the document
/// `D` they were read from.
pub enum Value<D = Document> {
    /// `null`
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// An integer, decoded with wrapping 64-bit arithmetic.
    Integer(i64),
    /// A floating point number.
    Float(f64),
    /// Decoded string content.
    String(String),
    /// A nested object.
    Object(JsonObject<D>),
    /// A nested array.
    Array(JsonArray<D>),
}

impl<D: Borrow<Document>> Value<D> {
    /// The kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) => ValueKind::Integer,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::Object(_) => ValueKind::Object,
            Value::Array(_) => ValueKind::Array,
        }
    }

    /// Returns the string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as a double, for integers and floats.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean, if this is a boolean.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the object view, if this is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&JsonObject<D>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns the array view, if this is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&JsonArray<D>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }
}

impl<D: Borrow<Document>, E: Borrow<Document>> PartialEq<Value<E>> for Value<D> {
    fn eq(&self, other: &Value<E>) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            #[allow(clippy::float_cmp)]
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl<D: Borrow<Document>> fmt::Debug for Value<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Object(obj) => fmt::Debug::fmt(obj, f),
            Value::Array(arr) => fmt::Debug::fmt(arr, f),
        }
    }
}

impl<D: Borrow<Document>> fmt::Display for Value<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::String(s) => {
                f.write_char('"')?;
                write_escaped_string(s, f)?;
                f.write_char('"')
            }
            Value::Object(obj) => fmt::Display::fmt(obj, f),
            Value::Array(arr) => fmt::Display::fmt(arr, f),
        }
    }
}

/// A scalar to be written into a document.
///
/// Every primitive the mutation methods accept converts into this type, so
/// `obj.put("n", 1)`, `obj.put("s", "text")` and `obj.put("x", None::<i32>)`
/// all go through the same path.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar<'a> {
    /// `null`
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// A 32-bit integer.
    Int(i32),
    /// A 64-bit integer.
    Long(i64),
    /// A single precision float. Must be finite.
    Float(f32),
    /// A double precision float. Must be finite.
    Double(f64),
    /// Text, escaped on write if needed.
    String(Cow<'a, str>),
}

impl From<bool> for Scalar<'_> {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

impl From<i32> for Scalar<'_> {
    fn from(value: i32) -> Self {
        Scalar::Int(value)
    }
}

impl From<u32> for Scalar<'_> {
    fn from(value: u32) -> Self {
        Scalar::Long(i64::from(value))
    }
}

impl From<i64> for Scalar<'_> {
    fn from(value: i64) -> Self {
        Scalar::Long(value)
    }
}

impl From<f32> for Scalar<'_> {
    fn from(value: f32) -> Self {
        Scalar::Float(value)
    }
}

impl From<f64> for Scalar<'_> {
    fn from(value: f64) -> Self {
        Scalar::Double(value)
    }
}

impl<'a> From<&'a str> for Scalar<'a> {
    fn from(value: &'a str) -> Self {
        Scalar::String(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for Scalar<'a> {
    fn from(value: &'a String) -> Self {
        Scalar::String(Cow::Borrowed(value))
    }
}

impl From<String> for Scalar<'_> {
    fn from(value: String) -> Self {
        Scalar::String(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for Scalar<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Scalar::String(value)
    }
}

impl<'a, T: Into<Scalar<'a>>> From<Option<T>> for Scalar<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Scalar::Null, Into::into)
    }
}

/// Whether `c` must be written as an escape inside a JSON string.
pub(crate) fn needs_escape(c: char) -> bool {
    matches!(c, '"' | '\\' | '\u{2028}' | '\u{2029}') || c.is_control()
}

/// Writes one character as its JSON escape.
pub(crate) fn write_escaped_char<W: fmt::Write>(c: char, f: &mut W) -> fmt::Result {
    match c {
        '"' => f.write_str("\\\""),
        '\\' => f.write_str("\\\\"),
        '\u{08}' => f.write_str("\\b"),
        '\u{0C}' => f.write_str("\\f"),
        '\n' => f.write_str("\\n"),
        '\r' => f.write_str("\\r"),
        '\t' => f.write_str("\\t"),
        // Control characters all live in the BMP, so four hex digits suffice.
        c => write!(f, "\\u{:04X}", c as u32),
    }
}

/// Writes `src` with every character that cannot appear raw in a JSON string
/// escaped. Runs without such characters are written in one piece.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    let mut run_start = 0;
    for (i, c) in src.char_indices() {
        if needs_escape(c) {
            f.write_str(&src[run_start..i])?;
            write_escaped_char(c, f)?;
            run_start = i + c.len_utf8();
        }
    }
    f.write_str(&src[run_start..])
}
