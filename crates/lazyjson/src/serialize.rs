//! Tree-to-text rendering.
//!
//! One writer covers both layouts: an indent unit of `0` is compact output,
//! anything larger puts each member on its own line. The walk keeps its own
//! stack of open containers, so rendering depth is not limited by the call
//! stack.
//!
//! Layout rules of the indented form:
//!
//! - object members always start on a new line, and `": "` separates key and
//!   value;
//! - an array with exactly one element is written inline, and its element is
//!   rendered at the array's own indent;
//! - empty containers still get their closing line, as `{\n}` and `[\n]`.
//!
//! Scalars are written from their spans, with two adjustments that keep the
//! output valid JSON. A number's leading `+` is dropped. String spans that
//! contain escapes keep every escape pair verbatim, but a raw `"` or control
//! character inside them (possible in single-quoted input) is escaped.
use alloc::{string::String, vec::Vec};
use core::fmt::{self, Write};

use crate::{
    document::Document,
    node::{NodeId, NodeKind},
    value::{needs_escape, write_escaped_char, write_escaped_string},
};

/// Renders the subtree at `node` with `unit` spaces per level.
pub(crate) fn to_string(doc: &Document, node: NodeId, unit: usize) -> String {
    let mut out = String::new();
    // Writing into a `String` cannot fail.
    let _ = write_node(&mut out, doc, node, unit, 0);
    out
}

struct Frame {
    object: bool,
    next: Option<NodeId>,
    first: bool,
    single: bool,
    indent: usize,
}

impl Frame {
    fn open<W: Write>(out: &mut W, doc: &Document, node: NodeId, indent: usize) -> Result<Self, fmt::Error> {
        let object = doc.kind(node) == NodeKind::Object;
        out.write_char(if object { '{' } else { '[' })?;
        let next = doc.first_child(node);
        let single = !object && next.is_some_and(|first| doc.next_sibling(first).is_none());
        Ok(Self {
            object,
            next,
            first: true,
            single,
            indent,
        })
    }

    fn close<W: Write>(&self, out: &mut W, unit: usize) -> fmt::Result {
        if self.object {
            newline(out, unit, self.indent)?;
            out.write_char('}')
        } else {
            if !self.single {
                newline(out, unit, self.indent)?;
            }
            out.write_char(']')
        }
    }
}

/// Writes the subtree at `node`, starting at nesting `indent`.
pub(crate) fn write_node<W: Write>(out: &mut W, doc: &Document, node: NodeId, unit: usize, indent: usize) -> fmt::Result {
    if !doc.kind(node).is_container() {
        return write_scalar(out, doc, node);
    }

    let mut stack: Vec<Frame> = Vec::new();
    stack.push(Frame::open(out, doc, node, indent)?);

    while let Some(frame) = stack.last_mut() {
        let Some(child) = frame.next else {
            frame.close(out, unit)?;
            stack.pop();
            continue;
        };
        frame.next = doc.next_sibling(child);
        let first = core::mem::replace(&mut frame.first, false);
        if !first {
            out.write_char(',')?;
        }

        let inner = frame.indent + unit;
        let (value, indent) = if frame.object {
            newline(out, unit, inner)?;
            write_quoted(out, doc, child)?;
            out.write_char(':')?;
            if unit > 0 {
                out.write_char(' ')?;
            }
            (doc.field_value(child), inner)
        } else if frame.single {
            (Some(child), frame.indent)
        } else {
            newline(out, unit, inner)?;
            (Some(child), inner)
        };

        match value {
            Some(value) if doc.kind(value).is_container() => {
                stack.push(Frame::open(out, doc, value, indent)?);
            }
            Some(value) => write_scalar(out, doc, value)?,
            None => out.write_str("null")?,
        }
    }
    Ok(())
}

/// A line break and `indent` spaces, or nothing in compact mode.
fn newline<W: Write>(out: &mut W, unit: usize, indent: usize) -> fmt::Result {
    if unit > 0 {
        out.write_char('\n')?;
        for _ in 0..indent {
            out.write_char(' ')?;
        }
    }
    Ok(())
}

fn write_scalar<W: Write>(out: &mut W, doc: &Document, node: NodeId) -> fmt::Result {
    match doc.kind(node) {
        NodeKind::Null => out.write_str("null"),
        NodeKind::BooleanTrue => out.write_str("true"),
        NodeKind::BooleanFalse => out.write_str("false"),
        NodeKind::Integer | NodeKind::Float => {
            let raw = doc.raw(node);
            out.write_str(raw.strip_prefix('+').unwrap_or(raw))
        }
        NodeKind::String | NodeKind::EscapedString | NodeKind::Field | NodeKind::EscapedField => {
            write_quoted(out, doc, node)
        }
        NodeKind::Object | NodeKind::Array => unreachable!("containers are walked, not written as scalars"),
    }
}

/// Writes a string or key node between double quotes.
fn write_quoted<W: Write>(out: &mut W, doc: &Document, node: NodeId) -> fmt::Result {
    out.write_char('"')?;
    if doc.kind(node).is_escaped() {
        write_normalized(doc.raw(node), out)?;
    } else {
        write_escaped_string(doc.raw(node), out)?;
    }
    out.write_char('"')
}

/// Writes text that already contains escapes. Existing escape pairs are kept
/// as they are; characters that may not appear raw in a double-quoted string
/// are escaped.
fn write_normalized<W: Write>(raw: &str, out: &mut W) -> fmt::Result {
    let mut run_start = 0;
    let mut chars = raw.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            if chars.next().is_none() {
                out.write_str(&raw[run_start..i])?;
                out.write_str("\\\\")?;
                run_start = raw.len();
            }
        } else if needs_escape(c) {
            out.write_str(&raw[run_start..i])?;
            write_escaped_char(c, out)?;
            run_start = i + c.len_utf8();
        }
    }
    out.write_str(&raw[run_start..])
}
