//! Single-pass, non-recursive parser building a [`Document`] node tree.
//!
//! The scan keeps an explicit stack of open containers (and of object fields
//! still waiting for their value), so nesting depth is bounded by memory, not
//! by the call stack. Values are not decoded here: every leaf records the span
//! of its raw text in the source buffer.
//!
//! On top of standard JSON the parser accepts, unless
//! [`ParserOptions::strict`] is set:
//!
//! - single-quoted strings, as keys and as values;
//! - bare keys made of `[A-Za-z0-9._]`;
//! - bare values of the same characters, which become strings unless the whole
//!   run is a keyword. Only the first letter of a keyword may be upper case:
//!   `Null` is null, `NULL` is the string `"NULL"`.
use alloc::{sync::Arc, vec::Vec};

use bstr::ByteSlice;
use tracing::debug;

use crate::{
    buffer::{BufferId, Span},
    document::Document,
    error::{ParseError, SyntaxError},
    node::{Node, NodeId, NodeKind},
    options::ParserOptions,
};

mod literal;
mod numbers;
#[cfg(test)]
mod tests;

use literal::BareWord;
use numbers::NumberLexeme;

/// Parses `source` into a document that shares the buffer.
pub(crate) fn parse_document(source: Arc<str>, options: ParserOptions) -> Result<Document, ParseError> {
    let mut parser = Parser::new(&source, Document::with_source(source.clone()), options);
    parser.run()?;
    debug!(
        nodes = parser.doc.node_count(),
        bytes = source.len(),
        "parsed document"
    );
    Ok(parser.doc)
}

// ------------------------------------------------------------------------------------------------
// State machine
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    ObjectReadKey,
    ObjectReadColon,
    ObjectReadValue,
    ObjectReadComma,
    ArrayReadValue,
    ArrayReadComma,
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Characters of bare keys and bare values.
fn is_bare(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'.' || b == b'_'
}

struct Parser<'src> {
    text: &'src str,
    bytes: &'src [u8],
    pos: usize,
    options: ParserOptions,
    doc: Document,
    /// Open containers, each possibly followed by the field awaiting a value.
    stack: Vec<NodeId>,
    depth: usize,
    state: ParseState,
    /// Nothing has been read since the innermost container opened, so a
    /// closing bracket is legal.
    first_value: bool,
}

impl<'src> Parser<'src> {
    fn new(text: &'src str, doc: Document, options: ParserOptions) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            options,
            doc,
            stack: Vec::with_capacity(32),
            depth: 0,
            state: ParseState::ArrayReadValue,
            first_value: true,
        }
    }

    fn run(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'{') => self.open(NodeKind::Object)?,
            Some(b'[') => self.open(NodeKind::Array)?,
            Some(_) => return Err(self.error(SyntaxError::NotAContainer)),
            None => return Err(self.error(SyntaxError::UnexpectedEndOfInput)),
        }

        while !self.stack.is_empty() {
            let Some(c) = self.peek() else {
                return Err(self.error(SyntaxError::UnexpectedEndOfInput));
            };
            if is_whitespace(c) {
                self.pos += 1;
                continue;
            }
            match self.state {
                ParseState::ObjectReadKey => self.read_key(c)?,
                ParseState::ObjectReadColon => {
                    if c != b':' {
                        return Err(self.invalid_char());
                    }
                    self.pos += 1;
                    self.state = ParseState::ObjectReadValue;
                }
                ParseState::ObjectReadValue => self.read_value(c)?,
                ParseState::ObjectReadComma => {
                    self.read_separator(c, b'}', ParseState::ObjectReadKey)?;
                }
                ParseState::ArrayReadValue => match c {
                    b']' => self.close_after_open(b']')?,
                    b'}' => return Err(self.error(SyntaxError::MismatchedClose('}'))),
                    _ => self.read_value(c)?,
                },
                ParseState::ArrayReadComma => {
                    self.read_separator(c, b']', ParseState::ArrayReadValue)?;
                }
            }
        }

        if self.options.reject_trailing_characters {
            self.skip_whitespace();
            if self.pos < self.bytes.len() {
                return Err(self.error(SyntaxError::TrailingCharacters));
            }
        }
        Ok(())
    }

    // --------------------------------------------------------------------------------------------
    // States
    // --------------------------------------------------------------------------------------------

    fn read_key(&mut self, c: u8) -> Result<(), ParseError> {
        match c {
            b'"' => self.quoted_key(b'"'),
            b'\'' if !self.options.strict => self.quoted_key(b'\''),
            b'}' => self.close_after_open(b'}'),
            b']' => Err(self.error(SyntaxError::MismatchedClose(']'))),
            c if is_bare(c) && !self.options.strict => {
                let start = self.pos;
                self.skip_bare();
                self.push_field(NodeKind::Field, start, self.pos);
                Ok(())
            }
            _ => Err(self.invalid_char()),
        }
    }

    fn quoted_key(&mut self, quote: u8) -> Result<(), ParseError> {
        let start = self.pos + 1;
        let escaped = self.skip_quoted(quote)?;
        let kind = if escaped { NodeKind::EscapedField } else { NodeKind::Field };
        self.push_field(kind, start, self.pos);
        self.pos += 1;
        Ok(())
    }

    fn push_field(&mut self, kind: NodeKind, start: usize, end: usize) {
        let field = self.leaf(kind, Some(self.span(start, end)));
        self.stack.push(field);
        self.first_value = false;
        self.state = ParseState::ObjectReadColon;
    }

    fn read_value(&mut self, c: u8) -> Result<(), ParseError> {
        match c {
            b'{' => self.open(NodeKind::Object),
            b'[' => self.open(NodeKind::Array),
            b'"' => self.quoted_value(b'"'),
            b'\'' if !self.options.strict => self.quoted_value(b'\''),
            b'+' | b'-' | b'0'..=b'9' => {
                let start = self.pos;
                let kind = match self.scan_number()? {
                    NumberLexeme::Integer => NodeKind::Integer,
                    NumberLexeme::Float => NodeKind::Float,
                };
                self.finish_leaf(kind, start);
                Ok(())
            }
            c if is_bare(c) => self.bare_value(),
            _ => Err(self.invalid_char()),
        }
    }

    fn quoted_value(&mut self, quote: u8) -> Result<(), ParseError> {
        let start = self.pos + 1;
        let escaped = self.skip_quoted(quote)?;
        let kind = if escaped { NodeKind::EscapedString } else { NodeKind::String };
        self.finish_leaf(kind, start);
        self.pos += 1;
        Ok(())
    }

    fn bare_value(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let first = self.current_char();
        self.skip_bare();
        match literal::classify(&self.bytes[start..self.pos], self.options.strict) {
            BareWord::Null => self.finish_leaf(NodeKind::Null, start),
            BareWord::True => self.finish_leaf(NodeKind::BooleanTrue, start),
            BareWord::False => self.finish_leaf(NodeKind::BooleanFalse, start),
            BareWord::Text if self.options.strict => {
                self.pos = start;
                return Err(self.error(SyntaxError::InvalidCharacter(first)));
            }
            BareWord::Text => self.finish_leaf(NodeKind::String, start),
        }
        Ok(())
    }

    fn read_separator(&mut self, c: u8, closer: u8, next: ParseState) -> Result<(), ParseError> {
        match c {
            b',' => {
                self.pos += 1;
                self.state = next;
                Ok(())
            }
            c if c == closer => self.close(closer),
            b'}' | b']' => Err(self.error(SyntaxError::MismatchedClose(char::from(c)))),
            _ => Err(self.invalid_char()),
        }
    }

    // --------------------------------------------------------------------------------------------
    // Tree building
    // --------------------------------------------------------------------------------------------

    fn span(&self, start: usize, end: usize) -> Span {
        Span {
            buffer: BufferId::SOURCE,
            start,
            end,
        }
    }

    /// Creates a node and links it under the top of the stack.
    fn leaf(&mut self, kind: NodeKind, span: Option<Span>) -> NodeId {
        let id = self.doc.push_node(Node::new(kind, span));
        if let Some(&parent) = self.stack.last() {
            self.doc.link_child(parent, id);
        }
        id
    }

    /// Records a scalar spanning from `start` to the current position.
    fn finish_leaf(&mut self, kind: NodeKind, start: usize) {
        self.leaf(kind, Some(self.span(start, self.pos)));
        self.finish_value();
    }

    fn open(&mut self, kind: NodeKind) -> Result<(), ParseError> {
        if let Some(max) = self.options.max_depth {
            if self.depth >= max {
                return Err(self.error(SyntaxError::DepthLimitExceeded(max)));
            }
        }
        self.depth += 1;
        let id = self.leaf(kind, None);
        self.stack.push(id);
        self.pos += 1;
        self.first_value = true;
        self.state = if kind == NodeKind::Object {
            ParseState::ObjectReadKey
        } else {
            ParseState::ArrayReadValue
        };
        Ok(())
    }

    /// A closer where a key or value was expected is only legal in an empty
    /// container.
    fn close_after_open(&mut self, closer: u8) -> Result<(), ParseError> {
        if self.first_value {
            self.close(closer)
        } else {
            Err(self.error(SyntaxError::TrailingComma(char::from(closer))))
        }
    }

    fn close(&mut self, closer: u8) -> Result<(), ParseError> {
        let expected = if closer == b'}' { NodeKind::Object } else { NodeKind::Array };
        match self.stack.last() {
            Some(&top) if self.doc.kind(top) == expected => {}
            _ => return Err(self.error(SyntaxError::MismatchedClose(char::from(closer)))),
        }
        self.stack.pop();
        self.depth -= 1;
        self.pos += 1;
        self.finish_value();
        Ok(())
    }

    /// A value is complete: drop its field, if any, and expect a separator.
    fn finish_value(&mut self) {
        if let Some(&top) = self.stack.last() {
            if self.doc.kind(top).is_field() {
                self.stack.pop();
            }
        }
        self.first_value = false;
        if let Some(&top) = self.stack.last() {
            self.state = if self.doc.kind(top) == NodeKind::Object {
                ParseState::ObjectReadComma
            } else {
                ParseState::ArrayReadComma
            };
        }
    }

    // --------------------------------------------------------------------------------------------
    // Scanning
    // --------------------------------------------------------------------------------------------

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn current_char(&self) -> char {
        let (c, _) = bstr::decode_utf8(&self.bytes[self.pos..]);
        c.unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(is_whitespace) {
            self.pos += 1;
        }
    }

    fn skip_bare(&mut self) {
        while self.peek().is_some_and(is_bare) {
            self.pos += 1;
        }
    }

    /// Skips a quoted string starting at the opening quote and stops on the
    /// closing one. Returns whether any escape was seen.
    fn skip_quoted(&mut self, quote: u8) -> Result<bool, ParseError> {
        self.pos += 1;
        let mut escaped = false;
        loop {
            let Some(i) = self.bytes[self.pos..].find_byteset([quote, b'\\']) else {
                self.pos = self.bytes.len();
                return Err(self.error(SyntaxError::UnexpectedEndOfInput));
            };
            self.pos += i;
            if self.bytes[self.pos] == quote {
                return Ok(escaped);
            }
            self.pos += 1;
            match self.peek() {
                Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' | b'u') => {
                    escaped = true;
                    self.pos += 1;
                }
                Some(_) => return Err(self.error(SyntaxError::InvalidEscape(self.current_char()))),
                None => return Err(self.error(SyntaxError::UnexpectedEndOfInput)),
            }
        }
    }

    // --------------------------------------------------------------------------------------------
    // Errors
    // --------------------------------------------------------------------------------------------

    fn error(&self, source: SyntaxError) -> ParseError {
        ParseError::at(source, self.text, self.pos)
    }

    fn invalid_char(&self) -> ParseError {
        self.error(SyntaxError::InvalidCharacter(self.current_char()))
    }
}
