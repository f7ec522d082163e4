use alloc::string::{String, ToString};

use thiserror::Error;

use crate::value::ValueKind;

/// A structural error in the input text, reported with the character offset
/// at which it was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source} at offset {offset}")]
pub struct ParseError {
    pub(crate) source: SyntaxError,
    /// Character (not byte) offset of the failure.
    pub offset: usize,
    /// 1-based line of the failure.
    pub line: usize,
    /// 1-based column of the failure, in characters.
    pub column: usize,
}

impl ParseError {
    pub(crate) fn at(source: SyntaxError, text: &str, byte_pos: usize) -> Self {
        let consumed = text.get(..byte_pos).unwrap_or(text);
        let mut line = 1;
        let mut column = 1;
        let mut offset = 0;
        for c in consumed.chars() {
            offset += 1;
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self {
            source,
            offset,
            line,
            column,
        }
    }

    /// The grammar rule that was violated.
    #[must_use]
    pub fn kind(&self) -> &SyntaxError {
        &self.source
    }

    /// Human readable description, without the position.
    #[must_use]
    pub fn message(&self) -> String {
        self.source.to_string()
    }
}

/// The grammar rule a [`ParseError`] reports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A character that cannot appear at this point of the grammar.
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    /// A backslash followed by a character that is not a JSON escape.
    #[error("invalid escape character '{0}'")]
    InvalidEscape(char),
    /// An integer part with a superfluous leading `0`.
    #[error("leading zero in number")]
    LeadingZero,
    /// A sign or decimal point not followed by a digit.
    #[error("digit expected")]
    DigitExpected,
    /// An `e`/`E` not followed by exponent digits.
    #[error("exponent part expected")]
    ExponentExpected,
    /// The first non-whitespace character is neither `{` nor `[`.
    #[error("document must start with '{{' or '['")]
    NotAContainer,
    /// The document is a container, but not the kind that was asked for.
    #[error("document must start with '{0}'")]
    UnexpectedRoot(char),
    /// A closing bracket directly after a comma.
    #[error("trailing comma before '{0}'")]
    TrailingComma(char),
    /// A closing bracket that does not match the open container.
    #[error("mismatched closing '{0}'")]
    MismatchedClose(char),
    /// Nesting deeper than [`ParserOptions::max_depth`](crate::ParserOptions::max_depth).
    #[error("nesting exceeds the depth limit of {0}")]
    DepthLimitExceeded(usize),
    /// Non-whitespace text after the root container was closed.
    #[error("unexpected characters after the document")]
    TrailingCharacters,
    /// The text ended while a container was still open.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

/// Failure to turn the raw text of a node into a native value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A backslash escape that is truncated or unknown.
    #[error("invalid escape sequence at offset {offset}")]
    InvalidEscape {
        /// Byte offset within the value text.
        offset: usize,
    },
    /// A `\u` escape with bad hex digits or an unpaired surrogate.
    #[error("invalid unicode escape at offset {offset}")]
    InvalidUnicodeEscape {
        /// Byte offset within the value text.
        offset: usize,
    },
    /// Text that does not form a number of the requested type.
    #[error("'{text}' is not a valid {target}")]
    InvalidNumber {
        /// The offending text.
        text: String,
        /// Name of the requested type.
        target: &'static str,
    },
}

/// Failure of a typed accessor or of a mutation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    /// The value exists but has an incompatible kind.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Kind the accessor needs.
        expected: ValueKind,
        /// Kind that is stored.
        found: ValueKind,
    },
    /// No field with this key.
    #[error("unknown field '{0}'")]
    UnknownField(String),
    /// Index past the end of an array.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Requested index.
        index: usize,
        /// Length of the array at the time of the request.
        len: usize,
    },
    /// The stored text could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// NaN and the infinities have no JSON representation.
    #[error("cannot store non-finite number {0}")]
    NonFiniteNumber(f64),
}

impl AccessError {
    pub(crate) fn unknown_field(key: &str) -> Self {
        AccessError::UnknownField(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_count_characters() {
        let err = ParseError::at(SyntaxError::InvalidCharacter('x'), "[\"é\",\nx]", 7);
        assert_eq!(err.offset, 6);
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 1);
        assert_eq!(err.to_string(), "invalid character 'x' at offset 6");
        assert_eq!(err.message(), "invalid character 'x'");
    }

    #[test]
    fn access_error_messages() {
        let err = AccessError::TypeMismatch {
            expected: ValueKind::Integer,
            found: ValueKind::Object,
        };
        assert_eq!(err.to_string(), "expected integer, found object");
        let err = AccessError::from(DecodeError::InvalidEscape { offset: 3 });
        assert_eq!(err.to_string(), "invalid escape sequence at offset 3");
    }
}
