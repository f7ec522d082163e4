//! Accumulator for the four hexadecimal digits of a `\uXXXX` escape.
//!
//! [`UnicodeEscapeBuffer`] yields a UTF-16 code unit rather than a `char`:
//! surrogate halves are valid escape payloads and only make sense once the
//! decoder has seen the pair.

/// Buffer for up to four hexadecimal digits (`0-9`, `A-F`, `a-f`).
#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    value: u16,
    len: u8,
}

/// A code unit decoded from one escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CodeUnit {
    Scalar(char),
    HighSurrogate(u16),
    LowSurrogate(u16),
}

impl CodeUnit {
    fn classify(unit: u16) -> Self {
        match unit {
            0xD800..=0xDBFF => CodeUnit::HighSurrogate(unit),
            0xDC00..=0xDFFF => CodeUnit::LowSurrogate(unit),
            // Every other BMP value is a scalar value.
            _ => char::from_u32(u32::from(unit)).map_or(CodeUnit::LowSurrogate(unit), CodeUnit::Scalar),
        }
    }

    /// Combines a high and a low surrogate into the supplementary character.
    pub(crate) fn combine(high: u16, low: u16) -> Option<char> {
        let code = 0x1_0000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
        char::from_u32(code)
    }
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Feeds one byte. Returns `Ok(None)` until the fourth digit, then the
    /// decoded code unit, and resets for the next escape. A byte that is not
    /// a hex digit is an error.
    pub(crate) fn feed(&mut self, byte: u8) -> Result<Option<CodeUnit>, u8> {
        let digit = match byte {
            b'0'..=b'9' => byte - b'0',
            b'a'..=b'f' => byte - b'a' + 10,
            b'A'..=b'F' => byte - b'A' + 10,
            _ => return Err(byte),
        };
        self.value = (self.value << 4) | u16::from(digit);
        self.len += 1;
        if self.len < 4 {
            return Ok(None);
        }
        let unit = self.value;
        self.value = 0;
        self.len = 0;
        Ok(Some(CodeUnit::classify(unit)))
    }
}
