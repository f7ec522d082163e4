use super::Parser;
use crate::error::{ParseError, SyntaxError};

/// Lexical class of a scanned number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NumberLexeme {
    /// No fraction and no exponent.
    Integer,
    /// Has a fraction or an exponent.
    Float,
}

impl Parser<'_> {
    /// Validates the number at the current position and stops on the first
    /// byte after it. The integer part may carry one leading sign, `+` or `-`.
    pub(super) fn scan_number(&mut self) -> Result<NumberLexeme, ParseError> {
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                if self.peek().is_some_and(|b| b.is_ascii_digit()) {
                    return Err(self.error(SyntaxError::LeadingZero));
                }
            }
            Some(b'1'..=b'9') => self.skip_digits(),
            Some(_) => return Err(self.error(SyntaxError::DigitExpected)),
            None => return Err(self.error(SyntaxError::UnexpectedEndOfInput)),
        }

        let mut lexeme = NumberLexeme::Integer;
        if self.peek() == Some(b'.') {
            lexeme = NumberLexeme::Float;
            self.pos += 1;
            self.expect_digits(SyntaxError::DigitExpected)?;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            lexeme = NumberLexeme::Float;
            self.pos += 1;
            let signed = matches!(self.peek(), Some(b'+' | b'-'));
            if signed {
                self.pos += 1;
                self.expect_digits(SyntaxError::DigitExpected)?;
            } else {
                self.expect_digits(SyntaxError::ExponentExpected)?;
            }
        }
        Ok(lexeme)
    }

    fn expect_digits(&mut self, missing: SyntaxError) -> Result<(), ParseError> {
        match self.peek() {
            Some(b'0'..=b'9') => {
                self.skip_digits();
                Ok(())
            }
            Some(_) => Err(self.error(missing)),
            None => Err(self.error(SyntaxError::UnexpectedEndOfInput)),
        }
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }
}
