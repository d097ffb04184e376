//! Numeric literal scanning.
//!
//! Integers are one or more digits not followed by `.`. Reals are an
//! integer part, `.`, exactly two fraction digits, and an optional exponent
//! `E`/`e`, optional sign, exactly two digits. A literal that starts down
//! the real path but breaks the pattern is emitted as one malformed-pattern
//! error token holding the consumed prefix, with the offending byte
//! retracted for the next token.

use std::io::Read;

use crate::token::{LexErrorKind, NumericValue, Token, TokenKind};

use super::{ScanError, Scanner};

impl<'h, R: Read> Scanner<'h, R> {
    /// Scans an integer or real literal. The first digit has already been
    /// consumed.
    pub(super) fn scan_number(&mut self) -> Result<Token, ScanError> {
        let next = loop {
            match self.read()? {
                Some(c) if c.is_ascii_digit() => {}
                other => break other,
            }
        };

        if next != Some(b'.') {
            self.retract_if(next);
            let lexeme = self.lexeme_string();
            let value = lexeme.parse::<i64>().ok().map(NumericValue::Integer);
            return Ok(Token {
                kind: TokenKind::Num,
                lexeme,
                line: self.token_line,
                value,
                error: None,
            });
        }

        // Fraction: exactly two digits.
        for _ in 0..2 {
            match self.read()? {
                Some(c) if c.is_ascii_digit() => {}
                other => {
                    self.retract_if(other);
                    let lexeme = self.lexeme_string();
                    return Ok(self.error_token(LexErrorKind::MalformedPattern, lexeme));
                }
            }
        }

        match self.read()? {
            Some(b'E') | Some(b'e') => self.scan_exponent(),
            other => {
                self.retract_if(other);
                self.real_token()
            }
        }
    }

    /// Scans the exponent tail after `E`/`e`: an optional sign and exactly
    /// two digits.
    fn scan_exponent(&mut self) -> Result<Token, ScanError> {
        match self.read()? {
            Some(b'+') | Some(b'-') => {}
            Some(c) if c.is_ascii_digit() => self.buf.retract(1),
            other => {
                self.retract_if(other);
                let lexeme = self.lexeme_string();
                return Ok(self.error_token(LexErrorKind::MalformedPattern, lexeme));
            }
        }
        for _ in 0..2 {
            match self.read()? {
                Some(c) if c.is_ascii_digit() => {}
                other => {
                    self.retract_if(other);
                    let lexeme = self.lexeme_string();
                    return Ok(self.error_token(LexErrorKind::MalformedPattern, lexeme));
                }
            }
        }
        self.real_token()
    }

    /// Finish a completed real literal.
    fn real_token(&mut self) -> Result<Token, ScanError> {
        let lexeme = self.lexeme_string();
        let value = lexeme.parse::<f64>().ok().map(NumericValue::Real);
        Ok(Token {
            kind: TokenKind::Rnum,
            lexeme,
            line: self.token_line,
            value,
            error: None,
        })
    }
}
