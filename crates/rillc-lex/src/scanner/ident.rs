//! Identifier and keyword scanning.
//!
//! Four disjoint shapes share these paths:
//!
//! - plain identifiers `[b-d]+[2-7]+` (cap 20 bytes),
//! - field identifiers `[a-z]+`, with keyword lookup after accumulation,
//! - function identifiers `_` letter alphanumeric* (cap 30 bytes,
//!   `_main` is the MAIN keyword),
//! - user-type identifiers `#` lowercase+ (`#record` is the RECORD
//!   keyword).
//!
//! A `[b-d]` prefix that breaks the plain shape falls through to the
//! field-identifier path, so `call` and `do` still resolve as field
//! lexemes and keywords.

use std::io::Read;

use crate::token::{LexErrorKind, Token, TokenKind};

use super::{ScanError, Scanner};

/// Length cap for plain identifiers.
pub const MAX_ID_LEN: usize = 20;

/// Length cap for function identifiers, including the leading underscore.
pub const MAX_FUNID_LEN: usize = 30;

impl<'h, R: Read> Scanner<'h, R> {
    /// Scans a lexeme starting with a letter in `[b-d]`.
    ///
    /// Consumes the `[b-d]` run, then decides: digits in `[2-7]` make it a
    /// plain identifier, a lowercase letter sends it down the field-id
    /// path, anything else ends the lexeme as a field-id/keyword.
    pub(super) fn scan_plain_or_field(&mut self) -> Result<Token, ScanError> {
        let next = loop {
            match self.read()? {
                Some(c) if (b'b'..=b'd').contains(&c) => {}
                other => break other,
            }
        };
        match next {
            Some(c) if (b'2'..=b'7').contains(&c) => {
                loop {
                    match self.read()? {
                        Some(c) if (b'2'..=b'7').contains(&c) => {}
                        other => {
                            self.retract_if(other);
                            break;
                        }
                    }
                }
                let lexeme = self.lexeme_string();
                if lexeme.len() > MAX_ID_LEN {
                    return Ok(self.error_token(LexErrorKind::IdentifierTooLong, lexeme));
                }
                Ok(Token::new(TokenKind::Id, lexeme, self.token_line))
            }
            Some(c) if c.is_ascii_lowercase() => self.scan_field_or_keyword(),
            other => {
                self.retract_if(other);
                self.field_or_keyword_token()
            }
        }
    }

    /// Scans a field identifier or keyword, `[a-z]+`.
    ///
    /// The first letter (or a `[b-d]` prefix) has already been consumed.
    pub(super) fn scan_field_or_keyword(&mut self) -> Result<Token, ScanError> {
        loop {
            match self.read()? {
                Some(c) if c.is_ascii_lowercase() => {}
                other => {
                    self.retract_if(other);
                    break;
                }
            }
        }
        self.field_or_keyword_token()
    }

    /// Scans a function identifier: `_` then a letter then alphanumerics.
    pub(super) fn scan_funid(&mut self) -> Result<Token, ScanError> {
        match self.read()? {
            Some(c) if c.is_ascii_alphabetic() => {}
            other => {
                self.retract_if(other);
                return Ok(self.error_token(LexErrorKind::MalformedPattern, "_".to_string()));
            }
        }
        loop {
            match self.read()? {
                Some(c) if c.is_ascii_alphanumeric() => {}
                other => {
                    self.retract_if(other);
                    break;
                }
            }
        }
        let lexeme = self.lexeme_string();
        if lexeme.len() > MAX_FUNID_LEN {
            return Ok(self.error_token(LexErrorKind::IdentifierTooLong, lexeme));
        }
        let kind = self
            .keywords
            .lookup(&lexeme)
            .unwrap_or(TokenKind::FunId);
        Ok(Token::new(kind, lexeme, self.token_line))
    }

    /// Scans a user-type identifier: `#` then one or more lowercase
    /// letters. `#record` is the RECORD keyword.
    pub(super) fn scan_ruid(&mut self) -> Result<Token, ScanError> {
        match self.read()? {
            Some(c) if c.is_ascii_lowercase() => {}
            other => {
                self.retract_if(other);
                return Ok(self.error_token(LexErrorKind::MalformedPattern, "#".to_string()));
            }
        }
        loop {
            match self.read()? {
                Some(c) if c.is_ascii_lowercase() => {}
                other => {
                    self.retract_if(other);
                    break;
                }
            }
        }
        let lexeme = self.lexeme_string();
        let kind = if lexeme == "#record" {
            TokenKind::Record
        } else {
            TokenKind::Ruid
        };
        Ok(Token::new(kind, lexeme, self.token_line))
    }

    /// Finish an accumulated lowercase lexeme with the keyword lookup.
    fn field_or_keyword_token(&mut self) -> Result<Token, ScanError> {
        let lexeme = self.lexeme_string();
        let kind = self
            .keywords
            .lookup(&lexeme)
            .unwrap_or(TokenKind::FieldId);
        Ok(Token::new(kind, lexeme, self.token_line))
    }
}
