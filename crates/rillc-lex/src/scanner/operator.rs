//! Multi-byte operator scanning.
//!
//! These sub-automata disambiguate the operators that share a first byte.
//! The worst case is `<`, which needs up to three bytes of lookahead to
//! tell `<`, `<=`, and `<---` apart. Lookahead bytes that turn out not to
//! belong to the operator are retracted so the next token sees them.

use std::io::Read;

use crate::token::{LexErrorKind, Token, TokenKind};

use super::{ScanError, Scanner};

impl<'h, R: Read> Scanner<'h, R> {
    /// Scans `<`, `<=`, or `<---`.
    pub(super) fn scan_less(&mut self) -> Result<Token, ScanError> {
        match self.read()? {
            Some(b'=') => Ok(self.simple(TokenKind::Le, "<=")),
            Some(b'-') => {
                let second = self.read()?;
                if second == Some(b'-') {
                    let third = self.read()?;
                    if third == Some(b'-') {
                        return Ok(self.simple(TokenKind::AssignOp, "<---"));
                    }
                    self.retract_if(third);
                    self.buf.retract(2);
                } else {
                    self.retract_if(second);
                    self.buf.retract(1);
                }
                Ok(self.simple(TokenKind::Lt, "<"))
            }
            other => {
                self.retract_if(other);
                Ok(self.simple(TokenKind::Lt, "<"))
            }
        }
    }

    /// Scans `>` or `>=`.
    pub(super) fn scan_greater(&mut self) -> Result<Token, ScanError> {
        match self.read()? {
            Some(b'=') => Ok(self.simple(TokenKind::Ge, ">=")),
            other => {
                self.retract_if(other);
                Ok(self.simple(TokenKind::Gt, ">"))
            }
        }
    }

    /// Scans `==`. A stray `=` is an error token.
    pub(super) fn scan_equals(&mut self) -> Result<Token, ScanError> {
        match self.read()? {
            Some(b'=') => Ok(self.simple(TokenKind::Eq, "==")),
            other => {
                self.retract_if(other);
                Ok(self.error_token(LexErrorKind::UnknownSymbol, "=".to_string()))
            }
        }
    }

    /// Scans `!=`. A stray `!` is an error token.
    pub(super) fn scan_bang(&mut self) -> Result<Token, ScanError> {
        match self.read()? {
            Some(b'=') => Ok(self.simple(TokenKind::Ne, "!=")),
            other => {
                self.retract_if(other);
                Ok(self.error_token(LexErrorKind::UnknownSymbol, "!".to_string()))
            }
        }
    }

    /// Scans `&&&`. Shorter runs of `&` are error tokens.
    pub(super) fn scan_ampersand(&mut self) -> Result<Token, ScanError> {
        match self.read()? {
            Some(b'&') => match self.read()? {
                Some(b'&') => Ok(self.simple(TokenKind::And, "&&&")),
                other => {
                    self.retract_if(other);
                    Ok(self.error_token(LexErrorKind::UnknownSymbol, "&&".to_string()))
                }
            },
            other => {
                self.retract_if(other);
                Ok(self.error_token(LexErrorKind::UnknownSymbol, "&".to_string()))
            }
        }
    }

    /// Scans `@@@`. Shorter runs of `@` are error tokens.
    pub(super) fn scan_at(&mut self) -> Result<Token, ScanError> {
        match self.read()? {
            Some(b'@') => match self.read()? {
                Some(b'@') => Ok(self.simple(TokenKind::Or, "@@@")),
                other => {
                    self.retract_if(other);
                    Ok(self.error_token(LexErrorKind::UnknownSymbol, "@@".to_string()))
                }
            },
            other => {
                self.retract_if(other);
                Ok(self.error_token(LexErrorKind::UnknownSymbol, "@".to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rillc_util::Handler;

    use crate::token::{LexErrorKind, Token, TokenKind};
    use crate::Scanner;

    fn scan(source: &str) -> Vec<Token> {
        let handler = Handler::new();
        let mut scanner = Scanner::new(source.as_bytes(), &handler).unwrap();
        scanner.scan_all().unwrap()
    }

    #[test]
    fn test_assign_op() {
        let tokens = scan("<---");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::AssignOp);
        assert_eq!(tokens[0].lexeme, "<---");
    }

    #[test]
    fn test_less_family() {
        assert_eq!(scan("<")[0].kind, TokenKind::Lt);
        assert_eq!(scan("<=")[0].kind, TokenKind::Le);
    }

    #[test]
    fn test_less_with_partial_dashes() {
        // "<--" is Lt followed by two Minus tokens.
        let kinds: Vec<_> = scan("<--").iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Lt, TokenKind::Minus, TokenKind::Minus]);
    }

    #[test]
    fn test_less_then_ident() {
        let kinds: Vec<_> = scan("<-a").iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Lt, TokenKind::Minus, TokenKind::FieldId]);
    }

    #[test]
    fn test_greater_family() {
        assert_eq!(scan(">")[0].kind, TokenKind::Gt);
        assert_eq!(scan(">=")[0].kind, TokenKind::Ge);
    }

    #[test]
    fn test_eq_and_stray_eq() {
        assert_eq!(scan("==")[0].kind, TokenKind::Eq);
        let tokens = scan("= 5");
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].error, Some(LexErrorKind::UnknownSymbol));
        assert_eq!(tokens[1].kind, TokenKind::Num);
    }

    #[test]
    fn test_ne_and_stray_bang() {
        assert_eq!(scan("!=")[0].kind, TokenKind::Ne);
        assert_eq!(scan("!")[0].kind, TokenKind::Error);
    }

    #[test]
    fn test_logical_and() {
        assert_eq!(scan("&&&")[0].kind, TokenKind::And);
        let tokens = scan("&& x");
        assert_eq!(tokens[0].kind, TokenKind::Error);
        assert_eq!(tokens[0].lexeme, "&&");
        assert_eq!(tokens[1].kind, TokenKind::FieldId);
    }

    #[test]
    fn test_logical_or() {
        assert_eq!(scan("@@@")[0].kind, TokenKind::Or);
        assert_eq!(scan("@@")[0].lexeme, "@@");
        assert_eq!(scan("@")[0].lexeme, "@");
    }

    #[test]
    fn test_stray_operator_does_not_swallow_next_byte() {
        let kinds: Vec<_> = scan("=;").iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Error, TokenKind::Sem]);
    }
}
