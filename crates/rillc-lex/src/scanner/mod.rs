//! Scanner for Rill source text.
//!
//! The scanner is a deterministic state machine driven over a
//! [`TwinBuffer`]. Each call to [`Scanner::next_token`] skips whitespace,
//! dispatches on the first significant byte, runs the matching
//! sub-automaton, and returns exactly one classified token. Lexical
//! problems never abort the scan: they come back as `TK_ERROR` tokens
//! carrying a [`LexErrorKind`] and are also reported to the diagnostic
//! handler.
//!
//! Once the input is exhausted, `next_token` returns the `TK_DOLLAR`
//! sentinel and keeps returning it on every further call. The iterator
//! form stops just before the sentinel.

mod comment;
mod ident;
mod number;
mod operator;

use std::io::{self, Read};

use thiserror::Error;

use rillc_util::Handler;

use crate::keywords::KeywordTable;
use crate::token::{LexErrorKind, Token, TokenKind};
use crate::twin_buffer::TwinBuffer;

/// Fatal scanner failure.
///
/// Lexical problems in the input never produce this; they become error
/// tokens. Only read failures on the underlying source are fatal.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The underlying reader failed.
    #[error("failed to read source: {0}")]
    Read(#[from] io::Error),
}

/// The lexer state machine.
///
/// # Example
///
/// ```
/// use rillc_lex::Scanner;
/// use rillc_lex::TokenKind;
/// use rillc_util::Handler;
///
/// let handler = Handler::new();
/// let mut scanner = Scanner::new("a <--- 3 ;".as_bytes(), &handler).unwrap();
///
/// assert_eq!(scanner.next_token().unwrap().kind, TokenKind::FieldId);
/// assert_eq!(scanner.next_token().unwrap().kind, TokenKind::AssignOp);
/// assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Num);
/// assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Sem);
/// assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Dollar);
/// ```
pub struct Scanner<'h, R> {
    buf: TwinBuffer<R>,
    keywords: KeywordTable,
    handler: &'h Handler,
    /// Line the current token started on.
    token_line: u32,
    /// Set once the iterator has observed the end-of-stream sentinel.
    finished: bool,
}

impl<'h, R: Read> Scanner<'h, R> {
    /// Create a scanner over `reader`, reporting lexical errors to
    /// `handler`.
    ///
    /// # Errors
    ///
    /// Fails only if priming the input buffer fails.
    pub fn new(reader: R, handler: &'h Handler) -> Result<Self, ScanError> {
        Ok(Self {
            buf: TwinBuffer::new(reader)?,
            keywords: KeywordTable::new(),
            handler,
            token_line: 1,
            finished: false,
        })
    }

    /// Scan and return the next token.
    ///
    /// Returns the `TK_DOLLAR` sentinel once the input is exhausted, and on
    /// every call after that.
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        loop {
            self.buf.commit();
            let c = match self.buf.next_char()? {
                Some(c) => c,
                None => return Ok(Token::dollar(self.buf.line())),
            };
            if matches!(c, b' ' | b'\t' | b'\r' | b'\n') {
                continue;
            }
            self.token_line = self.buf.line();
            return match c {
                b'%' => self.scan_comment(),

                // Single-byte operators and punctuation
                b'+' => Ok(self.simple(TokenKind::Plus, "+")),
                b'-' => Ok(self.simple(TokenKind::Minus, "-")),
                b'*' => Ok(self.simple(TokenKind::Mul, "*")),
                b'/' => Ok(self.simple(TokenKind::Div, "/")),
                b'(' => Ok(self.simple(TokenKind::Op, "(")),
                b')' => Ok(self.simple(TokenKind::Cl, ")")),
                b'[' => Ok(self.simple(TokenKind::Sql, "[")),
                b']' => Ok(self.simple(TokenKind::Sqr, "]")),
                b',' => Ok(self.simple(TokenKind::Comma, ",")),
                b';' => Ok(self.simple(TokenKind::Sem, ";")),
                b':' => Ok(self.simple(TokenKind::Colon, ":")),
                b'.' => Ok(self.simple(TokenKind::Dot, ".")),
                b'~' => Ok(self.simple(TokenKind::Not, "~")),

                // Multi-byte operators
                b'<' => self.scan_less(),
                b'>' => self.scan_greater(),
                b'=' => self.scan_equals(),
                b'!' => self.scan_bang(),
                b'&' => self.scan_ampersand(),
                b'@' => self.scan_at(),

                // Identifier families
                b'#' => self.scan_ruid(),
                b'_' => self.scan_funid(),
                b'b'..=b'd' => self.scan_plain_or_field(),
                b'a'..=b'z' => self.scan_field_or_keyword(),

                // Numeric literals
                b'0'..=b'9' => self.scan_number(),

                _ => {
                    let lexeme = self.lexeme_string();
                    Ok(self.error_token(LexErrorKind::UnknownSymbol, lexeme))
                }
            };
        }
    }

    /// Collect every token up to (excluding) the end-of-stream sentinel.
    pub fn scan_all(&mut self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token.is_dollar() {
                return Ok(tokens);
            }
            tokens.push(token);
        }
    }

    /// Build a fixed-lexeme token starting on the current token line.
    fn simple(&self, kind: TokenKind, lexeme: &'static str) -> Token {
        Token::new(kind, lexeme, self.token_line)
    }

    /// Build an error token and report it to the handler.
    fn error_token(&mut self, kind: LexErrorKind, lexeme: String) -> Token {
        log::debug!(
            "lexical error at line {}: {} '{}'",
            self.token_line,
            kind,
            lexeme
        );
        self.handler
            .error(format!("{kind}: '{lexeme}'"), self.token_line);
        Token::error(kind, lexeme, self.token_line)
    }

    /// The current lexeme as text. The alphabet is 7-bit ASCII; stray
    /// non-ASCII bytes are replaced, not fatal.
    fn lexeme_string(&self) -> String {
        String::from_utf8_lossy(&self.buf.lexeme()).into_owned()
    }

    /// Retract one byte if `c` was an actual byte and not end of input.
    fn retract_if(&mut self, c: Option<u8>) {
        if c.is_some() {
            self.buf.retract(1);
        }
    }

    /// Shared access to the twin buffer, for the sub-automata.
    fn read(&mut self) -> Result<Option<u8>, ScanError> {
        Ok(self.buf.next_char()?)
    }
}

impl<'h, R: Read> Iterator for Scanner<'h, R> {
    type Item = Result<Token, ScanError>;

    /// Yields tokens until the end-of-stream sentinel, which is not
    /// yielded itself. A read failure is yielded once and ends the
    /// iteration.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is_dollar() => {
                self.finished = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
