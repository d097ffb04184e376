//! Comment scanning.
//!
//! `%` starts a line comment that runs to the newline or end of input. The
//! scanner emits one `TK_COMMENT` token per comment so downstream consumers
//! can keep or drop them; the parser's token filter drops them.

use std::io::Read;

use crate::token::{Token, TokenKind};

use super::{ScanError, Scanner};

impl<'h, R: Read> Scanner<'h, R> {
    /// Scans a `%` line comment. The `%` has already been consumed.
    ///
    /// The terminating newline is not consumed; it is ordinary whitespace
    /// for the next token. The comment body is discarded as it is read so
    /// an arbitrarily long comment never grows the lexeme window.
    pub(super) fn scan_comment(&mut self) -> Result<Token, ScanError> {
        loop {
            self.buf.commit();
            match self.buf.next_char()? {
                None => break,
                Some(b'\n') => {
                    self.buf.retract(1);
                    break;
                }
                Some(_) => {}
            }
        }
        Ok(self.simple(TokenKind::Comment, "%"))
    }
}
