//! rillc-lex - Lexical analyzer for the Rill language.
//!
//! This crate turns a byte stream of Rill source text into a stream of
//! classified tokens. It is the first phase of the front-end and has three
//! layers, each pulled by the one above it:
//!
//! - [`twin_buffer::TwinBuffer`]: a two-half sliding window over the input
//!   with line tracking and bounded retraction;
//! - [`keywords::KeywordTable`]: the constant map from reserved lexemes to
//!   token kinds;
//! - [`scanner::Scanner`]: the state machine that classifies lexemes and
//!   produces [`token::Token`] values one at a time.
//!
//! The scanner never rejects input. Bytes that fit no lexeme, lexemes that
//! break off mid-pattern, and over-long identifiers all come back as
//! `TK_ERROR` tokens (classified by [`token::LexErrorKind`]) so that
//! scanning, and parsing after it, can keep going. Only an I/O failure on
//! the source reader is fatal.
//!
//! # Example
//!
//! ```
//! use rillc_lex::{Scanner, TokenKind};
//! use rillc_util::Handler;
//!
//! let source = "velocity <--- 12.50 ; % per tick";
//! let handler = Handler::new();
//! let mut scanner = Scanner::new(source.as_bytes(), &handler).unwrap();
//!
//! let kinds: Vec<_> = scanner
//!     .scan_all()
//!     .unwrap()
//!     .into_iter()
//!     .map(|t| t.kind)
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::FieldId,
//!         TokenKind::AssignOp,
//!         TokenKind::Rnum,
//!         TokenKind::Sem,
//!         TokenKind::Comment,
//!     ]
//! );
//! ```

pub mod keywords;
pub mod scanner;
pub mod strip;
pub mod token;
pub mod twin_buffer;

#[cfg(test)]
mod edge_cases;

pub use scanner::{ScanError, Scanner};
pub use strip::strip_comments;
pub use token::{write_token_file, LexErrorKind, NumericValue, Token, TokenKind};
pub use twin_buffer::{TwinBuffer, BUFFER_SIZE};
