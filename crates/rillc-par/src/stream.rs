//! Token stream preparation and the token-file reader.
//!
//! The driver consumes a prepared stream: comment tokens dropped and a
//! single synthetic `TK_DOLLAR` at the end carrying the line number of the
//! last real token. [`prepare`] produces one from scanner output;
//! [`read_token_file`] produces one from the textual interchange format
//! `Line no. <N> Lexeme <L> Token <TK_...>`.

use std::io::{self, BufRead};

use thiserror::Error;

use rillc_lex::{NumericValue, Token, TokenKind};

/// Token-file reading failure.
#[derive(Debug, Error)]
pub enum TokenFileError {
    /// The file could not be read.
    #[error("failed to read token file: {0}")]
    Read(#[from] io::Error),
    /// A line named a kind outside the token alphabet.
    #[error("token file line {line}: unknown token kind {name}")]
    UnknownKind {
        /// 1-based line number in the token file.
        line: usize,
        /// The unrecognized kind name.
        name: String,
    },
}

/// Prepare scanner output for the driver.
///
/// Drops comment tokens, drops any end markers already present, and
/// appends one `TK_DOLLAR` carrying the last real token's line (line 1
/// when the stream is empty).
///
/// # Example
///
/// ```
/// use rillc_par::stream::prepare;
/// use rillc_lex::{Token, TokenKind};
///
/// let tokens = prepare(vec![
///     Token::new(TokenKind::Sem, ";", 2),
///     Token::new(TokenKind::Comment, "%", 3),
/// ]);
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[1].kind, TokenKind::Dollar);
/// assert_eq!(tokens[1].line, 2);
/// ```
pub fn prepare(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = tokens
        .into_iter()
        .filter(|t| t.kind != TokenKind::Comment && !t.is_dollar())
        .collect();
    let line = out.last().map_or(1, |t| t.line);
    out.push(Token::dollar(line));
    out
}

/// Read a textual token file into a prepared stream.
///
/// Each line has the shape `Line no. <N> Lexeme <L> Token <TK_...>`.
/// Lines that do not match the shape are ignored; `TK_COMMENT` lines are
/// skipped. Numeric lexemes get their values re-parsed so literal leaves
/// keep them. The returned stream ends with the synthetic `TK_DOLLAR`.
pub fn read_token_file<R: BufRead>(reader: R) -> Result<Vec<Token>, TokenFileError> {
    let mut tokens = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 7
            || fields[0] != "Line"
            || fields[1] != "no."
            || fields[3] != "Lexeme"
            || fields[5] != "Token"
        {
            continue;
        }
        let Ok(line_no) = fields[2].parse::<u32>() else {
            continue;
        };
        let name = fields[6];
        let Some(kind) = TokenKind::from_name(name) else {
            return Err(TokenFileError::UnknownKind {
                line: i + 1,
                name: name.to_string(),
            });
        };
        let lexeme = fields[4];
        let value = match kind {
            TokenKind::Num => lexeme.parse::<i64>().ok().map(NumericValue::Integer),
            TokenKind::Rnum => lexeme.parse::<f64>().ok().map(NumericValue::Real),
            _ => None,
        };
        tokens.push(Token {
            kind,
            lexeme: lexeme.to_string(),
            line: line_no,
            value,
            error: None,
        });
    }
    Ok(prepare(tokens))
}
