//! Keyword table.
//!
//! A constant map from keyword lexemes to token kinds, built once when the
//! scanner starts. Any lexeme shaped like a field identifier is looked up
//! here after accumulation; a hit wins over the identifier classification.

use rustc_hash::FxHashMap;

use crate::token::TokenKind;

/// The fixed keyword set of the language.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("_main", TokenKind::Main),
    ("call", TokenKind::Call),
    ("else", TokenKind::Else),
    ("end", TokenKind::End),
    ("endif", TokenKind::Endif),
    ("endrecord", TokenKind::Endrecord),
    ("endunion", TokenKind::Endunion),
    ("global", TokenKind::Global),
    ("if", TokenKind::If),
    ("input", TokenKind::Input),
    ("int", TokenKind::Int),
    ("list", TokenKind::List),
    ("output", TokenKind::Output),
    ("parameter", TokenKind::Parameter),
    ("parameters", TokenKind::Parameters),
    ("read", TokenKind::Read),
    ("real", TokenKind::Real),
    ("record", TokenKind::Record),
    ("return", TokenKind::Return),
    ("then", TokenKind::Then),
    ("type", TokenKind::Type),
    ("union", TokenKind::Union),
    ("with", TokenKind::With),
    ("write", TokenKind::Write),
];

/// Constant lexeme-to-kind map for the reserved words.
///
/// # Example
///
/// ```
/// use rillc_lex::keywords::KeywordTable;
/// use rillc_lex::TokenKind;
///
/// let table = KeywordTable::new();
/// assert_eq!(table.lookup("while"), None);
/// assert_eq!(table.lookup("with"), Some(TokenKind::With));
/// ```
pub struct KeywordTable {
    map: FxHashMap<&'static str, TokenKind>,
}

impl KeywordTable {
    /// Build the table from the fixed keyword set.
    pub fn new() -> Self {
        Self {
            map: KEYWORDS.iter().copied().collect(),
        }
    }

    /// Look up a lexeme. Returns `None` when it is not a keyword.
    pub fn lookup(&self, lexeme: &str) -> Option<TokenKind> {
        self.map.get(lexeme).copied()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new()
    }
}
