//! rillc-par - Predictive parser for the Rill language.
//!
//! This crate is the table-driven half of the front-end. It loads a
//! context-free grammar from text, computes FIRST and FOLLOW sets, builds
//! the LL(1) parse table with synchronizing entries, and drives a
//! stack-based parse over the token stream produced by `rillc-lex`,
//! constructing a parse tree as it goes.
//!
//! The pieces, leaves first:
//!
//! - [`grammar`]: the indexed grammar model and its text loader;
//! - [`first_follow`]: fixpoint computation of FIRST/FOLLOW as bitsets;
//! - [`table`]: projection of the rules into the dense parse table;
//! - [`tree`]: the arena-owned parse tree and its in-order listing;
//! - [`stream`]: comment filtering, the end marker, and the token-file
//!   reader;
//! - [`driver`]: the predictive loop with panic-mode recovery.
//!
//! Parsing never aborts on bad input: mismatches, missing constructs, and
//! unexpected tokens are reported to the diagnostic handler, recovery pops
//! the stack or skips input, and the outcome is always a (possibly
//! partial) tree plus an any-error flag.
//!
//! # Example
//!
//! ```
//! use rillc_par::{Grammar, Parser};
//! use rillc_util::Handler;
//!
//! let grammar = Grammar::from_str_text(
//!     "Stmt TK_FIELDID TK_ASSIGNOP Expr TK_SEM\n\
//!      Expr TK_NUM\n\
//!      Expr TK_RNUM\n",
//! )
//! .unwrap();
//! let parser = Parser::new(&grammar);
//!
//! let handler = Handler::new();
//! let outcome = parser
//!     .parse_source("total <--- 12.50 ;".as_bytes(), &handler)
//!     .unwrap();
//! assert!(!outcome.had_error);
//!
//! let mut listing = Vec::new();
//! outcome.tree.write_listing(&grammar, &mut listing).unwrap();
//! ```

pub mod driver;
pub mod first_follow;
pub mod grammar;
pub mod stream;
pub mod table;
pub mod tree;

#[cfg(test)]
mod edge_cases;

pub use driver::{parse, ParseOutcome, Parser};
pub use first_follow::{FirstFollow, TermSet};
pub use grammar::{Grammar, GrammarError, GrammarSymbol, NonTermId, Rule, RuleId, TermId};
pub use stream::{prepare, read_token_file, TokenFileError};
pub use table::{Cell, ParseTable};
pub use tree::{NodeId, ParseNode, ParseTree};
