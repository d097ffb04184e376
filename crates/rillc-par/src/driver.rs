//! Predictive LL(1) parse driver.
//!
//! The driver runs a stack of grammar symbols against the prepared token
//! stream. Every stack entry is bound to the parse-tree node it must
//! populate: terminals to the leaf that receives the matched token,
//! non-terminals to the internal node that receives the expansion's
//! children. The stack starts as [start-symbol, DOLLAR] and the loop runs
//! until it empties.
//!
//! Errors never stop the parse. A mismatched terminal pops the stack, an
//! error cell skips the input token, and a synch cell pops the
//! non-terminal, so every error step makes progress. The outcome is always
//! a tree, possibly partial, together with an any-error flag; the detailed
//! reports go to the diagnostic handler.

use rillc_lex::{ScanError, Scanner, Token};
use rillc_util::Handler;

use crate::first_follow::FirstFollow;
use crate::grammar::{Grammar, GrammarSymbol, NonTermId, TermId};
use crate::stream;
use crate::table::{Cell, ParseTable};
use crate::tree::{NodeId, ParseTree};

/// Spelling used for epsilon leaves in tree listings.
const EPSILON_LEXEME: &str = "eps";

/// Result of a parse: the tree and whether any error was reported.
///
/// The tree is produced even when errors occurred; recovery leaves the
/// unexpanded and unmatched parts of it empty.
pub struct ParseOutcome {
    /// The constructed parse tree.
    pub tree: ParseTree,
    /// True if any lexical-carryover or syntactic error was reported.
    pub had_error: bool,
}

/// A stack entry binding a pending symbol to its tree node.
enum StackEntry {
    /// A terminal to match. The bottom-of-stack DOLLAR has no node.
    Term { term: TermId, node: Option<NodeId> },
    /// A non-terminal to expand.
    NonTerm { nt: NonTermId, node: NodeId },
}

/// Parse a prepared token stream.
///
/// The stream must be comment-free and end with a `TK_DOLLAR` token; use
/// [`stream::prepare`] or [`stream::read_token_file`] to get one. Errors
/// are reported to `handler` with the line of the offending token.
pub fn parse(
    grammar: &Grammar,
    table: &ParseTable,
    tokens: &[Token],
    handler: &Handler,
) -> ParseOutcome {
    debug_assert!(tokens.last().is_some_and(Token::is_dollar));

    let mut tree = ParseTree::new(grammar.start());
    let mut stack = vec![
        StackEntry::Term {
            term: grammar.dollar(),
            node: None,
        },
        StackEntry::NonTerm {
            nt: grammar.start(),
            node: tree.root(),
        },
    ];
    let mut cur = 0usize;
    let mut had_error = false;
    let mut end_reported = false;

    while let Some(top) = stack.last() {
        let Some(token) = tokens.get(cur) else {
            // Input ran out with symbols still pending.
            if !end_reported {
                end_reported = true;
                had_error = true;
                let line = tokens.last().map_or(1, |t| t.line);
                handler.error("unexpected end of input", line);
            }
            stack.pop();
            continue;
        };

        match *top {
            StackEntry::Term { term, node } => {
                if grammar.terminal(token.kind.name()) == Some(term) {
                    log::trace!(
                        "matched {} '{}' at line {}",
                        grammar.terminal_name(term),
                        token.lexeme,
                        token.line
                    );
                    if let Some(node) = node {
                        tree.fill_leaf(node, token.lexeme.clone(), token.line, token.value);
                    }
                    stack.pop();
                    cur += 1;
                } else {
                    had_error = true;
                    handler.error(
                        format!(
                            "expected {} but found {} ('{}')",
                            grammar.terminal_name(term),
                            token.kind.name(),
                            token.lexeme
                        ),
                        token.line,
                    );
                    log::debug!(
                        "recovery: popping unmatched terminal {}",
                        grammar.terminal_name(term)
                    );
                    stack.pop();
                }
            }
            StackEntry::NonTerm { nt, node } => {
                let Some(term) = grammar.terminal(token.kind.name()) else {
                    // A kind outside the grammar alphabet, usually a
                    // lexical error token. Skip it.
                    had_error = true;
                    handler.error(
                        format!(
                            "token {} ('{}') has no place in the grammar",
                            token.kind.name(),
                            token.lexeme
                        ),
                        token.line,
                    );
                    cur += 1;
                    continue;
                };

                match table.get(nt, term) {
                    Cell::Rule(id) => {
                        let rule = grammar.rule(id);
                        log::debug!(
                            "rule {}: {}",
                            grammar.rule_number(id),
                            grammar.display_rule(id)
                        );
                        stack.pop();
                        match rule.rhs.as_slice() {
                            [GrammarSymbol::Terminal(eps)]
                                if Some(*eps) == grammar.epsilon() =>
                            {
                                // Epsilon expansion: one marker leaf, no
                                // stack growth. The leaf takes the
                                // lookahead token's line.
                                let leaf = tree.add_leaf_child(node, *eps);
                                tree.fill_leaf(
                                    leaf,
                                    EPSILON_LEXEME.to_string(),
                                    token.line,
                                    None,
                                );
                            }
                            rhs => {
                                let mut entries = Vec::with_capacity(rhs.len());
                                for sym in rhs {
                                    match *sym {
                                        GrammarSymbol::Terminal(t) => {
                                            let child = tree.add_leaf_child(node, t);
                                            entries.push(StackEntry::Term {
                                                term: t,
                                                node: Some(child),
                                            });
                                        }
                                        GrammarSymbol::NonTerminal(n) => {
                                            let child = tree.add_internal_child(node, n);
                                            entries
                                                .push(StackEntry::NonTerm { nt: n, node: child });
                                        }
                                    }
                                }
                                stack.extend(entries.into_iter().rev());
                            }
                        }
                    }
                    Cell::Synch => {
                        had_error = true;
                        handler.error(
                            format!(
                                "missing {} before {}",
                                grammar.non_terminal_name(nt),
                                token.kind.name()
                            ),
                            token.line,
                        );
                        log::debug!(
                            "recovery: synch entry, popping {}",
                            grammar.non_terminal_name(nt)
                        );
                        stack.pop();
                    }
                    Cell::Error => {
                        had_error = true;
                        handler.error(
                            format!(
                                "unexpected token {} ('{}') while expanding {}",
                                token.kind.name(),
                                token.lexeme,
                                grammar.non_terminal_name(nt)
                            ),
                            token.line,
                        );
                        if token.is_dollar() {
                            // Nothing left to skip: drain the stack instead.
                            if !end_reported {
                                end_reported = true;
                                handler.error("unexpected end of input", token.line);
                            }
                            stack.pop();
                        } else {
                            log::debug!("recovery: skipping input token {}", token.kind.name());
                            cur += 1;
                        }
                    }
                }
            }
        }
    }

    if let Some(token) = tokens.get(cur) {
        if !token.is_dollar() {
            had_error = true;
            handler.error(
                format!("extra tokens starting at '{}'", token.lexeme),
                token.line,
            );
        }
    }

    ParseOutcome { tree, had_error }
}

/// A grammar bundled with its computed sets and parse table.
///
/// Building the FIRST/FOLLOW sets and the table once and parsing many
/// inputs against them is the expected usage.
///
/// # Example
///
/// ```
/// use rillc_par::{Grammar, Parser};
/// use rillc_util::Handler;
///
/// let grammar = Grammar::from_str_text(
///     "Stmt TK_FIELDID TK_ASSIGNOP Expr TK_SEM\n\
///      Expr TK_NUM\n\
///      Expr TK_FIELDID\n",
/// )
/// .unwrap();
/// let parser = Parser::new(&grammar);
///
/// let handler = Handler::new();
/// let outcome = parser.parse_source("a <--- 3 ;".as_bytes(), &handler).unwrap();
/// assert!(!outcome.had_error);
/// ```
pub struct Parser<'g> {
    grammar: &'g Grammar,
    sets: FirstFollow,
    table: ParseTable,
}

impl<'g> Parser<'g> {
    /// Compute the sets and table for `grammar`.
    pub fn new(grammar: &'g Grammar) -> Self {
        let sets = FirstFollow::compute(grammar);
        let table = ParseTable::build(grammar, &sets);
        Self {
            grammar,
            sets,
            table,
        }
    }

    /// The FIRST/FOLLOW sets.
    pub fn sets(&self) -> &FirstFollow {
        &self.sets
    }

    /// The parse table.
    pub fn table(&self) -> &ParseTable {
        &self.table
    }

    /// Parse a prepared token stream.
    pub fn parse_tokens(&self, tokens: &[Token], handler: &Handler) -> ParseOutcome {
        parse(self.grammar, &self.table, tokens, handler)
    }

    /// Scan `source` and parse the resulting stream.
    ///
    /// Comment tokens are dropped and the synthetic end marker appended
    /// before parsing.
    ///
    /// # Errors
    ///
    /// Fails only on I/O failure of the source reader.
    pub fn parse_source<R: std::io::Read>(
        &self,
        source: R,
        handler: &Handler,
    ) -> Result<ParseOutcome, ScanError> {
        let mut scanner = Scanner::new(source, handler)?;
        let tokens = stream::prepare(scanner.scan_all()?);
        Ok(self.parse_tokens(&tokens, handler))
    }
}
