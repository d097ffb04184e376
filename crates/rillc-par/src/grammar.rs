//! Grammar model and loader.
//!
//! A grammar is read from text, one rule per line, whitespace-separated.
//! The first symbol on a line is the rule's left-hand side; the rest are
//! the right-hand side. Symbols spelled with the `TK_` prefix are
//! terminals; `TK_EPS` marks an epsilon production; everything else is a
//! non-terminal. Blank lines and lines with fewer than two symbols are
//! ignored.
//!
//! Terminals and non-terminals get dense indices in first-seen order, which
//! keeps the FIRST/FOLLOW bitsets and the parse table flat. The first
//! left-hand side becomes the start symbol, and a `TK_DOLLAR` terminal is
//! appended if the grammar text never mentions it.

use std::fmt;
use std::fs::File;
use std::hash::BuildHasherDefault;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use indexmap::IndexSet;
use rustc_hash::FxHasher;
use thiserror::Error;

use rillc_util::{Idx, IndexVec};

type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// Spelling of the epsilon marker in grammar text.
pub const EPSILON_TOKEN: &str = "TK_EPS";

/// Spelling of the end-of-input terminal.
pub const DOLLAR_TOKEN: &str = "TK_DOLLAR";

/// Prefix that marks a grammar symbol as a terminal.
pub const TERMINAL_PREFIX: &str = "TK_";

rillc_util::define_idx! {
    /// Dense index of a terminal.
    pub struct TermId;
}

rillc_util::define_idx! {
    /// Dense index of a non-terminal.
    pub struct NonTermId;
}

rillc_util::define_idx! {
    /// Dense index of a rule. Rules are displayed 1-based; see
    /// [`Grammar::rule_number`].
    pub struct RuleId;
}

/// A terminal or non-terminal occurrence in a rule body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrammarSymbol {
    /// A terminal, including the epsilon marker.
    Terminal(TermId),
    /// A non-terminal.
    NonTerminal(NonTermId),
}

/// One production: a left-hand side and its expansion.
///
/// The right-hand side is non-empty; an epsilon production is spelled as a
/// single epsilon-marker terminal.
#[derive(Clone, Debug)]
pub struct Rule {
    /// The expanded non-terminal.
    pub lhs: NonTermId,
    /// The expansion, in source order.
    pub rhs: Vec<GrammarSymbol>,
}

/// Grammar loading failure.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// The grammar text could not be read.
    #[error("failed to read grammar: {0}")]
    Read(#[from] io::Error),
    /// No line of the input held a rule.
    #[error("grammar contains no rules")]
    Empty,
}

/// An indexed context-free grammar.
///
/// # Example
///
/// ```
/// use rillc_par::grammar::Grammar;
///
/// let grammar = Grammar::from_str_text(
///     "Stmt TK_ID TK_ASSIGNOP Expr TK_SEM\n\
///      Expr TK_NUM\n\
///      Expr TK_ID\n",
/// )
/// .unwrap();
///
/// assert_eq!(grammar.non_terminal_count(), 2);
/// assert_eq!(grammar.rules().len(), 3);
/// assert!(grammar.terminal("TK_DOLLAR").is_some());
/// ```
pub struct Grammar {
    terminals: FxIndexSet<String>,
    non_terminals: FxIndexSet<String>,
    rules: IndexVec<RuleId, Rule>,
    start: NonTermId,
    dollar: TermId,
    epsilon: Option<TermId>,
}

impl Grammar {
    /// Load a grammar from a reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Grammar, GrammarError> {
        let mut terminals: FxIndexSet<String> = FxIndexSet::default();
        let mut non_terminals: FxIndexSet<String> = FxIndexSet::default();
        let mut rules: IndexVec<RuleId, Rule> = IndexVec::new();
        let mut start = None;

        for line in reader.lines() {
            let line = line?;
            let symbols: Vec<&str> = line.split_whitespace().collect();
            if symbols.len() < 2 {
                continue;
            }

            let lhs = NonTermId::from_usize(non_terminals.insert_full(symbols[0].to_string()).0);
            if start.is_none() {
                start = Some(lhs);
            }

            let rhs = symbols[1..]
                .iter()
                .map(|&name| {
                    if name.starts_with(TERMINAL_PREFIX) {
                        let (i, _) = terminals.insert_full(name.to_string());
                        GrammarSymbol::Terminal(TermId::from_usize(i))
                    } else {
                        let (i, _) = non_terminals.insert_full(name.to_string());
                        GrammarSymbol::NonTerminal(NonTermId::from_usize(i))
                    }
                })
                .collect();

            rules.push(Rule { lhs, rhs });
        }

        let start = start.ok_or(GrammarError::Empty)?;
        let (dollar, _) = terminals.insert_full(DOLLAR_TOKEN.to_string());
        let epsilon = terminals.get_index_of(EPSILON_TOKEN).map(TermId::from_usize);

        log::debug!(
            "loaded grammar: {} rules, {} non-terminals, {} terminals",
            rules.len(),
            non_terminals.len(),
            terminals.len()
        );

        Ok(Grammar {
            terminals,
            non_terminals,
            rules,
            start,
            dollar: TermId::from_usize(dollar),
            epsilon,
        })
    }

    /// Load a grammar from a file on disk.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Grammar, GrammarError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Load a grammar from in-memory text.
    pub fn from_str_text(text: &str) -> Result<Grammar, GrammarError> {
        Self::from_reader(text.as_bytes())
    }

    /// Number of terminals, including `TK_DOLLAR` and, when present,
    /// `TK_EPS`.
    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    /// Number of non-terminals.
    pub fn non_terminal_count(&self) -> usize {
        self.non_terminals.len()
    }

    /// Name of a terminal.
    pub fn terminal_name(&self, t: TermId) -> &str {
        &self.terminals[t.index()]
    }

    /// Name of a non-terminal.
    pub fn non_terminal_name(&self, nt: NonTermId) -> &str {
        &self.non_terminals[nt.index()]
    }

    /// Look up a terminal by name.
    pub fn terminal(&self, name: &str) -> Option<TermId> {
        self.terminals.get_index_of(name).map(TermId::from_usize)
    }

    /// Look up a non-terminal by name.
    pub fn non_terminal(&self, name: &str) -> Option<NonTermId> {
        self.non_terminals
            .get_index_of(name)
            .map(NonTermId::from_usize)
    }

    /// The start symbol: the first left-hand side seen.
    pub fn start(&self) -> NonTermId {
        self.start
    }

    /// The end-of-input terminal.
    pub fn dollar(&self) -> TermId {
        self.dollar
    }

    /// The epsilon marker, if the grammar has epsilon productions.
    pub fn epsilon(&self) -> Option<TermId> {
        self.epsilon
    }

    /// All rules, densely indexed.
    pub fn rules(&self) -> &IndexVec<RuleId, Rule> {
        &self.rules
    }

    /// One rule.
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id]
    }

    /// The 1-based display number of a rule. Number 0 is reserved for
    /// "no rule".
    pub fn rule_number(&self, id: RuleId) -> usize {
        id.index() + 1
    }

    /// True if `rule` is an epsilon production.
    pub fn rule_is_epsilon(&self, rule: &Rule) -> bool {
        matches!(rule.rhs.as_slice(),
                 [GrammarSymbol::Terminal(t)] if Some(*t) == self.epsilon)
    }

    /// Display adapter rendering a rule as `LHS -> RHS...`.
    pub fn display_rule(&self, id: RuleId) -> RuleDisplay<'_> {
        RuleDisplay { grammar: self, id }
    }

    /// Name of a symbol, terminal or not.
    pub fn symbol_name(&self, sym: GrammarSymbol) -> &str {
        match sym {
            GrammarSymbol::Terminal(t) => self.terminal_name(t),
            GrammarSymbol::NonTerminal(nt) => self.non_terminal_name(nt),
        }
    }
}

/// Renders one rule for logs and error messages.
pub struct RuleDisplay<'g> {
    grammar: &'g Grammar,
    id: RuleId,
}

impl fmt::Display for RuleDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = self.grammar.rule(self.id);
        write!(f, "{} ->", self.grammar.non_terminal_name(rule.lhs))?;
        for sym in &rule.rhs {
            write!(f, " {}", self.grammar.symbol_name(*sym))?;
        }
        Ok(())
    }
}
