//! LL(1) parse table construction.
//!
//! The table is a dense matrix keyed by (non-terminal, terminal), backed by
//! a flat vector. Each cell holds the rule to expand, an error marker, or a
//! synchronizing marker used by panic-mode recovery.
//!
//! Construction follows the standard projection: for each rule `A -> alpha`
//! every terminal in FIRST(alpha) selects the rule, and when alpha derives
//! epsilon so does every terminal in FOLLOW(A). Cells still empty after
//! that are upgraded to SYNCH wherever the terminal is in FOLLOW(A).
//!
//! The builder does not diagnose non-LL(1) grammars: when two rules claim
//! the same cell, the later rule wins.

use rillc_util::Idx;

use crate::first_follow::FirstFollow;
use crate::grammar::{Grammar, NonTermId, RuleId, TermId};

/// One parse-table cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// No rule applies and the terminal is not in FOLLOW: skip the input
    /// token.
    Error,
    /// The terminal is in FOLLOW of the non-terminal: pop the non-terminal.
    Synch,
    /// Expand by this rule.
    Rule(RuleId),
}

/// The LL(1) parse table of a grammar.
///
/// # Example
///
/// ```
/// use rillc_par::first_follow::FirstFollow;
/// use rillc_par::grammar::Grammar;
/// use rillc_par::table::{Cell, ParseTable};
///
/// let grammar = Grammar::from_str_text("S TK_a A\nA TK_b\nA TK_EPS\n").unwrap();
/// let sets = FirstFollow::compute(&grammar);
/// let table = ParseTable::build(&grammar, &sets);
///
/// let s = grammar.non_terminal("S").unwrap();
/// let tk_a = grammar.terminal("TK_a").unwrap();
/// assert!(matches!(table.get(s, tk_a), Cell::Rule(_)));
/// ```
pub struct ParseTable {
    cells: Vec<Cell>,
    terminal_count: usize,
}

impl ParseTable {
    /// Build the table from a grammar and its FIRST/FOLLOW sets.
    pub fn build(grammar: &Grammar, sets: &FirstFollow) -> ParseTable {
        let terminal_count = grammar.terminal_count();
        let mut cells = vec![Cell::Error; grammar.non_terminal_count() * terminal_count];

        for (id, rule) in grammar.rules().iter_enumerated() {
            let (rhs_first, derives_epsilon) = sets.first_of_sequence(grammar, &rule.rhs);
            for t in rhs_first.iter() {
                // Last writer wins on non-LL(1) conflicts.
                cells[rule.lhs.index() * terminal_count + t.index()] = Cell::Rule(id);
            }
            if derives_epsilon {
                for t in sets.follow(rule.lhs).iter() {
                    cells[rule.lhs.index() * terminal_count + t.index()] = Cell::Rule(id);
                }
            }
        }

        // Upgrade FOLLOW-set error cells to synchronizing entries.
        for nt in 0..grammar.non_terminal_count() {
            let follow = sets.follow(NonTermId::from_usize(nt));
            for t in 0..terminal_count {
                let term = TermId::from_usize(t);
                if Some(term) == grammar.epsilon() {
                    continue;
                }
                let cell = &mut cells[nt * terminal_count + t];
                if *cell == Cell::Error && follow.contains(term) {
                    *cell = Cell::Synch;
                }
            }
        }

        ParseTable {
            cells,
            terminal_count,
        }
    }

    /// Cell lookup.
    pub fn get(&self, nt: NonTermId, t: TermId) -> Cell {
        self.cells[nt.index() * self.terminal_count + t.index()]
    }
}
