//! FIRST and FOLLOW set computation.
//!
//! Both sets are computed as iterative fixpoints over the rules. FIRST is
//! kept as a bitset over terminals plus a separate epsilon flag per
//! non-terminal: the epsilon marker is never stored as a set bit. FOLLOW is
//! a plain bitset; by construction the epsilon marker never enters it, and
//! the end-of-input terminal is seeded into FOLLOW of the start symbol.

use rillc_util::{Idx, IndexVec};

use crate::grammar::{Grammar, GrammarSymbol, NonTermId, TermId};

/// A bitset over the grammar's terminals.
///
/// Backed by `u64` blocks sized to the terminal count at construction.
/// All sets in one computation share the same width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermSet {
    bits: Vec<u64>,
}

impl TermSet {
    /// An empty set sized for `terminal_count` terminals.
    pub fn new(terminal_count: usize) -> Self {
        Self {
            bits: vec![0; terminal_count.div_ceil(64)],
        }
    }

    /// Insert a terminal. Returns true if the set changed.
    pub fn insert(&mut self, t: TermId) -> bool {
        let (block, bit) = (t.index() / 64, t.index() % 64);
        let mask = 1u64 << bit;
        let changed = self.bits[block] & mask == 0;
        self.bits[block] |= mask;
        changed
    }

    /// Membership test.
    pub fn contains(&self, t: TermId) -> bool {
        let (block, bit) = (t.index() / 64, t.index() % 64);
        self.bits
            .get(block)
            .is_some_and(|b| b & (1u64 << bit) != 0)
    }

    /// Union `other` into `self`. Returns true if the set changed.
    pub fn union_with(&mut self, other: &TermSet) -> bool {
        debug_assert_eq!(self.bits.len(), other.bits.len());
        let mut changed = false;
        for (dst, src) in self.bits.iter_mut().zip(&other.bits) {
            let merged = *dst | *src;
            changed |= merged != *dst;
            *dst = merged;
        }
        changed
    }

    /// Number of terminals in the set.
    pub fn len(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// True if no terminal is in the set.
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Iterate over the members in index order.
    pub fn iter(&self) -> impl Iterator<Item = TermId> + '_ {
        self.bits.iter().enumerate().flat_map(|(block, &word)| {
            (0..64)
                .filter(move |bit| word & (1u64 << bit) != 0)
                .map(move |bit| TermId::from_usize(block * 64 + bit))
        })
    }
}

/// FIRST and FOLLOW sets for every non-terminal of a grammar.
///
/// # Example
///
/// ```
/// use rillc_par::first_follow::FirstFollow;
/// use rillc_par::grammar::Grammar;
///
/// let grammar = Grammar::from_str_text("S TK_a A\nA TK_b\nA TK_EPS\n").unwrap();
/// let sets = FirstFollow::compute(&grammar);
///
/// let s = grammar.non_terminal("S").unwrap();
/// let a = grammar.non_terminal("A").unwrap();
/// let tk_a = grammar.terminal("TK_a").unwrap();
/// let tk_b = grammar.terminal("TK_b").unwrap();
///
/// assert!(sets.first(s).contains(tk_a));
/// assert!(sets.first(a).contains(tk_b));
/// assert!(sets.first_has_epsilon(a));
/// assert!(sets.follow(a).contains(grammar.dollar()));
/// ```
pub struct FirstFollow {
    first: IndexVec<NonTermId, TermSet>,
    first_epsilon: IndexVec<NonTermId, bool>,
    follow: IndexVec<NonTermId, TermSet>,
}

impl FirstFollow {
    /// Compute both set families to their fixpoints.
    pub fn compute(grammar: &Grammar) -> FirstFollow {
        let (first, first_epsilon) = compute_first(grammar);
        let follow = compute_follow(grammar, &first, &first_epsilon);
        FirstFollow {
            first,
            first_epsilon,
            follow,
        }
    }

    /// FIRST set of a non-terminal, epsilon excluded.
    pub fn first(&self, nt: NonTermId) -> &TermSet {
        &self.first[nt]
    }

    /// Whether epsilon is in FIRST of the non-terminal.
    pub fn first_has_epsilon(&self, nt: NonTermId) -> bool {
        self.first_epsilon[nt]
    }

    /// FOLLOW set of a non-terminal.
    pub fn follow(&self, nt: NonTermId) -> &TermSet {
        &self.follow[nt]
    }

    /// FIRST of a symbol sequence: the terminal set and whether the whole
    /// sequence derives epsilon. An empty sequence derives epsilon.
    pub fn first_of_sequence(
        &self,
        grammar: &Grammar,
        sequence: &[GrammarSymbol],
    ) -> (TermSet, bool) {
        sequence_first(grammar, &self.first, &self.first_epsilon, sequence)
    }
}

/// FIRST of `sequence` against the given (possibly still growing) FIRST
/// sets.
fn sequence_first(
    grammar: &Grammar,
    first: &IndexVec<NonTermId, TermSet>,
    first_epsilon: &IndexVec<NonTermId, bool>,
    sequence: &[GrammarSymbol],
) -> (TermSet, bool) {
    let mut set = TermSet::new(grammar.terminal_count());
    for sym in sequence {
        match *sym {
            GrammarSymbol::Terminal(t) => {
                if Some(t) == grammar.epsilon() {
                    // The marker itself derives the empty string.
                    continue;
                }
                set.insert(t);
                return (set, false);
            }
            GrammarSymbol::NonTerminal(n) => {
                set.union_with(&first[n]);
                if !first_epsilon[n] {
                    return (set, false);
                }
            }
        }
    }
    (set, true)
}

/// FIRST fixpoint: repeat rule passes until nothing changes.
fn compute_first(
    grammar: &Grammar,
) -> (IndexVec<NonTermId, TermSet>, IndexVec<NonTermId, bool>) {
    let nt_count = grammar.non_terminal_count();
    let mut first: IndexVec<NonTermId, TermSet> = (0..nt_count)
        .map(|_| TermSet::new(grammar.terminal_count()))
        .collect();
    let mut first_epsilon: IndexVec<NonTermId, bool> = IndexVec::from_elem(false, nt_count);

    loop {
        let mut changed = false;
        for rule in grammar.rules().iter() {
            let mut all_epsilon = true;
            for sym in &rule.rhs {
                match *sym {
                    GrammarSymbol::Terminal(t) => {
                        if Some(t) == grammar.epsilon() {
                            continue;
                        }
                        changed |= first[rule.lhs].insert(t);
                        all_epsilon = false;
                        break;
                    }
                    GrammarSymbol::NonTerminal(n) => {
                        if n != rule.lhs {
                            let src = first[n].clone();
                            changed |= first[rule.lhs].union_with(&src);
                        }
                        if !first_epsilon[n] {
                            all_epsilon = false;
                            break;
                        }
                    }
                }
            }
            if all_epsilon && !first_epsilon[rule.lhs] {
                first_epsilon[rule.lhs] = true;
                changed = true;
            }
        }
        if !changed {
            return (first, first_epsilon);
        }
    }
}

/// FOLLOW fixpoint. DOLLAR seeds FOLLOW of the start symbol; every rule
/// `A -> alpha B beta` contributes FIRST(beta) to FOLLOW(B), and FOLLOW(A)
/// as well when beta derives epsilon or is empty.
fn compute_follow(
    grammar: &Grammar,
    first: &IndexVec<NonTermId, TermSet>,
    first_epsilon: &IndexVec<NonTermId, bool>,
) -> IndexVec<NonTermId, TermSet> {
    let nt_count = grammar.non_terminal_count();
    let mut follow: IndexVec<NonTermId, TermSet> = (0..nt_count)
        .map(|_| TermSet::new(grammar.terminal_count()))
        .collect();
    follow[grammar.start()].insert(grammar.dollar());

    loop {
        let mut changed = false;
        for rule in grammar.rules().iter() {
            for (i, sym) in rule.rhs.iter().enumerate() {
                let GrammarSymbol::NonTerminal(b) = *sym else {
                    continue;
                };
                let (beta_first, beta_epsilon) =
                    sequence_first(grammar, first, first_epsilon, &rule.rhs[i + 1..]);
                changed |= follow[b].union_with(&beta_first);
                if beta_epsilon && b != rule.lhs {
                    let src = follow[rule.lhs].clone();
                    changed |= follow[b].union_with(&src);
                }
            }
        }
        if !changed {
            return follow;
        }
    }
}
