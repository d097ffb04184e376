//! Parse tree model and in-order traversal.
//!
//! The tree owns its nodes in an arena indexed by [`NodeId`]; an internal
//! node keeps its children as an ordered sequence matching the right-hand
//! side of the rule that produced it. Terminal leaves start out empty and
//! are filled with the matched token's lexeme, line, and value when the
//! driver consumes that token. A leaf that is never filled (its terminal
//! was popped during recovery) stays empty and is skipped by the listing.

use std::io::{self, Write};

use rillc_lex::NumericValue;
use rillc_util::IndexVec;

use crate::grammar::{Grammar, NonTermId, TermId};

rillc_util::define_idx! {
    /// Dense index of a parse-tree node.
    pub struct NodeId;
}

/// Token data carried by a matched leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafToken {
    /// Lexeme of the matched token, moved out of the token stream.
    pub lexeme: String,
    /// Source line of the matched token.
    pub line: u32,
    /// Numeric value, for literal leaves.
    pub value: Option<NumericValue>,
}

/// One parse-tree node.
#[derive(Clone, Debug)]
pub enum ParseNode {
    /// An expanded non-terminal with its children in rule order.
    Internal {
        /// The non-terminal this node stands for.
        nt: NonTermId,
        /// Children in right-hand-side order.
        children: Vec<NodeId>,
    },
    /// A terminal position. `token` is `None` until the terminal is
    /// matched; epsilon leaves are filled at expansion time.
    Leaf {
        /// The terminal this leaf stands for.
        term: TermId,
        /// The matched token, once consumed.
        token: Option<LeafToken>,
    },
}

/// A parse tree rooted at the grammar's start symbol.
pub struct ParseTree {
    nodes: IndexVec<NodeId, ParseNode>,
    root: NodeId,
}

impl ParseTree {
    /// A tree holding just the root, an internal node for `start`.
    pub fn new(start: NonTermId) -> Self {
        let mut nodes = IndexVec::new();
        let root = nodes.push(ParseNode::Internal {
            nt: start,
            children: Vec::new(),
        });
        Self { nodes, root }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Immutable node access.
    pub fn node(&self, id: NodeId) -> &ParseNode {
        &self.nodes[id]
    }

    /// Number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True only for a tree that lost its root, which cannot happen.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append an internal child for `nt` under `parent`.
    pub(crate) fn add_internal_child(&mut self, parent: NodeId, nt: NonTermId) -> NodeId {
        let child = self.nodes.push(ParseNode::Internal {
            nt,
            children: Vec::new(),
        });
        self.attach(parent, child);
        child
    }

    /// Append an empty leaf child for `term` under `parent`.
    pub(crate) fn add_leaf_child(&mut self, parent: NodeId, term: TermId) -> NodeId {
        let child = self.nodes.push(ParseNode::Leaf { term, token: None });
        self.attach(parent, child);
        child
    }

    /// Fill a leaf with matched token data.
    pub(crate) fn fill_leaf(
        &mut self,
        id: NodeId,
        lexeme: String,
        line: u32,
        value: Option<NumericValue>,
    ) {
        if let ParseNode::Leaf { token, .. } = &mut self.nodes[id] {
            *token = Some(LeafToken {
                lexeme,
                line,
                value,
            });
        }
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let ParseNode::Internal { children, .. } = &mut self.nodes[parent] {
            children.push(child);
        }
    }

    /// In-order walk: first child, then the node itself, then the
    /// remaining children. Leaves and childless internal nodes emit
    /// themselves directly.
    pub fn in_order<F: FnMut(&ParseNode)>(&self, visit: &mut F) {
        self.walk(self.root, visit);
    }

    fn walk<F: FnMut(&ParseNode)>(&self, id: NodeId, visit: &mut F) {
        match self.node(id) {
            ParseNode::Leaf { .. } => visit(self.node(id)),
            ParseNode::Internal { children, .. } => {
                if children.is_empty() {
                    visit(self.node(id));
                    return;
                }
                self.walk(children[0], visit);
                visit(self.node(id));
                for &child in &children[1..] {
                    self.walk(child, visit);
                }
            }
        }
    }

    /// Write the flat in-order listing, one node per line.
    ///
    /// Matched leaves print their terminal name, line, and lexeme;
    /// internal nodes print their non-terminal name, `---`, and
    /// `internal`. Unmatched leaves are omitted.
    pub fn write_listing<W: Write>(&self, grammar: &Grammar, mut w: W) -> io::Result<()> {
        writeln!(
            w,
            "{:<20}{:<15}{:<20}",
            "Token/Non-Terminal", "Line Number", "Lexeme/Type"
        )?;
        let mut result = Ok(());
        self.in_order(&mut |node| {
            if result.is_err() {
                return;
            }
            result = match node {
                ParseNode::Leaf {
                    term,
                    token: Some(token),
                } => writeln!(
                    w,
                    "{:<20}{:<15}{:<20}",
                    grammar.terminal_name(*term),
                    token.line,
                    token.lexeme
                ),
                ParseNode::Leaf { token: None, .. } => Ok(()),
                ParseNode::Internal { nt, .. } => writeln!(
                    w,
                    "{:<20}{:<15}{:<20}",
                    grammar.non_terminal_name(*nt),
                    "---",
                    "internal"
                ),
            };
        });
        result
    }

    /// Lexemes of the matched leaves in traversal order. Used to check that
    /// an error-free parse reproduces the token stream.
    pub fn leaf_lexemes(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.in_order(&mut |node| {
            if let ParseNode::Leaf {
                token: Some(token), ..
            } = node
            {
                out.push(token.lexeme.clone());
            }
        });
        out
    }
}
