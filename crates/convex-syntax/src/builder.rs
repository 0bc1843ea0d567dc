//! Incremental builder for the immutable green tree.

use text_size::{TextRange, TextSize};

use crate::{Green, GreenNode, GreenToken, GreenTrivia, NodeOrToken, SyntaxKind};

/// Builds a `GreenNode` from parser events.
///
/// Tokens are sliced out of the source text, so their trivia lengths and
/// ranges must describe `text` exactly.
pub struct Builder<'t> {
    text: &'t str,
    parents: Vec<(SyntaxKind, usize)>,
    children: Vec<Green>,
}

impl Drop for Builder<'_> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.parents.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 32;
const DEFAULT_CHILDREN_LEN: usize = 256;

impl<'t> Builder<'t> {
    pub fn new(text: &'t str) -> Self {
        Self {
            text,
            parents: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            children: Vec::with_capacity(DEFAULT_CHILDREN_LEN),
        }
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        debug_assert!(kind.is_node(), "{kind:?} is not a node kind");
        self.parents.push((kind, self.children.len()));
    }

    /// Finishes the most recently started node.
    pub fn finish_node(&mut self) {
        let (kind, first_child) = self.parents.pop().expect("no opened nodes?");
        let children = self.children.drain(first_child..).collect();
        self.children.push(NodeOrToken::Node(GreenNode::new(kind, children)));
    }

    /// Adds a token with its leading and trailing trivia.
    pub fn token(
        &mut self,
        leading: GreenTrivia,
        kind: SyntaxKind,
        kind_range: TextRange,
        trailing: GreenTrivia,
    ) {
        debug_assert!(!self.parents.is_empty(), "tokens must live inside a node");

        let start = kind_range.start() - leading.len();
        let end = kind_range.end() + trailing.len();
        let text = &self.text[TextRange::new(start, end)];

        self.children.push(NodeOrToken::Token(GreenToken::new(leading, kind, text, trailing)));
    }

    /// Finishes building and returns the root node.
    pub fn finish(mut self) -> GreenNode {
        assert!(self.parents.is_empty(), "unfinished nodes: {:?}", self.parents);
        assert_eq!(self.children.len(), 1, "the tree must have exactly one root");

        match self.children.pop() {
            Some(NodeOrToken::Node(root)) => {
                debug_assert_eq!(root.text_len(), TextSize::of(self.text));
                root
            }
            _ => panic!("the root must be a node"),
        }
    }
}
