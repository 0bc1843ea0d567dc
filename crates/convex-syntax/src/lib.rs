//! Lossless, immutable syntax tree for Convex Lisp with attached trivia.
//!
//! The green tree owns its children and knows nothing about positions. Red
//! views (`SyntaxNode`, `SyntaxToken`) add absolute offsets on the fly and are
//! cheap to copy. Typed wrappers live in [`ast`].

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod cursor;
mod green;
mod red;
mod syntax_kind;
mod syntax_set;
mod trivia;

/// Incremental builder for constructing a green tree.
pub use builder::Builder;
/// Depth-first traversal events.
pub use cursor::{Preorder, WalkEvent};
/// Position-independent tree storage.
pub use green::{Green, GreenNode, GreenToken, GreenTrivia};
/// Positioned views over the tree.
pub use red::{SyntaxElement, SyntaxElementChildren, SyntaxNode, SyntaxToken, Trivia, TriviaIter};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
pub use text_size::{TextLen, TextRange, TextSize};
/// Trivia pieces attached to tokens.
pub use trivia::{TriviaPiece, TriviaPieceKind};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    pub fn into_node(self) -> Option<N> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<T> {
        match self {
            Self::Node(_) => None,
            Self::Token(token) => Some(token),
        }
    }

    pub fn as_node(&self) -> Option<&N> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&T> {
        match self {
            Self::Node(_) => None,
            Self::Token(token) => Some(token),
        }
    }
}
