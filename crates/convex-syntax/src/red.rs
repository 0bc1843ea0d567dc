//! Positioned, borrowed views over a green tree.
//!
//! A `SyntaxNode` is a green node plus its absolute offset. Views are `Copy`
//! and never outlive the tree they borrow. There are no parent pointers: walk
//! down from the root instead.

use std::fmt::{self, Write as _};

use text_size::{TextRange, TextSize};

use crate::cursor::{Preorder, WalkEvent};
use crate::{Green, GreenNode, GreenToken, NodeOrToken, SyntaxKind, TriviaPieceKind};

pub type SyntaxElement<'a> = NodeOrToken<SyntaxNode<'a>, SyntaxToken<'a>>;

impl<'a> SyntaxElement<'a> {
    pub fn kind(self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_range(self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.text_range(),
            NodeOrToken::Token(token) => token.text_range(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    green: &'a GreenNode,
    offset: TextSize,
}

impl<'a> SyntaxNode<'a> {
    pub fn new_root(green: &'a GreenNode) -> Self {
        Self { green, offset: TextSize::new(0) }
    }

    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.green.kind()
    }

    #[inline]
    pub fn green(self) -> &'a GreenNode {
        self.green
    }

    /// Returns the range including the trivia of the first and last token.
    #[inline]
    pub fn text_range(self) -> TextRange {
        TextRange::at(self.offset, self.green.text_len())
    }

    /// Returns the range from the first token's text to the last token's text.
    pub fn trimmed_range(self) -> TextRange {
        match (self.first_token(), self.last_token()) {
            (Some(first), Some(last)) => {
                TextRange::new(first.trimmed_range().start(), last.trimmed_range().end())
            }
            _ => TextRange::empty(self.offset),
        }
    }

    /// Returns the source text of this node, trivia included.
    pub fn text(self) -> String {
        self.green.to_string()
    }

    pub fn children_with_tokens(self) -> SyntaxElementChildren<'a> {
        SyntaxElementChildren { children: self.green.children().iter(), offset: self.offset }
    }

    pub fn children(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.children_with_tokens().filter_map(NodeOrToken::into_node)
    }

    /// Direct child tokens, in order.
    pub fn tokens(self) -> impl Iterator<Item = SyntaxToken<'a>> + 'a {
        self.children_with_tokens().filter_map(NodeOrToken::into_token)
    }

    pub fn first_child_or_token(self) -> Option<SyntaxElement<'a>> {
        self.children_with_tokens().next()
    }

    pub fn first_token(self) -> Option<SyntaxToken<'a>> {
        let mut node = self;
        loop {
            match node.first_child_or_token()? {
                NodeOrToken::Node(child) => node = child,
                NodeOrToken::Token(token) => return Some(token),
            }
        }
    }

    pub fn last_token(self) -> Option<SyntaxToken<'a>> {
        self.descendant_tokens().last()
    }

    pub fn preorder(self) -> Preorder<'a> {
        Preorder::new(self)
    }

    /// This node and every node below it, in source order.
    pub fn descendants(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.preorder().filter_map(|event| match event {
            WalkEvent::Enter(NodeOrToken::Node(node)) => Some(node),
            _ => None,
        })
    }

    /// Every token below this node, in source order.
    pub fn descendant_tokens(self) -> impl Iterator<Item = SyntaxToken<'a>> + 'a {
        self.preorder().filter_map(|event| match event {
            WalkEvent::Enter(NodeOrToken::Token(token)) => Some(token),
            _ => None,
        })
    }

    /// Finds the token whose trimmed text covers `offset`.
    pub fn token_at_offset(self, offset: TextSize) -> Option<SyntaxToken<'a>> {
        let mut node = self;
        'descend: loop {
            for child in node.children_with_tokens() {
                if !child.text_range().contains_inclusive(offset) {
                    continue;
                }
                match child {
                    NodeOrToken::Node(child) => {
                        node = child;
                        continue 'descend;
                    }
                    NodeOrToken::Token(token) => {
                        if token.trimmed_range().contains_inclusive(offset) {
                            return Some(token);
                        }
                    }
                }
            }
            return None;
        }
    }

    /// An indented `KIND@start..end` rendering of the subtree. Token lines also
    /// show the token text; trivia is left out.
    pub fn debug_dump(self) -> String {
        let mut buf = String::new();
        let mut indent = 0;

        for event in self.preorder() {
            match event {
                WalkEvent::Enter(NodeOrToken::Node(node)) => {
                    _ = writeln!(buf, "{:indent$}{:?}@{:?}", "", node.kind(), node.trimmed_range());
                    indent += 2;
                }
                WalkEvent::Enter(NodeOrToken::Token(token)) => {
                    _ = writeln!(buf, "{:indent$}{token:?}", "");
                }
                WalkEvent::Leave(NodeOrToken::Node(_)) => indent -= 2,
                WalkEvent::Leave(NodeOrToken::Token(_)) => {}
            }
        }

        buf
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.green, other.green) && self.offset == other.offset
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

impl fmt::Display for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.green, f)
    }
}

/// Iterator over the children of a node with their absolute offsets.
#[derive(Clone)]
pub struct SyntaxElementChildren<'a> {
    children: std::slice::Iter<'a, Green>,
    offset: TextSize,
}

impl<'a> Iterator for SyntaxElementChildren<'a> {
    type Item = SyntaxElement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let green = self.children.next()?;
        let offset = self.offset;
        self.offset += green.text_len();

        Some(match green {
            NodeOrToken::Node(node) => NodeOrToken::Node(SyntaxNode { green: node, offset }),
            NodeOrToken::Token(token) => NodeOrToken::Token(SyntaxToken { green: token, offset }),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.children.size_hint()
    }
}

impl ExactSizeIterator for SyntaxElementChildren<'_> {}

#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    green: &'a GreenToken,
    offset: TextSize,
}

impl<'a> SyntaxToken<'a> {
    #[inline]
    pub fn kind(self) -> SyntaxKind {
        self.green.kind()
    }

    #[inline]
    pub fn green(self) -> &'a GreenToken {
        self.green
    }

    /// Returns the token text range including attached trivia.
    #[inline]
    pub fn text_range(self) -> TextRange {
        TextRange::at(self.offset, self.green.text_len())
    }

    /// Returns the token text range excluding trivia.
    pub fn trimmed_range(self) -> TextRange {
        let range = self.text_range();
        TextRange::new(
            range.start() + self.green.leading().len(),
            range.end() - self.green.trailing().len(),
        )
    }

    /// Returns the token text including trivia.
    #[inline]
    pub fn text(self) -> &'a str {
        self.green.text()
    }

    /// Returns the token text excluding trivia.
    #[inline]
    pub fn text_trimmed(self) -> &'a str {
        self.green.text_trimmed()
    }

    pub fn leading_trivia(self) -> TriviaIter<'a> {
        let pieces = self.green.leading().pieces();
        TriviaIter {
            pieces: pieces.iter(),
            text: self.green.text(),
            offset: TextSize::new(0),
            base: self.offset,
        }
    }

    pub fn trailing_trivia(self) -> TriviaIter<'a> {
        let pieces = self.green.trailing().pieces();
        let start = self.green.text_len() - self.green.trailing().len();
        TriviaIter { pieces: pieces.iter(), text: self.green.text(), offset: start, base: self.offset }
    }
}

impl PartialEq for SyntaxToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.green, other.green) && self.offset == other.offset
    }
}

impl Eq for SyntaxToken<'_> {}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.trimmed_range(), self.text_trimmed())
    }
}

/// One trivia piece with its text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Trivia<'a> {
    pub kind: TriviaPieceKind,
    pub text: &'a str,
    pub range: TextRange,
}

#[derive(Clone)]
pub struct TriviaIter<'a> {
    pieces: std::slice::Iter<'a, crate::TriviaPiece>,
    text: &'a str,
    /// Offset of the next piece inside the token text.
    offset: TextSize,
    /// Absolute offset of the token text.
    base: TextSize,
}

impl<'a> Iterator for TriviaIter<'a> {
    type Item = Trivia<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let piece = self.pieces.next()?;
        let local = TextRange::at(self.offset, piece.len);
        self.offset += piece.len;

        Some(Trivia { kind: piece.kind, text: &self.text[local], range: local + self.base })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.pieces.size_hint()
    }
}

impl ExactSizeIterator for TriviaIter<'_> {}
