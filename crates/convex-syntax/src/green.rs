use std::fmt;

use text_size::{TextLen, TextSize};
use triomphe::ThinArc;

use crate::{NodeOrToken, SyntaxKind, TriviaPiece};

pub type Green = NodeOrToken<GreenNode, GreenToken>;

impl Green {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn text_len(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.text_len(),
            NodeOrToken::Token(token) => token.text_len(),
        }
    }
}

/// An immutable, position-independent node that owns its children.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GreenNode {
    kind: SyntaxKind,
    children: Box<[Green]>,
    text_len: TextSize,
}

impl GreenNode {
    pub fn new(kind: SyntaxKind, children: Vec<Green>) -> Self {
        let text_len = children.iter().map(Green::text_len).sum();
        Self { kind, children: children.into_boxed_slice(), text_len }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn children(&self) -> &[Green] {
        &self.children
    }

    pub fn text_len(&self) -> TextSize {
        self.text_len
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in self.children() {
            match child {
                NodeOrToken::Node(node) => fmt::Display::fmt(node, f)?,
                NodeOrToken::Token(token) => f.write_str(token.text())?,
            }
        }
        Ok(())
    }
}

/// A token together with the trivia around it. `text` covers the trivia too.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct GreenToken {
    leading: GreenTrivia,
    kind: SyntaxKind,
    text: Box<str>,
    trailing: GreenTrivia,
}

impl GreenToken {
    pub fn new(
        leading: GreenTrivia,
        kind: SyntaxKind,
        text: impl Into<Box<str>>,
        trailing: GreenTrivia,
    ) -> Self {
        let text = text.into();
        debug_assert!(leading.len() + trailing.len() <= text.text_len());
        Self { leading, kind, text, trailing }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_len(&self) -> TextSize {
        self.text.text_len()
    }

    pub fn leading(&self) -> &GreenTrivia {
        &self.leading
    }

    pub fn trailing(&self) -> &GreenTrivia {
        &self.trailing
    }

    fn leading_trailing_total_len(&self) -> (TextSize, TextSize, TextSize) {
        (self.leading.len(), self.trailing.len(), self.text_len())
    }

    pub fn text_trimmed(&self) -> &str {
        let (leading_len, trailing_len, total_len) = self.leading_trailing_total_len();

        let start: usize = leading_len.into();
        let end: usize = (total_len - trailing_len).into();

        &self.text[start..end]
    }
}

#[derive(Clone, Eq, Hash, PartialEq)]
pub struct GreenTrivia {
    ptr: Option<ThinArc<TextSize, TriviaPiece>>,
}

impl fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenTrivia")
            .field("pieces", &self.pieces())
            .field("total_len", &self.len())
            .finish()
    }
}

impl GreenTrivia {
    pub fn new(pieces: &[TriviaPiece]) -> Self {
        if pieces.is_empty() {
            return Self::empty();
        }

        let total_len = pieces.iter().map(|piece| piece.len).sum();
        Self { ptr: Some(ThinArc::from_header_and_slice(total_len, pieces)) }
    }

    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    pub fn len(&self) -> TextSize {
        match self.ptr {
            None => TextSize::new(0),
            Some(ref ptr) => ptr.header.header,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.slice,
        }
    }
}
