use convex_errors::Diagnostic;
use convex_syntax::{Builder, GreenNode, SyntaxKind, SyntaxSet};
use convex_tokenizer::Token;
use drop_bomb::DropBomb;
use text_size::TextRange;

/// Nesting limit for forms. Anything deeper is skipped as a single error.
pub(crate) const MAX_DEPTH: usize = 128;

pub(crate) struct Parser<'t> {
    text: &'t str,
    tokens: Vec<Token>,
    pos: usize,
    events: Vec<Event>,
    diagnostics: Vec<Diagnostic>,
    /// Closing delimiters of the collections and forms currently open, with
    /// the name of the form for diagnostics.
    frames: Vec<(SyntaxKind, &'static str)>,
    pub(crate) depth: usize,
    /// Kind given to a `/` that stands alone as the division symbol.
    slash_kind: SyntaxKind,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(text: &'t str, tokens: Vec<Token>, slash_kind: SyntaxKind) -> Self {
        debug_assert_eq!(tokens.last().map(|token| token.kind), Some(SyntaxKind::EOF));

        Self {
            text,
            tokens,
            pos: 0,
            events: Vec::new(),
            diagnostics: Vec::new(),
            frames: Vec::new(),
            depth: 0,
            slash_kind,
        }
    }

    fn token(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    pub(crate) fn nth(&self, n: usize) -> SyntaxKind {
        self.token(n).kind
    }

    pub(crate) fn nth_text(&self, n: usize) -> &'t str {
        self.token(n).text(self.text)
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(crate) fn peek_text(&self) -> &'t str {
        self.nth_text(0)
    }

    pub(crate) fn peek_range(&self) -> TextRange {
        self.token(0).kind_range
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_set(&self, set: &SyntaxSet) -> bool {
        set.contains(self.peek_kind())
    }

    /// Whether the `n`th token touches the one after it, with no trivia between.
    pub(crate) fn joined(&self, n: usize) -> bool {
        self.token(n).trailing.is_empty() && self.token(n + 1).leading.is_empty()
    }

    /// Whether the previous token touches the current one.
    pub(crate) fn joined_to_previous(&self) -> bool {
        self.pos > 0
            && self.tokens[self.pos - 1].trailing.is_empty()
            && self.token(0).leading.is_empty()
    }

    pub(crate) fn slash_kind(&self) -> SyntaxKind {
        self.slash_kind
    }

    pub(crate) fn advance(&mut self) {
        let kind = self.peek_kind();
        self.advance_remap(kind);
    }

    /// Consumes the current token under a different kind.
    pub(crate) fn advance_remap(&mut self, kind: SyntaxKind) {
        if self.at(SyntaxKind::EOF) {
            return;
        }

        self.events.push(Event::Token { kind });
        self.pos += 1;
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Opens a delimited sequence: consumes the opening token and remembers
    /// which closing token ends it.
    pub(crate) fn open(&mut self, context: &'static str) {
        let closing = self.peek_kind().closing();
        debug_assert!(closing.is_some(), "{:?} does not open a sequence", self.peek_kind());

        self.advance();
        self.frames.push((closing.unwrap_or(SyntaxKind::RIGHT_PAREN), context));
    }

    /// Closes the innermost sequence, reporting the closing token if missing.
    pub(crate) fn close(&mut self) {
        let Some((closing, _)) = self.frames.last().copied() else {
            return;
        };

        if !self.eat(closing) {
            self.error(format!("expected `{}`", closing.spelling().unwrap_or_default()));
        }
        self.frames.pop();
    }

    /// Whether the current token ends the innermost sequence, either because
    /// it closes an open sequence or because the input is exhausted.
    pub(crate) fn at_sequence_end(&self) -> bool {
        let kind = self.peek_kind();
        kind == SyntaxKind::EOF
            || (kind.is_closing_delimiter()
                && self.frames.iter().any(|(closing, _)| *closing == kind))
    }

    pub(crate) fn context(&self) -> Option<&'static str> {
        self.frames.last().map(|(_, context)| *context)
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos, self.pos)
    }

    /// Reports an error at the current token.
    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.error_at(message, self.peek_range());
    }

    pub(crate) fn error_at(&mut self, message: impl Into<String>, range: TextRange) {
        let diagnostic = Diagnostic::syntax(message, range);
        let diagnostic = match self.context() {
            Some(context) => diagnostic.with_context(context),
            None => diagnostic,
        };
        self.diagnostics.push(diagnostic);
    }

    /// The range covered by the tokens in `start..end`, without trivia.
    pub(crate) fn tokens_range(&self, start: usize, end: usize) -> TextRange {
        if start >= end {
            return TextRange::empty(self.token(0).kind_range.start());
        }
        self.tokens[start].kind_range.cover(self.tokens[end - 1].kind_range)
    }

    /// Consumes the end-of-file token, which carries the final trivia of the
    /// input.
    pub(crate) fn eat_eof(&mut self) {
        debug_assert!(self.at(SyntaxKind::EOF));
        self.events.push(Event::Token { kind: SyntaxKind::EOF });
    }

    pub(crate) fn finish(self) -> (GreenNode, Vec<Diagnostic>) {
        let Parser { text, tokens, mut events, mut diagnostics, .. } = self;
        let mut builder = Builder::new(text);
        let mut tokens = tokens.into_iter();
        let mut forward_parents = Vec::new();

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    if kind == SyntaxKind::TOMBSTONE {
                        continue;
                    }

                    forward_parents.push(kind);
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent } => {
                                if kind != SyntaxKind::TOMBSTONE {
                                    forward_parents.push(kind);
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        builder.start_node(kind);
                    }
                }
                Event::Finish => {
                    builder.finish_node();
                }
                Event::Token { kind } => {
                    let Some(Token { leading, kind_range, trailing, .. }) = tokens.next() else {
                        unreachable!("more token events than tokens");
                    };
                    builder.token(leading, kind, kind_range, trailing);
                }
            }
        }

        diagnostics.sort_by_key(|diagnostic| diagnostic.range().start());
        (builder.finish(), diagnostics)
    }
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token { kind: SyntaxKind },
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Self::Start { kind: SyntaxKind::TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    first_token: usize,
    bomb: DropBomb,
}

impl Marker {
    fn new(position: u32, first_token: usize) -> Self {
        Self {
            position,
            first_token,
            bomb: DropBomb::new("Marker must be completed"),
        }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker { pos: self.position, first_token: self.first_token, end_token: p.pos }
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
    first_token: usize,
    end_token: usize,
}

impl CompletedMarker {
    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let mut new_pos = p.start();
        new_pos.first_token = self.first_token;

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }

    /// The source range of the completed node, without surrounding trivia.
    pub(crate) fn range(&self, p: &Parser<'_>) -> TextRange {
        p.tokens_range(self.first_token, self.end_token)
    }
}
