//! Lexer for Convex Lisp.
//!
//! Every token carries the trivia around it: leading trivia is everything
//! since the previous token's trailing trivia, trailing trivia runs up to the
//! next line break. Lexical errors are recorded as diagnostics and never stop
//! the tokenizer.

mod cursor;

use convex_builtins::{Builtin, BuiltinRegistry};
use convex_errors::Diagnostic;
pub use convex_syntax::SyntaxKind;
use convex_syntax::SyntaxKind::*;
use convex_syntax::{GreenTrivia, TriviaPiece, TriviaPieceKind};
use cursor::Cursor;
use text_size::{TextRange, TextSize};

/// Longest symbol or keyword name, in characters.
pub const MAX_SYMBOL_LEN: usize = 64;

const NAMED_CHARS: [&str; 6] = ["backspace", "formfeed", "newline", "return", "space", "tab"];

#[derive(Debug, Clone)]
pub struct Token {
    pub leading: GreenTrivia,
    pub kind: SyntaxKind,
    pub kind_range: TextRange,
    pub trailing: GreenTrivia,
}

impl Token {
    const EOF: Self = Self {
        kind: EOF,
        kind_range: TextRange::empty(TextSize::new(0)),
        leading: GreenTrivia::empty(),
        trailing: GreenTrivia::empty(),
    };

    /// The token text without trivia.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.kind_range]
    }

    /// The token range with its leading and trailing trivia.
    pub fn full_range(&self) -> TextRange {
        TextRange::new(
            self.kind_range.start() - self.leading.len(),
            self.kind_range.end() + self.trailing.len(),
        )
    }
}

pub struct Tokenizer<'t> {
    text: &'t str,
    registry: &'t BuiltinRegistry,
    cursor: Cursor<'t>,
    current: Token,
    trivia_pieces: Vec<TriviaPiece>,
    diagnostics: Vec<Diagnostic>,
}

impl<'t> Tokenizer<'t> {
    pub fn new(text: &'t str, registry: &'t BuiltinRegistry) -> Self {
        let mut tokenizer = Self {
            text,
            registry,
            cursor: Cursor::new(text),
            current: Token::EOF,
            trivia_pieces: Vec::with_capacity(4),
            diagnostics: Vec::new(),
        };
        tokenizer.next_token();
        tokenizer
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    /// Lexical diagnostics recorded so far, including those of the peeked token.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn offset(&self) -> TextSize {
        TextSize::of(self.text) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let len = self.cursor.pos_within_token();
        TextRange::at(self.offset() - len, len)
    }

    fn text(&self) -> &'t str {
        &self.text[self.range()]
    }

    /// Returns the peeked token and lexes the one after it. Once the input is
    /// exhausted this keeps returning `EOF`.
    pub fn next_token(&mut self) -> Token {
        self.trivia(false);
        let trailing_start = self.trivia_pieces.len();
        let (kind, kind_range) = self.syntax_kind();
        self.trivia(true);

        let (leading, trailing) = self.trivia_pieces.split_at(trailing_start);
        let leading = GreenTrivia::new(leading);
        let trailing = GreenTrivia::new(trailing);

        self.trivia_pieces.clear();
        std::mem::replace(&mut self.current, Token { leading, kind, kind_range, trailing })
    }

    fn trivia(&mut self, trailing: bool) {
        while !self.cursor.is_eof() {
            let kind = match self.cursor.peek() {
                '\n' if !trailing => {
                    self.cursor.advance();
                    TriviaPieceKind::Newline
                }
                '\r' if !trailing && self.cursor.second() == '\n' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    TriviaPieceKind::Newline
                }
                '\n' => break,
                '\r' if self.cursor.second() == '\n' => break,
                ',' => {
                    self.cursor.advance_while(|c| c == ',');
                    TriviaPieceKind::Comma
                }
                ';' => {
                    self.comment();
                    TriviaPieceKind::Comment
                }
                c if c.is_whitespace() => {
                    self.cursor.advance();
                    self.cursor.advance_while(|c| c.is_whitespace() && !matches!(c, '\n' | '\r'));
                    TriviaPieceKind::Whitespace
                }
                _ => break,
            };

            self.trivia_pieces.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
            self.cursor.reset_pos_within_token();
        }
    }

    fn comment(&mut self) {
        while !self.cursor.is_eof() {
            match self.cursor.peek() {
                '\n' => break,
                '\r' if self.cursor.second() == '\n' => break,
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn syntax_kind(&mut self) -> (SyntaxKind, TextRange) {
        let kind = if self.cursor.is_eof() { EOF } else { self.token_kind() };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        (kind, range)
    }

    fn token_kind(&mut self) -> SyntaxKind {
        match self.cursor.advance() {
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            '\'' => QUOTE_MARK,
            '`' => BACKTICK,
            '~' => TILDE,
            '/' => SLASH,
            '"' => self.string(),
            '\\' => self.character(),
            '#' => self.hash(),
            ':' => self.keyword(),
            '0' if self.cursor.matches('x') => self.bytes(),
            first_char @ '0'..='9' => self.number(first_char),
            first_char @ ('+' | '-') if self.starts_number() => self.number(first_char),
            '.' if self.cursor.peek().is_ascii_digit() => self.number('.'),
            first_char if is_symbol_char(first_char) => self.symbol(),
            first_char => {
                self.error(format!("unexpected character `{}`", first_char.escape_debug()));
                UNKNOWN
            }
        }
    }

    /// After a sign: a digit, or a dot followed by a digit.
    fn starts_number(&self) -> bool {
        let peek = self.cursor.peek();
        peek.is_ascii_digit() || (peek == '.' && self.cursor.second().is_ascii_digit())
    }

    fn number(&mut self, first_char: char) -> SyntaxKind {
        let mut float = first_char == '.';
        self.digits();

        if !float && self.cursor.matches('.') {
            self.cursor.advance();
            if !self.cursor.peek().is_ascii_digit() {
                return INT_NUMBER;
            }
            self.digits();
            float = true;
        }

        if self.float_exponent() {
            float = true;
        }

        if float { FLOAT_NUMBER } else { INT_NUMBER }
    }

    fn digits(&mut self) {
        self.cursor.advance_while(|c| c.is_ascii_digit());
    }

    fn float_exponent(&mut self) -> bool {
        if !matches!(self.cursor.peek(), 'e' | 'E') {
            return false;
        }

        let signed = matches!(self.cursor.second(), '+' | '-');
        let first_digit = if signed { self.cursor.nth(2) } else { self.cursor.second() };
        if !first_digit.is_ascii_digit() {
            return false;
        }

        self.cursor.advance();
        if signed {
            self.cursor.advance();
        }
        self.digits();
        true
    }

    fn bytes(&mut self) -> SyntaxKind {
        self.cursor.advance();
        self.cursor.advance_while(|c| c.is_ascii_hexdigit());

        let digits = self.text().len() - "0x".len();
        if digits == 0 {
            self.error("expected hex digits after `0x`");
        } else if digits % 2 != 0 {
            self.error("odd number of hex digits in byte string, expected whole bytes");
        }
        BYTES
    }

    fn hash(&mut self) -> SyntaxKind {
        match self.cursor.peek() {
            '0'..='9' => {
                self.digits();
                ADDRESS
            }
            '{' => {
                self.cursor.advance();
                HASH_LEFT_BRACE
            }
            '#' => {
                if ["#NaN", "#Inf", "#-Inf"].iter().any(|rest| self.cursor.eat_str(rest)) {
                    return FLOAT_NUMBER;
                }
                self.cursor.advance();
                self.error("expected `##NaN`, `##Inf` or `##-Inf`");
                UNKNOWN
            }
            _ => {
                self.error("expected an address like `#42` or a set `#{`");
                UNKNOWN
            }
        }
    }

    fn keyword(&mut self) -> SyntaxKind {
        if self.cursor.is_eof() || !is_symbol_char(self.cursor.peek()) {
            return COLON;
        }

        self.cursor.advance_while(is_symbol_char);
        self.check_symbol_len(&self.text()[1..]);
        KEYWORD
    }

    fn symbol(&mut self) -> SyntaxKind {
        self.cursor.advance_while(is_symbol_char);

        match self.text() {
            "nil" => NIL_KW,
            "true" => TRUE_KW,
            "false" => FALSE_KW,
            "^" => CARET,
            name => {
                self.check_symbol_len(name);
                match self.registry.classify(name) {
                    Some(Builtin::Function) => BUILTIN_FUNCTION,
                    Some(Builtin::Symbol) => BUILTIN_SYMBOL,
                    None => NAME,
                }
            }
        }
    }

    fn check_symbol_len(&mut self, name: &str) {
        if name.chars().count() > MAX_SYMBOL_LEN {
            self.error(format!("symbol is longer than {MAX_SYMBOL_LEN} characters"));
        }
    }

    fn character(&mut self) -> SyntaxKind {
        if self.cursor.is_eof() || matches!(self.cursor.peek(), '\n' | '\r') {
            self.error("expected a character after `\\`");
            return UNKNOWN;
        }

        if NAMED_CHARS.iter().any(|name| self.cursor.eat_str(name)) {
            return CHAR;
        }

        if self.cursor.matches('u') && (1..=4).all(|n| self.cursor.nth(n).is_ascii_hexdigit()) {
            for _ in 0..5 {
                self.cursor.advance();
            }
            return CHAR;
        }

        self.cursor.advance();
        CHAR
    }

    fn string(&mut self) -> SyntaxKind {
        loop {
            if self.cursor.is_eof() {
                self.error("unterminated string, expected a closing `\"`");
                return STRING;
            }

            match self.cursor.advance() {
                '"' => return STRING,
                '\\' => self.string_escape(),
                _ => {}
            }
        }
    }

    fn string_escape(&mut self) {
        let start = self.offset() - TextSize::of('\\');
        if self.cursor.advance() != 'u' {
            return;
        }

        let hex_digits =
            self.cursor.rest().chars().take(4).take_while(char::is_ascii_hexdigit).count();
        for _ in 0..hex_digits {
            self.cursor.advance();
        }

        if hex_digits < 4 {
            let range = TextRange::new(start, self.offset());
            self.error_at("invalid unicode escape, expected four hex digits after `\\u`", range);
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        self.error_at(message, self.range());
    }

    fn error_at(&mut self, message: impl Into<String>, range: TextRange) {
        self.diagnostics.push(Diagnostic::lexical(message, range));
    }
}

/// Lexes the whole input. The last token is always `EOF`.
pub fn tokenize(text: &str, registry: &BuiltinRegistry) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut tokenizer = Tokenizer::new(text, registry);
    let mut tokens = Vec::new();

    loop {
        let token = tokenizer.next_token();
        let kind = token.kind;
        tokens.push(token);

        if kind == EOF {
            break;
        }
    }

    (tokens, tokenizer.finish())
}

pub fn is_symbol_char(c: char) -> bool {
    !(c.is_whitespace()
        || c.is_control()
        || c.is_ascii_digit()
        || matches!(
            c,
            '~' | '#' | '(' | ')' | '[' | ']' | '{' | '}' | '"' | '\'' | '`' | '\\' | ';' | ':' | '/'
                | ','
        ))
}
