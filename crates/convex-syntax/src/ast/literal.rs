//! Decoding of literal token text into values.

use super::Literal;
use crate::SyntaxKind::*;
use crate::SyntaxToken;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LiteralKind {
    Nil,
    Bool,
    Char,
    String,
    Address,
    Bytes,
    Long,
    Float,
    Keyword,
}

impl<'a> Literal<'a> {
    pub fn token(self) -> Option<SyntaxToken<'a>> {
        self.0.tokens().find(|token| token.kind().is_literal_token())
    }

    pub fn kind(self) -> Option<LiteralKind> {
        Some(match self.token()?.kind() {
            NIL_KW => LiteralKind::Nil,
            TRUE_KW | FALSE_KW => LiteralKind::Bool,
            CHAR => LiteralKind::Char,
            STRING => LiteralKind::String,
            ADDRESS => LiteralKind::Address,
            BYTES => LiteralKind::Bytes,
            INT_NUMBER => LiteralKind::Long,
            FLOAT_NUMBER => LiteralKind::Float,
            KEYWORD => LiteralKind::Keyword,
            _ => return None,
        })
    }

    fn text_of(self, kind: LiteralKind) -> Option<&'a str> {
        let token = self.token()?;
        (self.kind()? == kind).then(|| token.text_trimmed())
    }

    pub fn as_bool(self) -> Option<bool> {
        match self.token()?.kind() {
            TRUE_KW => Some(true),
            FALSE_KW => Some(false),
            _ => None,
        }
    }

    /// `None` on overflow.
    pub fn as_long(self) -> Option<i64> {
        let text = self.text_of(LiteralKind::Long)?;
        text.strip_suffix('.').unwrap_or(text).parse().ok()
    }

    pub fn as_float(self) -> Option<f64> {
        match self.text_of(LiteralKind::Float)? {
            "##NaN" => Some(f64::NAN),
            "##Inf" => Some(f64::INFINITY),
            "##-Inf" => Some(f64::NEG_INFINITY),
            text => text.parse().ok(),
        }
    }

    pub fn as_char(self) -> Option<char> {
        let text = self.text_of(LiteralKind::Char)?.strip_prefix('\\')?;
        let named = match text {
            "backspace" => Some('\u{8}'),
            "formfeed" => Some('\u{c}'),
            "newline" => Some('\n'),
            "return" => Some('\r'),
            "space" => Some(' '),
            "tab" => Some('\t'),
            _ => None,
        };
        if named.is_some() {
            return named;
        }

        if let Some(hex) = text.strip_prefix('u').filter(|hex| hex.len() == 4) {
            return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
        }

        let mut chars = text.chars();
        let ch = chars.next()?;
        chars.next().is_none().then_some(ch)
    }

    /// The string contents with escapes resolved. `None` if the literal is
    /// unterminated or holds a malformed `\u` escape.
    pub fn as_string(self) -> Option<String> {
        let text = self.text_of(LiteralKind::String)?;
        let body = text.strip_prefix('"')?.strip_suffix('"')?;
        if body.ends_with('\\') && !ends_with_escaped_backslash(body) {
            return None;
        }
        unescape(body)
    }

    pub fn as_address(self) -> Option<u64> {
        self.text_of(LiteralKind::Address)?.strip_prefix('#')?.parse().ok()
    }

    /// `None` if the hex digits do not form whole bytes.
    pub fn as_bytes(self) -> Option<Vec<u8>> {
        let hex = self.text_of(LiteralKind::Bytes)?.strip_prefix("0x")?;
        if hex.len() % 2 != 0 {
            return None;
        }

        (0..hex.len())
            .step_by(2)
            .map(|at| hex.get(at..at + 2).and_then(|byte| u8::from_str_radix(byte, 16).ok()))
            .collect()
    }

    /// The keyword name without its `:`.
    pub fn as_keyword(self) -> Option<&'a str> {
        self.text_of(LiteralKind::Keyword)?.strip_prefix(':')
    }
}

// `"a\\"` is terminated, `"a\"` is not.
fn ends_with_escaped_backslash(body: &str) -> bool {
    body.bytes().rev().take_while(|&byte| byte == b'\\').count() % 2 == 0
}

fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        let escaped = match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'u' => {
                let hex = chars.as_str().get(..4)?;
                let ch = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)?;
                chars = chars.as_str()[4..].chars();
                ch
            }
            other => other,
        };
        out.push(escaped);
    }

    Some(out)
}
