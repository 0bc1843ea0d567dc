#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SyntaxKind {
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    HASH_LEFT_BRACE,
    QUOTE_MARK,
    BACKTICK,
    TILDE,
    CARET,
    SLASH,
    COLON,

    NIL_KW,
    TRUE_KW,
    FALSE_KW,
    CHAR,
    STRING,
    ADDRESS,
    BYTES,
    INT_NUMBER,
    FLOAT_NUMBER,
    KEYWORD,

    NAME,
    BUILTIN_SYMBOL,
    BUILTIN_FUNCTION,

    // Form heads and markers. The tokenizer never produces these: the parser
    // remaps a symbol token once the surrounding form is known.
    LOOKUP_KW,
    IMPORT_KW,
    AS_KW,
    DEF_KW,
    DEFN_KW,
    DEFMACRO_KW,
    FN_KW,
    MACRO_KW,
    COND_KW,
    LET_KW,
    LOOP_KW,
    IF_LET_KW,
    WHEN_LET_KW,
    DOTIMES_KW,
    QUOTE_KW,
    QUASIQUOTE_KW,
    UNQUOTE_KW,
    AMP,

    UNKNOWN,
    EOF,

    SOURCE,
    LITERAL,
    SYMBOL,
    LIST,
    VECTOR,
    SET,
    MAP,
    METADATA,
    LOOKUP,
    IMPORT,
    DEF,
    DEFN,
    DEFMACRO,
    FN,
    MACRO,
    ARITY,
    PARAM_LIST,
    FIXED_PARAM,
    OPTIONAL_PARAM,
    COND,
    COND_CLAUSE,
    COND_FALLBACK,
    LET,
    LOOP,
    IF_LET,
    WHEN_LET,
    DOTIMES,
    BINDINGS,
    BINDING,
    QUOTE,
    QUASIQUOTE,
    UNQUOTE,
    ERROR,
    TOMBSTONE,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Maps the head of a parenthesized special form to its keyword kind.
    pub fn from_form_head(text: &str) -> Option<Self> {
        Some(match text {
            "lookup" => LOOKUP_KW,
            "import" => IMPORT_KW,
            "def" => DEF_KW,
            "defn" => DEFN_KW,
            "defmacro" => DEFMACRO_KW,
            "fn" => FN_KW,
            "macro" => MACRO_KW,
            "cond" => COND_KW,
            "let" => LET_KW,
            "loop" => LOOP_KW,
            "if-let" => IF_LET_KW,
            "when-let" => WHEN_LET_KW,
            "dotimes" => DOTIMES_KW,
            "quote" => QUOTE_KW,
            "quasiquote" => QUASIQUOTE_KW,
            "unquote" => UNQUOTE_KW,
            _ => return None,
        })
    }

    pub fn is_symbol_token(self) -> bool {
        matches!(self, NAME | BUILTIN_SYMBOL | BUILTIN_FUNCTION)
    }

    pub fn is_literal_token(self) -> bool {
        matches!(
            self,
            NIL_KW
                | TRUE_KW
                | FALSE_KW
                | CHAR
                | STRING
                | ADDRESS
                | BYTES
                | INT_NUMBER
                | FLOAT_NUMBER
                | KEYWORD
        )
    }

    pub fn is_keyword(self) -> bool {
        (LOOKUP_KW as u16..=AMP as u16).contains(&(self as u16))
    }

    pub fn is_opening_delimiter(self) -> bool {
        matches!(self, LEFT_PAREN | LEFT_BRACKET | LEFT_BRACE | HASH_LEFT_BRACE)
    }

    pub fn is_closing_delimiter(self) -> bool {
        matches!(self, RIGHT_PAREN | RIGHT_BRACKET | RIGHT_BRACE)
    }

    /// The closing delimiter matching an opening one.
    pub fn closing(self) -> Option<Self> {
        match self {
            LEFT_PAREN => Some(RIGHT_PAREN),
            LEFT_BRACKET => Some(RIGHT_BRACKET),
            LEFT_BRACE | HASH_LEFT_BRACE => Some(RIGHT_BRACE),
            _ => None,
        }
    }

    pub fn is_token(self) -> bool {
        (self as u16) <= EOF as u16
    }

    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Source text of fixed-spelling tokens, used in diagnostics.
    pub fn spelling(self) -> Option<&'static str> {
        Some(match self {
            LEFT_PAREN => "(",
            RIGHT_PAREN => ")",
            LEFT_BRACKET => "[",
            RIGHT_BRACKET => "]",
            LEFT_BRACE => "{",
            RIGHT_BRACE => "}",
            HASH_LEFT_BRACE => "#{",
            QUOTE_MARK => "'",
            BACKTICK => "`",
            TILDE => "~",
            CARET => "^",
            SLASH => "/",
            COLON => ":",
            NIL_KW => "nil",
            TRUE_KW => "true",
            FALSE_KW => "false",
            LOOKUP_KW => "lookup",
            IMPORT_KW => "import",
            AS_KW => ":as",
            DEF_KW => "def",
            DEFN_KW => "defn",
            DEFMACRO_KW => "defmacro",
            FN_KW => "fn",
            MACRO_KW => "macro",
            COND_KW => "cond",
            LET_KW => "let",
            LOOP_KW => "loop",
            IF_LET_KW => "if-let",
            WHEN_LET_KW => "when-let",
            DOTIMES_KW => "dotimes",
            QUOTE_KW => "quote",
            QUASIQUOTE_KW => "quasiquote",
            UNQUOTE_KW => "unquote",
            AMP => "&",
            _ => return None,
        })
    }
}
