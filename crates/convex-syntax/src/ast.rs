use convex_builtins::Builtin;

use crate::SyntaxKind::{self, *};
use crate::{GreenNode, NodeOrToken, SyntaxNode, SyntaxToken};

mod literal;

pub use literal::LiteralKind;

pub trait AstNode<'a>: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;

    fn cast(syntax: SyntaxNode<'a>) -> Option<Self>;

    fn syntax(&self) -> SyntaxNode<'a>;
}

macro_rules! ast_node {
    ($($(#[$meta:meta])* $name:ident => $kind:ident,)*) => {$(
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, PartialEq)]
        pub struct $name<'a>(SyntaxNode<'a>);

        impl<'a> AstNode<'a> for $name<'a> {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == $kind
            }

            fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
                Self::can_cast(syntax.kind()).then_some(Self(syntax))
            }

            fn syntax(&self) -> SyntaxNode<'a> {
                self.0
            }
        }
    )*};
}

ast_node! {
    /// Root of a source unit.
    Source => SOURCE,
    /// Any literal token: nil, booleans, characters, strings, blobs, numbers, keywords.
    Literal => LITERAL,
    Symbol => SYMBOL,
    List => LIST,
    Vector => VECTOR,
    Set => SET,
    Map => MAP,
    /// `^{...}` attached to a definition.
    Metadata => METADATA,
    /// `account/name` or `(lookup account? name)`.
    Lookup => LOOKUP,
    Import => IMPORT,
    Def => DEF,
    Defn => DEFN,
    Defmacro => DEFMACRO,
    Fn => FN,
    Macro => MACRO,
    /// A parameter list and exactly one body form.
    Arity => ARITY,
    ParamList => PARAM_LIST,
    FixedParam => FIXED_PARAM,
    OptionalParam => OPTIONAL_PARAM,
    Cond => COND,
    CondClause => COND_CLAUSE,
    CondFallback => COND_FALLBACK,
    Let => LET,
    Loop => LOOP,
    IfLet => IF_LET,
    WhenLet => WHEN_LET,
    Dotimes => DOTIMES,
    Bindings => BINDINGS,
    Binding => BINDING,
    /// Whatever the parser could not make sense of.
    ErrorNode => ERROR,
}

fn child<'a, N: AstNode<'a>>(syntax: SyntaxNode<'a>) -> Option<N> {
    syntax.children().find_map(N::cast)
}

fn children<'a, N: AstNode<'a> + 'a>(syntax: SyntaxNode<'a>) -> impl Iterator<Item = N> + 'a {
    syntax.children().filter_map(N::cast)
}

fn forms<'a>(syntax: SyntaxNode<'a>) -> impl Iterator<Item = Form<'a>> + 'a {
    children(syntax)
}

fn token(syntax: SyntaxNode<'_>, kind: SyntaxKind) -> Option<SyntaxToken<'_>> {
    syntax.tokens().find(|token| token.kind() == kind)
}

/// Any form that may stand on its own.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Form<'a> {
    Literal(Literal<'a>),
    Symbol(Symbol<'a>),
    List(List<'a>),
    Vector(Vector<'a>),
    Set(Set<'a>),
    Map(Map<'a>),
    Lookup(Lookup<'a>),
    Import(Import<'a>),
    Def(Def<'a>),
    Defn(Defn<'a>),
    Defmacro(Defmacro<'a>),
    Fn(Fn<'a>),
    Macro(Macro<'a>),
    Cond(Cond<'a>),
    Let(Let<'a>),
    Loop(Loop<'a>),
    IfLet(IfLet<'a>),
    WhenLet(WhenLet<'a>),
    Dotimes(Dotimes<'a>),
    Quoted(Quoted<'a>),
    Error(ErrorNode<'a>),
}

impl<'a> AstNode<'a> for Form<'a> {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            LITERAL
                | SYMBOL
                | LIST
                | VECTOR
                | SET
                | MAP
                | LOOKUP
                | IMPORT
                | DEF
                | DEFN
                | DEFMACRO
                | FN
                | MACRO
                | COND
                | LET
                | LOOP
                | IF_LET
                | WHEN_LET
                | DOTIMES
                | QUOTE
                | QUASIQUOTE
                | UNQUOTE
                | ERROR
        )
    }

    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        let form = match syntax.kind() {
            LITERAL => Self::Literal(Literal(syntax)),
            SYMBOL => Self::Symbol(Symbol(syntax)),
            LIST => Self::List(List(syntax)),
            VECTOR => Self::Vector(Vector(syntax)),
            SET => Self::Set(Set(syntax)),
            MAP => Self::Map(Map(syntax)),
            LOOKUP => Self::Lookup(Lookup(syntax)),
            IMPORT => Self::Import(Import(syntax)),
            DEF => Self::Def(Def(syntax)),
            DEFN => Self::Defn(Defn(syntax)),
            DEFMACRO => Self::Defmacro(Defmacro(syntax)),
            FN => Self::Fn(Fn(syntax)),
            MACRO => Self::Macro(Macro(syntax)),
            COND => Self::Cond(Cond(syntax)),
            LET => Self::Let(Let(syntax)),
            LOOP => Self::Loop(Loop(syntax)),
            IF_LET => Self::IfLet(IfLet(syntax)),
            WHEN_LET => Self::WhenLet(WhenLet(syntax)),
            DOTIMES => Self::Dotimes(Dotimes(syntax)),
            QUOTE | QUASIQUOTE | UNQUOTE => Self::Quoted(Quoted(syntax)),
            ERROR => Self::Error(ErrorNode(syntax)),
            _ => return None,
        };
        Some(form)
    }

    fn syntax(&self) -> SyntaxNode<'a> {
        match self {
            Self::Literal(it) => it.0,
            Self::Symbol(it) => it.0,
            Self::List(it) => it.0,
            Self::Vector(it) => it.0,
            Self::Set(it) => it.0,
            Self::Map(it) => it.0,
            Self::Lookup(it) => it.0,
            Self::Import(it) => it.0,
            Self::Def(it) => it.0,
            Self::Defn(it) => it.0,
            Self::Defmacro(it) => it.0,
            Self::Fn(it) => it.0,
            Self::Macro(it) => it.0,
            Self::Cond(it) => it.0,
            Self::Let(it) => it.0,
            Self::Loop(it) => it.0,
            Self::IfLet(it) => it.0,
            Self::WhenLet(it) => it.0,
            Self::Dotimes(it) => it.0,
            Self::Quoted(it) => it.0,
            Self::Error(it) => it.0,
        }
    }
}

impl<'a> Source<'a> {
    pub fn new(green: &'a GreenNode) -> Self {
        debug_assert_eq!(green.kind(), SOURCE);
        Self(SyntaxNode::new_root(green))
    }

    pub fn forms(self) -> impl Iterator<Item = Form<'a>> + 'a {
        forms(self.0)
    }
}

impl<'a> Symbol<'a> {
    pub fn token(self) -> Option<SyntaxToken<'a>> {
        self.0.tokens().find(|token| token.kind().is_symbol_token())
    }

    pub fn name(self) -> &'a str {
        self.token().map_or("", SyntaxToken::text_trimmed)
    }

    /// The tokenizer's advisory classification against the builtin registry.
    pub fn builtin(self) -> Option<Builtin> {
        match self.token()?.kind() {
            BUILTIN_SYMBOL => Some(Builtin::Symbol),
            BUILTIN_FUNCTION => Some(Builtin::Function),
            _ => None,
        }
    }
}

impl<'a> List<'a> {
    pub fn forms(self) -> impl Iterator<Item = Form<'a>> + 'a {
        forms(self.0)
    }
}

impl<'a> Vector<'a> {
    pub fn forms(self) -> impl Iterator<Item = Form<'a>> + 'a {
        forms(self.0)
    }
}

impl<'a> Set<'a> {
    pub fn forms(self) -> impl Iterator<Item = Form<'a>> + 'a {
        forms(self.0)
    }
}

impl<'a> Map<'a> {
    pub fn forms(self) -> impl Iterator<Item = Form<'a>> + 'a {
        forms(self.0)
    }

    /// Key/value pairs. A trailing unpaired form is left out.
    pub fn entries(self) -> Vec<(Form<'a>, Form<'a>)> {
        let forms = self.forms().collect::<Vec<_>>();
        forms.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect()
    }
}

impl<'a> Metadata<'a> {
    pub fn map(self) -> Option<Map<'a>> {
        child(self.0)
    }
}

/// The account part of a lookup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Account<'a> {
    Address(Literal<'a>),
    Symbol(Symbol<'a>),
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LookupStyle {
    /// `account/name`
    Infix,
    /// `(lookup account name)`
    Call,
}

impl<'a> Lookup<'a> {
    pub fn style(self) -> LookupStyle {
        if token(self.0, LOOKUP_KW).is_some() { LookupStyle::Call } else { LookupStyle::Infix }
    }

    fn operands(self) -> impl Iterator<Item = SyntaxNode<'a>> + 'a {
        self.0.children().filter(|node| matches!(node.kind(), LITERAL | SYMBOL))
    }

    /// `None` means the current account.
    pub fn account(self) -> Option<Account<'a>> {
        let mut operands = self.operands();
        let first = operands.next()?;
        operands.next()?;

        match first.kind() {
            LITERAL => Some(Account::Address(Literal(first))),
            _ => Some(Account::Symbol(Symbol(first))),
        }
    }

    pub fn name(self) -> Option<Symbol<'a>> {
        self.operands().last().and_then(Symbol::cast)
    }
}

impl<'a> Import<'a> {
    pub fn name(self) -> Option<Symbol<'a>> {
        self.0
            .children_with_tokens()
            .take_while(|element| element.kind() != AS_KW)
            .find_map(|element| element.into_node().and_then(Symbol::cast))
    }

    pub fn rename(self) -> Option<Symbol<'a>> {
        self.0
            .children_with_tokens()
            .skip_while(|element| element.kind() != AS_KW)
            .find_map(|element| element.into_node().and_then(Symbol::cast))
    }
}

impl<'a> Def<'a> {
    pub fn name(self) -> Option<Symbol<'a>> {
        child(self.0)
    }

    pub fn meta(self) -> Option<Metadata<'a>> {
        child(self.0)
    }

    pub fn body(self) -> Option<Form<'a>> {
        forms(self.0).nth(1)
    }
}

impl<'a> Defn<'a> {
    pub fn name(self) -> Option<Symbol<'a>> {
        child(self.0)
    }

    pub fn meta(self) -> Option<Metadata<'a>> {
        child(self.0)
    }

    pub fn arities(self) -> impl Iterator<Item = Arity<'a>> + 'a {
        children(self.0)
    }

    /// Whether the arities are written as parenthesized groups.
    pub fn is_multi_arity(self) -> bool {
        self.arities().next().is_some_and(Arity::is_grouped)
    }
}

impl<'a> Defmacro<'a> {
    pub fn name(self) -> Option<Symbol<'a>> {
        child(self.0)
    }

    pub fn meta(self) -> Option<Metadata<'a>> {
        child(self.0)
    }

    pub fn arity(self) -> Option<Arity<'a>> {
        child(self.0)
    }
}

impl<'a> Fn<'a> {
    pub fn arity(self) -> Option<Arity<'a>> {
        child(self.0)
    }
}

impl<'a> Macro<'a> {
    pub fn arity(self) -> Option<Arity<'a>> {
        child(self.0)
    }
}

impl<'a> Arity<'a> {
    pub fn params(self) -> Option<ParamList<'a>> {
        child(self.0)
    }

    pub fn body(self) -> Option<Form<'a>> {
        forms(self.0).next()
    }

    /// `([x] x)` inside a multi-arity `defn`, as opposed to a bare `[x] x`.
    pub fn is_grouped(self) -> bool {
        matches!(self.0.first_child_or_token(), Some(NodeOrToken::Token(token)) if token.kind() == LEFT_PAREN)
    }
}

impl<'a> ParamList<'a> {
    pub fn fixed(self) -> impl Iterator<Item = FixedParam<'a>> + 'a {
        children(self.0)
    }

    /// The `&` marker, if the list is variadic.
    pub fn var_marker(self) -> Option<SyntaxToken<'a>> {
        token(self.0, AMP)
    }

    pub fn optional(self) -> impl Iterator<Item = OptionalParam<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> FixedParam<'a> {
    pub fn name(self) -> &'a str {
        param_name(self.0)
    }
}

impl<'a> OptionalParam<'a> {
    pub fn name(self) -> &'a str {
        param_name(self.0)
    }
}

fn param_name(syntax: SyntaxNode<'_>) -> &str {
    syntax
        .tokens()
        .find(|token| token.kind().is_symbol_token())
        .map_or("", SyntaxToken::text_trimmed)
}

impl<'a> Cond<'a> {
    pub fn clauses(self) -> impl Iterator<Item = CondClause<'a>> + 'a {
        children(self.0)
    }

    pub fn fallback(self) -> Option<CondFallback<'a>> {
        child(self.0)
    }
}

impl<'a> CondClause<'a> {
    pub fn test(self) -> Option<Form<'a>> {
        forms(self.0).next()
    }

    /// `None` for `(cond test)`, which evaluates to the test itself.
    pub fn result(self) -> Option<Form<'a>> {
        forms(self.0).nth(1)
    }
}

impl<'a> CondFallback<'a> {
    pub fn form(self) -> Option<Form<'a>> {
        forms(self.0).next()
    }
}

impl<'a> Let<'a> {
    pub fn bindings(self) -> Option<Bindings<'a>> {
        child(self.0)
    }

    pub fn body(self) -> impl Iterator<Item = Form<'a>> + 'a {
        forms(self.0)
    }
}

impl<'a> Loop<'a> {
    pub fn bindings(self) -> Option<Bindings<'a>> {
        child(self.0)
    }

    pub fn body(self) -> impl Iterator<Item = Form<'a>> + 'a {
        forms(self.0)
    }
}

impl<'a> IfLet<'a> {
    pub fn binding(self) -> Option<Binding<'a>> {
        self.bindings()?.bindings().next()
    }

    pub fn bindings(self) -> Option<Bindings<'a>> {
        child(self.0)
    }

    pub fn true_branch(self) -> Option<Form<'a>> {
        forms(self.0).next()
    }

    pub fn false_branch(self) -> Option<Form<'a>> {
        forms(self.0).nth(1)
    }
}

impl<'a> WhenLet<'a> {
    pub fn binding(self) -> Option<Binding<'a>> {
        self.bindings()?.bindings().next()
    }

    pub fn bindings(self) -> Option<Bindings<'a>> {
        child(self.0)
    }

    pub fn body(self) -> impl Iterator<Item = Form<'a>> + 'a {
        forms(self.0)
    }
}

impl<'a> Dotimes<'a> {
    pub fn binding(self) -> Option<Binding<'a>> {
        self.bindings()?.bindings().next()
    }

    pub fn bindings(self) -> Option<Bindings<'a>> {
        child(self.0)
    }

    pub fn body(self) -> impl Iterator<Item = Form<'a>> + 'a {
        forms(self.0)
    }
}

impl<'a> Bindings<'a> {
    pub fn bindings(self) -> impl Iterator<Item = Binding<'a>> + 'a {
        children(self.0)
    }
}

impl<'a> Binding<'a> {
    pub fn name(self) -> Option<Symbol<'a>> {
        forms(self.0).next().and_then(|form| match form {
            Form::Symbol(symbol) => Some(symbol),
            _ => None,
        })
    }

    pub fn expr(self) -> Option<Form<'a>> {
        forms(self.0).nth(1)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QuoteOp {
    Quote,
    Quasiquote,
    Unquote,
}

/// Which surface syntax a quoting form was written in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QuoteStyle {
    /// `'x`, `` `x ``, `~x`
    Shorthand,
    /// `(quote x)`, `(quasiquote x)`, `(unquote x)`
    Explicit,
}

/// `quote`, `quasiquote` or `unquote`, in either surface syntax.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Quoted<'a>(SyntaxNode<'a>);

impl<'a> AstNode<'a> for Quoted<'a> {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, QUOTE | QUASIQUOTE | UNQUOTE)
    }

    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        Self::can_cast(syntax.kind()).then_some(Self(syntax))
    }

    fn syntax(&self) -> SyntaxNode<'a> {
        self.0
    }
}

impl<'a> Quoted<'a> {
    pub fn op(self) -> QuoteOp {
        match self.0.kind() {
            QUASIQUOTE => QuoteOp::Quasiquote,
            UNQUOTE => QuoteOp::Unquote,
            _ => QuoteOp::Quote,
        }
    }

    pub fn style(self) -> QuoteStyle {
        match self.0.tokens().next().map(SyntaxToken::kind) {
            Some(QUOTE_MARK | BACKTICK | TILDE) => QuoteStyle::Shorthand,
            _ => QuoteStyle::Explicit,
        }
    }

    pub fn form(self) -> Option<Form<'a>> {
        forms(self.0).next()
    }
}
