//! Structural parser for Convex Lisp.
//!
//! Parsing never fails: every input produces a tree whose text is exactly the
//! input, with malformed regions wrapped in `ERROR` nodes and described by
//! diagnostics.

use std::fmt::Write as _;

use convex_builtins::{Builtin, BuiltinRegistry};
use convex_errors::Diagnostic;
use convex_syntax::{GreenNode, SyntaxKind, SyntaxNode, ast};

mod grammar;
mod parser;
#[cfg(test)]
mod tests;

/// The result of parsing one source text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Parse {
    green: GreenNode,
    diagnostics: Vec<Diagnostic>,
}

impl Parse {
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn syntax(&self) -> SyntaxNode<'_> {
        SyntaxNode::new_root(&self.green)
    }

    pub fn tree(&self) -> ast::Source<'_> {
        ast::Source::new(&self.green)
    }

    /// Lexical and syntax diagnostics, ordered by position.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The indented tree followed by an `Errors:` section.
    pub fn debug_dump(&self) -> String {
        let mut buf = self.syntax().debug_dump();
        buf.push_str("Errors:\n");
        for diagnostic in &self.diagnostics {
            _ = write!(buf, "  {diagnostic}");
            if let Some(context) = diagnostic.context() {
                _ = write!(buf, " in `{context}`");
            }
            buf.push('\n');
        }
        buf
    }
}

pub fn parse(text: &str, registry: &BuiltinRegistry) -> Parse {
    let (tokens, mut diagnostics) = convex_tokenizer::tokenize(text, registry);

    let slash_kind = match registry.classify("/") {
        Some(Builtin::Function) => SyntaxKind::BUILTIN_FUNCTION,
        Some(Builtin::Symbol) => SyntaxKind::BUILTIN_SYMBOL,
        None => SyntaxKind::NAME,
    };

    let mut parser = parser::Parser::new(text, tokens, slash_kind);
    grammar::source(&mut parser);
    let (green, syntax_diagnostics) = parser.finish();

    diagnostics.extend(syntax_diagnostics);
    diagnostics.sort_by_key(|diagnostic| diagnostic.range().start());

    Parse { green, diagnostics }
}
