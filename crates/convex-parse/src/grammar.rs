use convex_syntax::SyntaxKind::*;
use convex_syntax::SyntaxSet;

use crate::parser::{CompletedMarker, MAX_DEPTH, Parser};

mod bindings;
mod collections;
mod functions;
mod special_forms;

/// Tokens that prefix another form.
const PREFIXES: SyntaxSet = SyntaxSet::new([QUOTE_MARK, BACKTICK, TILDE, CARET]);

pub(crate) fn source(p: &mut Parser<'_>) {
    let m = p.start();

    while !p.at(EOF) {
        form(p);
    }

    p.eat_eof();
    m.complete(p, SOURCE);
}

/// Parses one form. Returns `None` if nothing that counts as a form was
/// consumed, that is at the end of a sequence or on a stray closing delimiter.
pub(crate) fn form(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if p.at_sequence_end() {
        return None;
    }

    if p.depth >= MAX_DEPTH {
        return Some(too_deep(p));
    }

    p.depth += 1;
    let form = form_inner(p);
    p.depth -= 1;
    form
}

fn form_inner(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let kind = p.peek_kind();
    let form = match kind {
        ADDRESS => {
            let account = literal(p);
            infix_lookup(p, account)
        }
        _ if kind.is_literal_token() => literal(p),
        _ if kind.is_symbol_token() => {
            let account = symbol(p);
            infix_lookup(p, account)
        }
        SLASH => {
            let m = p.start();
            let kind = p.slash_kind();
            p.advance_remap(kind);
            m.complete(p, SYMBOL)
        }
        LEFT_PAREN => special_forms::list_or_special_form(p),
        LEFT_BRACKET => collections::vector(p),
        LEFT_BRACE => collections::map(p),
        HASH_LEFT_BRACE => collections::set(p),
        QUOTE_MARK | BACKTICK | TILDE => collections::shorthand_quote(p),
        CARET => collections::misplaced_metadata(p),
        UNKNOWN => {
            // Already reported by the tokenizer.
            let m = p.start();
            p.advance();
            m.complete(p, ERROR)
        }
        RIGHT_PAREN | RIGHT_BRACKET | RIGHT_BRACE => {
            let m = p.start();
            p.error(format!("unexpected `{}`", kind.spelling().unwrap_or_default()));
            p.advance();
            m.complete(p, ERROR);
            return None;
        }
        COLON => bump_error(p, "expected a keyword name after `:`"),
        _ => bump_error(p, "expected a form"),
    };

    Some(form)
}

fn bump_error(p: &mut Parser<'_>, message: &str) -> CompletedMarker {
    let m = p.start();
    p.error(message);
    p.advance();
    m.complete(p, ERROR)
}

pub(crate) fn literal(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert!(p.peek_kind().is_literal_token());

    let m = p.start();
    p.advance();
    m.complete(p, LITERAL)
}

pub(crate) fn symbol(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert!(p.peek_kind().is_symbol_token());

    let m = p.start();
    p.advance();
    m.complete(p, SYMBOL)
}

/// `account/name`, where all three parts touch.
fn infix_lookup(p: &mut Parser<'_>, account: CompletedMarker) -> CompletedMarker {
    if !(p.at(SLASH) && p.joined_to_previous() && p.joined(0) && p.nth(1).is_symbol_token()) {
        return account;
    }

    let m = account.precede(p);
    p.advance();
    symbol(p);
    m.complete(p, LOOKUP)
}

/// Parses forms up to the end of the current sequence.
pub(crate) fn sequence(p: &mut Parser<'_>) {
    while !p.at_sequence_end() {
        form(p);
    }
}

/// Parses a form that must be present, reporting `message` otherwise.
pub(crate) fn expect_form(p: &mut Parser<'_>, message: &str) -> Option<CompletedMarker> {
    if p.at_sequence_end() {
        p.error(message);
        return None;
    }
    form(p)
}

/// Wraps whatever is left of the current sequence in an `ERROR` node.
pub(crate) fn rest_as_error(p: &mut Parser<'_>) {
    if p.at_sequence_end() {
        return;
    }

    let m = p.start();
    sequence(p);
    m.complete(p, ERROR);
}

/// Skips one form without recursing, once nesting gets too deep.
fn too_deep(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.error("form is nested too deeply");

    while p.at_set(&PREFIXES) {
        p.advance();
    }

    if p.peek_kind().is_opening_delimiter() {
        let mut depth = 0usize;
        loop {
            let kind = p.peek_kind();
            if kind == EOF {
                break;
            }
            if kind.is_opening_delimiter() {
                depth += 1;
            } else if kind.is_closing_delimiter() {
                depth -= 1;
            }
            p.advance();
            if depth == 0 {
                break;
            }
        }
    } else if !p.at_sequence_end() {
        p.advance();
    }

    m.complete(p, ERROR)
}
