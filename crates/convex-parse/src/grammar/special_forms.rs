use convex_syntax::SyntaxKind::{self, *};

use super::{bindings, collections, expect_form, form, functions, literal, rest_as_error, symbol};
use crate::parser::{CompletedMarker, Parser};

/// A parenthesized form: a special form when its head names one, a plain
/// list otherwise.
pub(crate) fn list_or_special_form(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert!(p.at(LEFT_PAREN));

    // `(lookup/x ...)` is a call through a lookup, not a special form.
    let head = if p.nth(1).is_symbol_token() && !(p.nth(2) == SLASH && p.joined(1)) {
        SyntaxKind::from_form_head(p.nth_text(1))
    } else {
        None
    };

    match head {
        Some(keyword) => special_form(p, keyword),
        None => collections::list(p),
    }
}

fn special_form(p: &mut Parser<'_>, keyword: SyntaxKind) -> CompletedMarker {
    let (node, context) = node_of(keyword);

    let m = p.start();
    p.open(context);
    p.advance_remap(keyword);

    match keyword {
        LOOKUP_KW => lookup(p),
        IMPORT_KW => import(p),
        DEF_KW => functions::def(p),
        DEFN_KW => functions::defn(p),
        DEFMACRO_KW => functions::defmacro(p),
        FN_KW | MACRO_KW => functions::anonymous(p),
        COND_KW => cond(p),
        LET_KW | LOOP_KW => bindings::let_like(p),
        IF_LET_KW => bindings::if_let(p),
        WHEN_LET_KW | DOTIMES_KW => bindings::when_let_like(p),
        _ => {
            expect_form(p, "expected a form to quote");
        }
    }

    if !p.at_sequence_end() {
        p.error(format!("unexpected form, expected `)` to close `{context}`"));
        rest_as_error(p);
    }

    p.close();
    m.complete(p, node)
}

fn node_of(keyword: SyntaxKind) -> (SyntaxKind, &'static str) {
    let node = match keyword {
        LOOKUP_KW => LOOKUP,
        IMPORT_KW => IMPORT,
        DEF_KW => DEF,
        DEFN_KW => DEFN,
        DEFMACRO_KW => DEFMACRO,
        FN_KW => FN,
        MACRO_KW => MACRO,
        COND_KW => COND,
        LET_KW => LET,
        LOOP_KW => LOOP,
        IF_LET_KW => IF_LET,
        WHEN_LET_KW => WHEN_LET,
        DOTIMES_KW => DOTIMES,
        QUOTE_KW => QUOTE,
        QUASIQUOTE_KW => QUASIQUOTE,
        _ => UNQUOTE,
    };
    (node, keyword.spelling().unwrap_or_default())
}

/// `(lookup name)`, `(lookup #8 name)` or `(lookup owner name)`.
fn lookup(p: &mut Parser<'_>) {
    let has_account = match p.peek_kind() {
        ADDRESS => true,
        kind if kind.is_symbol_token() => p.nth(1).is_symbol_token(),
        _ => {
            p.error("expected an account or a symbol to look up");
            rest_as_error(p);
            return;
        }
    };

    if has_account {
        if p.at(ADDRESS) {
            literal(p);
        } else {
            symbol(p);
        }
    }

    if p.peek_kind().is_symbol_token() {
        symbol(p);
    } else {
        p.error("expected a symbol to look up");
        rest_as_error(p);
    }
}

/// `(import library)` or `(import library :as alias)`.
fn import(p: &mut Parser<'_>) {
    if !p.peek_kind().is_symbol_token() {
        p.error("expected the name of a library to import");
        rest_as_error(p);
        return;
    }
    symbol(p);

    if p.at(KEYWORD) && p.peek_text() == ":as" {
        p.advance_remap(AS_KW);
        if p.peek_kind().is_symbol_token() {
            symbol(p);
        } else {
            p.error("expected an alias after `:as`");
            rest_as_error(p);
        }
    }
}

/// Pairs of test and result. An unpaired last form is the fallback, unless
/// it is the only one.
fn cond(p: &mut Parser<'_>) {
    let mut clauses = 0;

    while !p.at_sequence_end() {
        let m = p.start();
        form(p);

        if p.at_sequence_end() {
            m.complete(p, if clauses == 0 { COND_CLAUSE } else { COND_FALLBACK });
            break;
        }

        form(p);
        m.complete(p, COND_CLAUSE);
        clauses += 1;
    }
}
