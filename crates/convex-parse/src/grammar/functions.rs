use convex_syntax::SyntaxKind::*;
use text_size::TextRange;

use super::{collections, expect_form, rest_as_error, symbol};
use crate::parser::Parser;

/// `(def name ^{meta} value)`
pub(super) fn def(p: &mut Parser<'_>) {
    if !name(p, "expected a symbol to name the definition") {
        return;
    }
    metadata_opt(p);
    expect_form(p, "expected a value for the definition");
}

/// `(defn name ^{meta} [params] body)` or with several `([params] body)`
/// arities.
pub(super) fn defn(p: &mut Parser<'_>) {
    if !name(p, "expected a symbol to name the function") {
        return;
    }
    metadata_opt(p);

    match p.peek_kind() {
        LEFT_BRACKET => arity(p),
        LEFT_PAREN => {
            while p.at(LEFT_PAREN) {
                grouped_arity(p);
            }
        }
        _ => {
            p.error("expected a parameter vector or a list of arities");
            rest_as_error(p);
        }
    }
}

/// `(defmacro name ^{meta} [params] body)`
pub(super) fn defmacro(p: &mut Parser<'_>) {
    if !name(p, "expected a symbol to name the macro") {
        return;
    }
    metadata_opt(p);
    single_arity(p);
}

/// `(fn [params] body)` and `(macro [params] body)`.
pub(super) fn anonymous(p: &mut Parser<'_>) {
    single_arity(p);
}

fn name(p: &mut Parser<'_>, message: &str) -> bool {
    if p.peek_kind().is_symbol_token() {
        symbol(p);
        true
    } else {
        p.error(message);
        rest_as_error(p);
        false
    }
}

fn metadata_opt(p: &mut Parser<'_>) {
    if p.at(CARET) {
        collections::metadata(p);
    }
}

fn single_arity(p: &mut Parser<'_>) {
    if p.at(LEFT_BRACKET) {
        arity(p);
    } else {
        p.error("expected a parameter vector");
        rest_as_error(p);
    }
}

fn arity(p: &mut Parser<'_>) {
    let m = p.start();
    arity_parts(p);
    m.complete(p, ARITY);
}

/// `([params] body)`
fn grouped_arity(p: &mut Parser<'_>) {
    let m = p.start();
    p.open("arity");

    if p.at(LEFT_BRACKET) {
        arity_parts(p);
    } else {
        p.error("expected a parameter vector");
        rest_as_error(p);
    }

    p.close();
    m.complete(p, ARITY);
}

fn arity_parts(p: &mut Parser<'_>) {
    params(p);

    if expect_form(p, "expected a body form").is_none() {
        return;
    }

    if !p.at_sequence_end() {
        p.error("expected exactly one body form");
        rest_as_error(p);
    }
}

/// `[fixed ... & optional ...]`
fn params(p: &mut Parser<'_>) {
    let m = p.start();
    p.open("parameters");

    let mut amp: Option<TextRange> = None;
    let mut optionals = 0;
    let mut recovered = false;

    while !p.at_sequence_end() {
        if !p.peek_kind().is_symbol_token() {
            p.error("expected a parameter name");
            rest_as_error(p);
            recovered = true;
            break;
        }

        if p.peek_text() == "&" {
            if amp.is_some() {
                p.error("only one `&` is allowed in a parameter list");
                rest_as_error(p);
                recovered = true;
                break;
            }
            amp = Some(p.peek_range());
            p.advance_remap(AMP);
            continue;
        }

        let param = p.start();
        p.advance();
        if amp.is_some() {
            optionals += 1;
            param.complete(p, OPTIONAL_PARAM);
        } else {
            param.complete(p, FIXED_PARAM);
        }
    }

    if let Some(range) = amp.filter(|_| optionals == 0 && !recovered) {
        p.error_at("expected a parameter after `&`", range);
    }

    p.close();
    m.complete(p, PARAM_LIST);
}
