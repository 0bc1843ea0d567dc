use convex_syntax::SyntaxKind::*;

use super::{expect_form, form, rest_as_error, sequence, symbol};
use crate::parser::Parser;

/// `(let [name value ...] body...)` and `loop`.
pub(super) fn let_like(p: &mut Parser<'_>) {
    if bindings(p, false) {
        sequence(p);
    }
}

/// `(if-let [name value] then else?)`
pub(super) fn if_let(p: &mut Parser<'_>) {
    if !bindings(p, true) {
        return;
    }
    if expect_form(p, "expected a form for the true branch").is_none() {
        return;
    }
    form(p);
}

/// `(when-let [name value] body...)` and `dotimes`.
pub(super) fn when_let_like(p: &mut Parser<'_>) {
    if bindings(p, true) {
        sequence(p);
    }
}

/// Parses a binding vector. Returns `false` if there is none, in which case
/// the rest of the form has been recovered.
fn bindings(p: &mut Parser<'_>, single: bool) -> bool {
    if !p.at(LEFT_BRACKET) {
        p.error("expected a binding vector");
        rest_as_error(p);
        return false;
    }

    let m = p.start();
    p.open("bindings");

    let mut count = 0;
    let mut recovered = false;
    while !p.at_sequence_end() {
        if single && count == 1 {
            p.error("expected exactly one binding");
            rest_as_error(p);
            recovered = true;
            break;
        }

        if !p.peek_kind().is_symbol_token() {
            p.error("expected a symbol to bind");
            rest_as_error(p);
            recovered = true;
            break;
        }

        let binding = p.start();
        symbol(p);
        expect_form(p, "expected a value to bind");
        binding.complete(p, BINDING);
        count += 1;
    }

    if single && count == 0 && !recovered {
        p.error("expected a binding");
    }

    p.close();
    m.complete(p, BINDINGS);
    true
}
