use convex_syntax::SyntaxKind::{self, *};

use super::{form, sequence};
use crate::parser::{CompletedMarker, Parser};

pub(super) fn list(p: &mut Parser<'_>) -> CompletedMarker {
    delimited(p, "list", LIST)
}

pub(super) fn vector(p: &mut Parser<'_>) -> CompletedMarker {
    delimited(p, "vector", VECTOR)
}

pub(super) fn set(p: &mut Parser<'_>) -> CompletedMarker {
    delimited(p, "set", SET)
}

fn delimited(p: &mut Parser<'_>, context: &'static str, kind: SyntaxKind) -> CompletedMarker {
    let m = p.start();
    p.open(context);
    sequence(p);
    p.close();
    m.complete(p, kind)
}

/// `{key value ...}`. An unpaired key is reported but kept in the map.
pub(super) fn map(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.open("map");

    let mut entries = 0;
    let mut last = None;
    while !p.at_sequence_end() {
        if let Some(entry) = form(p) {
            entries += 1;
            last = Some(entry.range(p));
        }
    }

    if let Some(range) = last.filter(|_| entries % 2 != 0) {
        p.error_at("expected a value for this key", range);
    }

    p.close();
    m.complete(p, MAP)
}

/// `^{...}`. Any other form after `^` is kept inside the metadata node.
pub(super) fn metadata(p: &mut Parser<'_>) -> CompletedMarker {
    debug_assert!(p.at(CARET));

    let m = p.start();
    p.advance();
    if p.at(LEFT_BRACE) {
        map(p);
    } else {
        p.error("expected a map after `^`");
        if !p.at_sequence_end() && !p.peek_kind().is_closing_delimiter() {
            form(p);
        }
    }
    m.complete(p, METADATA)
}

/// Metadata anywhere but after the name of a definition. A `^` without a map
/// is reported once, as the missing map.
pub(super) fn misplaced_metadata(p: &mut Parser<'_>) -> CompletedMarker {
    let has_map = p.nth(1) == LEFT_BRACE;
    let metadata = metadata(p);
    if has_map {
        let range = metadata.range(p);
        p.error_at("metadata is only allowed on `def`, `defn` and `defmacro`", range);
    }

    let m = metadata.precede(p);
    m.complete(p, ERROR)
}

/// `'form`, `` `form `` and `~form`.
pub(super) fn shorthand_quote(p: &mut Parser<'_>) -> CompletedMarker {
    let prefix = p.peek_kind();
    let kind = match prefix {
        QUOTE_MARK => QUOTE,
        BACKTICK => QUASIQUOTE,
        _ => UNQUOTE,
    };

    let m = p.start();
    p.advance();

    if p.at_sequence_end() {
        p.error(format!("expected a form after `{}`", prefix.spelling().unwrap_or_default()));
    } else {
        form(p);
    }

    m.complete(p, kind)
}
