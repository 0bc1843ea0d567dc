use std::fs;
use std::path::{Path, PathBuf};

use convex_builtins::{Builtin, BuiltinRegistry};
use convex_errors::DiagnosticKind;
use convex_syntax::SyntaxKind::{self, *};
use convex_syntax::ast::{
    Account, AstNode as _, Form, LiteralKind, LookupStyle, QuoteOp, QuoteStyle,
};
use expect_test::expect_file;
use text_size::TextRange;

use crate::{Parse, parse};

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "cvx" {
                    let expected = path.with_extension("ir");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

fn registry() -> BuiltinRegistry {
    BuiltinRegistry::new(["*address*", "*balance*"], ["+", "count", "inc"]).unwrap()
}

fn parse_ok(text: &str) -> Parse {
    let parse = parse(text, &registry());
    assert!(parse.is_ok(), "{text:?}:\n{}", parse.debug_dump());
    parse
}

fn messages(text: &str) -> Vec<String> {
    parse(text, &registry())
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.message().to_owned())
        .collect()
}

fn first(parse: &Parse) -> Form<'_> {
    parse.tree().forms().next().expect("at least one form")
}

fn kinds(parse: &Parse) -> Vec<SyntaxKind> {
    parse.syntax().descendants().map(|node| node.kind()).collect()
}

#[test]
fn parse_test_data() {
    let registry = registry();

    for case in TestCase::list() {
        let parse = parse(&case.text, &registry);
        assert_eq!(parse.syntax().text(), case.text, "{}", case.input.display());
        expect_file![&case.expected].assert_eq(&parse.debug_dump());
    }
}

#[test]
fn text_round_trips() {
    let inputs = [
        "",
        "   \n\n",
        "; only a comment",
        "(defn f ^{:doc \"d\"} ([] 0) ([x & more] (+ x 1))) ; trailing\n",
        "{:a 1,, :b [#{}]}\r\n",
        "'(a `(b ~c)) #8/x (lookup #8 y)",
        ")))(((",
        "(fn [1 & &] x y) (let [a] ^ b) #q ##Nope \\",
        "\"unterminated \\u12",
        "(cond) (cond a) (if-let [] x) (dotimes)",
        "a/ /b a//b :as : ,",
    ];

    for text in inputs {
        let parse = parse(text, &registry());
        assert_eq!(parse.syntax().text(), text);
        assert_eq!(u32::from(parse.syntax().text_range().end()) as usize, text.len());
    }
}

#[test]
fn empty_source() {
    let parse = parse_ok("");
    assert_eq!(parse.tree().forms().count(), 0);
    assert_eq!(kinds(&parse), [SOURCE]);
}

#[test]
fn comments_and_commas_are_trivia() {
    let parse = parse_ok("[1, 2 ; two\n 3,]");
    let Form::Vector(vector) = first(&parse) else { panic!("expected a vector") };
    assert_eq!(vector.forms().count(), 3);
    assert!(vector.syntax().children().all(|node| node.kind() == LITERAL));
}

#[test]
fn long_with_trailing_dot() {
    let parse = parse_ok("1.");
    let Form::Literal(literal) = first(&parse) else { panic!("expected a literal") };
    assert_eq!(literal.kind(), Some(LiteralKind::Long));
    assert_eq!(literal.as_long(), Some(1));
}

#[test]
fn cond_shapes() {
    let parse = parse_ok("(cond) (cond x) (cond a 1 b) (cond a 1 b 2)");
    let conds = parse
        .tree()
        .forms()
        .map(|form| match form {
            Form::Cond(cond) => (cond.clauses().count(), cond.fallback().is_some()),
            _ => panic!("expected cond, got {form:?}"),
        })
        .collect::<Vec<_>>();
    assert_eq!(conds, [(0, false), (1, false), (1, true), (2, false)]);

    let Some(Form::Cond(single)) = parse.tree().forms().nth(1) else { unreachable!() };
    let clause = single.clauses().next().unwrap();
    assert!(clause.test().is_some());
    assert!(clause.result().is_none());
}

#[test]
fn quote_styles_share_a_shape() {
    let parse = parse_ok("'x (quote x) `x (quasiquote x) ~x (unquote x)");
    let quoted = parse
        .tree()
        .forms()
        .map(|form| match form {
            Form::Quoted(quoted) => {
                let Some(Form::Symbol(symbol)) = quoted.form() else { panic!("expected x") };
                assert_eq!(symbol.name(), "x");
                (quoted.op(), quoted.style())
            }
            _ => panic!("expected a quoted form, got {form:?}"),
        })
        .collect::<Vec<_>>();

    assert_eq!(
        quoted,
        [
            (QuoteOp::Quote, QuoteStyle::Shorthand),
            (QuoteOp::Quote, QuoteStyle::Explicit),
            (QuoteOp::Quasiquote, QuoteStyle::Shorthand),
            (QuoteOp::Quasiquote, QuoteStyle::Explicit),
            (QuoteOp::Unquote, QuoteStyle::Shorthand),
            (QuoteOp::Unquote, QuoteStyle::Explicit),
        ]
    );
}

#[test]
fn lookups() {
    let parse = parse_ok("#8/foo owner/foo (lookup foo) (lookup #8 foo) (lookup owner foo)");
    let lookups = parse
        .tree()
        .forms()
        .map(|form| {
            let Form::Lookup(lookup) = form else { panic!("expected a lookup, got {form:?}") };
            assert_eq!(lookup.name().map(|name| name.name()), Some("foo"));
            let account = match lookup.account() {
                Some(Account::Address(address)) => address.as_address().map(|it| it.to_string()),
                Some(Account::Symbol(symbol)) => Some(symbol.name().to_owned()),
                None => None,
            };
            (lookup.style(), account)
        })
        .collect::<Vec<_>>();

    assert_eq!(
        lookups,
        [
            (LookupStyle::Infix, Some("8".to_owned())),
            (LookupStyle::Infix, Some("owner".to_owned())),
            (LookupStyle::Call, None),
            (LookupStyle::Call, Some("8".to_owned())),
            (LookupStyle::Call, Some("owner".to_owned())),
        ]
    );
}

#[test]
fn spaced_slash_is_division() {
    let parse = parse_ok("(a / b) a /b");
    let Form::List(list) = first(&parse) else { panic!("expected a list") };
    let names = list
        .forms()
        .map(|form| match form {
            Form::Symbol(symbol) => symbol.name(),
            _ => panic!("expected a symbol, got {form:?}"),
        })
        .collect::<Vec<_>>();
    assert_eq!(names, ["a", "/", "b"]);
    assert!(!kinds(&parse).contains(&LOOKUP));
}

#[test]
fn slash_follows_the_registry() {
    let registry = BuiltinRegistry::new(Vec::<String>::new(), ["/"]).unwrap();
    let parse = parse("(/ 6 3)", &registry);
    let Form::List(list) = first(&parse) else { panic!("expected a list") };
    let Some(Form::Symbol(slash)) = list.forms().next() else { panic!("expected a symbol") };
    assert_eq!(slash.builtin(), Some(Builtin::Function));
}

#[test]
fn head_with_lookup_is_a_call() {
    let parse = parse_ok("(def/x 1)");
    let Form::List(list) = first(&parse) else { panic!("expected a list") };
    assert!(matches!(list.forms().next(), Some(Form::Lookup(_))));
}

#[test]
fn defn_arities() {
    let parse = parse_ok("(defn f [x] x) (defn g ([] 0) ([x & xs] x))");
    let defns = parse
        .tree()
        .forms()
        .map(|form| match form {
            Form::Defn(defn) => defn,
            _ => panic!("expected defn"),
        })
        .collect::<Vec<_>>();

    assert!(!defns[0].is_multi_arity());
    assert_eq!(defns[0].arities().count(), 1);

    assert!(defns[1].is_multi_arity());
    let arities = defns[1].arities().collect::<Vec<_>>();
    assert_eq!(arities.len(), 2);
    let params = arities[1].params().unwrap();
    assert_eq!(params.fixed().map(|param| param.name()).collect::<Vec<_>>(), ["x"]);
    assert!(params.var_marker().is_some());
    assert_eq!(params.optional().map(|param| param.name()).collect::<Vec<_>>(), ["xs"]);
}

#[test]
fn def_with_metadata() {
    let parse = parse_ok("(def x ^{:doc \"answer\"} 42)");
    let Form::Def(def) = first(&parse) else { panic!("expected def") };
    assert_eq!(def.name().map(|name| name.name()), Some("x"));
    assert_eq!(def.meta().and_then(|meta| meta.map()).map(|map| map.entries().len()), Some(1));
    assert!(matches!(def.body(), Some(Form::Literal(_))));
}

#[test]
fn binding_forms() {
    let parse = parse_ok(
        "(let [a 1 b 2] a b) (loop [i 0] i) (if-let [x y] x z) (when-let [x y] x) (dotimes [i 3] i)",
    );
    let forms = parse.tree().forms().collect::<Vec<_>>();

    let Form::Let(let_) = forms[0] else { panic!("expected let") };
    assert_eq!(let_.bindings().unwrap().bindings().count(), 2);
    assert_eq!(let_.body().count(), 2);

    let Form::Loop(loop_) = forms[1] else { panic!("expected loop") };
    assert_eq!(loop_.body().count(), 1);

    let Form::IfLet(if_let) = forms[2] else { panic!("expected if-let") };
    assert_eq!(if_let.binding().and_then(|binding| binding.name()).map(|it| it.name()), Some("x"));
    assert!(if_let.true_branch().is_some());
    assert!(if_let.false_branch().is_some());

    let Form::WhenLet(when_let) = forms[3] else { panic!("expected when-let") };
    assert!(when_let.binding().and_then(|binding| binding.expr()).is_some());

    let Form::Dotimes(dotimes) = forms[4] else { panic!("expected dotimes") };
    assert_eq!(dotimes.body().count(), 1);
}

#[test]
fn import_with_alias() {
    let parse = parse_ok("(import convex.fungible :as fungible) (import lib)");
    let forms = parse.tree().forms().collect::<Vec<_>>();

    let Form::Import(aliased) = forms[0] else { panic!("expected import") };
    assert_eq!(aliased.name().map(|it| it.name()), Some("convex.fungible"));
    assert_eq!(aliased.rename().map(|it| it.name()), Some("fungible"));

    let Form::Import(plain) = forms[1] else { panic!("expected import") };
    assert!(plain.rename().is_none());
}

#[test]
fn dangling_ampersand_is_one_error() {
    let parse = parse("(fn [x & ] x)", &registry());
    let diagnostics = parse.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message(), "expected a parameter after `&`");
    assert_eq!(diagnostics[0].context(), Some("parameters"));
    assert_eq!(&"(fn [x & ] x)"[diagnostics[0].range()], "&");
}

#[test]
fn unterminated_string_is_one_lexical_error() {
    let parse = parse("\"abc", &registry());
    let diagnostics = parse.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind(), DiagnosticKind::Lexical);
    assert!(matches!(first(&parse), Form::Literal(_)));
}

#[test]
fn arity_takes_one_body_form() {
    assert_eq!(messages("(fn [x] x y)"), ["expected exactly one body form"]);
    assert_eq!(messages("(fn [x])"), ["expected a body form"]);
    assert_eq!(messages("(fn x)"), ["expected a parameter vector"]);

    let parse = parse("(fn [x] x y z)", &registry());
    let errors = parse.syntax().descendants().filter(|node| node.kind() == ERROR).count();
    assert_eq!(errors, 1);
}

#[test]
fn malformed_special_forms() {
    assert_eq!(messages("(def)"), ["expected a symbol to name the definition"]);
    assert_eq!(messages("(def x)"), ["expected a value for the definition"]);
    assert_eq!(messages("(def x 1 2)"), ["unexpected form, expected `)` to close `def`"]);
    assert_eq!(messages("(defn f x)"), ["expected a parameter vector or a list of arities"]);
    assert_eq!(messages("(let x)"), ["expected a binding vector"]);
    assert_eq!(messages("(let [1 2])"), ["expected a symbol to bind"]);
    assert_eq!(messages("(if-let [] x)"), ["expected a binding"]);
    assert_eq!(messages("(when-let [a 1 b 2] a)"), ["expected exactly one binding"]);
    assert_eq!(messages("(if-let [a 1])"), ["expected a form for the true branch"]);
    assert_eq!(messages("(quote)"), ["expected a form to quote"]);
    assert_eq!(messages("(lookup)"), ["expected an account or a symbol to look up"]);
    assert_eq!(messages("(import :as x)"), ["expected the name of a library to import"]);
    assert_eq!(messages("(import lib :as)"), ["expected an alias after `:as`"]);
}

#[test]
fn unbalanced_delimiters() {
    assert_eq!(messages("(a"), ["expected `)`"]);
    assert_eq!(messages("(a ]"), ["unexpected `]`", "expected `)`"]);
    assert_eq!(messages("[a)"), ["unexpected `)`", "expected `]`"]);
    assert_eq!(messages("'"), ["expected a form after `'`"]);
}

#[test]
fn odd_map_reports_the_last_key() {
    let text = "{:a 1 :b}";
    let parse = parse(text, &registry());
    let diagnostics = parse.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(&text[diagnostics[0].range()], ":b");

    let Form::Map(map) = first(&parse) else { panic!("expected a map") };
    assert_eq!(map.forms().count(), 3);
    assert_eq!(map.entries().len(), 1);
}

#[test]
fn metadata_outside_definitions() {
    let parse = parse("[^{:a 1} x]", &registry());
    assert_eq!(parse.diagnostics().len(), 1);
    assert_eq!(
        parse.diagnostics()[0].message(),
        "metadata is only allowed on `def`, `defn` and `defmacro`"
    );

    let Form::Vector(vector) = first(&parse) else { panic!("expected a vector") };
    let forms = vector.forms().collect::<Vec<_>>();
    assert!(matches!(forms[0], Form::Error(_)));
    assert!(matches!(forms[1], Form::Symbol(_)));
}

#[test]
fn caret_without_a_map_is_one_error() {
    assert_eq!(messages("^5"), ["expected a map after `^`"]);
    assert_eq!(messages("[^ x y]"), ["expected a map after `^`"]);
    assert_eq!(messages("(let [a 1] ^)"), ["expected a map after `^`"]);

    let parse = parse("^5", &registry());
    assert_eq!(parse.diagnostics()[0].range(), TextRange::new(1.into(), 2.into()));
    assert!(matches!(first(&parse), Form::Error(_)));
}

#[test]
fn def_with_non_map_metadata() {
    let parse = parse("(def x ^5 1)", &registry());
    assert_eq!(
        parse.diagnostics().iter().map(|diagnostic| diagnostic.message()).collect::<Vec<_>>(),
        ["expected a map after `^`"]
    );

    let Form::Def(def) = first(&parse) else { panic!("expected def") };
    let meta = def.meta().expect("metadata node");
    assert!(meta.map().is_none());
    let Some(Form::Literal(body)) = def.body() else { panic!("expected a literal body") };
    assert_eq!(body.as_long(), Some(1));
}

#[test]
fn digits_are_not_part_of_symbols() {
    let parse = parse("(sha3 x)", &registry());
    let Form::List(list) = first(&parse) else { panic!("expected a list") };
    let forms = list.forms().collect::<Vec<_>>();
    assert_eq!(forms.len(), 3);
    assert!(matches!(forms[0], Form::Symbol(symbol) if symbol.name() == "sha"));
    assert!(matches!(forms[1], Form::Literal(_)));
}

#[test]
fn registry_changes_only_classification() {
    let text = "(def x (count *address*))";
    let with = parse(text, &registry());
    let without = parse(text, &BuiltinRegistry::empty());

    assert_eq!(kinds(&with), kinds(&without));
    assert_eq!(with.diagnostics(), without.diagnostics());

    let builtins = |parse: &Parse| {
        parse
            .syntax()
            .descendant_tokens()
            .filter(|token| matches!(token.kind(), BUILTIN_FUNCTION | BUILTIN_SYMBOL))
            .map(|token| token.text_trimmed().to_owned())
            .collect::<Vec<_>>()
    };
    assert_eq!(builtins(&with), ["count", "*address*"]);
    assert!(builtins(&without).is_empty());
}

#[test]
fn builtin_heads_still_open_special_forms() {
    let registry = BuiltinRegistry::new(Vec::<String>::new(), ["def"]).unwrap();
    let parse = parse("(def x 1)", &registry);
    assert!(matches!(first(&parse), Form::Def(_)));
}

#[test]
fn deep_nesting_is_an_error() {
    let depth = crate::parser::MAX_DEPTH * 2;
    let text = format!("{}{}", "(".repeat(depth), ")".repeat(depth));
    let parse = parse(&text, &registry());

    assert_eq!(parse.syntax().text(), text);
    assert_eq!(
        parse
            .diagnostics()
            .iter()
            .filter(|diagnostic| diagnostic.message() == "form is nested too deeply")
            .count(),
        1
    );
}

#[test]
fn parses_on_many_threads() {
    let registry = registry();
    let texts = ["(defn f [x] (inc x))", "{:a [1 2] :b #{3}}", "(cond a b c)", "#8/x"];

    let parses = std::thread::scope(|scope| {
        let registry = &registry;
        let handles =
            texts.iter().map(|text| scope.spawn(move || parse(text, registry))).collect::<Vec<_>>();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect::<Vec<_>>()
    });

    for (text, parsed) in texts.iter().zip(&parses) {
        assert_eq!(parsed, &parse(text, &registry));
        assert!(parsed.is_ok());
    }
}
