use std::sync::Arc;

use convex_builtins::{Builtin, BuiltinRegistry};
use convex_db::{File, RootDatabase, check_file};
use convex_syntax::ast::{AstNode as _, Symbol};
use salsa::Setter as _;

fn registry() -> Arc<BuiltinRegistry> {
    Arc::new(BuiltinRegistry::new(["*caller*"], ["inc"]).unwrap())
}

#[derive(Debug, PartialEq, Eq)]
struct ActualDiag {
    line: u32,
    col: u32,
    message: String,
}

fn collect_actual(db: &RootDatabase, file: File) -> Vec<ActualDiag> {
    check_file(db, file)
        .iter()
        .map(|diag| {
            let line_col = file.line_col(db, diag.range());
            ActualDiag {
                line: line_col.line + 1,
                col: line_col.col,
                message: diag.message().to_owned(),
            }
        })
        .collect()
}

#[test]
fn reports_diagnostics_by_line() {
    let db = RootDatabase::default();
    let text = "(def x 1)\n(fn [a &] a)\n(let [b] b)\n";
    let file = File::new(&db, "main.cvx".into(), text.to_owned(), registry());

    assert_eq!(
        collect_actual(&db, file),
        [
            ActualDiag { line: 2, col: 7, message: "expected a parameter after `&`".to_owned() },
            ActualDiag { line: 3, col: 7, message: "expected a value to bind".to_owned() },
        ]
    );
}

#[test]
fn parse_is_memoized() {
    let db = RootDatabase::default();
    let file = File::new(&db, "lib.cvx".into(), "(inc 1)".to_owned(), registry());

    let first = file.parse(&db);
    let second = file.parse(&db);
    assert!(std::ptr::eq(first, second));
    assert!(first.is_ok());
}

#[test]
fn edits_are_reparsed() {
    let mut db = RootDatabase::default();
    let file = File::new(&db, "lib.cvx".into(), "(inc 1)".to_owned(), registry());
    assert!(check_file(&db, file).is_empty());

    file.set_text(&mut db).to("(inc 1".to_owned());
    let diagnostics = check_file(&db, file);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message(), "expected `)`");
    assert_eq!(file.parse(&db).syntax().text(), "(inc 1");
}

#[test]
fn registry_changes_reclassify() {
    let mut db = RootDatabase::default();
    let file = File::new(&db, "lib.cvx".into(), "(inc *caller*)".to_owned(), registry());

    let builtins = |db: &RootDatabase| {
        file.parse(db)
            .syntax()
            .descendants()
            .filter_map(Symbol::cast)
            .filter_map(|symbol| symbol.builtin())
            .collect::<Vec<_>>()
    };
    assert_eq!(builtins(&db), [Builtin::Function, Builtin::Symbol]);

    file.set_builtins(&mut db).to(Arc::new(BuiltinRegistry::empty()));
    assert!(builtins(&db).is_empty());
}
