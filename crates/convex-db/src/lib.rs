//! Incremental file database: source files are salsa inputs and their parse
//! is a memoized query, recomputed only when the text or registry changes.

use std::sync::Arc;

use camino::Utf8PathBuf;
use convex_builtins::BuiltinRegistry;
pub use convex_errors::Diagnostic;
use convex_errors::TextRange;
use convex_parse::Parse;
pub use line_index::{LineCol, LineIndex};

#[salsa::db]
#[derive(Clone, Default)]
pub struct RootDatabase {
    storage: salsa::Storage<Self>,
}

#[salsa::db]
impl salsa::Database for RootDatabase {}

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
    #[returns(ref)]
    pub builtins: Arc<BuiltinRegistry>,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn parse(self, db: &dyn salsa::Database) -> Parse {
        let path = self.path(db);
        tracing::debug!(%path, "parsing");

        let parse = convex_parse::parse(self.text(db), self.builtins(db));
        if !parse.is_ok() {
            tracing::debug!(%path, diagnostics = parse.diagnostics().len(), "parsed with errors");
        }
        parse
    }

    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}

impl File {
    /// Zero-based line and column of the start of `range`.
    pub fn line_col(self, db: &dyn salsa::Database, range: TextRange) -> LineCol {
        self.line_index(db).line_col(range.start())
    }
}

/// Diagnostics of one file, ordered by position.
pub fn check_file(db: &dyn salsa::Database, file: File) -> &[Diagnostic] {
    file.parse(db).diagnostics()
}
