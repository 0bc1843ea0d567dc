mod builtins;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context as _;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use convex_builtins::BuiltinRegistry;
use convex_db::{File, RootDatabase, check_file};
use convex_errors::Renderer;
use convex_tokenizer::{SyntaxKind, Tokenizer};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(version, about = "Convex Lisp front-end")]
struct Options {
    /// JSON file with `symbols` and `functions` arrays. The bundled core
    /// registry is used when absent.
    #[arg(long, global = true)]
    builtins: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse files and report their diagnostics.
    Check {
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
        /// One `path:line:col: message` line per diagnostic.
        #[arg(long)]
        short: bool,
    },
    /// Print the syntax tree of a file.
    Tree { path: Utf8PathBuf },
    /// Print the tokens of a file.
    Tokens { path: Utf8PathBuf },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("CONVEX_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = Options::parse();
    let registry = Arc::new(builtins::load(options.builtins.as_deref())?);

    match options.command {
        Command::Check { paths, short } => check(&paths, &registry, short),
        Command::Tree { path } => {
            let db = RootDatabase::default();
            let file = open(&db, path, registry)?;
            let parse = file.parse(&db);
            print!("{}", parse.debug_dump());
            Ok(exit_code(parse.is_ok()))
        }
        Command::Tokens { path } => {
            let text = read(&path)?;
            Ok(tokens(&text, &registry))
        }
    }
}

fn read(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))
}

fn open(
    db: &RootDatabase,
    path: Utf8PathBuf,
    registry: Arc<BuiltinRegistry>,
) -> anyhow::Result<File> {
    let text = read(&path)?;
    Ok(File::new(db, path, text, registry))
}

fn check(
    paths: &[Utf8PathBuf],
    registry: &Arc<BuiltinRegistry>,
    short: bool,
) -> anyhow::Result<ExitCode> {
    let db = RootDatabase::default();
    let renderer = Renderer::styled();
    let mut failed = 0;

    for path in paths {
        let file = open(&db, path.clone(), Arc::clone(registry))?;
        let diagnostics = check_file(&db, file);
        tracing::info!(%path, diagnostics = diagnostics.len(), "checked");

        if !diagnostics.is_empty() {
            failed += 1;
        }

        let path = file.path(&db).as_str();
        let text = file.text(&db);

        for diagnostic in diagnostics {
            if short {
                let line_col = file.line_col(&db, diagnostic.range());
                println!(
                    "{path}:{}:{}: {}: {}",
                    line_col.line + 1,
                    line_col.col + 1,
                    diagnostic.kind(),
                    diagnostic.message()
                );
            } else {
                eprintln!("{}", diagnostic.render(&renderer, path, text));
            }
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} files have errors", paths.len());
    }
    Ok(exit_code(failed == 0))
}

fn tokens(text: &str, registry: &BuiltinRegistry) -> ExitCode {
    let mut tokenizer = Tokenizer::new(text, registry);

    loop {
        let token = tokenizer.next_token();
        println!("{:?}@{:?} {:?}", token.kind, token.kind_range, token.text(text));

        if token.kind == SyntaxKind::EOF {
            break;
        }
    }

    let diagnostics = tokenizer.finish();
    for diagnostic in &diagnostics {
        eprintln!("{diagnostic}");
    }
    exit_code(diagnostics.is_empty())
}

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
