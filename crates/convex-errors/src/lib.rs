use std::fmt::{self, Display};

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

/// Where a diagnostic comes from. Neither kind stops parsing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lexical => "lexical error",
            Self::Syntax => "syntax error",
        })
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    message: String,
    range: TextRange,
    /// The form being parsed, such as `defn` or `vector`.
    context: Option<&'static str>,
}

impl Diagnostic {
    pub fn lexical(message: impl Into<String>, range: TextRange) -> Self {
        Self { kind: DiagnosticKind::Lexical, message: message.into(), range, context: None }
    }

    pub fn syntax(message: impl Into<String>, range: TextRange) -> Self {
        Self { kind: DiagnosticKind::Syntax, message: message.into(), range, context: None }
    }

    #[must_use]
    pub fn with_context(mut self, context: &'static str) -> Self {
        self.context = Some(context);
        self
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn context(&self) -> Option<&'static str> {
        self.context
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let label = match self.context {
            Some(context) => format!("in `{context}`"),
            None => "here".to_owned(),
        };

        RenderedDiagnostic { diagnostic: self, renderer, path, text, label }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {:?}", self.kind, self.message, self.range)
    }
}

struct RenderedDiagnostic<'a> {
    diagnostic: &'a Diagnostic,
    renderer: &'a Renderer,
    path: &'a str,
    text: &'a str,
    label: String,
}

impl Display for RenderedDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!("{}: {}", self.diagnostic.kind, self.diagnostic.message);
        let message = Level::Error.title(&title).snippet(
            Snippet::source(self.text)
                .origin(self.path)
                .annotation(Level::Error.span(self.diagnostic.range.into()).label(&self.label))
                .fold(true),
        );
        Display::fmt(&self.renderer.render(message), f)
    }
}
