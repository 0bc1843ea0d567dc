use anyhow::Context as _;
use camino::Utf8Path;
use convex_builtins::BuiltinRegistry;
use serde::Deserialize;

const BUNDLED: &str = include_str!("builtins.json");

/// On-disk shape of a builtin registry.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    #[serde(default)]
    symbols: Vec<String>,
    #[serde(default)]
    functions: Vec<String>,
}

/// Loads the registry at `path`, or the bundled core registry.
pub(crate) fn load(path: Option<&Utf8Path>) -> anyhow::Result<BuiltinRegistry> {
    let (origin, text) = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read `{path}`"))?;
            (path.as_str(), text)
        }
        None => ("<bundled>", BUNDLED.to_owned()),
    };

    let file: RegistryFile = serde_json::from_str(&text)
        .with_context(|| format!("`{origin}` is not a builtin registry"))?;
    let registry = BuiltinRegistry::new(file.symbols, file.functions)
        .with_context(|| format!("invalid builtin registry `{origin}`"))?;

    tracing::debug!(origin, builtins = registry.len(), "loaded builtin registry");
    Ok(registry)
}
