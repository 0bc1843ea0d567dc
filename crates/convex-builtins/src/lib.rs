//! Names the tokenizer classifies as builtins.
//!
//! The registry is pure data supplied by the caller. It never decides whether a
//! program is valid: a symbol missing from it is still an ordinary symbol.

use rustc_hash::FxHashSet;

/// Which builtin set a name belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Builtin {
    Symbol,
    Function,
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("`{0}` is registered both as a builtin symbol and as a builtin function")]
    Overlap(Box<str>),
    #[error("builtin names must not be empty")]
    EmptyName,
}

/// Two disjoint, immutable sets of builtin names.
#[derive(Clone, Debug, Default)]
pub struct BuiltinRegistry {
    symbols: FxHashSet<Box<str>>,
    functions: FxHashSet<Box<str>>,
}

impl BuiltinRegistry {
    pub fn new<S, F>(symbols: S, functions: F) -> Result<Self, RegistryError>
    where
        S: IntoIterator,
        S::Item: Into<Box<str>>,
        F: IntoIterator,
        F::Item: Into<Box<str>>,
    {
        let symbols = collect(symbols)?;
        let functions = collect(functions)?;

        if let Some(name) = symbols.iter().find(|name| functions.contains(*name)) {
            return Err(RegistryError::Overlap(name.clone()));
        }

        Ok(Self { symbols, functions })
    }

    /// A registry that classifies nothing as builtin.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn classify(&self, name: &str) -> Option<Builtin> {
        if self.functions.contains(name) {
            Some(Builtin::Function)
        } else if self.symbols.contains(name) {
            Some(Builtin::Symbol)
        } else {
            None
        }
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    pub fn is_symbol(&self, name: &str) -> bool {
        self.symbols.contains(name)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(|name| &**name)
    }

    pub fn functions(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(|name| &**name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len() + self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn collect<I>(names: I) -> Result<FxHashSet<Box<str>>, RegistryError>
where
    I: IntoIterator,
    I::Item: Into<Box<str>>,
{
    names
        .into_iter()
        .map(|name| {
            let name = name.into();
            if name.is_empty() { Err(RegistryError::EmptyName) } else { Ok(name) }
        })
        .collect()
}
