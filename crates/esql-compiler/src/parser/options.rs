//! Parser configuration, frozen for the lifetime of one parse.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// How the query is being compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompilationMode {
    #[default]
    Normal,
    /// Internal view generation: names compare case-sensitively.
    RestrictedViewGeneration,
    /// User-defined view generation.
    UserViewGeneration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    pub compilation_mode: CompilationMode,
}

impl ParserOptions {
    pub fn new(compilation_mode: CompilationMode) -> Self {
        Self { compilation_mode }
    }

    pub fn name_comparison_case_insensitive(&self) -> bool {
        self.compilation_mode != CompilationMode::RestrictedViewGeneration
    }

    pub fn name_comparer(&self) -> NameComparer {
        if self.name_comparison_case_insensitive() {
            NameComparer::OrdinalIgnoreCase
        } else {
            NameComparer::Ordinal
        }
    }
}

/// Ordinal (byte-wise) name comparison, optionally ignoring case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameComparer {
    Ordinal,
    OrdinalIgnoreCase,
}

impl NameComparer {
    pub fn equals(&self, a: &str, b: &str) -> bool {
        match self {
            NameComparer::Ordinal => a == b,
            NameComparer::OrdinalIgnoreCase => a.to_uppercase() == b.to_uppercase(),
        }
    }

    /// Normalized form for hashing: two names are equal under this comparer
    /// iff their keys are equal.
    pub fn key<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            NameComparer::Ordinal => Cow::Borrowed(name),
            NameComparer::OrdinalIgnoreCase => Cow::Owned(name.to_uppercase()),
        }
    }
}
