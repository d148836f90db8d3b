//! Semantic diagnostics.
//!
//! Binding and name resolution live elsewhere; this module only explains
//! failures they detect:
//! - type mismatches (`compat`), walking both type trees to the first divergence
//! - overload resolution failures and duplicate aliases (`overload`)
//! - alias uniqueness per construct (`aliases`)
//!
//! Every entry point returns the [`Error`](crate::Error) to raise rather
//! than a `Result`: callers invoke them only once a failure is established.

mod aliases;
mod classify;
mod compat;
mod overload;


pub use aliases::AliasScope;
pub use classify::{readable_kind, readable_name};

use esql_core::MetadataOracle;

use crate::diagnostics::{EnglishCatalog, MessageCatalog};

/// Builds semantic diagnostics against one metadata oracle and catalog.
#[derive(Clone, Copy)]
pub struct Reporter<'a> {
    oracle: &'a dyn MetadataOracle,
    catalog: &'a dyn MessageCatalog,
}

impl<'a> Reporter<'a> {
    pub fn new(oracle: &'a dyn MetadataOracle, catalog: &'a dyn MessageCatalog) -> Self {
        Self { oracle, catalog }
    }

    /// Reporter with the built-in English messages.
    pub fn english(oracle: &'a dyn MetadataOracle) -> Self {
        Self::new(oracle, &EnglishCatalog)
    }

    pub fn catalog(&self) -> &'a dyn MessageCatalog {
        self.catalog
    }
}
