//! esql compiler front end: parse-error and type-mismatch diagnostics.
//!
//! This crate provides:
//! - `parser` - scanner, AST, and the parsing session harness
//! - `analyze` - type-mismatch explanation, overload and alias diagnostics
//! - `diagnostics` - positioned diagnostics, message catalog, printer
//!
//! # Example
//!
//! ```
//! use esql_compiler::{CqlParser, Error};
//!
//! let mut parser = CqlParser::default();
//! let err = parser.parse(Some("SELECT c FROM FROM")).unwrap_err();
//! let Error::Query(diagnostic) = err else { unreachable!() };
//! assert_eq!(diagnostic.context_info(), Some("keyword 'FROM'"));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod diagnostics;
pub mod parser;

#[cfg(test)]
pub mod test_utils;

pub use analyze::Reporter;
pub use diagnostics::{Diagnostic, DiagnosticKind, EnglishCatalog, MessageCatalog, MessageKey};
pub use parser::{CompilationMode, CqlParser, Node, ParserOptions};

/// Errors raised by this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The caller passed unusable input (null or blank query text).
    #[error("invalid argument `{name}`: {message}")]
    InvalidArgument { name: &'static str, message: String },

    /// Positioned syntax, type, overload or alias diagnostic.
    #[error(transparent)]
    Query(Box<Diagnostic>),
}

impl Error {
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Error::Query(diagnostic) => Some(diagnostic),
            Error::InvalidArgument { .. } => None,
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;
