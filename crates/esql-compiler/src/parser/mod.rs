//! Parser for the query language.
//!
//! # Architecture
//!
//! A logos-driven [`lexer::Scanner`] feeds an LL(1) recursive-descent grammar
//! through a per-call session (`core.rs`). The session owns the hooks the
//! grammar relies on:
//!
//! - token fetch: pulls the next significant token, advances the scanner
//!   cursor, and remembers the semantic value handed to the grammar
//! - error: converts the first grammar failure into a positioned
//!   [`Diagnostic`](crate::Diagnostic) whose context names the offending
//!   keyword, term or node
//! - error-context tracking: every reduced node records where it starts
//!   and what to call it in messages
//! - method-invocation scopes: `SELECT` and `ORDER BY` count the calls
//!   they contain
//!
//! There is no recovery. The first error ends the parse.

pub mod ast;
pub mod lexer;
pub mod options;
pub mod scope;

mod core;
mod grammar;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod options_tests;
#[cfg(test)]
mod scope_tests;
#[cfg(test)]
mod tests;

pub use ast::{
    AliasedExpr, BuiltInKind, DistinctKind, ErrorContext, Identifier, Literal, LiteralKind,
    MethodExpr, Node, NodeKind, OrderByClause, OrderByItem, QueryExpr, SelectClause,
};
pub use core::CqlParser;
pub use options::{CompilationMode, NameComparer, ParserOptions};
pub use scope::MethodExprCounter;

use crate::Result;

/// Parses `query` with default options.
pub fn parse(query: &str) -> Result<Node> {
    let mut parser = CqlParser::default();
    parser.parse(Some(query)).cloned()
}
