//! Test utilities.

use esql_core::{PrimitiveKind, TypeDescriptor, TypeRef};

use crate::diagnostics::Diagnostic;
use crate::parser::{CqlParser, Node};
use crate::{Error, Result};

/// Parses a query that must be valid and returns its root.
pub fn expect_tree(query: &str) -> Node {
    let mut parser = CqlParser::default();
    match parser.parse(Some(query)) {
        Ok(root) => root.clone(),
        Err(err) => panic!("expected a valid query, got: {err}"),
    }
}

/// Parses a query that must be invalid and returns its diagnostic.
pub fn expect_diagnostic(query: &str) -> Diagnostic {
    let mut parser = CqlParser::default();
    let result = parser.parse(Some(query)).map(|_| ());
    unwrap_diagnostic(result)
}

/// Diagnostic carried by an `Err(Error::Query(..))`.
pub fn unwrap_diagnostic<T: std::fmt::Debug>(result: Result<T>) -> Diagnostic {
    match result {
        Err(Error::Query(diagnostic)) => *diagnostic,
        other => panic!("expected a diagnostic, got: {other:?}"),
    }
}

/// Diagnostic carried by a raised error.
pub fn diagnostic_of(err: Error) -> Diagnostic {
    unwrap_diagnostic::<()>(Err(err))
}

pub fn int() -> TypeRef {
    TypeDescriptor::primitive(PrimitiveKind::Int32)
}

pub fn string() -> TypeRef {
    TypeDescriptor::primitive(PrimitiveKind::String)
}

/// Snapshot test for the message of an invalid query.
#[macro_export]
macro_rules! shot_message {
    ($query:literal, @$snapshot:literal) => {{
        let query = indoc::indoc!($query).trim();
        let diagnostic = $crate::test_utils::expect_diagnostic(query);
        insta::assert_snapshot!(diagnostic.message(), @$snapshot);
    }};
}
