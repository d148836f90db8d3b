use std::sync::Arc;

use super::{
    Diagnostic, DiagnosticClass, DiagnosticKind, EnglishCatalog, ErrorContext, Framing,
};
use crate::Error;

fn positioned(text: &str, position: usize, info: Option<&str>) -> Diagnostic {
    Diagnostic::build(
        &EnglishCatalog,
        DiagnosticKind::Syntax,
        "The query syntax is not valid.",
    )
    .at(position)
    .context_info(info.map(str::to_string))
    .command_text(text)
    .finish()
}

#[test]
fn message_appends_near_context() {
    let diag = positioned("SELECT c FROM FROM", 14, Some("keyword 'FROM'"));

    assert_eq!(diag.line(), Some(1));
    assert_eq!(diag.column(), Some(15));
    assert_eq!(diag.error_context(), "keyword 'FROM', line 1, column 15");
    insta::assert_snapshot!(diag.message(), @"The query syntax is not valid. Near keyword 'FROM', line 1, column 15.");
    assert_eq!(diag.to_string(), diag.message());
}

#[test]
fn message_without_context_is_the_description() {
    let diag = Diagnostic::build(
        &EnglishCatalog,
        DiagnosticKind::IncompatibleTypes,
        "The argument types 'Edm.Int32' and 'Edm.String' are incompatible for this operation.",
    )
    .finish();

    assert_eq!(diag.position(), None);
    assert_eq!(diag.line(), None);
    assert_eq!(diag.error_context(), "");
    assert_eq!(diag.message(), diag.description());
}

#[test]
fn empty_context_info_is_dropped() {
    let diag = positioned("x", 0, Some(""));
    assert_eq!(diag.context_info(), None);
    assert_eq!(diag.error_context(), "line 1, column 1");
}

#[test]
fn err_ctx_supplies_position_info_and_text() {
    let err_ctx = ErrorContext::new(7, Some("identifier".to_string()), Arc::from("SELECT c FROM t"));
    let diag = Diagnostic::build(&EnglishCatalog, DiagnosticKind::DuplicateAlias, "dup")
        .err_ctx(&err_ctx)
        .member_path(&["a".to_string(), "b".to_string()])
        .finish();

    assert_eq!(diag.position(), Some(7));
    assert_eq!(diag.context_info(), Some("identifier"));
    assert_eq!(diag.command_text(), Some("SELECT c FROM t"));
    assert_eq!(diag.member_path(), Some("a.b"));
    assert_eq!(diag.message(), "dup Near identifier, line 1, column 8.");
}

#[test]
fn raise_wraps_into_error() {
    let err = Diagnostic::build(&EnglishCatalog, DiagnosticKind::StackOverflow, "deep").raise();
    assert!(matches!(&err, Error::Query(d) if d.kind() == DiagnosticKind::StackOverflow));
    assert_eq!(err.to_string(), "deep");
    assert_eq!(err.diagnostic().map(Diagnostic::message), Some("deep"));
}

#[test]
fn kind_taxonomy() {
    assert_eq!(DiagnosticKind::Lexical.class(), DiagnosticClass::Syntax);
    assert_eq!(DiagnosticKind::StackOverflow.class(), DiagnosticClass::StackOverflow);
    assert_eq!(
        DiagnosticKind::RowArityMismatch(Framing::Nested).class(),
        DiagnosticClass::TypeIncompatibility
    );
    assert_eq!(
        DiagnosticKind::EntityTypeMismatch(Framing::Root).framing(),
        Some(Framing::Root)
    );
    assert_eq!(DiagnosticKind::TypeKindMismatch.framing(), None);
    assert_eq!(DiagnosticKind::DuplicateAlias.class(), DiagnosticClass::DuplicateAlias);
}

#[test]
fn serializes_kind_in_snake_case() {
    let diag = positioned("x", 0, None);
    let json = serde_json::to_value(&diag).unwrap();
    assert_eq!(json["kind"], "syntax");
    assert_eq!(json["position"], 0);

    let nested = serde_json::to_value(DiagnosticKind::RowArityMismatch(Framing::Nested)).unwrap();
    assert_eq!(nested, serde_json::json!({ "row_arity_mismatch": "nested" }));
}

#[test]
fn printer_falls_back_to_message_without_position() {
    let diag = Diagnostic::build(&EnglishCatalog, DiagnosticKind::OverloadResolution, "no overload")
        .finish();
    assert_eq!(diag.printer().render(), "no overload");
}

#[test]
fn printer_renders_snippet() {
    let diag = positioned("SELECT c FROM FROM", 14, Some("keyword 'FROM'"));
    let out = diag.printer().path("query.esql").render();

    assert!(out.contains("The query syntax is not valid."));
    assert!(out.contains("SELECT c FROM FROM"));
    assert!(out.contains("keyword 'FROM'"));
    assert!(out.contains("query.esql"));
}
