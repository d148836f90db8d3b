use super::ast::{LiteralKind, NodeKind};
use super::lexer::{Keyword, Scanner, SemanticValue, TokenId, is_reserved_keyword};

/// Token ids of a whole input.
fn ids(source: &str) -> Vec<TokenId> {
    let mut scanner = Scanner::new(source);
    let mut out = Vec::new();
    while let Some(token) = scanner.next_token().unwrap() {
        out.push(token.id);
    }
    out
}

#[test]
fn keywords_are_case_insensitive() {
    assert_eq!(
        ids("select Select SELECT"),
        vec![TokenId::Keyword(Keyword::Select); 3]
    );
    assert!(is_reserved_keyword("from"));
    assert!(is_reserved_keyword("GroupPartition"));
    assert!(!is_reserved_keyword("customers"));
}

#[test]
fn word_after_dot_is_identifier() {
    assert_eq!(
        ids("c.from"),
        vec![TokenId::Identifier, TokenId::Dot, TokenId::Identifier]
    );
}

#[test]
fn escaped_identifier_strips_brackets() {
    let mut scanner = Scanner::new("[select]");
    let token = scanner.next_token().unwrap().unwrap();
    assert_eq!(token.id, TokenId::Identifier);
    let node = token.value.as_node().unwrap();
    let id = node.as_identifier().unwrap();
    assert_eq!(id.name, "select");
    assert!(id.escaped);
}

#[test]
fn literals_and_parameters() {
    let mut scanner = Scanner::new("42 3.5 'it''s' @p");
    let mut kinds = Vec::new();
    while let Some(token) = scanner.next_token().unwrap() {
        match token.value {
            SemanticValue::Node(node) => kinds.push(node.kind),
            SemanticValue::Terminal(t) => panic!("unexpected terminal {t:?}"),
        }
    }

    assert!(matches!(&kinds[0], NodeKind::Literal(l) if l.kind == LiteralKind::Integer && l.text == "42"));
    assert!(matches!(&kinds[1], NodeKind::Literal(l) if l.kind == LiteralKind::Decimal));
    assert!(matches!(&kinds[2], NodeKind::Literal(l) if l.kind == LiteralKind::String && l.text == "'it''s'"));
    assert!(matches!(&kinds[3], NodeKind::Parameter(p) if p == "p"));
}

#[test]
fn trivia_is_skipped() {
    assert_eq!(
        ids("a -- comment\n\t+ b"),
        vec![TokenId::Identifier, TokenId::Plus, TokenId::Identifier]
    );
}

#[test]
fn operators() {
    assert_eq!(
        ids("<> != <= >= < > ="),
        vec![
            TokenId::NotEqual,
            TokenId::NotEqual,
            TokenId::LessEqual,
            TokenId::GreaterEqual,
            TokenId::Less,
            TokenId::Greater,
            TokenId::Equal,
        ]
    );
}

#[test]
fn position_follows_advance() {
    let mut scanner = Scanner::new("SELECT  c");
    assert_eq!(scanner.position(), 0);

    let token = scanner.next_token().unwrap().unwrap();
    assert_eq!(token.start, 0);
    assert_eq!(scanner.position(), 0);
    scanner.advance_position();
    assert_eq!(scanner.position(), 6);
    assert_eq!(scanner.text(), "SELECT");

    let token = scanner.next_token().unwrap().unwrap();
    assert_eq!(token.start, 8);
    scanner.advance_position();
    assert_eq!(scanner.position(), 9);
    assert_eq!(scanner.text(), "c");
}

#[test]
fn text_is_empty_at_end_of_input() {
    let mut scanner = Scanner::new("c ");
    scanner.next_token().unwrap();
    scanner.advance_position();
    assert!(scanner.next_token().unwrap().is_none());
    assert_eq!(scanner.text(), "");
    assert_eq!(scanner.position(), 1);
}

#[test]
fn invalid_character() {
    let mut scanner = Scanner::new("a # b");
    scanner.next_token().unwrap();
    let err = scanner.next_token().unwrap_err();
    assert_eq!(err.position, 2);
    assert_eq!(err.text, "#");
}

#[test]
fn unmatched_brackets_are_invalid() {
    let mut scanner = Scanner::new("a ] b");
    scanner.next_token().unwrap();
    let err = scanner.next_token().unwrap_err();
    assert_eq!(err.position, 2);
    assert_eq!(err.text, "]");

    let mut scanner = Scanner::new("a [b");
    scanner.next_token().unwrap();
    let err = scanner.next_token().unwrap_err();
    assert_eq!(err.position, 2);
    assert!(err.text.starts_with('['));
}
