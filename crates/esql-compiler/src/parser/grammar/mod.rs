//! Grammar productions for the query language.
//!
//! This module implements all `parse_*` methods as an extension of `Session`.
//! Productions return [`AutomatonError`] on the first token they cannot
//! accept; the session's error hook turns it into the diagnostic.

mod expressions;
mod query;

use super::ast::Node;
use super::core::{AutomatonError, AutomatonResult, Session};
use super::lexer::{SemanticValue, Token, TokenId};

impl Session<'_, '_> {
    /// `command := (select_query | expr) [';'] EOF`
    pub(super) fn parse_command(&mut self) -> AutomatonResult<Node> {
        self.current = self.fetch()?;

        let root = self.parse_query_or_expr()?;
        self.eat(TokenId::Semicolon)?;
        if !self.at(TokenId::EndOfInput) {
            return Err(AutomatonError::Syntax);
        }
        Ok(root)
    }

    fn parse_identifier(&mut self) -> AutomatonResult<Node> {
        let token = self.expect(TokenId::Identifier)?;
        into_node(token)
    }
}

/// AST node the scanner produced for an identifier, literal or parameter.
fn into_node(token: Token) -> AutomatonResult<Node> {
    match token.value {
        SemanticValue::Node(node) => Ok(node),
        SemanticValue::Terminal(_) => Err(AutomatonError::Syntax),
    }
}

fn terminal_text(token: &Token) -> &str {
    match &token.value {
        SemanticValue::Terminal(terminal) => &terminal.text,
        SemanticValue::Node(_) => "",
    }
}
