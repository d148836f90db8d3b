//! Expression productions, loosest binding first.

use super::{into_node, terminal_text};
use crate::diagnostics::MessageKey;
use crate::parser::ast::{BuiltInKind, Literal, LiteralKind, MethodExpr, Node, NodeKind};
use crate::parser::core::{AutomatonError, AutomatonResult, Session};
use crate::parser::lexer::{Keyword, TokenId};

impl Session<'_, '_> {
    pub(super) fn parse_expr(&mut self) -> AutomatonResult<Node> {
        self.nested(Self::parse_or)
    }

    fn parse_or(&mut self) -> AutomatonResult<Node> {
        let mut left = self.parse_and()?;
        while self.at_keyword(Keyword::Or) {
            let op = self.bump()?;
            let right = self.parse_and()?;
            left = self.builtin(BuiltInKind::Or, op.start, vec![left, right]);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> AutomatonResult<Node> {
        let mut left = self.parse_not()?;
        while self.at_keyword(Keyword::And) {
            let op = self.bump()?;
            let right = self.parse_not()?;
            left = self.builtin(BuiltInKind::And, op.start, vec![left, right]);
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> AutomatonResult<Node> {
        if !self.at_keyword(Keyword::Not) {
            return self.parse_comparison();
        }

        let op = self.bump()?;
        let operand = self.nested(Self::parse_not)?;
        Ok(self.builtin(BuiltInKind::Not, op.start, vec![operand]))
    }

    /// Comparisons do not chain: `a = b = c` is a syntax error.
    fn parse_comparison(&mut self) -> AutomatonResult<Node> {
        let left = self.parse_additive()?;

        if let Some(kind) = comparison_operator(self.current.id) {
            let op = self.bump()?;
            let right = self.parse_additive()?;
            return Ok(self.builtin(kind, op.start, vec![left, right]));
        }

        if self.at_keyword(Keyword::Is) {
            let op = self.bump()?;
            let negated = self.eat_keyword(Keyword::Not)?.is_some();
            self.expect_keyword(Keyword::Null)?;
            let kind = if negated {
                BuiltInKind::IsNotNull
            } else {
                BuiltInKind::IsNull
            };
            return Ok(self.builtin(kind, op.start, vec![left]));
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> AutomatonResult<Node> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let kind = match self.current.id {
                TokenId::Plus => BuiltInKind::Plus,
                TokenId::Minus => BuiltInKind::Minus,
                _ => return Ok(left),
            };
            let op = self.bump()?;
            let right = self.parse_multiplicative()?;
            left = self.builtin(kind, op.start, vec![left, right]);
        }
    }

    fn parse_multiplicative(&mut self) -> AutomatonResult<Node> {
        let mut left = self.parse_unary()?;
        loop {
            let kind = match self.current.id {
                TokenId::Star => BuiltInKind::Multiply,
                TokenId::Slash => BuiltInKind::Divide,
                TokenId::Percent => BuiltInKind::Modulus,
                _ => return Ok(left),
            };
            let op = self.bump()?;
            let right = self.parse_unary()?;
            left = self.builtin(kind, op.start, vec![left, right]);
        }
    }

    fn parse_unary(&mut self) -> AutomatonResult<Node> {
        let kind = match self.current.id {
            TokenId::Minus => BuiltInKind::UnaryMinus,
            TokenId::Plus => BuiltInKind::UnaryPlus,
            _ => return self.parse_postfix(),
        };

        let op = self.bump()?;
        let operand = self.nested(Self::parse_unary)?;
        Ok(self.builtin(kind, op.start, vec![operand]))
    }

    /// Member access and calls: `a.b`, `f(x)`, `ns.f(x).c`.
    fn parse_postfix(&mut self) -> AutomatonResult<Node> {
        let start = self.current.start;
        let mut expr = self.parse_primary()?;
        loop {
            if self.at(TokenId::Dot) {
                let dot = self.bump()?;
                let member = self.parse_identifier()?;
                let Some(member) = member.as_identifier().cloned() else {
                    return Err(AutomatonError::Syntax);
                };
                let info = self.phrase_with(MessageKey::CtxMemberAccess, &member.name);
                expr = Node::new(NodeKind::Dot {
                    left: Box::new(expr),
                    member,
                });
                self.attach(&mut expr, dot.start, Some(info));
                continue;
            }

            if self.at(TokenId::ParenOpen) && is_callable(&expr) {
                expr = self.parse_call(expr, start)?;
                continue;
            }

            return Ok(expr);
        }
    }

    /// `target '(' [ALL|DISTINCT] [expr (',' expr)*] ')'`, positioned at
    /// `start`, the first token of the callee.
    fn parse_call(&mut self, target: Node, start: usize) -> AutomatonResult<Node> {
        self.expect(TokenId::ParenOpen)?;
        let distinct = self.parse_distinct()?;
        let args = self.parse_expr_list(TokenId::ParenClose)?;
        self.expect(TokenId::ParenClose)?;
        self.record_invocation();

        let method = MethodExpr {
            target: Box::new(target),
            distinct,
            args,
        };
        let info = self.phrase_with(MessageKey::CtxFunction, method.name());
        let mut node = Node::new(NodeKind::Method(method));
        self.attach(&mut node, start, Some(info));
        Ok(node)
    }

    fn parse_primary(&mut self) -> AutomatonResult<Node> {
        match self.current.id {
            TokenId::Identifier | TokenId::Literal | TokenId::Parameter => {
                let token = self.bump()?;
                into_node(token)
            }
            TokenId::Keyword(kw @ (Keyword::Null | Keyword::True | Keyword::False)) => {
                let token = self.bump()?;
                let kind = if kw == Keyword::Null {
                    LiteralKind::Null
                } else {
                    LiteralKind::Boolean
                };
                let mut node = Node::new(NodeKind::Literal(Literal {
                    kind,
                    text: terminal_text(&token).to_string(),
                }));
                let info = self.phrase(MessageKey::LocalizedLiteral);
                self.attach(&mut node, token.start, Some(info));
                Ok(node)
            }
            TokenId::ParenOpen => {
                self.bump()?;
                let inner = self.parse_query_or_expr()?;
                self.expect(TokenId::ParenClose)?;
                Ok(inner)
            }
            TokenId::Keyword(Keyword::Row) => self.parse_row(),
            TokenId::Keyword(Keyword::Multiset) => {
                let multiset = self.bump()?;
                self.expect(TokenId::ParenOpen)?;
                let items = self.parse_expr_list(TokenId::ParenClose)?;
                self.expect(TokenId::ParenClose)?;
                Ok(self.multiset(multiset.start, items))
            }
            TokenId::BraceOpen => {
                let open = self.bump()?;
                let items = self.parse_expr_list(TokenId::BraceClose)?;
                self.expect(TokenId::BraceClose)?;
                Ok(self.multiset(open.start, items))
            }
            _ => Err(AutomatonError::Syntax),
        }
    }

    /// `ROW '(' aliased_expr (',' aliased_expr)* ')'`
    fn parse_row(&mut self) -> AutomatonResult<Node> {
        let row = self.expect_keyword(Keyword::Row)?;
        self.expect(TokenId::ParenOpen)?;
        let items = self.parse_aliased_list()?;
        self.expect(TokenId::ParenClose)?;

        let mut node = Node::new(NodeKind::Row(items));
        let info = self.phrase(MessageKey::CtxRowConstructor);
        self.attach(&mut node, row.start, Some(info));
        Ok(node)
    }

    /// Comma-separated expressions, empty when `close` follows immediately.
    fn parse_expr_list(&mut self, close: TokenId) -> AutomatonResult<Vec<Node>> {
        let mut items = Vec::new();
        if self.at(close) {
            return Ok(items);
        }
        loop {
            items.push(self.parse_expr()?);
            if self.eat(TokenId::Comma)?.is_none() {
                return Ok(items);
            }
        }
    }

    fn multiset(&self, start: usize, items: Vec<Node>) -> Node {
        let mut node = Node::new(NodeKind::Multiset(items));
        let info = self.phrase(MessageKey::CtxMultisetConstructor);
        self.attach(&mut node, start, Some(info));
        node
    }

    fn builtin(&self, op: BuiltInKind, start: usize, args: Vec<Node>) -> Node {
        let mut node = Node::new(NodeKind::BuiltIn { op, args });
        let info = self.phrase_with(MessageKey::CtxOperator, op.symbol());
        self.attach(&mut node, start, Some(info));
        node
    }
}

fn comparison_operator(id: TokenId) -> Option<BuiltInKind> {
    Some(match id {
        TokenId::Equal => BuiltInKind::Equal,
        TokenId::NotEqual => BuiltInKind::NotEqual,
        TokenId::Less => BuiltInKind::Less,
        TokenId::LessEqual => BuiltInKind::LessEqual,
        TokenId::Greater => BuiltInKind::Greater,
        TokenId::GreaterEqual => BuiltInKind::GreaterEqual,
        _ => return None,
    })
}

/// Only names can be called: `f(x)` and `ns.f(x)`.
fn is_callable(expr: &Node) -> bool {
    matches!(expr.kind, NodeKind::Identifier(_) | NodeKind::Dot { .. })
}
