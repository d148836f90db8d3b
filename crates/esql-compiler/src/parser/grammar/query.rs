use crate::diagnostics::MessageKey;
use crate::parser::ast::{
    AliasedExpr, DistinctKind, Node, NodeKind, OrderByClause, OrderByItem, QueryExpr,
    SelectClause,
};
use crate::parser::core::{AutomatonError, AutomatonResult, Session};
use crate::parser::lexer::{Keyword, TokenId};

impl Session<'_, '_> {
    pub(super) fn parse_query_or_expr(&mut self) -> AutomatonResult<Node> {
        if self.at_keyword(Keyword::Select) {
            return self.parse_select_query();
        }
        self.parse_expr()
    }

    /// `SELECT ... FROM ... [WHERE] [GROUP BY] [HAVING] [ORDER BY]`
    pub(super) fn parse_select_query(&mut self) -> AutomatonResult<Node> {
        self.nested(Self::parse_select_query_inner)
    }

    fn parse_select_query_inner(&mut self) -> AutomatonResult<Node> {
        let select = self.parse_select_clause()?;

        self.expect_keyword(Keyword::From)?;
        let from = self.parse_aliased_list()?;

        let where_clause = match self.eat_keyword(Keyword::Where)? {
            Some(_) => Some(self.parse_expr()?),
            None => None,
        };

        let group_by = match self.eat_keyword(Keyword::Group)? {
            Some(_) => {
                self.expect_keyword(Keyword::By)?;
                self.parse_aliased_list()?
            }
            None => Vec::new(),
        };

        let having = match self.eat_keyword(Keyword::Having)? {
            Some(_) => Some(self.parse_expr()?),
            None => None,
        };

        let order_by = if self.at_keyword(Keyword::Order) {
            Some(self.parse_order_by()?)
        } else {
            None
        };

        let start = select.err_ctx.input_position.unwrap_or_default();
        let mut node = Node::new(NodeKind::Query(Box::new(QueryExpr {
            select,
            from,
            where_clause,
            group_by,
            having,
            order_by,
        })));
        let info = self.phrase(MessageKey::CtxQueryExpression);
        self.attach(&mut node, start, Some(info));
        Ok(node)
    }

    /// Projection list, counted as its own method-invocation scope.
    fn parse_select_clause(&mut self) -> AutomatonResult<SelectClause> {
        let select = self.expect_keyword(Keyword::Select)?;

        self.enter_scope();
        let projection = self.parse_projection();
        let method_expr_count = self.exit_scope();
        let (distinct, value, items) = projection?;

        if value && items.len() > 1 {
            return Err(AutomatonError::Message(
                self.phrase(MessageKey::InvalidSelectValueList),
            ));
        }

        let info = self.phrase(MessageKey::CtxSelectClause);
        Ok(SelectClause {
            distinct,
            value,
            items,
            method_expr_count,
            err_ctx: self.error_context(select.start, Some(info)),
        })
    }

    fn parse_projection(&mut self) -> AutomatonResult<(DistinctKind, bool, Vec<AliasedExpr>)> {
        let distinct = self.parse_distinct()?;
        let value = self.eat_keyword(Keyword::Value)?.is_some();
        let items = self.parse_aliased_list()?;
        Ok((distinct, value, items))
    }

    pub(super) fn parse_distinct(&mut self) -> AutomatonResult<DistinctKind> {
        if self.eat_keyword(Keyword::All)?.is_some() {
            return Ok(DistinctKind::All);
        }
        if self.eat_keyword(Keyword::Distinct)?.is_some() {
            return Ok(DistinctKind::Distinct);
        }
        Ok(DistinctKind::None)
    }

    /// `aliased_expr (',' aliased_expr)*`
    pub(super) fn parse_aliased_list(&mut self) -> AutomatonResult<Vec<AliasedExpr>> {
        let mut items = vec![self.parse_aliased_expr()?];
        while self.eat(TokenId::Comma)?.is_some() {
            items.push(self.parse_aliased_expr()?);
        }
        Ok(items)
    }

    /// `expr [AS identifier]`, or `expr identifier`.
    fn parse_aliased_expr(&mut self) -> AutomatonResult<AliasedExpr> {
        let expr = self.parse_expr()?;
        let alias = if self.eat_keyword(Keyword::As)?.is_some() || self.at(TokenId::Identifier) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(AliasedExpr { expr, alias })
    }

    fn parse_order_by(&mut self) -> AutomatonResult<OrderByClause> {
        let order = self.expect_keyword(Keyword::Order)?;
        self.expect_keyword(Keyword::By)?;

        self.enter_scope();
        let items = self.parse_order_items();
        let method_expr_count = self.exit_scope();

        let info = self.phrase(MessageKey::CtxOrderByClause);
        Ok(OrderByClause {
            items: items?,
            method_expr_count,
            err_ctx: self.error_context(order.start, Some(info)),
        })
    }

    fn parse_order_items(&mut self) -> AutomatonResult<Vec<OrderByItem>> {
        let mut items = Vec::new();
        loop {
            let expr = self.parse_expr()?;
            let descending = if self.eat_keyword(Keyword::Desc)?.is_some() {
                true
            } else {
                self.eat_keyword(Keyword::Asc)?;
                false
            };
            items.push(OrderByItem { expr, descending });

            if self.eat(TokenId::Comma)?.is_none() {
                return Ok(items);
            }
        }
    }
}
