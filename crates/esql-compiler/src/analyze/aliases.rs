//! Alias uniqueness per construct.

use indexmap::IndexMap;

use super::Reporter;
use crate::Result;
use crate::diagnostics::{ErrorContext, MessageKey};
use crate::parser::{AliasedExpr, NameComparer, Node, NodeKind, ParserOptions};

/// Aliases bound by one construct: a row constructor, a projection list,
/// a FROM clause or a GROUP BY clause.
///
/// Names are compared with the session's [`NameComparer`], so under the
/// default options `a` and `A` collide.
#[derive(Debug, Clone)]
pub struct AliasScope {
    comparer: NameComparer,
    context: MessageKey,
    names: IndexMap<String, String>,
}

impl AliasScope {
    pub fn new(comparer: NameComparer, context: MessageKey) -> Self {
        Self {
            comparer,
            context,
            names: IndexMap::new(),
        }
    }

    /// Binds `name`, or raises the duplicate-alias diagnostic at `err_ctx`.
    pub fn insert(
        &mut self,
        reporter: &Reporter<'_>,
        name: &str,
        err_ctx: &ErrorContext,
    ) -> Result<()> {
        let key = self.comparer.key(name).into_owned();
        if self.names.contains_key(&key) {
            let context = reporter.catalog().phrase(self.context);
            return Err(reporter.report_duplicate_alias(name, err_ctx, &context));
        }
        self.names.insert(key, name.to_string());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(self.comparer.key(name).as_ref())
    }

    /// Bound names as written, in binding order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Reporter<'_> {
    /// Checks every aliasing construct under `root` for reused names.
    ///
    /// Items without an explicit or inferable alias (`a + b`) bind nothing.
    pub fn check_aliases(&self, root: &Node, options: ParserOptions) -> Result<()> {
        AliasWalker {
            reporter: self,
            comparer: options.name_comparer(),
        }
        .visit(root)
    }
}

struct AliasWalker<'r, 'a> {
    reporter: &'r Reporter<'a>,
    comparer: NameComparer,
}

impl AliasWalker<'_, '_> {
    fn visit(&self, node: &Node) -> Result<()> {
        match &node.kind {
            NodeKind::Identifier(_) | NodeKind::Literal(_) | NodeKind::Parameter(_) => Ok(()),
            NodeKind::Dot { left, .. } => self.visit(left),
            NodeKind::Method(method) => {
                self.visit(&method.target)?;
                method.args.iter().try_for_each(|arg| self.visit(arg))
            }
            NodeKind::BuiltIn { args, .. } | NodeKind::Multiset(args) => {
                args.iter().try_for_each(|arg| self.visit(arg))
            }
            NodeKind::Row(items) => self.visit_aliased(items, MessageKey::InRowConstructor),
            NodeKind::Query(query) => {
                self.visit_aliased(&query.select.items, MessageKey::InSelectProjectionList)?;
                self.visit_aliased(&query.from, MessageKey::InFromClause)?;
                if let Some(where_clause) = &query.where_clause {
                    self.visit(where_clause)?;
                }
                self.visit_aliased(&query.group_by, MessageKey::InGroupClause)?;
                if let Some(having) = &query.having {
                    self.visit(having)?;
                }
                if let Some(order_by) = &query.order_by {
                    for item in &order_by.items {
                        self.visit(&item.expr)?;
                    }
                }
                Ok(())
            }
        }
    }

    fn visit_aliased(&self, items: &[AliasedExpr], context: MessageKey) -> Result<()> {
        let mut scope = AliasScope::new(self.comparer, context);
        for item in items {
            self.visit(&item.expr)?;
            if let Some(name) = item.alias_name() {
                scope.insert(self.reporter, name, &item.alias_node().err_ctx)?;
            }
        }
        Ok(())
    }
}
