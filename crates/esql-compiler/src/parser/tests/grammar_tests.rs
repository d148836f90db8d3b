use indoc::indoc;

use crate::parser::ast::{BuiltInKind, DistinctKind, LiteralKind, Node, NodeKind, QueryExpr};
use crate::test_utils::expect_tree;

fn query(root: &Node) -> &QueryExpr {
    root.as_query().expect("query expression")
}

#[test]
fn simple_select() {
    let root = expect_tree("SELECT c.Name AS n, c.Age FROM Customers AS c");
    let q = query(&root);

    assert_eq!(q.select.items.len(), 2);
    assert_eq!(q.select.items[0].alias_name(), Some("n"));
    assert_eq!(q.select.items[1].alias_name(), Some("Age"));
    assert_eq!(q.from[0].alias_name(), Some("c"));
    assert_eq!(q.select.distinct, DistinctKind::None);
    assert!(!q.select.value);
}

#[test]
fn all_clauses() {
    let root = expect_tree(indoc! {"
        SELECT DISTINCT c.City, Count(c.Id) AS total
        FROM Customers c
        WHERE c.Age >= 18 AND NOT c.Blocked
        GROUP BY c.City
        HAVING Count(c.Id) > 1
        ORDER BY c.City DESC, total;
    "});
    let q = query(&root);

    assert_eq!(q.select.distinct, DistinctKind::Distinct);
    assert!(q.where_clause.is_some());
    assert_eq!(q.group_by.len(), 1);
    assert!(q.having.is_some());
    let order_by = q.order_by.as_ref().unwrap();
    assert!(order_by.items[0].descending);
    assert!(!order_by.items[1].descending);
}

#[test]
fn bare_expression_is_a_query() {
    let root = expect_tree("1 + 2 * 3");
    let NodeKind::BuiltIn { op, args } = &root.kind else {
        panic!("expected operator, got {:?}", root.kind);
    };
    assert_eq!(*op, BuiltInKind::Plus);
    assert!(matches!(
        args[1].kind,
        NodeKind::BuiltIn {
            op: BuiltInKind::Multiply,
            ..
        }
    ));
}

#[test]
fn unary_and_is_null() {
    let root = expect_tree("-x IS NOT NULL");
    let NodeKind::BuiltIn { op, args } = &root.kind else {
        panic!("expected operator");
    };
    assert_eq!(*op, BuiltInKind::IsNotNull);
    assert!(matches!(
        args[0].kind,
        NodeKind::BuiltIn {
            op: BuiltInKind::UnaryMinus,
            ..
        }
    ));
}

#[test]
fn keyword_literals() {
    let root = expect_tree("ROW(NULL AS a, TRUE AS b)");
    let NodeKind::Row(items) = &root.kind else {
        panic!("expected row");
    };
    assert!(matches!(&items[0].expr.kind, NodeKind::Literal(l) if l.kind == LiteralKind::Null));
    assert!(matches!(&items[1].expr.kind, NodeKind::Literal(l) if l.kind == LiteralKind::Boolean && l.text == "TRUE"));
}

#[test]
fn multiset_forms() {
    let root = expect_tree("MULTISET(1, 2)");
    assert!(matches!(&root.kind, NodeKind::Multiset(items) if items.len() == 2));

    let root = expect_tree("{}");
    assert!(matches!(&root.kind, NodeKind::Multiset(items) if items.is_empty()));
}

#[test]
fn method_calls() {
    let root = expect_tree("Edm.Length(c.Name)");
    let NodeKind::Method(method) = &root.kind else {
        panic!("expected method");
    };
    assert_eq!(method.name(), "Length");
    assert_eq!(method.args.len(), 1);
    assert_eq!(root.err_ctx.context_info.as_deref(), Some("function 'Length()'"));
    assert_eq!(root.err_ctx.input_position, Some(0));
}

#[test]
fn aggregate_distinct_argument() {
    let root = expect_tree("Count(DISTINCT x)");
    let NodeKind::Method(method) = &root.kind else {
        panic!("expected method");
    };
    assert_eq!(method.distinct, DistinctKind::Distinct);
}

#[test]
fn keyword_after_dot_is_member() {
    let root = expect_tree("SELECT c.Select FROM t AS c");
    let item = &query(&root).select.items[0];
    let NodeKind::Dot { member, .. } = &item.expr.kind else {
        panic!("expected member access");
    };
    assert_eq!(member.name, "Select");
    assert_eq!(item.expr.err_ctx.context_info.as_deref(), Some("member access 'Select'"));
}

#[test]
fn escaped_identifier_as_alias() {
    let root = expect_tree("SELECT x AS [from] FROM t");
    assert_eq!(query(&root).select.items[0].alias_name(), Some("from"));
}

#[test]
fn nested_subquery() {
    let root = expect_tree("SELECT (SELECT VALUE 1 FROM u) AS s FROM t");
    let inner = &query(&root).select.items[0].expr;
    let inner = inner.as_query().expect("subquery");
    assert!(inner.select.value);
}

#[test]
fn nodes_share_command_text() {
    let text = "SELECT a FROM t";
    let root = expect_tree(text);
    let q = query(&root);

    assert_eq!(root.err_ctx.command_text.as_deref(), Some(text));
    assert_eq!(root.err_ctx.context_info.as_deref(), Some("query expression"));
    assert_eq!(q.select.err_ctx.context_info.as_deref(), Some("select clause"));

    let a = &q.select.items[0].expr;
    assert_eq!(a.err_ctx.input_position, Some(7));
    assert_eq!(a.err_ctx.context_info.as_deref(), Some("identifier"));
    assert_eq!(a.err_ctx.command_text.as_deref(), Some(text));
}

#[test]
fn operator_context() {
    let root = expect_tree("a <> b");
    assert_eq!(root.err_ctx.context_info.as_deref(), Some("operator '<>'"));
    assert_eq!(root.err_ctx.input_position, Some(2));
}

#[test]
fn select_counts_method_invocations() {
    let root = expect_tree("SELECT f(x), g(h(y)) FROM t ORDER BY k(x), k(y)");
    let q = query(&root);

    assert_eq!(q.select.method_expr_count, 3);
    assert!(q.select.has_method_call());
    assert_eq!(q.order_by.as_ref().unwrap().method_expr_count, 2);
}

#[test]
fn nested_select_counts_roll_up() {
    let root = expect_tree("SELECT (SELECT f(x) FROM u) AS s, g(y) FROM t");
    let q = query(&root);
    let inner = q.select.items[0].expr.as_query().unwrap();

    assert_eq!(inner.select.method_expr_count, 1);
    assert_eq!(q.select.method_expr_count, 2);
}

#[test]
fn select_without_calls() {
    let root = expect_tree("SELECT a FROM t WHERE f(a)");
    assert!(!query(&root).select.has_method_call());
}
