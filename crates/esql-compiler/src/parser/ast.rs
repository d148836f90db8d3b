//! AST produced by the grammar.
//!
//! Every node carries an [`ErrorContext`] filled in by the session as the
//! node is reduced, so later passes can raise positioned diagnostics.

pub use crate::diagnostics::ErrorContext;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub err_ctx: ErrorContext,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            err_ctx: ErrorContext::default(),
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match &self.kind {
            NodeKind::Identifier(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_identifier(&self) -> bool {
        self.as_identifier().is_some()
    }

    pub fn as_query(&self) -> Option<&QueryExpr> {
        match &self.kind {
            NodeKind::Query(query) => Some(query),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Identifier(Identifier),
    Literal(Literal),
    Parameter(String),
    /// `left.member`
    Dot { left: Box<Node>, member: Identifier },
    Method(MethodExpr),
    BuiltIn { op: BuiltInKind, args: Vec<Node> },
    Row(Vec<AliasedExpr>),
    Multiset(Vec<Node>),
    Query(Box<QueryExpr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    /// Written as `[name]`.
    pub escaped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Decimal,
    String,
    Boolean,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Source text, quotes included for strings.
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistinctKind {
    #[default]
    None,
    All,
    Distinct,
}

/// `f(args)` or `expr.f(args)`.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodExpr {
    /// Function name: an identifier or a dotted path.
    pub target: Box<Node>,
    pub distinct: DistinctKind,
    pub args: Vec<Node>,
}

impl MethodExpr {
    /// Last segment of the target, the simple function name.
    pub fn name(&self) -> &str {
        match &self.target.kind {
            NodeKind::Identifier(id) => &id.name,
            NodeKind::Dot { member, .. } => &member.name,
            _ => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltInKind {
    Or,
    And,
    Not,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    IsNull,
    IsNotNull,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulus,
    UnaryMinus,
    UnaryPlus,
}

impl BuiltInKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            BuiltInKind::Or => "OR",
            BuiltInKind::And => "AND",
            BuiltInKind::Not => "NOT",
            BuiltInKind::Equal => "=",
            BuiltInKind::NotEqual => "<>",
            BuiltInKind::Less => "<",
            BuiltInKind::LessEqual => "<=",
            BuiltInKind::Greater => ">",
            BuiltInKind::GreaterEqual => ">=",
            BuiltInKind::IsNull => "IS NULL",
            BuiltInKind::IsNotNull => "IS NOT NULL",
            BuiltInKind::Plus | BuiltInKind::UnaryPlus => "+",
            BuiltInKind::Minus | BuiltInKind::UnaryMinus => "-",
            BuiltInKind::Multiply => "*",
            BuiltInKind::Divide => "/",
            BuiltInKind::Modulus => "%",
        }
    }
}

/// `expr [AS alias]`
#[derive(Debug, Clone, PartialEq)]
pub struct AliasedExpr {
    pub expr: Node,
    /// Identifier node of the explicit alias.
    pub alias: Option<Node>,
}

impl AliasedExpr {
    /// Explicit alias, or the name inferred from an identifier or member access.
    pub fn alias_name(&self) -> Option<&str> {
        if let Some(alias) = &self.alias {
            return alias.as_identifier().map(|id| id.name.as_str());
        }
        match &self.expr.kind {
            NodeKind::Identifier(id) => Some(&id.name),
            NodeKind::Dot { member, .. } => Some(&member.name),
            _ => None,
        }
    }

    /// Node to point at when the alias is reported.
    pub fn alias_node(&self) -> &Node {
        self.alias.as_ref().unwrap_or(&self.expr)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectClause {
    pub distinct: DistinctKind,
    /// `SELECT VALUE`
    pub value: bool,
    pub items: Vec<AliasedExpr>,
    /// Method invocations counted while this clause was open.
    pub method_expr_count: u32,
    pub err_ctx: ErrorContext,
}

impl SelectClause {
    pub fn has_method_call(&self) -> bool {
        self.method_expr_count > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByItem {
    pub expr: Node,
    pub descending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderByClause {
    pub items: Vec<OrderByItem>,
    pub method_expr_count: u32,
    pub err_ctx: ErrorContext,
}

impl OrderByClause {
    pub fn has_method_call(&self) -> bool {
        self.method_expr_count > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryExpr {
    pub select: SelectClause,
    pub from: Vec<AliasedExpr>,
    pub where_clause: Option<Node>,
    pub group_by: Vec<AliasedExpr>,
    pub having: Option<Node>,
    pub order_by: Option<OrderByClause>,
}
