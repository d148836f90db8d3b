/// Keys of the message catalog.
///
/// Error templates come first, then context phrases. Templates use
/// positional `{0}`, `{1}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    // Overload resolution: {0} namespace, {1} name, {2} signature
    NoFunctionOverloadMatch,
    NoAggrFunctionOverloadMatch,
    NoCanonicalFunctionOverloadMatch,
    NoCanonicalAggrFunctionOverloadMatch,

    AliasNameAlreadyUsed,

    // Type incompatibility
    TypeKindMismatch,
    InvalidRootRowType,
    InvalidRowType,
    InvalidRootComplexType,
    InvalidComplexType,
    InvalidEntityRootTypeArgument,
    InvalidEntityTypeArgument,
    InvalidPlaceholderRootTypeArgument,
    InvalidPlaceholderTypeArgument,
    ArgumentTypesAreIncompatible,

    // Parsing
    GenericSyntaxError,
    StackOverflowInParser,
    InvalidCharacter,
    InvalidSelectValueList,
    QueryTextNull,
    InvalidEmptyQuery,

    // Syntax context words
    LocalizedTerm,
    LocalizedKeyword,
    LocalizedIdentifier,
    LocalizedLiteral,
    LocalizedParameter,

    // Type kind labels
    LocalizedRow,
    LocalizedCollection,
    LocalizedReference,
    LocalizedEntity,
    LocalizedComplex,
    LocalizedPrimitive,
    LocalizedType,

    // Error context rendering
    LocalizedNear,
    LocalizedLine,
    LocalizedColumn,

    // Node context
    CtxFunction,
    CtxOperator,
    CtxMemberAccess,
    CtxRowConstructor,
    CtxMultisetConstructor,
    CtxQueryExpression,
    CtxSelectClause,
    CtxOrderByClause,

    // Alias scopes
    InRowConstructor,
    InSelectProjectionList,
    InFromClause,
    InGroupClause,
}

impl MessageKey {
    /// Built-in English template.
    pub fn english(&self) -> &'static str {
        match self {
            Self::NoFunctionOverloadMatch => {
                "No overload of function '{0}.{1}' is compatible with the argument types '{2}'."
            }
            Self::NoAggrFunctionOverloadMatch => {
                "No overload of aggregate function '{0}.{1}' is compatible with the argument types '{2}'."
            }
            Self::NoCanonicalFunctionOverloadMatch => {
                "No overload of canonical function '{1}' is compatible with the argument types '{2}'."
            }
            Self::NoCanonicalAggrFunctionOverloadMatch => {
                "No overload of canonical aggregate function '{1}' is compatible with the argument types '{2}'."
            }

            Self::AliasNameAlreadyUsed => "The alias '{0}' was already used",

            Self::TypeKindMismatch => {
                "The type kinds of {0} '{1}' and {2} '{3}' are incompatible."
            }
            Self::InvalidRootRowType => {
                "The row types '{0}' and '{1}' do not have the same number of members."
            }
            Self::InvalidRowType => {
                "The row type '{0}' in '{1}' and the row type '{2}' in '{3}' do not have the same number of members."
            }
            Self::InvalidRootComplexType => {
                "The complex types '{0}' and '{1}' do not have the same number of members."
            }
            Self::InvalidComplexType => {
                "The complex type '{0}' in '{1}' and the complex type '{2}' in '{3}' do not have the same number of members."
            }
            Self::InvalidEntityRootTypeArgument => {
                "The entity types '{0}' and '{1}' do not share a common supertype."
            }
            Self::InvalidEntityTypeArgument => {
                "The entity type '{0}' in '{1}' and the entity type '{2}' in '{3}' do not share a common supertype."
            }
            Self::InvalidPlaceholderRootTypeArgument => {
                "The {0} '{1}' and the {2} '{3}' have no common type."
            }
            Self::InvalidPlaceholderTypeArgument => {
                "The {0} '{1}' in '{2}' and the {3} '{4}' in '{5}' have no common type."
            }
            Self::ArgumentTypesAreIncompatible => {
                "The argument types '{0}' and '{1}' are incompatible for this operation."
            }

            Self::GenericSyntaxError => "The query syntax is not valid.",
            Self::StackOverflowInParser => {
                "The query is nested too deeply; the parser stack overflowed."
            }
            Self::InvalidCharacter => "The character '{0}' is not valid in a query.",
            Self::InvalidSelectValueList => {
                "SELECT VALUE can have only one expression in the projection list."
            }
            Self::QueryTextNull => "The query text must not be null.",
            Self::InvalidEmptyQuery => "The query text must not be empty or whitespace.",

            Self::LocalizedTerm => "term",
            Self::LocalizedKeyword => "keyword",
            Self::LocalizedIdentifier => "identifier",
            Self::LocalizedLiteral => "literal",
            Self::LocalizedParameter => "parameter",

            Self::LocalizedRow => "Row",
            Self::LocalizedCollection => "Collection",
            Self::LocalizedReference => "Reference",
            Self::LocalizedEntity => "Entity",
            Self::LocalizedComplex => "Complex",
            Self::LocalizedPrimitive => "Primitive",
            Self::LocalizedType => "Type",

            Self::LocalizedNear => "Near",
            Self::LocalizedLine => "line",
            Self::LocalizedColumn => "column",

            Self::CtxFunction => "function '{0}()'",
            Self::CtxOperator => "operator '{0}'",
            Self::CtxMemberAccess => "member access '{0}'",
            Self::CtxRowConstructor => "row constructor",
            Self::CtxMultisetConstructor => "multiset constructor",
            Self::CtxQueryExpression => "query expression",
            Self::CtxSelectClause => "select clause",
            Self::CtxOrderByClause => "order by clause",

            Self::InRowConstructor => "in a row constructor.",
            Self::InSelectProjectionList => "in the SELECT projection list.",
            Self::InFromClause => "in the FROM clause.",
            Self::InGroupClause => "in the GROUP BY clause.",
        }
    }
}

/// Lookup from message keys to format templates.
///
/// Only [`MessageCatalog::template`] is required; [`MessageCatalog::format`]
/// substitutes positional placeholders. Placeholders without a matching
/// argument are left as written.
pub trait MessageCatalog {
    fn template(&self, key: MessageKey) -> &str;

    fn format(&self, key: MessageKey, args: &[&str]) -> String {
        substitute(self.template(key), args)
    }

    fn phrase(&self, key: MessageKey) -> String {
        self.template(key).to_string()
    }
}

impl<T: MessageCatalog + ?Sized> MessageCatalog for &T {
    fn template(&self, key: MessageKey) -> &str {
        (*self).template(key)
    }
}

/// Catalog backed by [`MessageKey::english`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

impl MessageCatalog for EnglishCatalog {
    fn template(&self, key: MessageKey) -> &str {
        key.english()
    }
}

fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let arg = tail.find('}').and_then(|close| {
            let index: usize = tail[1..close].parse().ok()?;
            Some((close, *args.get(index)?))
        });
        match arg {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
