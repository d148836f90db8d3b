#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for esql type metadata.
//!
//! Type descriptors form immutable trees shared through [`TypeRef`]. The
//! compiler never mutates them; it only reads them to explain why two types
//! fail to unify. Whether two types *do* unify is answered by a
//! [`MetadataOracle`].

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

mod oracle;


pub use oracle::{MetadataOracle, StructuralOracle};

/// Shared handle to an immutable type descriptor.
///
/// Identity matters: two handles are "the same type node" only when they
/// point at the same allocation (see [`same_node`]).
pub type TypeRef = Arc<TypeDescriptor>;

/// Ordered `name -> type` members of structured types.
pub type Members = IndexMap<String, TypeRef>;

/// Namespace for built-in scalar types.
pub const PRIMITIVE_NAMESPACE: &str = "Edm";

/// Namespace for anonymous structural types (rows, collections, references).
pub const TRANSIENT_NAMESPACE: &str = "Transient";

// ============================================================================
// Kinds
// ============================================================================

/// Closed taxonomy of type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Primitive,
    Row,
    Collection,
    Reference,
    Entity,
    Complex,
    Placeholder,
}

impl TypeKind {
    /// Raw kind name, used where no localized label exists.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Primitive => "PrimitiveType",
            TypeKind::Row => "RowType",
            TypeKind::Collection => "CollectionType",
            TypeKind::Reference => "RefType",
            TypeKind::Entity => "EntityType",
            TypeKind::Complex => "ComplexType",
            TypeKind::Placeholder => "Placeholder",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Int16,
    Int32,
    Int64,
    Decimal,
    Double,
    String,
    DateTime,
    Guid,
    Binary,
}

impl PrimitiveKind {
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "Boolean",
            PrimitiveKind::Byte => "Byte",
            PrimitiveKind::Int16 => "Int16",
            PrimitiveKind::Int32 => "Int32",
            PrimitiveKind::Int64 => "Int64",
            PrimitiveKind::Decimal => "Decimal",
            PrimitiveKind::Double => "Double",
            PrimitiveKind::String => "String",
            PrimitiveKind::DateTime => "DateTime",
            PrimitiveKind::Guid => "Guid",
            PrimitiveKind::Binary => "Binary",
        }
    }

    /// Numeric types ordered from narrowest to widest.
    pub(crate) const NUMERIC_LADDER: [PrimitiveKind; 6] = [
        PrimitiveKind::Byte,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::Decimal,
        PrimitiveKind::Double,
    ];

    /// Whether a value of `self` widens implicitly to `target`.
    ///
    /// Every integer widens to any wider integer, `Decimal` and `Double`.
    /// `Decimal` and `Double` only widen to themselves.
    pub fn promotes_to(&self, target: PrimitiveKind) -> bool {
        if *self == target {
            return true;
        }
        let rank = |k: PrimitiveKind| Self::NUMERIC_LADDER.iter().position(|n| *n == k);
        match (rank(*self), rank(target)) {
            (Some(from), Some(to)) => from < to && from < 4,
            _ => false,
        }
    }
}

// ============================================================================
// Descriptors
// ============================================================================

/// Kind-specific payload of a type descriptor.
#[derive(Debug, Clone)]
pub enum TypeShape {
    Primitive(PrimitiveKind),
    Row(Members),
    Collection(TypeRef),
    Reference(TypeRef),
    Entity {
        members: Members,
        base: Option<TypeRef>,
    },
    Complex(Members),
    Placeholder,
}

/// Immutable node in a structural type tree.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    namespace: String,
    name: String,
    shape: TypeShape,
}

impl TypeDescriptor {
    pub fn primitive(kind: PrimitiveKind) -> TypeRef {
        Arc::new(Self {
            namespace: PRIMITIVE_NAMESPACE.to_string(),
            name: kind.name().to_string(),
            shape: TypeShape::Primitive(kind),
        })
    }

    /// Anonymous row type. The name spells out the members: `rowtype[(a,Edm.Int32)]`.
    pub fn row<N: Into<String>>(members: impl IntoIterator<Item = (N, TypeRef)>) -> TypeRef {
        let members: Members = members.into_iter().map(|(n, t)| (n.into(), t)).collect();
        let name = format!("rowtype[{}]", describe_members(&members));
        Arc::new(Self {
            namespace: TRANSIENT_NAMESPACE.to_string(),
            name,
            shape: TypeShape::Row(members),
        })
    }

    pub fn collection(element: TypeRef) -> TypeRef {
        Arc::new(Self {
            namespace: TRANSIENT_NAMESPACE.to_string(),
            name: format!("collection[{}]", element.full_name()),
            shape: TypeShape::Collection(element),
        })
    }

    pub fn reference(target: TypeRef) -> TypeRef {
        Arc::new(Self {
            namespace: TRANSIENT_NAMESPACE.to_string(),
            name: format!("reference[{}]", target.full_name()),
            shape: TypeShape::Reference(target),
        })
    }

    pub fn entity<N: Into<String>>(
        namespace: impl Into<String>,
        name: impl Into<String>,
        members: impl IntoIterator<Item = (N, TypeRef)>,
        base: Option<TypeRef>,
    ) -> TypeRef {
        Arc::new(Self {
            namespace: namespace.into(),
            name: name.into(),
            shape: TypeShape::Entity {
                members: members.into_iter().map(|(n, t)| (n.into(), t)).collect(),
                base,
            },
        })
    }

    pub fn complex<N: Into<String>>(
        namespace: impl Into<String>,
        name: impl Into<String>,
        members: impl IntoIterator<Item = (N, TypeRef)>,
    ) -> TypeRef {
        Arc::new(Self {
            namespace: namespace.into(),
            name: name.into(),
            shape: TypeShape::Complex(members.into_iter().map(|(n, t)| (n.into(), t)).collect()),
        })
    }

    pub fn placeholder(namespace: impl Into<String>, name: impl Into<String>) -> TypeRef {
        Arc::new(Self {
            namespace: namespace.into(),
            name: name.into(),
            shape: TypeShape::Placeholder,
        })
    }

    pub fn kind(&self) -> TypeKind {
        match self.shape {
            TypeShape::Primitive(_) => TypeKind::Primitive,
            TypeShape::Row(_) => TypeKind::Row,
            TypeShape::Collection(_) => TypeKind::Collection,
            TypeShape::Reference(_) => TypeKind::Reference,
            TypeShape::Entity { .. } => TypeKind::Entity,
            TypeShape::Complex(_) => TypeKind::Complex,
            TypeShape::Placeholder => TypeKind::Placeholder,
        }
    }

    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Short local name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Namespace-qualified name: `Edm.Int32`, `Shop.Customer`.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Identity string used when naming whole types in messages.
    pub fn identity(&self) -> String {
        self.full_name()
    }

    /// Members of row, entity and complex types.
    pub fn members(&self) -> Option<&Members> {
        match &self.shape {
            TypeShape::Row(members)
            | TypeShape::Complex(members)
            | TypeShape::Entity { members, .. } => Some(members),
            _ => None,
        }
    }

    /// Element of collection types, target entity of reference types.
    pub fn element_type(&self) -> Option<&TypeRef> {
        match &self.shape {
            TypeShape::Collection(element) | TypeShape::Reference(element) => Some(element),
            _ => None,
        }
    }

    pub fn base_type(&self) -> Option<&TypeRef> {
        match &self.shape {
            TypeShape::Entity { base, .. } => base.as_ref(),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self.shape {
            TypeShape::Primitive(kind) => Some(kind),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Function known to the metadata, as seen by overload resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionDescriptor {
    pub namespace: String,
    pub name: String,
    pub aggregate: bool,
}

impl FunctionDescriptor {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            aggregate: false,
        }
    }

    pub fn aggregate(mut self) -> Self {
        self.aggregate = true;
        self
    }

    /// Built-in library functions live in the primitive namespace.
    pub fn is_canonical(&self) -> bool {
        self.namespace == PRIMITIVE_NAMESPACE
    }

    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }
}

// ============================================================================
// Traversal
// ============================================================================

/// Reference identity, not structural equality.
pub fn same_node(a: &TypeRef, b: &TypeRef) -> bool {
    Arc::ptr_eq(a, b)
}

/// Iterates `ty` and its entity base types, nearest first.
pub fn ancestors<'a>(ty: &'a TypeRef) -> impl Iterator<Item = &'a TypeRef> {
    std::iter::successors(Some(ty), |t: &&'a TypeRef| {
        let t: &'a TypeRef = *t;
        t.base_type()
    })
}

fn describe_members(members: &Members) -> String {
    members
        .iter()
        .map(|(name, ty)| format!("({},{})", name, ty.full_name()))
        .collect::<Vec<_>>()
        .join(",")
}
