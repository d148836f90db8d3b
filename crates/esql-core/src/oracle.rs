//! Common-type resolution.

use crate::{PrimitiveKind, TypeDescriptor, TypeRef, TypeShape, ancestors, same_node};

/// Read-only view of the type system used by diagnostics.
pub trait MetadataOracle {
    /// Computes a type both `left` and `right` implicitly convert to.
    fn try_get_common_type(&self, left: &TypeRef, right: &TypeRef) -> Option<TypeRef>;
}

impl<T: MetadataOracle + ?Sized> MetadataOracle for &T {
    fn try_get_common_type(&self, left: &TypeRef, right: &TypeRef) -> Option<TypeRef> {
        (*self).try_get_common_type(left, right)
    }
}

/// Structural common-type rules:
///
/// - primitives: the narrowest numeric type both widen to, or equal kinds
/// - rows: same member names in the same order, pairwise common types
/// - collections and references: common element type
/// - entities: nearest shared ancestor in the base-type chain
/// - complex types and placeholders: nominal (same identity)
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralOracle;

impl MetadataOracle for StructuralOracle {
    fn try_get_common_type(&self, left: &TypeRef, right: &TypeRef) -> Option<TypeRef> {
        if same_node(left, right) {
            return Some(left.clone());
        }

        match (left.shape(), right.shape()) {
            (TypeShape::Primitive(l), TypeShape::Primitive(r)) => {
                common_primitive(*l, *r).map(TypeDescriptor::primitive)
            }
            (TypeShape::Row(l), TypeShape::Row(r)) => {
                if l.len() != r.len() {
                    return None;
                }
                let mut members = Vec::with_capacity(l.len());
                for ((l_name, l_ty), (r_name, r_ty)) in l.iter().zip(r.iter()) {
                    if l_name != r_name {
                        return None;
                    }
                    members.push((l_name.clone(), self.try_get_common_type(l_ty, r_ty)?));
                }
                Some(TypeDescriptor::row(members))
            }
            (TypeShape::Collection(l), TypeShape::Collection(r)) => self
                .try_get_common_type(l, r)
                .map(TypeDescriptor::collection),
            (TypeShape::Reference(l), TypeShape::Reference(r)) => {
                self.try_get_common_type(l, r).map(TypeDescriptor::reference)
            }
            (TypeShape::Entity { .. }, TypeShape::Entity { .. }) => ancestors(left)
                .find(|candidate| {
                    ancestors(right).any(|other| candidate.identity() == other.identity())
                })
                .cloned(),
            (TypeShape::Complex(_), TypeShape::Complex(_))
            | (TypeShape::Placeholder, TypeShape::Placeholder) => {
                (left.identity() == right.identity()).then(|| left.clone())
            }
            _ => None,
        }
    }
}

fn common_primitive(left: PrimitiveKind, right: PrimitiveKind) -> Option<PrimitiveKind> {
    if left == right {
        return Some(left);
    }
    PrimitiveKind::NUMERIC_LADDER
        .into_iter()
        .find(|candidate| left.promotes_to(*candidate) && right.promotes_to(*candidate))
}
