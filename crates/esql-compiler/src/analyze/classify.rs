//! Human-readable type names and kind labels for messages.

use esql_core::{TypeDescriptor, TypeKind};

use crate::diagnostics::{MessageCatalog, MessageKey};

/// Short name for anonymous structural types, full name for everything else.
pub fn readable_name(ty: &TypeDescriptor) -> String {
    match ty.kind() {
        TypeKind::Row | TypeKind::Collection | TypeKind::Reference => ty.name().to_string(),
        _ => ty.full_name(),
    }
}

/// Kind label followed by the word for "type": `Row Type`, `Entity Type`.
pub fn readable_kind(catalog: &dyn MessageCatalog, ty: &TypeDescriptor) -> String {
    let kind = ty.kind();
    let label = match kind {
        TypeKind::Row => catalog.phrase(MessageKey::LocalizedRow),
        TypeKind::Collection => catalog.phrase(MessageKey::LocalizedCollection),
        TypeKind::Reference => catalog.phrase(MessageKey::LocalizedReference),
        TypeKind::Entity => catalog.phrase(MessageKey::LocalizedEntity),
        TypeKind::Complex => catalog.phrase(MessageKey::LocalizedComplex),
        TypeKind::Primitive => catalog.phrase(MessageKey::LocalizedPrimitive),
        TypeKind::Placeholder => kind.as_str().to_string(),
    };
    format!("{} {}", label, catalog.phrase(MessageKey::LocalizedType))
}
