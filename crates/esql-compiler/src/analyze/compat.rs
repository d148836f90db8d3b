//! Explains why two types failed to unify.
//!
//! Both trees are walked in lockstep from the root pair. The first node pair
//! that cannot be reconciled is reported; nothing after it is inspected.
//! Wording is root-framed while the left node is the root node itself
//! (pointer identity), and nested-framed below it, naming both the local
//! pair and the root pair.

use esql_core::{Members, TypeRef, TypeShape, same_node};
use tracing::{debug, trace};

use super::Reporter;
use super::classify::{readable_kind, readable_name};
use crate::diagnostics::{Diagnostic, DiagnosticKind, ErrorContext, Framing, MessageKey};
use crate::{Error, Result};

/// Which arity template pair a structured comparison uses.
#[derive(Debug, Clone, Copy)]
enum Structured {
    Row,
    Complex,
}

impl Reporter<'_> {
    /// Diagnostic explaining why `left` and `right` have no common type.
    ///
    /// Falls back to a generic incompatibility naming both type identities
    /// when the walk finds no structural culprit.
    pub fn find_incompatibility(
        &self,
        err_ctx: &ErrorContext,
        left: &TypeRef,
        right: &TypeRef,
    ) -> Error {
        let mut path = Vec::new();
        if let Err(err) = self.compare(err_ctx, left, right, left, right, &mut path) {
            return err;
        }

        debug!(left = %left, right = %right, "no structural culprit, generic fallback");
        Diagnostic::build(
            self.catalog,
            DiagnosticKind::IncompatibleTypes,
            self.catalog.format(
                MessageKey::ArgumentTypesAreIncompatible,
                &[left.identity().as_str(), right.identity().as_str()],
            ),
        )
        .err_ctx(err_ctx)
        .raise()
    }

    /// Recursive walk. `Ok(())` means the pair below `left`/`right` was
    /// reconciled; `path` holds the member names from the root down.
    pub(crate) fn compare(
        &self,
        err_ctx: &ErrorContext,
        root_left: &TypeRef,
        root_right: &TypeRef,
        left: &TypeRef,
        right: &TypeRef,
        path: &mut Vec<String>,
    ) -> Result<()> {
        let framing = if same_node(root_left, left) {
            Framing::Root
        } else {
            Framing::Nested
        };
        trace!(left = %left, right = %right, ?framing, depth = path.len(), "compare");

        if left.kind() != right.kind() {
            let args = [
                readable_kind(self.catalog, left),
                readable_name(left),
                readable_kind(self.catalog, right),
                readable_name(right),
            ];
            return Err(self.raise(
                err_ctx,
                path,
                DiagnosticKind::TypeKindMismatch,
                MessageKey::TypeKindMismatch,
                &args,
            ));
        }

        let ctx = Pair {
            err_ctx,
            root_left,
            root_right,
            left,
            right,
            framing,
        };

        match (left.shape(), right.shape()) {
            (TypeShape::Row(l), TypeShape::Row(r)) => {
                self.compare_members(&ctx, Structured::Row, l, r, path)
            }
            (TypeShape::Complex(l), TypeShape::Complex(r)) => {
                self.compare_members(&ctx, Structured::Complex, l, r, path)
            }
            (TypeShape::Collection(l), TypeShape::Collection(r))
            | (TypeShape::Reference(l), TypeShape::Reference(r)) => {
                self.compare(err_ctx, root_left, root_right, l, r, path)
            }
            (TypeShape::Entity { .. }, TypeShape::Entity { .. }) => {
                if self.oracle.try_get_common_type(left, right).is_some() {
                    return Ok(());
                }
                let (key, args) = match framing {
                    Framing::Root => (
                        MessageKey::InvalidEntityRootTypeArgument,
                        vec![readable_name(left), readable_name(right)],
                    ),
                    Framing::Nested => (
                        MessageKey::InvalidEntityTypeArgument,
                        ctx.nested_names(),
                    ),
                };
                Err(self.raise(
                    err_ctx,
                    path,
                    DiagnosticKind::EntityTypeMismatch(framing),
                    key,
                    &args,
                ))
            }
            _ => {
                if self.oracle.try_get_common_type(left, right).is_some() {
                    return Ok(());
                }
                let (key, args) = match framing {
                    Framing::Root => (
                        MessageKey::InvalidPlaceholderRootTypeArgument,
                        vec![
                            readable_kind(self.catalog, left),
                            readable_name(left),
                            readable_kind(self.catalog, right),
                            readable_name(right),
                        ],
                    ),
                    Framing::Nested => (
                        MessageKey::InvalidPlaceholderTypeArgument,
                        vec![
                            readable_kind(self.catalog, left),
                            readable_name(left),
                            readable_name(root_left),
                            readable_kind(self.catalog, right),
                            readable_name(right),
                            readable_name(root_right),
                        ],
                    ),
                };
                Err(self.raise(
                    err_ctx,
                    path,
                    DiagnosticKind::PlaceholderTypeMismatch(framing),
                    key,
                    &args,
                ))
            }
        }
    }

    /// Arity check, then pairwise recursion in declaration order.
    fn compare_members(
        &self,
        ctx: &Pair<'_>,
        structured: Structured,
        left: &Members,
        right: &Members,
        path: &mut Vec<String>,
    ) -> Result<()> {
        if left.len() != right.len() {
            let (key, kind) = match (structured, ctx.framing) {
                (Structured::Row, Framing::Root) => (
                    MessageKey::InvalidRootRowType,
                    DiagnosticKind::RowArityMismatch(Framing::Root),
                ),
                (Structured::Row, Framing::Nested) => (
                    MessageKey::InvalidRowType,
                    DiagnosticKind::RowArityMismatch(Framing::Nested),
                ),
                (Structured::Complex, Framing::Root) => (
                    MessageKey::InvalidRootComplexType,
                    DiagnosticKind::ComplexArityMismatch(Framing::Root),
                ),
                (Structured::Complex, Framing::Nested) => (
                    MessageKey::InvalidComplexType,
                    DiagnosticKind::ComplexArityMismatch(Framing::Nested),
                ),
            };
            let args = match ctx.framing {
                Framing::Root => vec![readable_name(ctx.left), readable_name(ctx.right)],
                Framing::Nested => ctx.nested_names(),
            };
            return Err(self.raise(ctx.err_ctx, path, kind, key, &args));
        }

        for ((name, l), (_, r)) in left.iter().zip(right.iter()) {
            path.push(name.clone());
            self.compare(ctx.err_ctx, ctx.root_left, ctx.root_right, l, r, path)?;
            path.pop();
        }
        Ok(())
    }

    fn raise(
        &self,
        err_ctx: &ErrorContext,
        path: &[String],
        kind: DiagnosticKind,
        key: MessageKey,
        args: &[String],
    ) -> Error {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let err = Diagnostic::build(self.catalog, kind, self.catalog.format(key, &args))
            .err_ctx(err_ctx)
            .member_path(path)
            .raise();
        debug!(?kind, path = %path.join("."), "type mismatch");
        err
    }
}

/// The pair under comparison and the root pair it descends from.
struct Pair<'t> {
    err_ctx: &'t ErrorContext,
    root_left: &'t TypeRef,
    root_right: &'t TypeRef,
    left: &'t TypeRef,
    right: &'t TypeRef,
    framing: Framing,
}

impl Pair<'_> {
    /// `[left, root left, right, root right]` readable names.
    fn nested_names(&self) -> Vec<String> {
        vec![
            readable_name(self.left),
            readable_name(self.root_left),
            readable_name(self.right),
            readable_name(self.root_right),
        ]
    }
}
