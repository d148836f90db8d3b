//! Overload-resolution and duplicate-alias diagnostics.

use esql_core::{FunctionDescriptor, TypeRef};
use tracing::debug;

use super::Reporter;
use crate::Error;
use crate::diagnostics::{Diagnostic, DiagnosticKind, ErrorContext, MessageKey};
use crate::parser::Node;

impl Reporter<'_> {
    /// No overload of `function` accepts `arg_types`.
    ///
    /// Positioned at the call, with context naming the function. `None`
    /// argument types (untyped nulls) are spelled `NULL`.
    pub fn report_overload_failure(
        &self,
        call: &Node,
        function: &FunctionDescriptor,
        arg_types: &[Option<TypeRef>],
    ) -> Error {
        let signature = format!(
            "{}({})",
            function.name,
            arg_types
                .iter()
                .map(|ty| ty.as_ref().map_or_else(|| "NULL".to_string(), |ty| ty.full_name()))
                .collect::<Vec<_>>()
                .join(", ")
        );

        let key = match (function.aggregate, function.is_canonical()) {
            (false, false) => MessageKey::NoFunctionOverloadMatch,
            (true, false) => MessageKey::NoAggrFunctionOverloadMatch,
            (false, true) => MessageKey::NoCanonicalFunctionOverloadMatch,
            (true, true) => MessageKey::NoCanonicalAggrFunctionOverloadMatch,
        };
        debug!(function = %function.full_name(), %signature, "no matching overload");

        let message = self
            .catalog
            .format(key, &[function.namespace.as_str(), function.name.as_str(), signature.as_str()]);
        let context = self.catalog.format(MessageKey::CtxFunction, &[function.name.as_str()]);
        Diagnostic::build(self.catalog, DiagnosticKind::OverloadResolution, message)
            .err_ctx(&call.err_ctx)
            .context_info(Some(context))
            .raise()
    }

    /// `alias` is already bound in the construct described by `context`
    /// (a fragment such as "in the FROM clause.").
    pub fn report_duplicate_alias(
        &self,
        alias: &str,
        err_ctx: &ErrorContext,
        context: &str,
    ) -> Error {
        debug!(alias, "duplicate alias");
        let message = format!(
            "{} {}",
            self.catalog.format(MessageKey::AliasNameAlreadyUsed, &[alias]),
            context
        );
        Diagnostic::build(self.catalog, DiagnosticKind::DuplicateAlias, message)
            .err_ctx(err_ctx)
            .raise()
    }
}
