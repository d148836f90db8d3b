//! Positioned diagnostics.
//!
//! Every failure in this crate is one [`Diagnostic`]: a message, an optional
//! byte offset into the query text, and optional context wording such as
//! `keyword 'FROM'`. Diagnostics are raised, never collected: the first one
//! ends the operation.

mod context;
mod message;
mod printer;

#[cfg(test)]
mod message_tests;
#[cfg(test)]
mod tests;

pub use context::ErrorContext;
pub use message::{EnglishCatalog, MessageCatalog, MessageKey};
pub use printer::DiagnosticPrinter;

use crate::Error;

/// Whether a type diagnostic names only the compared pair or also the
/// nested pair where the trees diverged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Framing {
    Root,
    Nested,
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Generic syntax error or a message reported verbatim by the grammar.
    Syntax,
    /// Character the scanner cannot classify.
    Lexical,
    StackOverflow,

    TypeKindMismatch,
    RowArityMismatch(Framing),
    ComplexArityMismatch(Framing),
    EntityTypeMismatch(Framing),
    PlaceholderTypeMismatch(Framing),
    /// Fallback when no structural culprit was found.
    IncompatibleTypes,

    OverloadResolution,
    DuplicateAlias,
}

/// Coarse error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticClass {
    Syntax,
    StackOverflow,
    TypeIncompatibility,
    OverloadResolution,
    DuplicateAlias,
}

impl DiagnosticKind {
    pub fn class(&self) -> DiagnosticClass {
        match self {
            Self::Syntax | Self::Lexical => DiagnosticClass::Syntax,
            Self::StackOverflow => DiagnosticClass::StackOverflow,
            Self::TypeKindMismatch
            | Self::RowArityMismatch(_)
            | Self::ComplexArityMismatch(_)
            | Self::EntityTypeMismatch(_)
            | Self::PlaceholderTypeMismatch(_)
            | Self::IncompatibleTypes => DiagnosticClass::TypeIncompatibility,
            Self::OverloadResolution => DiagnosticClass::OverloadResolution,
            Self::DuplicateAlias => DiagnosticClass::DuplicateAlias,
        }
    }

    pub fn framing(&self) -> Option<Framing> {
        match self {
            Self::RowArityMismatch(framing)
            | Self::ComplexArityMismatch(framing)
            | Self::EntityTypeMismatch(framing)
            | Self::PlaceholderTypeMismatch(framing) => Some(*framing),
            _ => None,
        }
    }
}

/// A raised, positioned error.
///
/// `message` is the full text: the description followed by
/// `Near {error_context}.` when any context is known.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize)]
#[error("{message}")]
pub struct Diagnostic {
    pub(crate) kind: DiagnosticKind,
    pub(crate) description: String,
    pub(crate) position: Option<usize>,
    pub(crate) context_info: Option<String>,
    pub(crate) command_text: Option<String>,
    pub(crate) line_column: Option<(usize, usize)>,
    pub(crate) error_context: String,
    pub(crate) member_path: Option<String>,
    pub(crate) message: String,
}

impl Diagnostic {
    pub fn build<'c>(
        catalog: &'c dyn MessageCatalog,
        kind: DiagnosticKind,
        description: impl Into<String>,
    ) -> DiagnosticBuilder<'c> {
        DiagnosticBuilder {
            catalog,
            kind,
            description: description.into(),
            position: None,
            context_info: None,
            command_text: None,
            member_path: None,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    /// The error description without context.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Byte offset into the command text.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn context_info(&self) -> Option<&str> {
        self.context_info.as_deref()
    }

    pub fn command_text(&self) -> Option<&str> {
        self.command_text.as_deref()
    }

    /// 1-based line of the position.
    pub fn line(&self) -> Option<usize> {
        self.line_column.map(|(line, _)| line)
    }

    /// 1-based column (in characters) of the position.
    pub fn column(&self) -> Option<usize> {
        self.line_column.map(|(_, column)| column)
    }

    /// `"[{context_info}, ]line L, column C"`, or empty.
    pub fn error_context(&self) -> &str {
        &self.error_context
    }

    /// Dotted member path inside the compared types where they diverged.
    pub fn member_path(&self) -> Option<&str> {
        self.member_path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn printer(&self) -> DiagnosticPrinter<'_, '_> {
        DiagnosticPrinter::new(self)
    }
}

#[must_use = "diagnostic not raised, call .raise()"]
pub struct DiagnosticBuilder<'c> {
    catalog: &'c dyn MessageCatalog,
    kind: DiagnosticKind,
    description: String,
    position: Option<usize>,
    context_info: Option<String>,
    command_text: Option<String>,
    member_path: Option<String>,
}

impl DiagnosticBuilder<'_> {
    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    pub fn context_info(mut self, info: Option<String>) -> Self {
        self.context_info = info.filter(|info| !info.is_empty());
        self
    }

    pub fn command_text(mut self, text: impl Into<String>) -> Self {
        self.command_text = Some(text.into());
        self
    }

    /// Position, context wording and command text of an AST node.
    pub fn err_ctx(mut self, err_ctx: &ErrorContext) -> Self {
        self.position = err_ctx.input_position;
        self.context_info = err_ctx.context_info.clone().filter(|info| !info.is_empty());
        self.command_text = err_ctx.command_text.as_deref().map(str::to_string);
        self
    }

    pub fn member_path(mut self, path: &[String]) -> Self {
        self.member_path = (!path.is_empty()).then(|| path.join("."));
        self
    }

    pub fn finish(self) -> Diagnostic {
        let line_column = match (self.position, self.command_text.as_deref()) {
            (Some(position), Some(text)) => Some(context::line_column(text, position)),
            _ => None,
        };
        let error_context =
            context::render_context(self.catalog, self.context_info.as_deref(), line_column);
        let message = if error_context.is_empty() {
            self.description.clone()
        } else {
            format!(
                "{} {} {}.",
                self.description,
                self.catalog.phrase(MessageKey::LocalizedNear),
                error_context
            )
        };

        Diagnostic {
            kind: self.kind,
            description: self.description,
            position: self.position,
            context_info: self.context_info,
            command_text: self.command_text,
            line_column,
            error_context,
            member_path: self.member_path,
            message,
        }
    }

    pub fn raise(self) -> Error {
        Error::Query(Box::new(self.finish()))
    }
}
