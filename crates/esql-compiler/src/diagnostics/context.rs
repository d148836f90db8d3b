//! Positioned error context and its "line L, column C" rendering.

use std::sync::Arc;

use super::message::{MessageCatalog, MessageKey};

/// Position metadata attached to one AST node.
///
/// `command_text` is shared with every other node produced by the same
/// parse, so a diagnostic raised later can still point into the exact
/// source string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    pub input_position: Option<usize>,
    pub context_info: Option<String>,
    pub command_text: Option<Arc<str>>,
}

impl ErrorContext {
    pub fn new(
        input_position: usize,
        context_info: Option<String>,
        command_text: Arc<str>,
    ) -> Self {
        Self {
            input_position: Some(input_position),
            context_info,
            command_text: Some(command_text),
        }
    }

    pub fn has_context_info(&self) -> bool {
        self.context_info.as_deref().is_some_and(|info| !info.is_empty())
    }
}

/// Line terminators recognized when counting lines.
///
/// `\r` is not one of them; in `\r\n` only the `\n` ends the line.
pub(crate) fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\u{0085}' | '\u{2028}' | '\u{2029}')
}

/// 1-based line and column of byte offset `position` in `text`.
///
/// Columns count characters. Offsets past the end are clamped to the end.
pub(crate) fn line_column(text: &str, position: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for (offset, c) in text.char_indices() {
        if offset >= position {
            break;
        }
        if is_newline(c) {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

/// Renders `"[{info}, ]line L, column C"`.
///
/// Without a position only the info is kept; without either the result is empty.
pub(crate) fn render_context(
    catalog: &dyn MessageCatalog,
    context_info: Option<&str>,
    line_column: Option<(usize, usize)>,
) -> String {
    let mut out = String::new();
    if let Some(info) = context_info.filter(|info| !info.is_empty()) {
        out.push_str(info);
        if line_column.is_some() {
            out.push_str(", ");
        }
    }
    if let Some((line, column)) = line_column {
        out.push_str(&format!(
            "{} {}, {} {}",
            catalog.phrase(MessageKey::LocalizedLine),
            line,
            catalog.phrase(MessageKey::LocalizedColumn),
            column
        ));
    }
    out
}
