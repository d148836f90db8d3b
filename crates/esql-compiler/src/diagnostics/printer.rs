//! Builder-pattern printer for rendering a diagnostic against its query text.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::Diagnostic;

/// Renders a caret-style snippet when the diagnostic carries both a position
/// and its command text; otherwise falls back to the plain message.
pub struct DiagnosticPrinter<'d, 's> {
    diagnostic: &'d Diagnostic,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticPrinter<'d, 's> {
    pub fn new(diagnostic: &'d Diagnostic) -> Self {
        Self {
            diagnostic,
            path: None,
            colored: false,
        }
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let diag = self.diagnostic;
        let (Some(source), Some(position)) = (diag.command_text(), diag.position()) else {
            return write!(w, "{}", diag.message());
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let label = diag.context_info().unwrap_or_else(|| diag.description());
        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(caret_range(source, position)).label(label));

        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let report: Vec<Group> = vec![Level::ERROR.primary_title(diag.description()).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }
}

/// One character at `position`, snapped back to a char boundary.
fn caret_range(source: &str, position: usize) -> std::ops::Range<usize> {
    let mut start = position.min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let width = source[start..].chars().next().map_or(0, char::len_utf8);
    start..start + width
}
